//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered members.
    members (id) {
        id -> Int8,
        email -> Varchar,
        name -> Varchar,
        profile_url -> Nullable<Text>,
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Diary entries, at most one per member per calendar day.
    ///
    /// `created_at` is a naive local timestamp; a unique expression index on
    /// `(created_by, created_at::date)` enforces the per-day rule.
    diaries (id) {
        id -> Int8,
        created_by -> Int8,
        title -> Varchar,
        content -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(diaries -> members (created_by));
diesel::allow_tables_to_appear_in_same_query!(diaries, members);
