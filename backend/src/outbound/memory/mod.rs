//! In-process adapters used when no database is configured.
//!
//! They honour the same port contracts as the PostgreSQL adapters, including
//! the per-day uniqueness rule, so the server and the integration tests
//! behave identically without a database.

mod diary;
mod member;

pub use diary::InMemoryDiaryRepository;
pub use member::InMemoryMemberRepository;
