//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`, and every database failure is mapped to the owning port's
//! error type.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselDiaryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/diary")).await?;
//! let diaries = DieselDiaryRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_diary_repository;
mod diesel_member_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_diary_repository::DieselDiaryRepository;
pub use diesel_member_repository::DieselMemberRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
