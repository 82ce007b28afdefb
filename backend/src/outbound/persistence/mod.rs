//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the exercise repository port backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) are internal;
//! the domain only ever sees [`crate::domain::Exercise`].
//!
//! # Example
//!
//! ```no_run
//! use exercise_library::outbound::persistence::{
//!     DbPool, DieselExerciseRepository, PoolConfig,
//! };
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/exercises")).await?;
//! let repo = DieselExerciseRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_exercise_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_exercise_repository::DieselExerciseRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
