//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! Diesel with async support through `diesel-async` and `bb8` pooling.
//!
//! - Repositories only translate between Diesel rows and domain records.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database errors are classified once and mapped to port errors; driver
//!   messages are logged at debug level, never returned.
//!
//! # Example
//!
//! ```ignore
//! use casebook::outbound::persistence::{DbPool, DieselProjectRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/casebook")).await?;
//! let projects = DieselProjectRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_project_repository;
mod diesel_test_case_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_test_case_repository::DieselTestCaseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
