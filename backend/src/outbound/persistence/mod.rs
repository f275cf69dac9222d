//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the domain's user repository port backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! - Repository methods only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and the table definition (`schema.rs`) stay
//!   private to this module.
//! - Store failures are mapped to `UserPersistenceError`; empty results become
//!   `Lookup::NotFound`.
//!
//! # Example
//!
//! ```ignore
//! use user_service::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool, tracing::info_span!("user_repository"));
//! ```

mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod user_error_mapping;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
