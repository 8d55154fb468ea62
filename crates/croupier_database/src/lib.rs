//! PostgreSQL integration for Croupier.
//!
//! This crate persists the "last shown" ledger that drives recency weighting
//! and stores the alias table used by the command parser.
//!
//! # Features
//!
//! - Diesel-based PostgreSQL ledger behind an r2d2 pool
//! - Embedded migrations for the `posts` and `names` tables
//! - An in-memory ledger with the same semantics for tests and dry runs
//!
//! # Example
//!
//! ```rust,no_run
//! use croupier_database::{PostgresLedger, establish_pool, run_migrations};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = establish_pool("postgres://localhost/croupier", 4)?;
//! run_migrations(&pool)?;
//! let ledger = PostgresLedger::new(pool);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aliases;
mod connection;
mod memory;
mod models;
mod postgres;

/// Diesel table definitions.
pub mod schema;

pub use aliases::load_aliases;
pub use connection::{PgPool, database_url_from_env, establish_pool, run_migrations};
pub use memory::MemoryLedger;
pub use models::{NameRow, PostRow};
pub use postgres::PostgresLedger;

use croupier_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
