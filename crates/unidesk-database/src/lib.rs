//! # unidesk-database
//!
//! Persistence for Unidesk: the PostgreSQL pool and migrations, the SQL
//! compiler for query plans, the [`PgStore`] and in-process
//! [`MemoryStore`] implementations of `EntityStore`, the optimistic
//! concurrency gate and the generic entity repository built on top.

pub mod connection;
pub mod error;
pub mod gate;
pub mod migration;
pub mod repositories;
pub mod sql;
pub mod store;
pub mod token;

pub use connection::DatabasePool;
pub use repositories::{EntityRepository, Repositories};
pub use store::{MemoryStore, PgStore};
pub use token::HexTokenGenerator;
