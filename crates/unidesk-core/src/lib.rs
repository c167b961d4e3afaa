//! # unidesk-core
//!
//! Core crate for the Unidesk administrative backend. Contains the field
//! registry, the filter/sort compiler, pagination and visibility types,
//! the store and token traits, configuration schemas, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Unidesk crates.

pub mod config;
pub mod error;
pub mod query;
pub mod registry;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
