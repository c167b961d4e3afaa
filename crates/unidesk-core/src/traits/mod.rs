//! Core traits defined in `unidesk-core` and implemented by other crates.

pub mod entity;
pub mod repository;
pub mod store;
pub mod token;

pub use entity::{Entity, UpdateRequest, WriteRequest};
pub use repository::Repository;
pub use store::{DeleteOutcome, EntityStore, RowState};
pub use token::TokenGenerator;
