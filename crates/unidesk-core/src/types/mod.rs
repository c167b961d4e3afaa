//! Core type definitions used across the Unidesk workspace.

pub mod filter;
pub mod pagination;
pub mod record;
pub mod sorting;
pub mod value;
pub mod visibility;
pub mod write;

pub use filter::{Comparison, FilterExpr};
pub use pagination::{PageRequest, Paginator};
pub use record::Record;
pub use sorting::{SortDirection, SortField};
pub use value::Value;
pub use visibility::{DeletionState, Visibility};
pub use write::{DeleteRequest, WriteResult, WriteValues};
