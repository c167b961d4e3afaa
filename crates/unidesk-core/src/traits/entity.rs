//! Per-entity request contracts.

use serde::de::DeserializeOwned;

use crate::query::GetRequest;
use crate::registry::EntityDescriptor;
use crate::result::AppResult;
use crate::types::value::Value;

/// A create or update payload.
pub trait WriteRequest: Send + Sync {
    /// Field values to write, keyed by public field name. Absent optional
    /// fields are left out.
    fn values(&self) -> Vec<(&'static str, Value)>;

    /// Domain checks beyond field writability.
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

/// An update payload, guarded by the guid the caller last read.
pub trait UpdateRequest: WriteRequest {
    /// Row id.
    fn id(&self) -> i64;

    /// Expected guid.
    fn guid(&self) -> &str;
}

/// Binds an entity's descriptor to its request types.
pub trait Entity: Send + Sync + 'static {
    /// List request.
    type Get: GetRequest + DeserializeOwned + Default;
    /// Create payload.
    type Create: WriteRequest + DeserializeOwned;
    /// Update payload.
    type Update: UpdateRequest + DeserializeOwned;

    /// The entity's static field registry entry.
    fn descriptor() -> &'static EntityDescriptor;
}
