//! Generic repository trait for entity access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::types::pagination::Paginator;
use crate::types::record::Record;
use crate::types::write::{DeleteRequest, WriteResult};

/// Entity access facade.
///
/// Defined per entity type so every repository is strongly typed over its
/// own requests. Reads return shaped [`Record`]s; callers convert them into
/// typed partial models with [`Paginator::try_map`].
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync + 'static {
    /// List rows matching a get request.
    async fn list(&self, request: &E::Get) -> AppResult<Paginator<Record>>;

    /// Fetch one row by id through the list path with `size = 1`.
    async fn get_by_id(&self, id: i64, select: &[String]) -> AppResult<Paginator<Record>>;

    /// Insert a row and return its id and initial guid.
    async fn create(&self, request: &E::Create) -> AppResult<WriteResult>;

    /// Apply a guarded update, rotating the guid.
    async fn update(&self, request: &E::Update) -> AppResult<WriteResult>;

    /// Apply a guarded soft delete. The guid is left unchanged.
    async fn delete(&self, request: &DeleteRequest) -> AppResult<WriteResult>;
}
