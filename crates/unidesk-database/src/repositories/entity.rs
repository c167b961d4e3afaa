//! Generic entity repository.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use unidesk_core::config::QueryConfig;
use unidesk_core::query::{ListParams, QueryCompiler};
use unidesk_core::registry::EntityDescriptor;
use unidesk_core::result::AppResult;
use unidesk_core::traits::{
    Entity, EntityStore, Repository, TokenGenerator, UpdateRequest, WriteRequest,
};
use unidesk_core::types::{DeleteRequest, Paginator, Record, Value, WriteResult};

use crate::gate::{ConcurrencyGate, GuardedOp};

/// Repository for one entity type over any [`EntityStore`].
///
/// Reads compile the request into a plan and run it as one `(rows, total)`
/// fetch. Writes go through the concurrency gate: the guid comparison is
/// part of the write itself and only a miss triggers the state read.
pub struct EntityRepository<E> {
    store: Arc<dyn EntityStore>,
    tokens: Arc<dyn TokenGenerator>,
    compiler: QueryCompiler,
    gate: ConcurrencyGate,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityRepository<E> {
    /// Create a repository.
    pub fn new(
        store: Arc<dyn EntityStore>,
        tokens: Arc<dyn TokenGenerator>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            store,
            tokens,
            compiler: QueryCompiler::new(config.clone()),
            gate: ConcurrencyGate::new(config.delete_guid_mismatch),
            _entity: PhantomData,
        }
    }

    fn entity() -> &'static EntityDescriptor {
        E::descriptor()
    }

    /// Validate a payload and map its fields onto writable columns.
    fn columns(request: &impl WriteRequest) -> AppResult<Vec<(&'static str, Value)>> {
        request.validate()?;
        let entity = Self::entity();
        request
            .values()
            .into_iter()
            .map(|(field, value)| entity.writable_column(field).map(|column| (column, value)))
            .collect()
    }
}

impl<E> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tokens: Arc::clone(&self.tokens),
            compiler: self.compiler.clone(),
            gate: self.gate,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for EntityRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository")
            .field("entity", &Self::entity().name)
            .field("compiler", &self.compiler)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for EntityRepository<E> {
    #[instrument(skip(self, request), fields(entity = E::descriptor().name))]
    async fn list(&self, request: &E::Get) -> AppResult<Paginator<Record>> {
        let plan = self.compiler.compile(Self::entity(), request)?;
        let (rows, total) = self.store.fetch_page(&plan).await?;
        Ok(Paginator::new(rows, &plan.page, Some(total)))
    }

    #[instrument(skip(self, select), fields(entity = E::descriptor().name))]
    async fn get_by_id(&self, id: i64, select: &[String]) -> AppResult<Paginator<Record>> {
        let params = ListParams::by_id(id, select);
        let plan = self.compiler.compile(Self::entity(), &params)?;
        let (rows, total) = self.store.fetch_page(&plan).await?;
        Ok(Paginator::new(rows, &plan.page, Some(total)))
    }

    #[instrument(skip(self, request), fields(entity = E::descriptor().name))]
    async fn create(&self, request: &E::Create) -> AppResult<WriteResult> {
        let entity = Self::entity();
        let columns = Self::columns(request)?;
        let guid = self.tokens.generate();
        let id = self.store.insert(entity, &columns, &guid).await?;

        info!(entity = entity.name, id, "Created row");
        Ok(WriteResult { id, guid })
    }

    #[instrument(skip(self, request), fields(entity = E::descriptor().name, id = request.id()))]
    async fn update(&self, request: &E::Update) -> AppResult<WriteResult> {
        let entity = Self::entity();
        let id = request.id();
        let columns = Self::columns(request)?;
        let guid = self.tokens.generate();

        if self
            .store
            .update_if_current(entity, id, request.guid(), &columns, &guid)
            .await?
        {
            info!(entity = entity.name, id, fields = columns.len(), "Updated row");
            return Ok(WriteResult { id, guid });
        }

        let state = self.store.fetch_state(entity, id).await?;
        let err = self
            .gate
            .reject(entity, id, GuardedOp::Update, state.as_ref(), request.guid());
        warn!(entity = entity.name, id, kind = %err.kind, "Update rejected");
        Err(err)
    }

    #[instrument(skip(self, request), fields(entity = E::descriptor().name, id = request.id))]
    async fn delete(&self, request: &DeleteRequest) -> AppResult<WriteResult> {
        let entity = Self::entity();
        let id = request.id;

        let outcome = self
            .store
            .delete_if_current(entity, id, &request.guid)
            .await?;
        if outcome.deleted {
            info!(
                entity = entity.name,
                id,
                cascaded = outcome.cascaded,
                "Deleted row"
            );
            return Ok(WriteResult {
                id,
                guid: request.guid.clone(),
            });
        }

        let state = self.store.fetch_state(entity, id).await?;
        let err = self
            .gate
            .reject(entity, id, GuardedOp::Delete, state.as_ref(), &request.guid);
        warn!(entity = entity.name, id, kind = %err.kind, "Delete rejected");
        Err(err)
    }
}
