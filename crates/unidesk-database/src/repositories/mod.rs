//! Repository implementations for all Unidesk entities.

pub mod entity;

use std::sync::Arc;

use sqlx::PgPool;

use unidesk_core::config::QueryConfig;
use unidesk_core::traits::{EntityStore, TokenGenerator};
use unidesk_entity::{Department, Honor, Publication, Role, Teacher, User};

use crate::store::{MemoryStore, PgStore};
use crate::token::HexTokenGenerator;

pub use entity::EntityRepository;

/// One repository per entity, sharing a store and token generator.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Roles.
    pub roles: EntityRepository<Role>,
    /// Users.
    pub users: EntityRepository<User>,
    /// Departments.
    pub departments: EntityRepository<Department>,
    /// Teachers.
    pub teachers: EntityRepository<Teacher>,
    /// Publications.
    pub publications: EntityRepository<Publication>,
    /// Honors.
    pub honors: EntityRepository<Honor>,
}

impl Repositories {
    /// Build every repository over one store.
    pub fn new(
        store: Arc<dyn EntityStore>,
        tokens: Arc<dyn TokenGenerator>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            roles: EntityRepository::new(Arc::clone(&store), Arc::clone(&tokens), config),
            users: EntityRepository::new(Arc::clone(&store), Arc::clone(&tokens), config),
            departments: EntityRepository::new(Arc::clone(&store), Arc::clone(&tokens), config),
            teachers: EntityRepository::new(Arc::clone(&store), Arc::clone(&tokens), config),
            publications: EntityRepository::new(Arc::clone(&store), Arc::clone(&tokens), config),
            honors: EntityRepository::new(store, tokens, config),
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: PgPool, config: &QueryConfig) -> Self {
        Self::new(
            Arc::new(PgStore::new(pool)),
            Arc::new(HexTokenGenerator::new()),
            config,
        )
    }

    /// Repositories over a fresh in-process store.
    pub fn in_memory(config: &QueryConfig) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(HexTokenGenerator::new()),
            config,
        )
    }
}
