pub mod entity;
pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::config::{DatabaseConfig, StorageBackend};

pub use entity::{Entity, EntityId, EntityMeta, KeyKind};
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRepository;
pub use models::{Article, HelpRequest, MenuItem, MenuItemReview, Organization, RecommendationRequest};
pub use repository::{PgRepository, Repository};

/// One repository per entity, plus the pool behind them when running on Postgres
#[derive(Clone)]
pub struct Repositories {
    pub articles: Arc<dyn Repository<Article>>,
    pub recommendation_requests: Arc<dyn Repository<RecommendationRequest>>,
    pub menu_items: Arc<dyn Repository<MenuItem>>,
    pub organizations: Arc<dyn Repository<Organization>>,
    pub menu_item_reviews: Arc<dyn Repository<MenuItemReview>>,
    pub help_requests: Arc<dyn Repository<HelpRequest>>,
    pub pool: Option<PgPool>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            articles: Arc::new(MemoryRepository::new()),
            recommendation_requests: Arc::new(MemoryRepository::new()),
            menu_items: Arc::new(MemoryRepository::new()),
            organizations: Arc::new(MemoryRepository::new()),
            menu_item_reviews: Arc::new(MemoryRepository::new()),
            help_requests: Arc::new(MemoryRepository::new()),
            pool: None,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            articles: Arc::new(PgRepository::new(pool.clone())),
            recommendation_requests: Arc::new(PgRepository::new(pool.clone())),
            menu_items: Arc::new(PgRepository::new(pool.clone())),
            organizations: Arc::new(PgRepository::new(pool.clone())),
            menu_item_reviews: Arc::new(PgRepository::new(pool.clone())),
            help_requests: Arc::new(PgRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Build the configured backend, connecting and migrating when it is Postgres
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage; rows are lost on restart");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(config).await?;
                if config.run_migrations {
                    DatabaseManager::migrate(&pool).await?;
                }
                Ok(Self::postgres(pool))
            }
        }
    }

    /// Store liveness; the in-memory backend is always up
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        match &self.pool {
            Some(pool) => DatabaseManager::health_check(pool).await,
            None => Ok(()),
        }
    }
}
