//! Application state - shared across all handlers.

use std::sync::Arc;

use press_core::ports::{
    CategoryRepository, PageRepository, PostRepository, SeoMetadataRepository, TagRepository,
    UserRepository,
};
use press_infra::database::{
    DatabaseConfig, DbErr, PostgresCategoryRepository, PostgresPageRepository,
    PostgresPostRepository, PostgresSeoMetadataRepository, PostgresTagRepository,
    PostgresUserRepository, connect,
};

/// Shared application state. Every handler talks to storage through
/// these trait objects, never through a connection directly.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub pages: Arc<dyn PageRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub seo: Arc<dyn SeoMetadataRepository>,
}

impl AppState {
    /// Connect to the database and build the repository handles.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = connect(config).await?;

        let state = Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            pages: Arc::new(PostgresPageRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            seo: Arc::new(PostgresSeoMetadataRepository::new(db)),
        };

        tracing::info!("Application state initialized");

        Ok(state)
    }
}
