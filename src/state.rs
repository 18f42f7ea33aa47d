use crate::config::{AppConfig, StorageKind};
use crate::db;
use crate::users::{
    memory::InMemoryUserRepository,
    repo::{PgUserRepository, UserRepository},
    UserService,
};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: UserService,
}

impl AppState {
    /// Builds the repository selected by `config.storage` and wires the service.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let repo: Arc<dyn UserRepository> = match config.storage {
            StorageKind::Postgres => {
                let db_cfg = config
                    .database
                    .as_ref()
                    .context("DATABASE_URL is required for postgres storage")?;
                let pool = db::connect(db_cfg).await?;
                db::migrate(&pool).await?;
                Arc::new(PgUserRepository::new(pool))
            }
            StorageKind::Memory => {
                tracing::warn!("using in-memory storage; data is lost on restart");
                Arc::new(InMemoryUserRepository::new())
            }
        };

        Ok(Self::from_parts(Arc::new(config), repo))
    }

    pub fn from_parts(config: Arc<AppConfig>, repo: Arc<dyn UserRepository>) -> Self {
        Self {
            config,
            users: UserService::new(repo),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(AppConfig::in_memory()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}
