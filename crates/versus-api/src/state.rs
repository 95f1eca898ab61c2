//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/provider traits, but AppState pins
//! them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use versus_core::service::catalog::CatalogService;
use versus_core::service::taste::TasteService;
use versus_core::service::user::UserService;
use versus_core::service::vote::VoteService;
use versus_infra::config::{load_config, resolve_data_dir, resolve_limits};
use versus_infra::content::igdb::IgdbContentProvider;
use versus_infra::sqlite::choice::SqliteChoiceRepository;
use versus_infra::sqlite::item::SqliteItemRepository;
use versus_infra::sqlite::pool::{DatabasePool, database_url};
use versus_infra::sqlite::user::SqliteUserRepository;
use versus_types::config::VersusConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteTasteService =
    TasteService<SqliteChoiceRepository, SqliteItemRepository, SqliteUserRepository>;

pub type ConcreteVoteService =
    VoteService<SqliteChoiceRepository, SqliteItemRepository, SqliteUserRepository>;

pub type ConcreteCatalogService = CatalogService<SqliteItemRepository, IgdbContentProvider>;

pub type ConcreteUserService = UserService<SqliteUserRepository, SqliteItemRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub taste_service: Arc<ConcreteTasteService>,
    pub vote_service: Arc<ConcreteVoteService>,
    pub catalog_service: Arc<ConcreteCatalogService>,
    pub user_service: Arc<ConcreteUserService>,
    pub config: Arc<VersusConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let provider = IgdbContentProvider::from_env(&config.content_provider)?;

        Ok(Self::from_parts(db_pool, config, provider, data_dir))
    }

    /// Wire services over an existing pool and provider.
    pub fn from_parts(
        db_pool: DatabasePool,
        config: VersusConfig,
        provider: IgdbContentProvider,
        data_dir: PathBuf,
    ) -> Self {
        let choices = || SqliteChoiceRepository::new(db_pool.clone());
        let items = || SqliteItemRepository::new(db_pool.clone());
        let users = || SqliteUserRepository::new(db_pool.clone());

        let taste_service = TasteService::new(choices(), items(), users(), resolve_limits(&config));
        let vote_service = VoteService::new(choices(), items(), users());
        let catalog_service = CatalogService::new(items(), provider);
        let user_service = UserService::new(users(), items());

        Self {
            taste_service: Arc::new(taste_service),
            vote_service: Arc::new(vote_service),
            catalog_service: Arc::new(catalog_service),
            user_service: Arc::new(user_service),
            config: Arc::new(config),
            data_dir,
        }
    }
}
