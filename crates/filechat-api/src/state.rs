//! Application state wiring the chat service together.
//!
//! `ChatService` is generic over its repository; AppState pins it to the
//! SQLite implementation and injects whichever completion provider the
//! configuration selects.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use filechat_core::chat::service::ChatService;
use filechat_infra::config::{load_global_config, resolve_data_dir, resolve_database_url};
use filechat_infra::llm::resolve_provider;
use filechat_infra::sqlite::chat_record::SqliteChatRecordRepository;
use filechat_infra::sqlite::pool::DatabasePool;
use filechat_types::config::GlobalConfig;

/// Chat service pinned to the SQLite repository.
pub type ConcreteChatService = ChatService<SqliteChatRecordRepository>;

/// Shared application state used by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize from the environment: resolve the data directory, load
    /// `config.toml`, connect to the DB, and resolve the provider.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        Self::from_config(config, data_dir, |name| std::env::var(name).ok()).await
    }

    /// Wire state from an explicit configuration.
    ///
    /// `lookup_env` resolves the API-key variable named in the config.
    pub async fn from_config<F>(
        config: GlobalConfig,
        data_dir: PathBuf,
        lookup_env: F,
    ) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_url = resolve_database_url(&config, &data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        let provider = resolve_provider(&config, lookup_env)?;
        let chat_service = ChatService::new(SqliteChatRecordRepository::new(db_pool.clone()), provider)
            .with_pacing_delay(Duration::from_millis(config.pacing_delay_ms));

        tracing::debug!(
            data_dir = %data_dir.display(),
            pacing_delay_ms = config.pacing_delay_ms,
            "Application state initialized"
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}
