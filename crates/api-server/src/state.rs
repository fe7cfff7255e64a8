//! Application state

use std::sync::Arc;

use todo_core::task::{MemoryTaskStore, SqliteTaskStore, TaskRepository};
use todo_core::usecase::TaskUseCases;

use crate::config::{Config, StoreKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    use_cases: TaskUseCases,
    store_kind: StoreKind,
}

impl AppState {
    /// Wire the use cases to an already opened store
    pub fn new(repo: Arc<dyn TaskRepository>, store_kind: StoreKind) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                use_cases: TaskUseCases::new(repo),
                store_kind,
            }),
        }
    }

    /// Open the store selected by the configuration
    pub fn from_config(config: &Config) -> todo_core::Result<Self> {
        let repo: Arc<dyn TaskRepository> = match config.store {
            StoreKind::Sqlite => Arc::new(SqliteTaskStore::open(&config.db_path)?),
            StoreKind::Memory => Arc::new(MemoryTaskStore::new()),
        };
        Ok(Self::new(repo, config.store))
    }

    pub fn use_cases(&self) -> &TaskUseCases {
        &self.inner.use_cases
    }

    pub fn store_kind(&self) -> StoreKind {
        self.inner.store_kind
    }
}
