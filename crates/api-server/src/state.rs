//! Application state

use std::sync::Arc;
use std::time::Duration;

use td_core::task::{MemoryTaskStore, TaskService};

use crate::auth::UserStore;
use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tasks: TaskService,
    users: UserStore,
    simulated_delay: Duration,
    default_page_size: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_parts(
            TaskService::new(Arc::new(MemoryTaskStore::new())),
            UserStore::seeded(),
            config,
        )
    }

    pub fn with_parts(tasks: TaskService, users: UserStore, config: &ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                tasks,
                users,
                simulated_delay: config.simulated_delay,
                default_page_size: config.default_page_size,
            }),
        }
    }

    /// Get reference to the task service
    pub fn tasks(&self) -> &TaskService {
        &self.inner.tasks
    }

    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    pub fn default_page_size(&self) -> usize {
        self.inner.default_page_size
    }

    /// Sleep for the configured demo latency
    pub async fn simulate_latency(&self) {
        if !self.inner.simulated_delay.is_zero() {
            tokio::time::sleep(self.inner.simulated_delay).await;
        }
    }
}
