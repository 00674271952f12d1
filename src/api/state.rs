//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::{Config, API_LOGGER, DIRECTORY_LOGGER};
use crate::infra::Directory;
use crate::services::{AccountManager, AccountService};
use crate::utils::AuditLog;

/// Application state shared by handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Lookup and password reset
    pub account_service: Arc<dyn AccountService>,
    /// Audit logger of the HTTP layer
    pub audit: AuditLog,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the account service over a directory using the configured pools.
    pub fn from_config(directory: Arc<dyn Directory>, config: Config) -> Self {
        let account_service = Arc::new(AccountManager::new(
            directory,
            config.pool_table(),
            AuditLog::new(DIRECTORY_LOGGER),
        ));

        Self::new(account_service, AuditLog::new(API_LOGGER), config)
    }

    /// Create state with a manually injected service.
    pub fn new(account_service: Arc<dyn AccountService>, audit: AuditLog, config: Config) -> Self {
        Self {
            account_service,
            audit,
            config: Arc::new(config),
        }
    }
}
