//! Account service - user lookup and password reset against the directory.
//!
//! Every operation resolves the application to a pool before any network
//! call, issues exactly one directory call and never retries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::password::generate_for;
use crate::domain::{mask, PoolTable, UserRecord};
use crate::errors::AppResult;
use crate::infra::{Directory, DirectoryError};
use crate::utils::AuditLog;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Fetch a user from the pool of `application`
    async fn get_user(&self, username: &str, application: &str) -> AppResult<UserRecord>;

    /// Set a permanent password, generating one by the application's
    /// policy when `password` is `None`. Returns the password set.
    async fn reset_password(
        &self,
        username: &str,
        application: &str,
        password: Option<String>,
    ) -> AppResult<String>;
}

/// Concrete implementation of AccountService over a directory.
pub struct AccountManager {
    directory: Arc<dyn Directory>,
    pools: PoolTable,
    audit: AuditLog,
}

impl AccountManager {
    pub fn new(directory: Arc<dyn Directory>, pools: PoolTable, audit: AuditLog) -> Self {
        Self {
            directory,
            pools,
            audit,
        }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn get_user(&self, username: &str, application: &str) -> AppResult<UserRecord> {
        let (_, pool_id) = self.pools.resolve(application)?;

        self.audit.lookup_started(username, application, pool_id);

        match self.directory.fetch_user(pool_id, username).await {
            Ok(user) => {
                self.audit
                    .user_found(username, application, pool_id, &user.status);
                Ok(user)
            }
            Err(DirectoryError::UserNotFound) => {
                self.audit.user_not_found(username, application, pool_id);
                Err(DirectoryError::UserNotFound.into())
            }
            Err(err) => {
                self.audit
                    .lookup_failed(username, application, pool_id, &err.to_string());
                Err(err.into())
            }
        }
    }

    async fn reset_password(
        &self,
        username: &str,
        application: &str,
        password: Option<String>,
    ) -> AppResult<String> {
        let (app, pool_id) = self.pools.resolve(application)?;

        let password = password.unwrap_or_else(|| generate_for(app));
        let masked = mask(&password);

        self.audit
            .reset_started(username, application, pool_id, &masked);

        match self
            .directory
            .set_password(pool_id, username, &password, true)
            .await
        {
            Ok(receipt) => {
                self.audit.reset_succeeded(
                    username,
                    application,
                    pool_id,
                    &masked,
                    receipt.request_id.as_deref(),
                );
                Ok(password)
            }
            Err(err) => {
                self.audit
                    .reset_failed(username, application, pool_id, &err.to_string());
                Err(err.into())
            }
        }
    }
}
