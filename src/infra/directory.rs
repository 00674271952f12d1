//! Identity directory boundary.
//!
//! The service talks to the directory through exactly two operations.
//! Implementations adapt requests and responses only: no state, no
//! retries, no caching.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::UserRecord;

#[cfg(test)]
use mockall::automock;

/// Failure of a directory call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Username does not exist in the pool
    #[error("user not found")]
    UserNotFound,

    /// Any other upstream failure, transient or not
    #[error("{0}")]
    Upstream(String),
}

/// Metadata returned by a successful password change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetPasswordReceipt {
    pub request_id: Option<String>,
}

/// Administrative access to a user directory.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Directory: Send + Sync {
    /// Fetch a user from a pool.
    async fn fetch_user(&self, pool_id: &str, username: &str)
        -> Result<UserRecord, DirectoryError>;

    /// Set a user's password. With `permanent` the directory does not
    /// force a change on next login.
    ///
    /// Never fails with [`DirectoryError::UserNotFound`].
    async fn set_password(
        &self,
        pool_id: &str,
        username: &str,
        password: &str,
        permanent: bool,
    ) -> Result<SetPasswordReceipt, DirectoryError>;
}
