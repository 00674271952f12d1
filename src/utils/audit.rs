//! Structured audit events.
//!
//! Each request step emits one event tagged with `event` and the name of
//! the emitting component in `logger`. Passwords only ever appear as
//! [`MaskedPassword`].

use std::fmt::Debug;

use crate::domain::{Application, MaskedPassword};

/// Audit logger for one component. Cheap to clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditLog {
    logger: &'static str,
}

impl AuditLog {
    pub fn new(logger: &'static str) -> Self {
        Self { logger }
    }

    pub fn request_received(
        &self,
        username: &str,
        application: Application,
        payload: &dyn Debug,
    ) {
        tracing::info!(
            logger = self.logger,
            event = "request_received",
            username,
            application = %application,
            ?payload,
            "Password change request received"
        );
    }

    pub fn password_returned(
        &self,
        username: &str,
        application: Application,
        masked: &MaskedPassword,
    ) {
        tracing::info!(
            logger = self.logger,
            event = "password_returned_to_frontend",
            username,
            application = %application,
            new_password_masked = %masked,
            "Password changed and returned to caller"
        );
    }

    pub fn lookup_started(&self, username: &str, application: &str, user_pool_id: &str) {
        tracing::info!(
            logger = self.logger,
            event = "user_lookup_start",
            username,
            application,
            user_pool_id,
            "Fetching user from directory"
        );
    }

    pub fn user_found(&self, username: &str, application: &str, user_pool_id: &str, status: &str) {
        tracing::info!(
            logger = self.logger,
            event = "user_lookup_success",
            username,
            application,
            user_pool_id,
            user_status = status,
            "User found in directory"
        );
    }

    pub fn user_not_found(&self, username: &str, application: &str, user_pool_id: &str) {
        tracing::warn!(
            logger = self.logger,
            event = "user_not_found",
            username,
            application,
            user_pool_id,
            "User not found in directory"
        );
    }

    pub fn lookup_failed(
        &self,
        username: &str,
        application: &str,
        user_pool_id: &str,
        error: &str,
    ) {
        tracing::error!(
            logger = self.logger,
            event = "user_lookup_error",
            username,
            application,
            user_pool_id,
            error,
            "Directory error while fetching user"
        );
    }

    pub fn reset_started(
        &self,
        username: &str,
        application: &str,
        user_pool_id: &str,
        masked: &MaskedPassword,
    ) {
        tracing::info!(
            logger = self.logger,
            event = "password_reset_start",
            username,
            application,
            user_pool_id,
            new_password_masked = %masked,
            "Starting password change in directory"
        );
    }

    pub fn reset_succeeded(
        &self,
        username: &str,
        application: &str,
        user_pool_id: &str,
        masked: &MaskedPassword,
        request_id: Option<&str>,
    ) {
        tracing::info!(
            logger = self.logger,
            event = "password_reset_success",
            username,
            application,
            user_pool_id,
            new_password_masked = %masked,
            request_id,
            "Password changed in directory"
        );
    }

    pub fn reset_failed(
        &self,
        username: &str,
        application: &str,
        user_pool_id: &str,
        error: &str,
    ) {
        tracing::error!(
            logger = self.logger,
            event = "password_reset_error",
            username,
            application,
            user_pool_id,
            error,
            "Directory error while changing password"
        );
    }
}
