//! Application populations and the pools backing them.
//!
//! All alias normalization for application tokens lives here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{
    APPLICATION_APP, APPLICATION_CORP, APPLICATION_PARCERIAS, APP_ALIASES, CORP_ALIASES,
    PARCERIAS_ALIASES,
};
use crate::errors::{AppError, AppResult};

/// User population served by the service.
///
/// Deserializes only from the canonical lower-case tokens; use
/// [`Application::parse`] for the lenient form with aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Application {
    App,
    Corp,
    Parcerias,
}

impl Application {
    /// Parse a token, ignoring case and surrounding whitespace and
    /// accepting the historical aliases (`corporativo`, `parceria`).
    ///
    /// The error carries the input as given.
    pub fn parse(token: &str) -> AppResult<Self> {
        let normalized = token.trim().to_lowercase();
        let normalized = normalized.as_str();

        if APP_ALIASES.contains(&normalized) {
            Ok(Application::App)
        } else if CORP_ALIASES.contains(&normalized) {
            Ok(Application::Corp)
        } else if PARCERIAS_ALIASES.contains(&normalized) {
            Ok(Application::Parcerias)
        } else {
            Err(AppError::invalid_application(token))
        }
    }

    /// Canonical token
    pub fn as_str(&self) -> &'static str {
        match self {
            Application::App => APPLICATION_APP,
            Application::Corp => APPLICATION_CORP,
            Application::Parcerias => APPLICATION_PARCERIAS,
        }
    }
}

impl std::fmt::Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directory pool identifiers, one per application. Read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolTable {
    app: String,
    corp: String,
    parcerias: String,
}

impl PoolTable {
    pub fn new(app: String, corp: String, parcerias: String) -> Self {
        Self {
            app,
            corp,
            parcerias,
        }
    }

    /// Pool backing an application
    pub fn pool_id(&self, application: Application) -> &str {
        match application {
            Application::App => &self.app,
            Application::Corp => &self.corp,
            Application::Parcerias => &self.parcerias,
        }
    }

    /// Resolve a raw application token to its application and pool.
    pub fn resolve(&self, token: &str) -> AppResult<(Application, &str)> {
        let application = Application::parse(token)?;
        Ok((application, self.pool_id(application)))
    }
}
