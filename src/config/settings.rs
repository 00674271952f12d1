//! Application settings loaded from environment variables.

use std::collections::HashMap;
use std::env;

use thiserror::Error;

use super::constants::{CORS_ANY_ORIGIN, DEFAULT_AWS_REGION};
use crate::domain::PoolTable;

/// Errors raised while loading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub user_pool_id_app: String,
    pub user_pool_id_corp: String,
    pub user_pool_id_parcerias: String,
    /// Allowed CORS origins; `*` allows any
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// Variable names are matched case-insensitively.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::vars())
    }

    /// Build configuration from arbitrary key/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();

        let optional = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let cors_allowed_origins = optional("cors_allowed_origins")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![CORS_ANY_ORIGIN.to_string()]);

        Ok(Self {
            aws_region: optional("aws_region").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            user_pool_id_app: required("user_pool_id_app")?,
            user_pool_id_corp: required("user_pool_id_corp")?,
            user_pool_id_parcerias: required("user_pool_id_parcerias")?,
            cors_allowed_origins,
        })
    }

    /// Pool identifiers keyed by application.
    pub fn pool_table(&self) -> PoolTable {
        PoolTable::new(
            self.user_pool_id_app.clone(),
            self.user_pool_id_corp.clone(),
            self.user_pool_id_parcerias.clone(),
        )
    }

    /// Whether every origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins
            .iter()
            .any(|origin| origin == CORS_ANY_ORIGIN)
    }
}
