//! Password administration service for identity directory user pools.
//!
//! Looks up users and resets their passwords across the pools of three
//! user populations ("applications"), so support staff never hold
//! directory credentials themselves.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Applications, pools, password policy, user records
//! - **services**: Lookup and password reset use cases
//! - **infra**: Identity directory boundary and its Cognito implementation
//! - **api**: HTTP handlers, extractors, and routes
//! - **utils**: Logging setup and audit events
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! USER_POOL_ID_APP=... USER_POOL_ID_CORP=... USER_POOL_ID_PARCERIAS=... \
//!     cargo run -- serve --port 8000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Application, PoolTable, UserRecord};
pub use errors::{AppError, AppResult};
pub use infra::{Directory, DirectoryError};
