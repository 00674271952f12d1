//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the directory through its
//! trait for dependency inversion.

mod account_service;

pub use account_service::{AccountManager, AccountService};
