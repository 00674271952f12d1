//! Domain layer - Core business entities and logic
//!
//! Applications and their pools, password policy, and the directory
//! user record. Nothing here performs I/O.

pub mod application;
pub mod password;
pub mod user;

pub use application::{Application, PoolTable};
pub use password::{mask, MaskedPassword};
pub use user::{UserAttribute, UserRecord, UserResponse};
