//! Infrastructure layer - External systems integration
//!
//! The identity directory is the only external system: a trait describing
//! the two administrative operations, plus the Cognito implementation.

pub mod cognito;
pub mod directory;

pub use cognito::CognitoDirectory;
pub use directory::{Directory, DirectoryError, SetPasswordReceipt};

#[cfg(test)]
pub use directory::MockDirectory;
