//! Utility modules - logging setup and audit events.

pub mod audit;
pub mod logging;

pub use audit::AuditLog;
