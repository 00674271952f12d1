//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Applications & Pools
// =============================================================================

/// Canonical token for the end-user application population
pub const APPLICATION_APP: &str = "app";

/// Canonical token for the corporate population
pub const APPLICATION_CORP: &str = "corp";

/// Canonical token for the partner population
pub const APPLICATION_PARCERIAS: &str = "parcerias";

/// Accepted spellings per population, after trimming and lower-casing
pub const APP_ALIASES: &[&str] = &[APPLICATION_APP];
pub const CORP_ALIASES: &[&str] = &[APPLICATION_CORP, "corporativo"];
pub const PARCERIAS_ALIASES: &[&str] = &[APPLICATION_PARCERIAS, "parceria"];

// =============================================================================
// Change Password Requests
// =============================================================================

/// Values of `change_pass` (case-insensitive) that confirm a reset
pub const AFFIRMATIVE_TOKENS: &[&str] = &["yes", "y", "true", "1"];

// =============================================================================
// Password Policy
// =============================================================================

/// Length of the numeric passwords issued to the `app` population
pub const NUMERIC_PASSWORD_LENGTH: usize = 6;

/// Minimum (and default) length of complex passwords
pub const MIN_COMPLEX_PASSWORD_LENGTH: usize = 10;

pub const LOWERCASE_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE_CHARACTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGIT_CHARACTERS: &str = "0123456789";

/// Special characters the directory accepts without escaping
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{}";

/// Marker replacing the tail of a password in logs
pub const PASSWORD_MASK: &str = "**";

// =============================================================================
// Logging
// =============================================================================

/// Logger name for events emitted by the HTTP layer
pub const API_LOGGER: &str = "password-reset-api";

/// Logger name for events emitted around directory calls
pub const DIRECTORY_LOGGER: &str = "password-reset-directory";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default AWS region hosting the user pools
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Wildcard origin for CORS
pub const CORS_ANY_ORIGIN: &str = "*";
