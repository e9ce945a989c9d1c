//! Application-wide constants
//!
//! Defaults for configuration values.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// ENGINE DEFAULTS
// =============================================================================

/// Platform calendar offset from UTC, in minutes
pub const DEFAULT_PLATFORM_UTC_OFFSET_MINUTES: i32 = 0;
