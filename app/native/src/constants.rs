//! Application-wide constants.

/// Application name, used for config, cache and temporary file names.
pub const APP_NAME: &str = "salah";

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "SALAH_LOG";
