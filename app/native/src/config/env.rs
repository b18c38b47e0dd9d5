//! Environment file parsing utilities.
//!
//! This module provides functionality to load API keys and other secrets
//! from environment files (`.env` format) instead of storing them directly
//! in the configuration file.
//!
//! Uses the `dotenvy` crate for robust `.env` file parsing.

use std::collections::HashMap;
use std::path::Path;

use crate::platform::path::expand_and_resolve;

/// Environment variable names for API keys.
pub mod keys {
    /// Masjidbox timetable API key.
    pub const MASJIDBOX_API_KEY: &str = "MASJIDBOX_API_KEY";
}

/// Parses an environment file and returns a map of key-value pairs.
///
/// Returns an empty map if the file doesn't exist or can't be read.
#[must_use]
pub fn parse_env_file(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.filter_map(Result::ok).collect(),
        Err(err) => {
            if path.exists() {
                tracing::warn!(path = %path.display(), error = %err, "failed to read env file");
            }
            HashMap::new()
        }
    }
}

/// Loads API keys from an environment file.
///
/// The `MASJIDBOX_API_KEY` process environment variable takes precedence over
/// the file.
///
/// # Arguments
///
/// * `api_keys_path` - Path to the env file (can be relative or absolute)
/// * `config_dir` - Directory containing the config file (for resolving relative paths)
#[must_use]
pub fn load_api_keys(api_keys_path: &str, config_dir: &Path) -> ApiKeys {
    let from_env = std::env::var(keys::MASJIDBOX_API_KEY).ok().filter(|key| !key.is_empty());
    if from_env.is_some() {
        return ApiKeys { masjidbox_api_key: from_env };
    }

    if api_keys_path.trim().is_empty() {
        return ApiKeys::default();
    }

    let resolved_path = expand_and_resolve(api_keys_path, config_dir);
    let env_vars = parse_env_file(&resolved_path);

    ApiKeys {
        masjidbox_api_key: env_vars.get(keys::MASJIDBOX_API_KEY).cloned(),
    }
}

/// Container for API keys loaded from an environment file.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// Masjidbox timetable API key.
    pub masjidbox_api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_env_file_with_comments_and_quotes() {
        let temp_dir = TempDir::new().unwrap();
        let env_path = temp_dir.path().join(".env");

        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "# Masjidbox credentials").unwrap();
        writeln!(file, "KEY1=\"quoted value\"").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "KEY2=unquoted").unwrap();

        let result = parse_env_file(&env_path);
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("KEY1"), Some(&"quoted value".to_string()));
        assert_eq!(result.get("KEY2"), Some(&"unquoted".to_string()));
    }

    #[test]
    fn test_parse_env_file_nonexistent() {
        let result = parse_env_file(Path::new("/nonexistent/path/.env"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_load_api_keys_with_file() {
        // The process variable would shadow the file
        if std::env::var(keys::MASJIDBOX_API_KEY).is_ok() {
            return;
        }

        let temp_dir = TempDir::new().unwrap();
        let env_path = temp_dir.path().join(".env");

        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "MASJIDBOX_API_KEY=test_api_key_123").unwrap();

        let keys = load_api_keys(".env", temp_dir.path());
        assert_eq!(keys.masjidbox_api_key.as_deref(), Some("test_api_key_123"));
    }

    #[test]
    fn test_load_api_keys_empty_path() {
        if std::env::var(keys::MASJIDBOX_API_KEY).is_ok() {
            return;
        }

        let keys = load_api_keys("", Path::new("/config"));
        assert!(keys.masjidbox_api_key.is_none());
    }
}
