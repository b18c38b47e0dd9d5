//! Locating external executables.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable listing extra directories (colon-separated) searched
/// before `PATH`.
pub const EXTRA_PATHS_ENV_VAR: &str = "SALAH_EXTRA_PATHS";

/// Resolves the absolute path to an executable.
///
/// Absolute paths are checked directly. Bare names are searched in, in order:
/// 1. The directories listed in `SALAH_EXTRA_PATHS`.
/// 2. The current process `PATH`.
/// 3. Common install locations (`/usr/local/bin`, Homebrew, `~/.cargo/bin`, `~/.local/bin`).
///
/// A name containing a path separator is resolved against the working directory.
///
/// # Errors
///
/// Returns a descriptive message when the executable cannot be found.
pub fn resolve_binary(binary: &str) -> Result<PathBuf, String> {
    if binary.is_empty() {
        return Err("Binary name cannot be empty".to_string());
    }

    let candidate = Path::new(binary);
    if candidate.is_absolute() || candidate.components().count() > 1 {
        return if is_executable(candidate) {
            Ok(candidate.to_path_buf())
        } else {
            Err(format!("Binary at {} is not executable", candidate.display()))
        };
    }

    search_paths()
        .into_iter()
        .filter(|directory| !directory.as_os_str().is_empty())
        .map(|directory| directory.join(binary))
        .find(|path| is_executable(path))
        .ok_or_else(|| format!("Unable to locate executable '{binary}' in known search paths"))
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(extra) = env::var(EXTRA_PATHS_ENV_VAR) {
        paths.extend(extra.split(':').map(PathBuf::from));
    }

    if let Some(path_var) = env::var_os("PATH") {
        paths.extend(env::split_paths(&path_var));
    }

    paths.extend([
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/opt/homebrew/bin"),
        PathBuf::from("/opt/homebrew/sbin"),
    ]);

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".cargo/bin"));
        paths.push(home.join(".local/bin"));
    }

    paths
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };

    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_binary_is_an_error() {
        assert!(resolve_binary("").is_err());
    }

    #[test]
    fn test_finds_system_binary() {
        if cfg!(unix) {
            let path = resolve_binary("sh").unwrap();
            assert!(path.is_absolute());
            assert!(path.ends_with("sh"));
        }
    }

    #[test]
    fn test_absolute_path_is_kept() {
        if cfg!(unix) {
            let sh = resolve_binary("sh").unwrap();
            assert_eq!(resolve_binary(sh.to_str().unwrap()).unwrap(), sh);
        }
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let err = resolve_binary("salah_nonexistent_binary_12345").unwrap_err();
        assert!(err.contains("salah_nonexistent_binary_12345"));
    }

    #[test]
    fn test_non_executable_file_is_rejected() {
        if cfg!(unix) {
            let temp_dir = tempfile::TempDir::new().unwrap();
            let path = temp_dir.path().join("plain.txt");
            std::fs::write(&path, "not a program").unwrap();
            assert!(resolve_binary(path.to_str().unwrap()).is_err());
        }
    }
}
