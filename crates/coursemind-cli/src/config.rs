//! Configuration and path resolution for the CLI.
//!
//! The merged dataset is found in this order:
//! 1. `--dataset` flag
//! 2. `$COURSEMIND_DATASET` environment variable
//! 3. `merged_dataset.csv` in the platform data directory
//!
//! Moodle settings come only from the environment; credentials are never
//! stored in the binary.

use anyhow::{anyhow, Result};
use coursemind_core::catalog::MoodleConfig;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;

/// Dataset file name inside the data directory
const DATASET_FILENAME: &str = "merged_dataset.csv";

/// Environment variable for a custom dataset path
const DATASET_ENV: &str = "COURSEMIND_DATASET";

/// Environment variable for the Moodle site root
pub const MOODLE_URL_ENV: &str = "COURSEMIND_MOODLE_URL";

/// Environment variable for the Moodle web service token
pub const MOODLE_TOKEN_ENV: &str = "COURSEMIND_MOODLE_TOKEN";

/// Returns the platform data directory.
///
/// - macOS: `~/Library/Application Support/dev.coursemind.Coursemind/`
/// - Linux: `~/.local/share/coursemind/`
/// - Windows: `%APPDATA%\coursemind\Coursemind\data\`
pub fn get_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("dev", "coursemind", "Coursemind")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine data directory"))
}

/// Resolves the dataset path from the flag and the environment.
pub fn dataset_path(custom: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_dataset_path(custom, std::env::var(DATASET_ENV).ok())
}

fn resolve_dataset_path(custom: Option<&PathBuf>, env_value: Option<String>) -> Result<PathBuf> {
    if let Some(path) = custom {
        return Ok(path.clone());
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(value));
    }
    Ok(get_data_dir()?.join(DATASET_FILENAME))
}

/// Reads Moodle connection settings from the environment.
pub fn moodle_config(timeout: Option<Duration>) -> Result<MoodleConfig> {
    build_moodle_config(
        std::env::var(MOODLE_URL_ENV).ok(),
        std::env::var(MOODLE_TOKEN_ENV).ok(),
        timeout,
    )
}

fn build_moodle_config(
    url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
) -> Result<MoodleConfig> {
    let base_url = url
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("Moodle site not configured. Set ${MOODLE_URL_ENV} or pass --catalog."))?;
    let token = token
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("Moodle token not configured. Set ${MOODLE_TOKEN_ENV}."))?;

    Ok(MoodleConfig {
        base_url: base_url.trim().to_string(),
        token: token.trim().to_string(),
        timeout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir().unwrap();
        let dir_str = dir.to_string_lossy().to_lowercase();
        assert!(dir_str.contains("coursemind"), "Data dir: {}", dir_str);
    }

    #[test]
    fn test_custom_dataset_wins() {
        let custom = PathBuf::from("/tmp/custom.csv");
        let path = resolve_dataset_path(Some(&custom), Some("/tmp/env.csv".into())).unwrap();
        assert_eq!(path, custom);
    }

    #[test]
    fn test_env_dataset_used() {
        let path = resolve_dataset_path(None, Some("/tmp/env.csv".into())).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/env.csv"));
    }

    #[test]
    fn test_default_dataset_in_data_dir() {
        let path = resolve_dataset_path(None, Some("  ".into())).unwrap();
        assert!(path.ends_with(DATASET_FILENAME));
    }

    #[test]
    fn test_moodle_config_requires_both() {
        assert!(build_moodle_config(None, Some("t".into()), None).is_err());
        assert!(build_moodle_config(Some("https://lms".into()), None, None).is_err());

        let config = build_moodle_config(
            Some(" https://lms.example.com ".into()),
            Some("abc".into()),
            Some(Duration::from_secs(10)),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://lms.example.com");
        assert_eq!(config.token, "abc");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    }
}
