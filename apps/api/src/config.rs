use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Stands in for `DATA_DIR` to keep all state in process memory.
pub const IN_MEMORY: &str = ":memory:";

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset ones take the defaults below.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the three persisted records live, or `:memory:`.
    pub data_dir: String,
    pub export_dir: PathBuf,
    pub port: u16,
    pub preview_debounce: Duration,
    pub avatar_max_bytes: usize,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            export_dir: PathBuf::from("./exports"),
            port: 8080,
            preview_debounce: Duration::from_millis(300),
            avatar_max_bytes: 5 * 1024 * 1024,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        let defaults = Config::default();

        Ok(Config {
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            port: parse_env("PORT", defaults.port)?,
            preview_debounce: Duration::from_millis(parse_env(
                "PREVIEW_DEBOUNCE_MS",
                defaults.preview_debounce.as_millis() as u64,
            )?),
            avatar_max_bytes: parse_env("AVATAR_MAX_BYTES", defaults.avatar_max_bytes)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn in_memory(&self) -> bool {
        self.data_dir == IN_MEMORY
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.preview_debounce, Duration::from_millis(300));
        assert!(!config.in_memory());
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("CV_BUILDER_TEST_PORT", "eighty");
        assert!(parse_env::<u16>("CV_BUILDER_TEST_PORT", 1).is_err());
        std::env::set_var("CV_BUILDER_TEST_PORT", " 9000 ");
        assert_eq!(parse_env::<u16>("CV_BUILDER_TEST_PORT", 1).unwrap(), 9000);
        assert_eq!(parse_env::<u16>("CV_BUILDER_TEST_UNSET", 7).unwrap(), 7);
    }
}
