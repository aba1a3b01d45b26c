//! TOML-based configuration for gitcredits.
//!
//! The API token itself never lives in the config file. The config names a
//! local file that holds the token, and [`AppConfig::read_token`] loads its
//! trimmed contents at startup.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ConfigError, CredentialError};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level application configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// GitHub repository and API settings.
    pub github: GitHubConfig,

    /// Fetch behaviour settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

/// GitHub repository and API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API base URL (default `https://api.github.com`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Web profile base URL used in output links (default `https://github.com`).
    #[serde(default = "default_html_url")]
    pub html_url: String,

    /// Repository in `owner/repo` format.
    pub repo: String,

    /// Path to a file holding the personal access token as its trimmed
    /// contents.
    pub token_file: String,
}

fn default_api_url() -> String {
    "https://api.github.com".into()
}
fn default_html_url() -> String {
    "https://github.com".into()
}

// ---------------------------------------------------------------------------
// Fetch behaviour
// ---------------------------------------------------------------------------

/// Pagination and rate-limit settings for the fetch loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Contributors per list page (default 100, the API maximum).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Fixed delay after every profile request, in milliseconds (default
    /// 500). Keeps the sequential enrichment loop under the API rate limit.
    #[serde(default = "default_profile_delay_ms")]
    pub profile_delay_ms: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_per_page() -> u32 {
    100
}
fn default_profile_delay_ms() -> u64 {
    500
}
fn default_user_agent() -> String {
    "gitcredits".into()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            profile_delay_ms: default_profile_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// The inter-request delay as a [`Duration`].
    pub fn profile_delay(&self) -> Duration {
        Duration::from_millis(self.profile_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Load an [`AppConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Validate that all required fields are present and sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.repo.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "github.repo".into(),
                detail: "GitHub repo must not be empty".into(),
            });
        }
        if !self.github.repo.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "github.repo".into(),
                detail: "GitHub repo must be in 'owner/repo' format".into(),
            });
        }
        if self.github.token_file.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "github.token_file".into(),
                detail: "token file path must not be empty".into(),
            });
        }
        if self.fetch.per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.per_page".into(),
                detail: "per_page must be > 0".into(),
            });
        }

        Ok(())
    }

    /// Read the API token from the configured token file.
    ///
    /// The file's contents are trimmed of surrounding whitespace. A missing
    /// or unreadable file is fatal: the caller must not start any network
    /// traffic without a credential.
    pub fn read_token(&self) -> Result<String, CredentialError> {
        let path = resolve_token_path(&self.github.token_file);
        info!(path = %path, "reading credential file");

        if !Path::new(&path).exists() {
            return Err(CredentialError::FileNotFound(path));
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| CredentialError::Unreadable {
            path: path.clone(),
            detail: e.to_string(),
        })?;

        Ok(contents.trim().to_string())
    }

    /// Convenience: load and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Resolve the configured token path for the current platform.
///
/// On Windows a Git-Bash style `/c/...` path is rewritten to `C:\...` so the
/// same config file works from both shells.
fn resolve_token_path(path: &str) -> String {
    if cfg!(windows) {
        if let Some(rewritten) = gitbash_to_windows(path) {
            return rewritten;
        }
    }
    path.to_string()
}

/// Rewrite a Git-Bash `/c/` path to its `C:\` form. Returns `None` when the
/// path is not in Git-Bash form.
fn gitbash_to_windows(path: &str) -> Option<String> {
    let rest = path.strip_prefix("/c/")?;
    Some(format!("C:\\{}", rest.replace('/', "\\")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_toml() -> &'static str {
        r#"
[github]
api_url = "https://api.github.com"
html_url = "https://github.com"
repo = "acme/terrain"
token_file = "/etc/gitcredits/token"

[fetch]
per_page = 50
profile_delay_ms = 250
user_agent = "gitcredits-test"

[log]
level = "debug"
"#
    }

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(sample_toml()).expect("failed to parse toml");
        assert_eq!(config.github.repo, "acme/terrain");
        assert_eq!(config.github.token_file, "/etc/gitcredits/token");
        assert_eq!(config.fetch.per_page, 50);
        assert_eq!(config.fetch.profile_delay(), Duration::from_millis(250));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_defaults() {
        let minimal = r#"
[github]
repo = "acme/terrain"
token_file = "/etc/gitcredits/token"
"#;
        let config: AppConfig = toml::from_str(minimal).unwrap();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.html_url, "https://github.com");
        assert_eq!(config.fetch.per_page, 100);
        assert_eq!(config.fetch.profile_delay_ms, 500);
        assert_eq!(config.fetch.user_agent, "gitcredits");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(sample_toml().as_bytes()).unwrap();

        let config = AppConfig::load_from_file(&path).expect("load_from_file failed");
        assert_eq!(config.github.repo, "acme/terrain");
    }

    #[test]
    fn test_file_not_found() {
        let result = AppConfig::load_from_file("/nonexistent/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_validate_rejects_bad_repo_format() {
        let mut config: AppConfig = toml::from_str(sample_toml()).unwrap();
        config.github.repo = "noslash".into();
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "github.repo"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_per_page() {
        let mut config: AppConfig = toml::from_str(sample_toml()).unwrap();
        config.fetch.per_page = 0;
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "fetch.per_page"
        ));
    }

    #[test]
    fn test_read_token_trims_contents() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token");
        std::fs::write(&token_path, "  ghp_abc123\n").unwrap();

        let mut config: AppConfig = toml::from_str(sample_toml()).unwrap();
        config.github.token_file = token_path.display().to_string();

        let token = config.read_token().expect("read_token failed");
        assert_eq!(token, "ghp_abc123");
    }

    #[test]
    fn test_read_token_missing_file_is_fatal() {
        let mut config: AppConfig = toml::from_str(sample_toml()).unwrap();
        config.github.token_file = "/nonexistent/token".into();

        let result = config.read_token();
        match result {
            Err(CredentialError::FileNotFound(path)) => {
                assert_eq!(path, "/nonexistent/token");
            }
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_gitbash_path_rewrite() {
        assert_eq!(
            gitbash_to_windows("/c/Users/cory/token.txt").as_deref(),
            Some("C:\\Users\\cory\\token.txt")
        );
        assert_eq!(gitbash_to_windows("/home/cory/token.txt"), None);
        assert_eq!(gitbash_to_windows("token.txt"), None);
    }
}
