//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Veneer has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$VENEER_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/veneer/config.toml`
//! 3. `~/.veneer/config.toml`
//!
//! # Repo Config Location
//!
//! `.git/veneer/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use veneer::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! let settings = config.settings();
//! println!("tracking depth limit: {}", settings.tracking_depth_limit);
//! ```

pub mod schema;

pub use schema::{
    DiffSection, FileConfig, GlobalConfig, RepoConfig, ResolveSection, StatusSection,
};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default ceiling for the tracking-branch walk.
pub const DEFAULT_TRACKING_DEPTH_LIMIT: usize = 16;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Effective settings consumed by the Git doorway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Maximum number of upstream hops followed from a branch.
    pub tracking_depth_limit: usize,
    /// Look for copies as well as renames when diffing.
    pub detect_copies: bool,
    /// Rename similarity threshold; `None` keeps the engine default.
    pub rename_threshold: Option<u16>,
    /// Rename candidate limit; `None` keeps the engine default.
    pub rename_limit: Option<usize>,
    /// Report untracked files in status.
    pub include_untracked: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracking_depth_limit: DEFAULT_TRACKING_DEPTH_LIMIT,
            detect_copies: true,
            rename_threshold: None,
            rename_limit: None,
            include_untracked: true,
        }
    }
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo_path` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read, parsed
    /// or validated. Missing config files are not an error.
    pub fn load(repo_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path_found) = match repo_path {
            Some(path) => Self::load_repo(path)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        if let Some(path) = &global_path {
            log::debug!("loaded global config from {}", path.display());
        }
        if let Some(path) = &repo_path_found {
            log::debug!("loaded repo config from {}", path.display());
        }

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path: repo_path_found,
        })
    }

    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var("VENEER_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("veneer/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".veneer/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn load_repo(repo_path: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(repo_path);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The repo config path, relative to a working tree root.
    pub fn repo_config_path(repo_path: &Path) -> PathBuf {
        repo_path.join(".git/veneer/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Pick the first value present in repo scope, then global scope.
    fn pick<T>(&self, get: impl Fn(&FileConfig) -> Option<T>) -> Option<T> {
        self.repo.as_ref().and_then(&get).or_else(|| get(&self.global))
    }

    /// Maximum number of upstream hops followed from a branch.
    pub fn tracking_depth_limit(&self) -> usize {
        self.pick(|c| c.resolve.as_ref().and_then(|r| r.tracking_depth_limit))
            .unwrap_or(DEFAULT_TRACKING_DEPTH_LIMIT)
    }

    /// Whether diffing looks for copies. Defaults to `true`.
    pub fn detect_copies(&self) -> bool {
        self.pick(|c| c.diff.as_ref().and_then(|d| d.detect_copies))
            .unwrap_or(true)
    }

    /// Rename similarity threshold, if overridden.
    pub fn rename_threshold(&self) -> Option<u16> {
        self.pick(|c| c.diff.as_ref().and_then(|d| d.rename_threshold))
    }

    /// Rename candidate limit, if overridden.
    pub fn rename_limit(&self) -> Option<usize> {
        self.pick(|c| c.diff.as_ref().and_then(|d| d.rename_limit))
    }

    /// Whether status reports untracked files. Defaults to `true`.
    pub fn include_untracked(&self) -> bool {
        self.pick(|c| c.status.as_ref().and_then(|s| s.include_untracked))
            .unwrap_or(true)
    }

    /// Collapse the loaded scopes into effective settings.
    pub fn settings(&self) -> Settings {
        Settings {
            tracking_depth_limit: self.tracking_depth_limit(),
            detect_copies: self.detect_copies(),
            rename_threshold: self.rename_threshold(),
            rename_limit: self.rename_limit(),
            include_untracked: self.include_untracked(),
        }
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_repo_config(root: &Path, contents: &str) {
        let path = Config::repo_config_path(root);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn defaults_without_files() {
        let config = Config::default();
        assert_eq!(config.settings(), Settings::default());
        assert!(config.global_config_loaded_from().is_none());
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        write_repo_config(
            temp.path(),
            r#"
            [resolve]
            tracking_depth_limit = 3

            [diff]
            detect_copies = false
            "#,
        );

        let config = Config::load(Some(temp.path())).unwrap();

        assert_eq!(config.tracking_depth_limit(), 3);
        assert!(!config.detect_copies());
        assert!(config.repo_config_loaded_from().is_some());
    }

    #[test]
    fn missing_repo_config_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(temp.path())).unwrap();
        assert!(config.repo.is_none());
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), "[resolve]\ntracking_depth_limit = 0\n");

        assert!(matches!(
            Config::load(Some(temp.path())),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn malformed_toml_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), "[diff\n");

        assert!(matches!(
            Config::load(Some(temp.path())),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn precedence_repo_overrides_global() {
        let config = Config {
            global: GlobalConfig {
                diff: Some(DiffSection {
                    rename_threshold: Some(40),
                    detect_copies: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            },
            repo: Some(RepoConfig {
                diff: Some(DiffSection {
                    rename_threshold: Some(80),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            global_path: None,
            repo_path: None,
        };

        assert_eq!(config.rename_threshold(), Some(80));
        // not set in repo scope, so the global value applies
        assert!(!config.detect_copies());
    }
}
