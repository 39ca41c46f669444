//! core::config::schema
//!
//! Configuration schema types.
//!
//! The global and the repo scope share one schema. Every key is optional;
//! an absent key falls through to the other scope, then to the default.
//!
//! # Validation
//!
//! Values are validated after parsing (e.g. a rename threshold is a
//! percentage, the tracking depth limit is at least one).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// [resolve]
/// tracking_depth_limit = 8
///
/// [diff]
/// detect_copies = true
/// rename_threshold = 60
/// rename_limit = 1000
///
/// [status]
/// include_untracked = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Revision and ref resolution
    pub resolve: Option<ResolveSection>,

    /// Commit diffing
    pub diff: Option<DiffSection>,

    /// Working tree status
    pub status: Option<StatusSection>,
}

/// User-scope configuration.
pub type GlobalConfig = FileConfig;

/// Repository-scope configuration.
pub type RepoConfig = FileConfig;

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(resolve) = &self.resolve {
            resolve.validate()?;
        }
        if let Some(diff) = &self.diff {
            diff.validate()?;
        }
        Ok(())
    }
}

/// `[resolve]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveSection {
    /// Maximum number of upstream hops followed from a branch
    pub tracking_depth_limit: Option<usize>,
}

impl ResolveSection {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tracking_depth_limit == Some(0) {
            return Err(ConfigError::InvalidValue(
                "resolve.tracking_depth_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `[diff]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSection {
    /// Look for copies as well as renames
    pub detect_copies: Option<bool>,

    /// Similarity (percent) at which a delete/add pair becomes a rename
    pub rename_threshold: Option<u16>,

    /// Maximum number of candidates considered by rename detection
    pub rename_limit: Option<usize>,
}

impl DiffSection {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threshold) = self.rename_threshold {
            if threshold > 100 {
                return Err(ConfigError::InvalidValue(format!(
                    "diff.rename_threshold must be between 0 and 100, got {}",
                    threshold
                )));
            }
        }
        Ok(())
    }
}

/// `[status]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StatusSection {
    /// Report untracked files as unstaged additions
    pub include_untracked: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FileConfig::default();
        assert!(config.resolve.is_none());
        assert!(config.diff.is_none());
        assert!(config.status.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_depth_limit_rejected() {
        let config = FileConfig {
            resolve: Some(ResolveSection {
                tracking_depth_limit: Some(0),
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn threshold_over_100_rejected() {
        let config = FileConfig {
            diff: Some(DiffSection {
                rename_threshold: Some(101),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn roundtrip() {
        let config = FileConfig {
            resolve: Some(ResolveSection {
                tracking_depth_limit: Some(4),
            }),
            diff: Some(DiffSection {
                detect_copies: Some(false),
                rename_threshold: Some(70),
                rename_limit: Some(500),
            }),
            status: Some(StatusSection {
                include_untracked: Some(false),
            }),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            [diff]
            detect_copies = true
            similarity = 50
        "#;

        let result: Result<FileConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
