//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$PAGETREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/pagetree/config.toml`
//! 3. `~/.pagetree/config.toml`
//!
//! # Store Config
//!
//! Located at `<store>/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g. the default template
//! must be a usable template identifier).

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::page::TEMPLATE_MAX_LEN;

/// What a save does when a computed path is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathConflictPolicy {
    /// Fail the save.
    #[default]
    Reject,
    /// Append `-2`, `-3`, ... to the slug of the page being saved.
    Suffix,
}

impl fmt::Display for PathConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathConflictPolicy::Reject => write!(f, "reject"),
            PathConflictPolicy::Suffix => write!(f, "suffix"),
        }
    }
}

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_store = "/srv/site"
/// default_template = "page.html"
/// path_conflict = "reject"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Store used when `--store` is not given
    pub default_store: Option<PathBuf>,

    /// Template for new pages
    pub default_template: Option<String>,

    /// Path conflict policy
    pub path_conflict: Option<PathConflictPolicy>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(store) = &self.default_store {
            if store.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "default_store cannot be empty".to_string(),
                ));
            }
        }
        validate_template(self.default_template.as_deref())
    }
}

/// Store configuration. Overrides the global config.
///
/// # Example
///
/// ```toml
/// default_template = "landing.html"
/// path_conflict = "suffix"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Template for new pages
    pub default_template: Option<String>,

    /// Path conflict policy
    pub path_conflict: Option<PathConflictPolicy>,
}

impl StoreConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_template(self.default_template.as_deref())
    }
}

fn validate_template(template: Option<&str>) -> Result<(), ConfigError> {
    let Some(template) = template else {
        return Ok(());
    };
    if template.trim().is_empty() {
        return Err(ConfigError::InvalidValue(
            "default_template cannot be empty".to_string(),
        ));
    }
    if template.chars().count() > TEMPLATE_MAX_LEN {
        return Err(ConfigError::InvalidValue(format!(
            "default_template exceeds {} characters",
            TEMPLATE_MAX_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = GlobalConfig::default();
            assert!(config.default_store.is_none());
            assert!(config.default_template.is_none());
            assert!(config.path_conflict.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn empty_store_rejected() {
            let config = GlobalConfig {
                default_store: Some(PathBuf::new()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn roundtrip() {
            let config = GlobalConfig {
                default_store: Some(PathBuf::from("/srv/site")),
                default_template: Some("landing.html".to_string()),
                path_conflict: Some(PathConflictPolicy::Suffix),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: GlobalConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }
    }

    mod store_config {
        use super::*;

        #[test]
        fn parses_policy() {
            let config: StoreConfig = toml::from_str("path_conflict = \"suffix\"").unwrap();
            assert_eq!(config.path_conflict, Some(PathConflictPolicy::Suffix));
        }

        #[test]
        fn unknown_policy_rejected() {
            let result: Result<StoreConfig, _> = toml::from_str("path_conflict = \"merge\"");
            assert!(result.is_err());
        }

        #[test]
        fn blank_template_rejected() {
            let config = StoreConfig {
                default_template: Some("  ".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn oversized_template_rejected() {
            let config = StoreConfig {
                default_template: Some("t".repeat(TEMPLATE_MAX_LEN + 1)),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                default_template = "page.html"
                default_store = "/elsewhere"
            "#;

            let result: Result<StoreConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }
}
