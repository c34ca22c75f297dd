//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `ROOTJOIN_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Unnamed root used when no root is given explicitly.
pub const ROOT_ENV: &str = "ROOTJOIN_ROOT";

/// Overrides `default_root`.
pub const DEFAULT_ROOT_ENV: &str = "ROOTJOIN_DEFAULT_ROOT";

/// Extra named roots, as `name=path` pairs separated by commas.
pub const ROOTS_ENV: &str = "ROOTJOIN_ROOTS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use rootjoin::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an empty value or
    /// `ROOTJOIN_ROOTS` is malformed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(root) = env::var(ROOT_ENV) {
            config.root_override = Some(PathBuf::from(Self::non_empty(ROOT_ENV, root)?));
        }

        if let Ok(name) = env::var(DEFAULT_ROOT_ENV) {
            config.default_root = Some(Self::non_empty(DEFAULT_ROOT_ENV, name)?);
        }

        if let Ok(roots) = env::var(ROOTS_ENV) {
            for (name, path) in Self::parse_roots(&roots)? {
                config.roots.insert(name, path);
            }
        }

        Ok(())
    }

    fn non_empty(field: &str, value: String) -> Result<String> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty".into(),
            });
        }
        Ok(value)
    }

    /// Parse `name=path` pairs from a comma-separated string.
    fn parse_roots(s: &str) -> Result<Vec<(String, PathBuf)>> {
        let mut roots = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let Some((name, path)) = part.split_once('=') else {
                return Err(Error::Validation {
                    field: ROOTS_ENV.into(),
                    message: format!("Expected name=path, got '{part}'"),
                });
            };

            let (name, path) = (name.trim(), path.trim());
            if name.is_empty() || path.is_empty() {
                return Err(Error::Validation {
                    field: ROOTS_ENV.into(),
                    message: format!("Empty name or path in '{part}'"),
                });
            }

            roots.push((name.to_string(), PathBuf::from(path)));
        }

        Ok(roots)
    }
}
