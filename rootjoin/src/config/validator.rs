//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::lexical::expand_tilde;
use std::path::Path;

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use rootjoin::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        for (name, path) in &config.roots {
            Self::validate_root_name(name)?;
            Self::validate_root_path(&format!("roots.{name}"), path)?;
        }

        if let Some(ref name) = config.default_root {
            if !config.roots.contains_key(name) {
                return Err(Error::Validation {
                    field: "default_root".into(),
                    message: format!("'{name}' is not a configured root"),
                });
            }
        }

        if let Some(ref path) = config.root_override {
            Self::validate_root_path("root_override", path)?;
        }

        Ok(())
    }

    /// Root names are non-empty and made of ASCII alphanumerics, `_`, `.`, `-`.
    fn validate_root_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::Validation {
                field: "roots".into(),
                message: "Root name cannot be empty".into(),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(Error::Validation {
                field: format!("roots.{name}"),
                message: "Root name may only contain letters, digits, '_', '.' and '-'".into(),
            });
        }

        Ok(())
    }

    fn validate_root_path(field: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Root path cannot be empty".into(),
            });
        }

        let expanded = expand_tilde(path).map_err(|e| Error::Validation {
            field: field.into(),
            message: e.to_string(),
        })?;
        if !expanded.is_absolute() {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Root path must be absolute: {}", path.display()),
            });
        }

        Ok(())
    }
}
