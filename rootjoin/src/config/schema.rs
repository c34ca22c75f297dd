//! Configuration schema definitions.
//!
//! A configuration names the confinement roots a caller may resolve paths
//! under, and which of them to use when none is given.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::lexical::expand_tilde;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use rootjoin::config::Config;
/// use std::path::PathBuf;
///
/// let config: Config = serde_yaml::from_str(
///     "default_root: uploads\nroots:\n  uploads: /srv/uploads\n",
/// )
/// .unwrap();
///
/// assert_eq!(config.default_root.as_deref(), Some("uploads"));
/// assert_eq!(config.root("uploads").unwrap(), PathBuf::from("/srv/uploads"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the root used when no root is given explicitly.
    pub default_root: Option<String>,

    /// Named confinement roots. Paths may start with `~`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub roots: BTreeMap<String, PathBuf>,

    /// Unnamed root from the environment; takes priority over `default_root`.
    #[serde(skip)]
    pub root_override: Option<PathBuf>,
}

impl Config {
    /// Look up a named root, expanding a leading `~`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRoot` if no root has that name, or `InvalidPath` if
    /// tilde expansion fails.
    pub fn root(&self, name: &str) -> Result<PathBuf> {
        let path = self.roots.get(name).ok_or_else(|| Error::UnknownRoot {
            name: name.to_string(),
        })?;
        expand_tilde(path)
    }

    /// The root to use when the caller names none.
    ///
    /// `root_override` wins; otherwise `default_root` is looked up. Returns
    /// `None` if neither is set.
    ///
    /// # Errors
    ///
    /// Returns an error if `default_root` names an unknown root or tilde
    /// expansion fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use rootjoin::config::Config;
    /// use std::path::PathBuf;
    ///
    /// let mut config = Config::default();
    /// assert_eq!(config.default_root_path().unwrap(), None);
    ///
    /// config.roots.insert("data".into(), PathBuf::from("/srv/data"));
    /// config.default_root = Some("data".into());
    /// assert_eq!(config.default_root_path().unwrap(), Some(PathBuf::from("/srv/data")));
    ///
    /// config.root_override = Some(PathBuf::from("/tmp/jail"));
    /// assert_eq!(config.default_root_path().unwrap(), Some(PathBuf::from("/tmp/jail")));
    /// ```
    pub fn default_root_path(&self) -> Result<Option<PathBuf>> {
        if let Some(ref path) = self.root_override {
            return expand_tilde(path).map(Some);
        }
        self.default_root
            .as_deref()
            .map(|name| self.root(name))
            .transpose()
    }
}
