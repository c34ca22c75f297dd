//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use rootjoin::config::{Config, ConfigMerger};
///
/// let low = Config { default_root: Some("low".to_string()), ..Default::default() };
/// let high = Config { default_root: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.default_root, Some("high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - `default_root`, `root_override`: source overwrites if `Some`
    /// - `roots`: merged key by key, source entries replacing same-named ones
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.default_root.is_some() {
            target.default_root.clone_from(&source.default_root);
        }

        if source.root_override.is_some() {
            target.root_override.clone_from(&source.root_override);
        }

        for (name, path) in &source.roots {
            target.roots.insert(name.clone(), path.clone());
        }
    }
}
