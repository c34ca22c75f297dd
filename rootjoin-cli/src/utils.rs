//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and choosing the confinement root.

use crate::error::CliError;
use clap::Args;
use rootjoin::path::lexical::expand_tilde;
use rootjoin::{Config, ConfigBuilder, Logger};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
///
/// Verbosity lives in `logger`; commands ask it rather than the raw flag.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the user configuration directory.
    pub config_dir: Option<PathBuf>,

    /// The logger installed for this run.
    pub logger: Logger,
}

/// Root selection shared by the resolving commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// Trusted root directory to confine paths to
    #[arg(long, value_name = "PATH", conflicts_with = "root_name")]
    pub root: Option<PathBuf>,

    /// Name of a root from the configuration
    #[arg(long, value_name = "NAME")]
    pub root_name: Option<String>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Project `rootjoin.yaml`
/// 3. User config (`--config-dir` or `~/.rootjoin`)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref dir) = global.config_dir {
        builder = builder.with_config_dir(dir);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Choose the root for a command.
///
/// An explicit `--root` wins and skips configuration entirely. Otherwise
/// `--root-name` is looked up, falling back to `ROOTJOIN_ROOT` and then the
/// configured `default_root`.
pub fn select_root(args: &RootArgs, global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref root) = args.root {
        return Ok(expand_tilde(root)?);
    }

    let config = load_configuration(global)?;
    if let Some(ref name) = args.root_name {
        return Ok(config.root(name)?);
    }

    config.default_root_path()?.ok_or_else(|| {
        CliError::InvalidArguments(
            "no root given; pass --root or --root-name, or configure default_root".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootjoin::LogLevel;

    fn global() -> GlobalOptions {
        GlobalOptions {
            quiet: true,
            config_dir: None,
            logger: Logger::new(LogLevel::Quiet),
        }
    }

    #[test]
    fn test_explicit_root_wins() {
        let args = RootArgs {
            root: Some(PathBuf::from("/srv/jail")),
            root_name: None,
        };
        assert_eq!(select_root(&args, &global()).unwrap(), PathBuf::from("/srv/jail"));
    }

    #[test]
    fn test_explicit_root_expands_tilde() {
        let args = RootArgs {
            root: Some(PathBuf::from("~/jail")),
            root_name: None,
        };
        let root = select_root(&args, &global()).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("jail"));
    }
}
