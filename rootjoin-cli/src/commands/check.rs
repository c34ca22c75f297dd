//! Command to assert that a path resolves inside its root.

use crate::error::CliError;
use crate::utils::{select_root, GlobalOptions, RootArgs};
use clap::Args;
use rootjoin::{PathRelationship, PathResolver};
use std::path::{Path, PathBuf};

/// Check that a path resolves within the root.
///
/// The resolver already confines every result, so this is an assertion for
/// scripts: it exits with 0 when the result is within the root and 1 if that
/// guarantee is ever broken. Nothing is printed unless `--verbose` is given.
/// Resolution errors keep their own exit codes.
#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub root: RootArgs,

    /// Untrusted path to check
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

impl CheckCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = select_root(&self.root, global)?;
        let resolved = PathResolver::new().resolve(&root, &self.path)?;

        let relationship = PathRelationship::between(resolved.path(), &root);
        global
            .logger
            .info(&relationship.description(resolved.path(), &root));

        ensure_within(&self.path, resolved.path(), &root)
    }
}

/// Fail with a semantic error unless `resolved` is `root` or beneath it.
fn ensure_within(untrusted: &Path, resolved: &Path, root: &Path) -> Result<(), CliError> {
    if PathRelationship::is_within(resolved, root) {
        Ok(())
    } else {
        Err(CliError::SemanticFailure(format!(
            "{} resolves outside {}",
            untrusted.display(),
            root.display()
        )))
    }
}
