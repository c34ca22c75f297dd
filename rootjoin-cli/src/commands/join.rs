//! Command to resolve untrusted paths beneath a root.

use crate::error::CliError;
use crate::utils::{select_root, GlobalOptions, RootArgs};
use clap::Args;
use rootjoin::{PathResolver, ResolvedPath};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Resolve paths beneath a root, expanding symlinks as if chrooted.
#[derive(Args)]
pub struct JoinCommand {
    #[command(flatten)]
    pub root: RootArgs,

    /// Print one JSON object per path
    #[arg(long)]
    pub json: bool,

    /// Untrusted paths to resolve
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// One line of `--json` output.
#[derive(Serialize)]
struct JoinRecord<'a> {
    path: &'a Path,
    #[serde(flatten)]
    resolved: &'a ResolvedPath,
}

impl JoinCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = select_root(&self.root, global)?;
        let resolver = PathResolver::new();
        let mut stdout = io::stdout().lock();

        for path in &self.paths {
            let resolved = resolver.resolve(&root, path)?;
            global.logger.info(&format!(
                "{} -> {} ({} symlinks)",
                path.display(),
                resolved.path().display(),
                resolved.expansions()
            ));

            if self.json {
                let record = JoinRecord {
                    path,
                    resolved: &resolved,
                };
                serde_json::to_writer(&mut stdout, &record).map_err(io::Error::from)?;
                writeln!(stdout)?;
            } else {
                writeln!(stdout, "{}", resolved.path().display())?;
            }
        }

        Ok(())
    }
}
