//! Command to list configured roots.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// List the roots defined in the configuration.
///
/// Prints `name<TAB>path` per root, marking the default with `*`.
#[derive(Args)]
pub struct RootsCommand {}

impl RootsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        if let Some(ref path) = config.root_override {
            println!("(env)\t{}", path.display());
        }

        for name in config.roots.keys() {
            let marker = if config.default_root.as_deref() == Some(name.as_str()) {
                "*"
            } else {
                ""
            };
            println!("{name}{marker}\t{}", config.root(name)?.display());
        }

        if config.roots.is_empty() && config.root_override.is_none() && !global.quiet {
            eprintln!("No roots configured");
        }

        Ok(())
    }
}
