//! Main entry point for the rootjoin CLI.
//!
//! Commands:
//! - `join`: Resolve untrusted paths beneath a root
//! - `check`: Assert a path resolves within its root
//! - `roots`: List configured roots
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = rootjoin::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        logger.warn(&format!("could not install logger: {e}"));
    }

    let global = GlobalOptions {
        quiet: cli.quiet,
        config_dir: cli.config_dir,
        logger,
    };

    let result = match cli.command {
        cli::Command::Join(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Roots(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !global.quiet {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
