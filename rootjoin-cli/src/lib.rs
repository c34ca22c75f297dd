//! Library exports for rootjoin-cli.
//!
//! This module exports the CLI structure so integration tests and tooling
//! can inspect the command definitions.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
