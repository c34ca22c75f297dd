//! Build script for rootjoin-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn root_args() -> [Arg; 2] {
    [
        Arg::new("root")
            .long("root")
            .help("Trusted root directory to confine paths to")
            .value_name("PATH"),
        Arg::new("root-name")
            .long("root-name")
            .help("Name of a root from the configuration")
            .value_name("NAME"),
    ]
}

/// Build the CLI command structure for man page generation.
///
/// Keep this synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("rootjoin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve untrusted paths inside a trusted root")
        .long_about(
            "Join untrusted paths onto a trusted root directory, expanding symbolic links \
             as if the process were chrooted into the root",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Override the user configuration directory")
                .value_name("PATH")
                .global(true)
                .env("ROOTJOIN_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("join")
                .about("Resolve paths beneath a root")
                .long_about("Resolve each untrusted path beneath the root and print the result")
                .args(root_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON object per path")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("PATH")
                        .required(true)
                        .num_args(1..)
                        .help("Untrusted paths to resolve"),
                ),
            Command::new("check")
                .about("Check that a path resolves within the root")
                .long_about("Exit with status 0 if the path resolves within the root, 1 otherwise")
                .args(root_args())
                .arg(Arg::new("PATH").required(true).help("Untrusted path to check")),
            Command::new("roots")
                .about("List configured roots")
                .long_about("List the named roots from the merged configuration"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a rootjoin configuration file for errors")
                .arg(Arg::new("CONFIG_PATH").required(true)),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(Arg::new("SHELL").required(true)),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("rootjoin.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
