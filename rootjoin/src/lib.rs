#![cfg_attr(not(test), deny(missing_docs))]
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # rootjoin
//!
//! Join an untrusted path onto a trusted root directory, expanding symbolic
//! links as if the process were chrooted into that root.
//!
//! A plain `root.join(untrusted)` followed by `canonicalize` lets `..` and
//! symlinks escape the root. [`secure_join`] instead walks the untrusted path
//! one component at a time: `..` never climbs above the root, and a symlink
//! whose target is absolute is re-read relative to the root. Missing
//! components are fine, so the result may name a file that is about to be
//! created.
//!
//! ## Core Types
//!
//! - [`secure_join`] and [`PathResolver`]: Resolution entry points
//! - [`Lookup`], [`OsLookup`] and [`MemoryLookup`]: Filesystem queries
//! - [`ResolvedPath`]: A result plus how it was reached
//! - [`Config`] and [`ConfigBuilder`]: Named roots from YAML and environment
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use rootjoin::{secure_join_with, MemoryLookup};
//! use std::path::Path;
//!
//! let fs = MemoryLookup::new()
//!     .with_dir("/var/lib/app/rootfs/etc")
//!     .with_symlink("/var/lib/app/rootfs/etc/shadow", "/../../../secrets/shadow");
//!
//! let path = secure_join_with("/var/lib/app/rootfs", "etc/shadow", &fs).unwrap();
//! assert_eq!(path, Path::new("/var/lib/app/rootfs/secrets/shadow"));
//! ```
//!
//! Resolution is only as good as the moment it ran; see the
//! [`path`] module for the symlink race this leaves open.

pub mod config;
pub mod error;
pub mod logging;
pub mod path;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{
    secure_join, secure_join_with, Lookup, MemoryLookup, OsLookup, PathRelationship,
    PathResolver, ResolvedPath, MAX_SYMLINK_EXPANSIONS,
};
