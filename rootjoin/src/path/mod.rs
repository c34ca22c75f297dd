//! Chroot-style path resolution.
//!
//! This module joins an untrusted path onto a trusted root so that the result
//! is the path the untrusted one would name if the process were chrooted into
//! the root. Symbolic links are expanded against the root rather than the
//! host: `..` stops at the root, and absolute link targets restart from it.
//!
//! # Key Concepts
//!
//! ## Lookup
//!
//! The resolver asks a [`Lookup`] two questions per path component. The real
//! filesystem is [`OsLookup`]; [`MemoryLookup`] answers from a synthetic tree
//! for virtual filesystems and tests.
//!
//! ## Missing entries
//!
//! Components that do not exist are joined lexically. The result therefore
//! need not exist, which suits callers that are about to create it.
//!
//! ## Symlink races
//!
//! The result is a plain path, not an open handle. If an attacker can modify
//! the tree under the root, any component may become a symlink between
//! resolution and use. Guarding against that needs `openat`-style APIs and is
//! left to the caller.
//!
//! # Examples
//!
//! ```
//! use rootjoin::path::{MemoryLookup, PathResolver};
//! use std::path::Path;
//!
//! let fs = MemoryLookup::new()
//!     .with_dir("/containers/web/rootfs/etc")
//!     .with_symlink("/containers/web/rootfs/etc/hosts", "/run/hosts");
//! let resolver = PathResolver::with_lookup(fs);
//!
//! let root = Path::new("/containers/web/rootfs");
//! let resolved = resolver.resolve(root, Path::new("etc/hosts")).unwrap();
//! assert_eq!(resolved.path(), Path::new("/containers/web/rootfs/run/hosts"));
//! ```

pub mod lexical;
pub mod lookup;
pub mod memory;
pub mod relationship;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use lookup::{is_not_found, EntryInfo, Lookup, OsLookup};
pub use memory::MemoryLookup;
pub use relationship::PathRelationship;
pub use resolver::{secure_join, secure_join_with, PathResolver, MAX_SYMLINK_EXPANSIONS};
pub use types::ResolvedPath;
