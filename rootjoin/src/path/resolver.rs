//! Symlink-aware resolution of untrusted paths beneath a trusted root.
//!
//! This module provides the `PathResolver` type and the [`secure_join`]
//! convenience functions built on it.
//!
//! # Symlink races
//!
//! Resolution inspects the filesystem one component at a time and returns a
//! plain path. Nothing stops another process from replacing a component of
//! that path with a symlink after it was inspected and before the caller
//! opens the result. Callers that need atomicity must open-and-verify with
//! platform primitives; this module does not attempt it.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::lexical;
use crate::path::lookup::{is_not_found, Lookup, OsLookup};
use crate::path::types::ResolvedPath;

/// Maximum number of symbolic links dereferenced in one resolution.
///
/// The count is shared by the whole call, so it bounds total work however a
/// cycle is shaped.
pub const MAX_SYMLINK_EXPANSIONS: usize = 255;

/// Resolves untrusted paths beneath a root, treating the root as `/`.
///
/// Every symlink met along the way is expanded as if the process were
/// chrooted into the root: relative targets are re-read from where the link
/// lives, absolute targets restart from the root, and `..` never climbs above
/// the root. Entries that do not exist are accepted as plain components.
///
/// The one exception to re-rooting: when a non-directory symlink stores an
/// absolute target that already names the root or lies beneath it, that
/// target (cleaned) is returned as the result and the rest of the untrusted
/// path is dropped.
///
/// # Examples
///
/// ```no_run
/// use rootjoin::path::PathResolver;
/// use std::path::Path;
///
/// let resolver = PathResolver::new();
/// let resolved = resolver
///     .resolve(Path::new("/srv/uploads"), Path::new("../../etc/passwd"))
///     .unwrap();
/// assert_eq!(resolved.path(), Path::new("/srv/uploads/etc/passwd"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathResolver<L = OsLookup> {
    lookup: L,
}

impl PathResolver<OsLookup> {
    /// Create a resolver that consults the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: Lookup> PathResolver<L> {
    /// Create a resolver that consults `lookup` instead of the filesystem.
    ///
    /// # Examples
    ///
    /// ```
    /// use rootjoin::path::{MemoryLookup, PathResolver};
    /// use std::path::Path;
    ///
    /// let fs = MemoryLookup::new().with_symlink("/jail/up", "..");
    /// let resolver = PathResolver::with_lookup(fs);
    ///
    /// let path = resolver.join(Path::new("/jail"), Path::new("up/up/x")).unwrap();
    /// assert_eq!(path, Path::new("/jail/x"));
    /// ```
    #[must_use]
    pub fn with_lookup(lookup: L) -> Self {
        Self { lookup }
    }

    /// The lookup capability this resolver consults.
    #[must_use]
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve `path` beneath `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - More than [`MAX_SYMLINK_EXPANSIONS`] symlinks are dereferenced
    ///   (`SymlinkLoop`)
    /// - The lookup fails with anything but "not found", or a symlink target
    ///   cannot be read (`Lookup`)
    pub fn resolve(&self, root: &Path, path: &Path) -> Result<ResolvedPath> {
        resolve_in(root, path, &self.lookup)
    }

    /// Resolve `path` beneath `root`, returning only the final path.
    ///
    /// # Errors
    ///
    /// See [`PathResolver::resolve`].
    pub fn join(&self, root: &Path, path: &Path) -> Result<PathBuf> {
        self.resolve(root, path).map(ResolvedPath::into_path_buf)
    }
}

/// Join `path` beneath `root` on the real filesystem.
///
/// This is the function to reach for when in doubt.
///
/// # Errors
///
/// See [`PathResolver::resolve`].
///
/// # Examples
///
/// ```no_run
/// use rootjoin::secure_join;
///
/// let path = secure_join("/var/lib/app/rootfs", "/etc/../../../shadow").unwrap();
/// assert_eq!(path, std::path::Path::new("/var/lib/app/rootfs/shadow"));
/// ```
pub fn secure_join(root: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<PathBuf> {
    secure_join_with(root, path, &OsLookup)
}

/// Join `path` beneath `root`, consulting `lookup` for filesystem state.
///
/// # Errors
///
/// See [`PathResolver::resolve`].
pub fn secure_join_with<L: Lookup + ?Sized>(
    root: impl AsRef<Path>,
    path: impl AsRef<Path>,
    lookup: &L,
) -> Result<PathBuf> {
    resolve_in(root.as_ref(), path.as_ref(), lookup).map(ResolvedPath::into_path_buf)
}

/// One unconsumed component of the untrusted path.
#[derive(Debug)]
enum Step {
    /// `/`, a drive prefix, or `.`; none of them move the prefix.
    Stay,
    Parent,
    Name(OsString),
}

impl From<Component<'_>> for Step {
    fn from(component: Component<'_>) -> Self {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => Self::Stay,
            Component::ParentDir => Self::Parent,
            Component::Normal(name) => Self::Name(name.to_os_string()),
        }
    }
}

/// Components still to be resolved, next one last.
struct Pending(Vec<Step>);

impl Pending {
    fn new(path: &Path) -> Self {
        let mut pending = Self(Vec::new());
        pending.prepend(path);
        pending
    }

    fn prepend(&mut self, path: &Path) {
        self.0.extend(path.components().rev().map(Step::from));
    }

    fn pop(&mut self) -> Option<Step> {
        self.0.pop()
    }
}

fn resolve_in<L: Lookup + ?Sized>(root: &Path, path: &Path, lookup: &L) -> Result<ResolvedPath> {
    let mut pending = Pending::new(path);
    // Relative to root; only ever holds normal components.
    let mut prefix = PathBuf::new();
    let mut expansions = 0usize;

    while let Some(step) = pending.pop() {
        let name = match step {
            Step::Stay => continue,
            Step::Parent => {
                if !prefix.pop() {
                    log::trace!("clamped '..' at {}", root.display());
                }
                continue;
            }
            Step::Name(name) => name,
        };

        let candidate = prefix.join(&name);
        let full = lexical::rooted(root, &candidate);

        let info = match lookup.describe(&full) {
            Ok(info) => info,
            Err(e) if is_not_found(&e) => {
                prefix = candidate;
                continue;
            }
            Err(source) => return Err(Error::Lookup { path: full, source }),
        };
        if !info.is_symlink() {
            prefix = candidate;
            continue;
        }

        expansions += 1;
        if expansions > MAX_SYMLINK_EXPANSIONS {
            log::debug!(
                "gave up on {} under {} after {MAX_SYMLINK_EXPANSIONS} symlinks",
                path.display(),
                root.display()
            );
            return Err(Error::SymlinkLoop {
                root: root.to_path_buf(),
                path: path.to_path_buf(),
                limit: MAX_SYMLINK_EXPANSIONS,
            });
        }

        let target = lookup
            .read_target(&full)
            .map_err(|source| Error::Lookup {
                path: full.clone(),
                source,
            })?;
        log::trace!(
            "expanding {} -> {} ({expansions}/{MAX_SYMLINK_EXPANSIONS})",
            full.display(),
            target.display()
        );

        if target.is_absolute() {
            if !info.is_dir() {
                if let Some(inside) = lexical::within_root(&target, root) {
                    log::debug!("keeping root-prefixed target {}", inside.display());
                    return Ok(ResolvedPath::new(root.to_path_buf(), inside, expansions, true));
                }
            }
            log::debug!("absolute target {} restarts at root", target.display());
            prefix.clear();
        }
        pending.prepend(&target);
    }

    Ok(ResolvedPath::new(
        root.to_path_buf(),
        lexical::rooted(root, &prefix),
        expansions,
        false,
    ))
}
