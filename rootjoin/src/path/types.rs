//! Core types for path resolution.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// The outcome of resolving an untrusted path beneath a root.
///
/// Besides the final path, this records the root it was confined to and how
/// the resolver got there.
///
/// # Examples
///
/// ```
/// use rootjoin::path::{MemoryLookup, PathResolver};
/// use std::path::Path;
///
/// let fs = MemoryLookup::new().with_symlink("/safe/docs", "shared/docs");
/// let resolver = PathResolver::with_lookup(fs);
///
/// let resolved = resolver.resolve(Path::new("/safe"), Path::new("docs/a.txt")).unwrap();
/// assert_eq!(resolved.path(), Path::new("/safe/shared/docs/a.txt"));
/// assert_eq!(resolved.expansions(), 1);
/// assert_eq!(resolved.relative(), Some(Path::new("shared/docs/a.txt")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedPath {
    root: PathBuf,
    #[serde(rename = "resolved")]
    path: PathBuf,
    expansions: usize,
    short_circuited: bool,
}

impl ResolvedPath {
    pub(crate) fn new(
        root: PathBuf,
        path: PathBuf,
        expansions: usize,
        short_circuited: bool,
    ) -> Self {
        Self {
            root,
            path,
            expansions,
            short_circuited,
        }
    }

    /// The resolved absolute path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The root the path was confined to, as given by the caller.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of symbolic links dereferenced during resolution.
    #[must_use]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Whether resolution ended on a root-prefixed absolute symlink target
    /// that was returned as-is.
    #[must_use]
    pub fn was_short_circuited(&self) -> bool {
        self.short_circuited
    }

    /// The resolved path relative to the (cleaned) root.
    ///
    /// Returns `None` only if the resolved path is not beneath the root,
    /// which the resolver never produces.
    #[must_use]
    pub fn relative(&self) -> Option<&Path> {
        self.path.strip_prefix(super::lexical::clean(&self.root)).ok()
    }

    /// Convert into the underlying `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolvedPath {
        ResolvedPath::new(
            PathBuf::from("/srv/./data"),
            PathBuf::from("/srv/data/a/b"),
            2,
            false,
        )
    }

    #[test]
    fn test_accessors() {
        let resolved = sample();
        assert_eq!(resolved.path(), Path::new("/srv/data/a/b"));
        assert_eq!(resolved.root(), Path::new("/srv/./data"));
        assert_eq!(resolved.expansions(), 2);
        assert!(!resolved.was_short_circuited());
    }

    #[test]
    fn test_relative_uses_cleaned_root() {
        assert_eq!(sample().relative(), Some(Path::new("a/b")));
    }

    #[test]
    fn test_relative_of_root_itself_is_empty() {
        let resolved = ResolvedPath::new(
            PathBuf::from("/srv"),
            PathBuf::from("/srv"),
            0,
            false,
        );
        assert_eq!(resolved.relative(), Some(Path::new("")));
    }

    #[test]
    fn test_serializes_resolved_field() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["resolved"], "/srv/data/a/b");
        assert_eq!(json["expansions"], 2);
        assert_eq!(json["short_circuited"], false);
    }

    #[test]
    fn test_into_path_buf() {
        assert_eq!(sample().into_path_buf(), PathBuf::from("/srv/data/a/b"));
    }
}
