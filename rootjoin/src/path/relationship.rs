//! Lexical relationship between a resolved path and its root.
//!
//! Used to confirm after the fact that a result really is confined, e.g. by
//! the `check` command of the CLI.

use std::path::Path;

use super::lexical::clean;

/// How two paths relate in the directory hierarchy, after cleaning.
///
/// # Examples
///
/// ```
/// use rootjoin::path::PathRelationship;
/// use std::path::Path;
///
/// assert_eq!(
///     PathRelationship::between(Path::new("/srv/root"), Path::new("/srv/root/a")),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The second path lies beneath the first.
    Ancestor,

    /// The first path lies beneath the second.
    Descendant,

    /// The paths are the same after cleaning.
    Same,

    /// Neither path lies beneath the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Both paths are lexically cleaned first, so `/a/b/..` is the same as
    /// `/a`. Comparison is component-wise: `/a` is not an ancestor of `/ab`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rootjoin::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// let rel = PathRelationship::between(Path::new("/a/b"), Path::new("/a"));
    /// assert_eq!(rel, PathRelationship::Descendant);
    ///
    /// let rel = PathRelationship::between(Path::new("/a/b/.."), Path::new("/a/"));
    /// assert_eq!(rel, PathRelationship::Same);
    ///
    /// let rel = PathRelationship::between(Path::new("/a"), Path::new("/ab"));
    /// assert_eq!(rel, PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &Path, path2: &Path) -> Self {
        let p1 = clean(path1);
        let p2 = clean(path2);

        if p1 == p2 {
            Self::Same
        } else if p2.starts_with(&p1) {
            Self::Ancestor
        } else if p1.starts_with(&p2) {
            Self::Descendant
        } else {
            Self::Unrelated
        }
    }

    /// Returns `false` only for `Unrelated`.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        !matches!(self, Self::Unrelated)
    }

    /// Check if `path` is `directory` or lies beneath it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rootjoin::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// let root = Path::new("/srv/root");
    /// assert!(PathRelationship::is_within(Path::new("/srv/root/etc/passwd"), root));
    /// assert!(PathRelationship::is_within(root, root));
    /// assert!(!PathRelationship::is_within(Path::new("/srv/root/../etc"), root));
    /// ```
    #[must_use]
    pub fn is_within(path: &Path, directory: &Path) -> bool {
        matches!(Self::between(path, directory), Self::Descendant | Self::Same)
    }

    /// Check if `path` is `other` or an ancestor of it.
    #[must_use]
    pub fn contains(path: &Path, other: &Path) -> bool {
        matches!(Self::between(path, other), Self::Ancestor | Self::Same)
    }

    /// Get a human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &Path, path2: &Path) -> String {
        let (a, b) = (path1.display(), path2.display());
        match self {
            Self::Ancestor => format!("{a} is an ancestor of {b}"),
            Self::Descendant => format!("{a} is a descendant of {b}"),
            Self::Same => format!("{a} and {b} are the same path"),
            Self::Unrelated => format!("{a} and {b} are unrelated paths"),
        }
    }
}
