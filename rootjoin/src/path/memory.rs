//! An in-memory [`Lookup`] for virtual filesystems and tests.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::lexical::clean;
use super::lookup::{EntryInfo, Lookup};

/// Kernel-style bound on symlinks followed through intermediate components.
const MAX_INTERMEDIATE_LINKS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File,
    Dir,
    Symlink(PathBuf),
}

/// A synthetic directory tree answering [`Lookup`] queries.
///
/// Paths are absolute and lexically cleaned on insertion. Missing parent
/// directories are created implicitly. `describe` follows symlinks in
/// intermediate components like `lstat(2)` does, but never in the final one.
///
/// # Examples
///
/// ```
/// use rootjoin::path::{secure_join_with, MemoryLookup};
/// use std::path::{Path, PathBuf};
///
/// let fs = MemoryLookup::new()
///     .with_dir("/safe/data")
///     .with_symlink("/safe/escape", "../../etc");
///
/// let resolved = secure_join_with(Path::new("/safe"), Path::new("escape/passwd"), &fs).unwrap();
/// assert_eq!(resolved, PathBuf::from("/safe/etc/passwd"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLookup {
    entries: BTreeMap<PathBuf, Node>,
    failures: BTreeMap<PathBuf, io::ErrorKind>,
}

impl MemoryLookup {
    /// Create an empty tree containing only `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), Node::File);
        self
    }

    /// Add a directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), Node::Dir);
        self
    }

    /// Add a symbolic link storing `target` verbatim.
    #[must_use]
    pub fn with_symlink(mut self, path: impl AsRef<Path>, target: impl Into<PathBuf>) -> Self {
        self.insert(path.as_ref(), Node::Symlink(target.into()));
        self
    }

    /// Make every lookup of `path` fail with `kind`.
    #[must_use]
    pub fn with_failure(mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.failures.insert(clean(path.as_ref()), kind);
        self
    }

    fn insert(&mut self, path: &Path, node: Node) {
        let path = clean(path);
        for ancestor in path.ancestors().skip(1) {
            if ancestor.parent().is_none() {
                break;
            }
            self.entries
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
        self.entries.insert(path, node);
    }

    fn injected_failure(&self, path: &Path) -> io::Result<()> {
        match self.failures.get(path) {
            Some(kind) => Err(io::Error::from(*kind)),
            None => Ok(()),
        }
    }

    /// Find the node at `path` without following a final symlink.
    fn node(&self, path: &Path) -> io::Result<Option<&Node>> {
        let Some(name) = path.file_name() else {
            // `/` itself.
            return Ok(None);
        };
        let parent = path.parent().unwrap_or(Path::new("/"));
        let mut hops = 0;
        let dir = self.resolve_dir(parent, &mut hops)?;
        self.entries
            .get(&dir.join(name))
            .map(Some)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    /// Walk `path` from `/`, following every symlink, and require a directory.
    fn resolve_dir(&self, path: &Path, hops: &mut usize) -> io::Result<PathBuf> {
        let mut current = PathBuf::from("/");
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir => {
                    current.pop();
                }
                Component::Normal(name) => {
                    let next = current.join(name);
                    match self.entries.get(&next) {
                        None => return Err(io::Error::from(io::ErrorKind::NotFound)),
                        Some(Node::File) => {
                            return Err(io::Error::from(io::ErrorKind::NotADirectory))
                        }
                        Some(Node::Dir) => current = next,
                        Some(Node::Symlink(target)) => {
                            *hops += 1;
                            if *hops > MAX_INTERMEDIATE_LINKS {
                                return Err(io::Error::other(
                                    "too many levels of symbolic links",
                                ));
                            }
                            let target = current.join(target);
                            current = self.resolve_dir(&target, hops)?;
                        }
                    }
                }
            }
        }
        Ok(current)
    }
}

impl Lookup for MemoryLookup {
    fn describe(&self, path: &Path) -> io::Result<EntryInfo> {
        let path = clean(path);
        self.injected_failure(&path)?;
        Ok(match self.node(&path)? {
            None | Some(Node::Dir) => EntryInfo::directory(),
            Some(Node::File) => EntryInfo::file(),
            Some(Node::Symlink(_)) => EntryInfo::symlink(),
        })
    }

    fn read_target(&self, path: &Path) -> io::Result<PathBuf> {
        let path = clean(path);
        self.injected_failure(&path)?;
        match self.node(&path)? {
            Some(Node::Symlink(target)) => Ok(target.clone()),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a symbolic link",
            )),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::path::is_not_found;

    #[test]
    fn test_root_is_a_directory() {
        let fs = MemoryLookup::new();
        assert_eq!(fs.describe(Path::new("/")).unwrap(), EntryInfo::directory());
    }

    #[test]
    fn test_parents_created_implicitly() {
        let fs = MemoryLookup::new().with_file("/a/b/c.txt");
        assert!(fs.describe(Path::new("/a")).unwrap().is_dir());
        assert!(fs.describe(Path::new("/a/b")).unwrap().is_dir());
        assert_eq!(fs.describe(Path::new("/a/b/c.txt")).unwrap(), EntryInfo::file());
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let fs = MemoryLookup::new().with_dir("/a");
        let err = fs.describe(Path::new("/a/missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_file_as_parent_is_not_a_directory() {
        let fs = MemoryLookup::new().with_file("/a/file");
        let err = fs.describe(Path::new("/a/file/child")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
        assert!(is_not_found(&err));
    }

    #[test]
    fn test_final_symlink_not_followed() {
        let fs = MemoryLookup::new()
            .with_dir("/target")
            .with_symlink("/link", "/target");
        assert_eq!(fs.describe(Path::new("/link")).unwrap(), EntryInfo::symlink());
        assert_eq!(
            fs.read_target(Path::new("/link")).unwrap(),
            PathBuf::from("/target")
        );
    }

    #[test]
    fn test_intermediate_symlink_followed() {
        let fs = MemoryLookup::new()
            .with_file("/real/dir/file")
            .with_symlink("/alias", "real/dir");
        assert_eq!(
            fs.describe(Path::new("/alias/file")).unwrap(),
            EntryInfo::file()
        );
    }

    #[test]
    fn test_intermediate_symlink_loop_errors() {
        let fs = MemoryLookup::new()
            .with_symlink("/a", "/b")
            .with_symlink("/b", "/a");
        let err = fs.describe(Path::new("/a/x")).unwrap_err();
        assert!(!is_not_found(&err));
    }

    #[test]
    fn test_read_target_of_non_symlink() {
        let fs = MemoryLookup::new().with_file("/f");
        let err = fs.read_target(Path::new("/f")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_injected_failure() {
        let fs = MemoryLookup::new()
            .with_dir("/locked")
            .with_failure("/locked", io::ErrorKind::PermissionDenied);
        let err = fs.describe(Path::new("/locked")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
