//! The filesystem lookup capability consumed by the resolver.
//!
//! The resolver never touches the filesystem directly. It asks a [`Lookup`]
//! implementation two questions: what is at this path (without following a
//! trailing symlink), and where does this symlink point. [`OsLookup`] answers
//! them from the real filesystem; tests and virtual filesystems substitute
//! their own implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a lookup found at a path.
///
/// # Examples
///
/// ```
/// use rootjoin::path::EntryInfo;
///
/// let link = EntryInfo::symlink();
/// assert!(link.is_symlink());
/// assert!(!link.is_dir());
///
/// let dir = EntryInfo::directory();
/// assert!(dir.is_dir());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryInfo {
    symlink: bool,
    dir: bool,
}

impl EntryInfo {
    /// Create an entry description from its two flags.
    #[must_use]
    pub const fn new(is_symlink: bool, is_dir: bool) -> Self {
        Self {
            symlink: is_symlink,
            dir: is_dir,
        }
    }

    /// A symbolic link.
    #[must_use]
    pub const fn symlink() -> Self {
        Self::new(true, false)
    }

    /// A directory.
    #[must_use]
    pub const fn directory() -> Self {
        Self::new(false, true)
    }

    /// Anything that is neither a symlink nor a directory.
    #[must_use]
    pub const fn file() -> Self {
        Self::new(false, false)
    }

    /// Whether the entry is a symbolic link.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        self.symlink
    }

    /// Whether the entry is a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.dir
    }
}

impl From<&fs::Metadata> for EntryInfo {
    fn from(metadata: &fs::Metadata) -> Self {
        Self::new(metadata.file_type().is_symlink(), metadata.is_dir())
    }
}

/// Read-only filesystem queries needed to resolve a path under a root.
///
/// Implementations must keep `lstat`/`readlink` semantics: `describe` must
/// not follow a symlink in the final component, and `read_target` returns the
/// link target exactly as stored.
#[cfg_attr(test, mockall::automock)]
pub trait Lookup {
    /// Describe the entry at `path` without following a final symlink.
    ///
    /// # Errors
    ///
    /// A missing entry must be reported as [`io::ErrorKind::NotFound`] or
    /// [`io::ErrorKind::NotADirectory`]; see [`is_not_found`]. Any other
    /// error aborts resolution.
    fn describe(&self, path: &Path) -> io::Result<EntryInfo>;

    /// Read the stored target of the symbolic link at `path`.
    ///
    /// # Errors
    ///
    /// Any error aborts resolution.
    fn read_target(&self, path: &Path) -> io::Result<PathBuf>;
}

/// [`Lookup`] backed by the real filesystem.
///
/// # Examples
///
/// ```no_run
/// use rootjoin::path::{Lookup, OsLookup};
/// use std::path::Path;
///
/// let info = OsLookup.describe(Path::new("/tmp")).unwrap();
/// assert!(info.is_dir() || info.is_symlink());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OsLookup;

impl Lookup for OsLookup {
    fn describe(&self, path: &Path) -> io::Result<EntryInfo> {
        fs::symlink_metadata(path).map(|metadata| EntryInfo::from(&metadata))
    }

    fn read_target(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }
}

/// Check whether a lookup error means "nothing is there".
///
/// Besides plain `NotFound`, a path whose parent is not a directory
/// (`ENOTDIR`) also cannot name an existing entry.
///
/// # Examples
///
/// ```
/// use rootjoin::path::is_not_found;
/// use std::io;
///
/// assert!(is_not_found(&io::Error::from(io::ErrorKind::NotFound)));
/// assert!(is_not_found(&io::Error::from(io::ErrorKind::NotADirectory)));
/// assert!(!is_not_found(&io::Error::from(io::ErrorKind::PermissionDenied)));
/// ```
#[must_use]
pub fn is_not_found(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
