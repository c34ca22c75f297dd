//! Error types for the rootjoin library.
//!
//! Resolution itself only ever fails in two ways: the symlink expansion
//! ceiling was exceeded, or the lookup capability reported something other
//! than "not found". The remaining variants belong to configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a rootjoin error.
///
/// # Examples
///
/// ```
/// use rootjoin::{Error, Result};
/// use std::path::PathBuf;
///
/// fn example_operation() -> Result<PathBuf> {
///     Ok(PathBuf::from("/srv/uploads/avatar.png"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the rootjoin library.
#[derive(Debug, Error)]
pub enum Error {
    /// Too many symbolic links were dereferenced while resolving a path.
    ///
    /// This is what a symlink cycle (or an adversarially long chain) looks
    /// like from inside the resolver.
    #[error(
        "too many levels of symbolic links (limit {limit}) resolving {} under {}",
        path.display(),
        root.display()
    )]
    SymlinkLoop {
        /// The confinement root of the failed call.
        root: PathBuf,
        /// The untrusted path as originally supplied.
        path: PathBuf,
        /// The expansion ceiling that was exceeded.
        limit: usize,
    },

    /// The lookup capability failed with something other than "not found".
    #[error("lookup failed for {}: {source}", path.display())]
    Lookup {
        /// The absolute path being described or read.
        path: PathBuf,
        /// The underlying error, untouched.
        #[source]
        source: io::Error,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred outside of path resolution.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A named root was requested but is not configured.
    #[error("unknown root '{name}'")]
    UnknownRoot {
        /// The requested root name.
        name: String,
    },
}

impl Error {
    /// Check if error is the symlink expansion ceiling being exceeded.
    ///
    /// # Examples
    ///
    /// ```
    /// use rootjoin::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::SymlinkLoop {
    ///     root: PathBuf::from("/safe"),
    ///     path: PathBuf::from("loop"),
    ///     limit: 255,
    /// };
    /// assert!(err.is_symlink_loop());
    /// ```
    #[must_use]
    pub fn is_symlink_loop(&self) -> bool {
        matches!(self, Self::SymlinkLoop { .. })
    }

    /// Check if error came from the lookup capability.
    ///
    /// # Examples
    ///
    /// ```
    /// use rootjoin::Error;
    /// use std::io;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Lookup {
    ///     path: PathBuf::from("/safe/secret"),
    ///     source: io::Error::from(io::ErrorKind::PermissionDenied),
    /// };
    /// assert!(err.is_lookup_failure());
    /// ```
    #[must_use]
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }

    /// The kind of the underlying I/O error, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rootjoin::Error;
    /// use std::io;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Lookup {
    ///     path: PathBuf::from("/safe/secret"),
    ///     source: io::Error::from(io::ErrorKind::PermissionDenied),
    /// };
    /// assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
    /// ```
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Lookup { source, .. } | Self::Io(source) => Some(source.kind()),
            _ => None,
        }
    }
}
