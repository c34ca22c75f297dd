//! Lexical path functions.
//!
//! Everything in this module works on path text alone. Nothing here touches
//! the filesystem, so none of it knows about symbolic links:
//! - Cleaning `.`/`..` components and redundant separators
//! - Joining a path beneath a root without letting `..` climb above it
//! - Expanding tilde (~) to the home directory for configured roots

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Lexically clean a path.
///
/// Repeated separators and `.` components are dropped, and each `..` removes
/// the component before it. A `..` at the root of an absolute path is
/// discarded; leading `..` components of a relative path are kept. An empty
/// result becomes `.`.
///
/// # Examples
///
/// ```
/// use rootjoin::path::lexical::clean;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(clean(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(clean(Path::new("/../../x")), PathBuf::from("/x"));
/// assert_eq!(clean(Path::new("a//b/")), PathBuf::from("a/b"));
/// assert_eq!(clean(Path::new("../a/..")), PathBuf::from(".."));
/// assert_eq!(clean(Path::new("")), PathBuf::from("."));
/// ```
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut prefix: Option<&OsStr> = None;
    let mut has_root = false;
    let mut leading_parents = 0usize;
    let mut parts: Vec<&OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => prefix = Some(p.as_os_str()),
            Component::RootDir => has_root = true,
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() && !has_root {
                    leading_parents += 1;
                }
            }
            Component::Normal(c) => parts.push(c),
        }
    }

    let mut result = PathBuf::new();
    if let Some(p) = prefix {
        result.push(p);
    }
    if has_root {
        result.push(Component::RootDir);
    }
    for _ in 0..leading_parents {
        result.push(Component::ParentDir);
    }
    result.extend(parts);

    if result.as_os_str().is_empty() {
        result.push(Component::CurDir);
    }
    result
}

/// Join `path` beneath `root` as if `root` were `/`.
///
/// `path` is first cleaned as an absolute path, so any number of `..`
/// components stop at `root`. A leading separator on `path` is likewise
/// relative to `root`. The filesystem is not consulted.
///
/// # Examples
///
/// ```
/// use rootjoin::path::lexical::rooted;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/srv/data");
/// assert_eq!(rooted(root, Path::new("a/b")), PathBuf::from("/srv/data/a/b"));
/// assert_eq!(rooted(root, Path::new("../../../x")), PathBuf::from("/srv/data/x"));
/// assert_eq!(rooted(root, Path::new("/etc/passwd")), PathBuf::from("/srv/data/etc/passwd"));
/// assert_eq!(rooted(root, Path::new("")), PathBuf::from("/srv/data"));
/// ```
#[must_use]
pub fn rooted(root: &Path, path: &Path) -> PathBuf {
    let mut anchored = PathBuf::from(Component::RootDir.as_os_str());
    anchored.push(path);

    let mut joined = root.to_path_buf();
    for component in clean(&anchored).components() {
        if let Component::Normal(c) = component {
            joined.push(c);
        }
    }
    clean(&joined)
}

/// Returns the cleaned `target` if it is the cleaned `root` or lies beneath it.
///
/// Comparison is component-wise, so `/safe` does not contain `/safer/x`, and
/// `/safe/../etc` is rejected because it cleans to `/etc`.
///
/// # Examples
///
/// ```
/// use rootjoin::path::lexical::within_root;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/safe");
/// assert_eq!(
///     within_root(Path::new("/safe/a/./b"), root),
///     Some(PathBuf::from("/safe/a/b"))
/// );
/// assert_eq!(within_root(Path::new("/safe/."), root), Some(PathBuf::from("/safe")));
/// assert_eq!(within_root(Path::new("/safer/x"), root), None);
/// assert_eq!(within_root(Path::new("/safe/../etc"), root), None);
/// ```
#[must_use]
pub fn within_root(target: &Path, root: &Path) -> Option<PathBuf> {
    let target = clean(target);
    let root = clean(root);
    target.starts_with(&root).then_some(target)
}

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined, or if the
/// path uses `~user` syntax. Paths that are not valid UTF-8 are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use rootjoin::path::lexical::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/sandbox")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("sandbox"));
///
/// // Leaves other paths unchanged
/// let expanded = expand_tilde(Path::new("/srv/data")).unwrap();
/// assert_eq!(expanded, Path::new("/srv/data"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_simple() {
        assert_eq!(clean(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(clean(Path::new("/a/b/../../c")), PathBuf::from("/c"));
    }

    #[test]
    fn test_clean_root_only() {
        assert_eq!(clean(Path::new("/")), PathBuf::from("/"));
        assert_eq!(clean(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(clean(Path::new("//")), PathBuf::from("/"));
    }

    #[test]
    fn test_clean_relative() {
        assert_eq!(clean(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(clean(Path::new("./a/./")), PathBuf::from("a"));
        assert_eq!(clean(Path::new(".")), PathBuf::from("."));
        assert_eq!(clean(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn test_clean_collapses_separators() {
        assert_eq!(clean(Path::new("/a///b//c/")), PathBuf::from("/a/b/c"));
    }

    #[test]
    fn test_rooted_clamps_parent_components() {
        let root = Path::new("/safe");
        assert_eq!(rooted(root, Path::new("../../../x")), rooted(root, Path::new("x")));
        assert_eq!(rooted(root, Path::new("a/../../b")), PathBuf::from("/safe/b"));
        assert_eq!(rooted(root, Path::new("..")), PathBuf::from("/safe"));
    }

    #[test]
    fn test_rooted_treats_absolute_as_relative() {
        assert_eq!(
            rooted(Path::new("/safe"), Path::new("/outside/target")),
            PathBuf::from("/safe/outside/target")
        );
    }

    #[test]
    fn test_rooted_cleans_root() {
        assert_eq!(
            rooted(Path::new("/srv/./data/"), Path::new("x")),
            PathBuf::from("/srv/data/x")
        );
    }

    #[test]
    fn test_within_root_component_boundaries() {
        let root = Path::new("/safe");
        assert!(within_root(Path::new("/safe/x"), root).is_some());
        assert!(within_root(Path::new("/safex"), root).is_none());
        assert!(within_root(Path::new("/other/safe/x"), root).is_none());
        assert!(within_root(Path::new("/safe/../etc"), root).is_none());
    }

    #[test]
    fn test_within_root_accepts_root_itself() {
        let root = Path::new("/safe");
        assert_eq!(within_root(Path::new("/safe/"), root), Some(PathBuf::from("/safe")));
        assert_eq!(within_root(Path::new("/safe/."), root), Some(PathBuf::from("/safe")));
        assert_eq!(
            within_root(Path::new("/safe/x/.."), Path::new("/safe/")),
            Some(PathBuf::from("/safe"))
        );
    }

    #[test]
    fn test_expand_tilde_home() {
        let home = home::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
        assert_eq!(expand_tilde(Path::new("~/test")).unwrap(), home.join("test"));
    }

    #[test]
    fn test_expand_tilde_user_syntax_not_supported() {
        assert!(expand_tilde(Path::new("~user/path")).is_err());
    }

    #[cfg(unix)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn path_with_dots_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    Just(".".to_string()),
                    Just("..".to_string()),
                    Just(String::new()),
                    "[a-zA-Z0-9_-]{1,10}".prop_map(|s| s),
                ],
                1..=8,
            )
            .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        proptest! {
            /// Cleaning is idempotent
            #[test]
            fn clean_idempotent(s in path_with_dots_strategy()) {
                let once = clean(Path::new(&s));
                prop_assert_eq!(clean(&once), once);
            }

            /// Cleaned absolute paths hold only normal components after the root
            #[test]
            fn clean_absolute_has_no_dots(s in path_with_dots_strategy()) {
                let cleaned = clean(Path::new(&s));
                prop_assert!(cleaned.is_absolute());
                for component in cleaned.components().skip(1) {
                    prop_assert!(matches!(component, Component::Normal(_)));
                }
            }

            /// Rooted joins never leave the root
            #[test]
            fn rooted_stays_under_root(s in path_with_dots_strategy()) {
                let root = Path::new("/jail/root");
                prop_assert!(rooted(root, Path::new(&s)).starts_with(root));
            }
        }
    }
}
