//! Property-based tests for resolution over generated symlink trees.
//!
//! The lexical module already has property tests for cleaning. This module
//! focuses on resolver behavior against arbitrary `MemoryLookup` trees.

use super::lexical::clean;
use super::memory::MemoryLookup;
use super::relationship::PathRelationship;
use super::resolver::PathResolver;
use crate::error::Error;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

const ROOT: &str = "/jail/root";

#[derive(Debug, Clone)]
enum Entry {
    File(String),
    Dir(String),
    Link(String, String),
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("a"), Just("b"), Just("c"), Just("etc")].prop_map(String::from)
}

fn relative_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => name_strategy(),
            1 => Just("..".to_string()),
            1 => Just(".".to_string()),
        ],
        1..5,
    )
    .prop_map(|parts| parts.join("/"))
}

fn target_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        relative_strategy(),
        relative_strategy().prop_map(|p| format!("/{p}")),
        relative_strategy().prop_map(|p| format!("{ROOT}/{p}")),
        Just("/".to_string()),
    ]
}

fn location_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(name_strategy(), 1..3).prop_map(|p| p.join("/"))
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    prop_oneof![
        location_strategy().prop_map(Entry::File),
        location_strategy().prop_map(Entry::Dir),
        (location_strategy(), target_strategy()).prop_map(|(at, to)| Entry::Link(at, to)),
    ]
}

fn tree_strategy() -> impl Strategy<Value = MemoryLookup> {
    prop::collection::vec(entry_strategy(), 0..8).prop_map(|entries| {
        let root = Path::new(ROOT);
        entries
            .into_iter()
            .fold(MemoryLookup::new().with_dir(root), |fs, entry| match entry {
                Entry::File(at) => fs.with_file(root.join(at)),
                Entry::Dir(at) => fs.with_dir(root.join(at)),
                Entry::Link(at, to) => fs.with_symlink(root.join(at), PathBuf::from(to)),
            })
    })
}

fn untrusted_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        relative_strategy(),
        relative_strategy().prop_map(|p| format!("/{p}")),
        relative_strategy().prop_map(|p| format!("../../{p}")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Whatever the tree holds, a successful result never leaves the root
    #[test]
    fn result_is_confined(fs in tree_strategy(), path in untrusted_strategy()) {
        let resolver = PathResolver::with_lookup(fs);
        match resolver.resolve(Path::new(ROOT), Path::new(&path)) {
            Ok(resolved) => {
                prop_assert!(
                    PathRelationship::is_within(resolved.path(), Path::new(ROOT)),
                    "{} escaped via {}",
                    resolved.path().display(),
                    path
                );
                prop_assert_eq!(clean(resolved.path()), resolved.path().to_path_buf());
            }
            Err(Error::SymlinkLoop { .. } | Error::Lookup { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    // Re-resolving a result's root-relative part changes nothing
    #[test]
    fn resolution_is_idempotent(fs in tree_strategy(), path in untrusted_strategy()) {
        let resolver = PathResolver::with_lookup(fs);
        let root = Path::new(ROOT);
        if let Ok(first) = resolver.resolve(root, Path::new(&path)) {
            if !first.was_short_circuited() {
                let relative = first.relative().unwrap_or(Path::new(""));
                let again = resolver.join(root, relative).unwrap();
                prop_assert_eq!(again, first.path().to_path_buf());
            }
        }
    }

    // Without symlinks, resolution is the lexical rooted join
    #[test]
    fn plain_tree_is_lexical(path in untrusted_strategy()) {
        let fs = MemoryLookup::new().with_dir(Path::new(ROOT).join("a/b"));
        let resolver = PathResolver::with_lookup(fs);
        let resolved = resolver.resolve(Path::new(ROOT), Path::new(&path)).unwrap();
        prop_assert_eq!(resolved.expansions(), 0);
        prop_assert_eq!(
            resolved.into_path_buf(),
            super::lexical::rooted(Path::new(ROOT), Path::new(&path))
        );
    }

    // Excess parent components are indistinguishable from none
    #[test]
    fn parents_clamp_at_root(fs in tree_strategy(), path in relative_strategy(), extra in 1..6usize) {
        let resolver = PathResolver::with_lookup(fs);
        let root = Path::new(ROOT);
        let climbing = format!("{}{path}", "../".repeat(extra));
        let plain = format!("/{path}");
        let a = resolver.join(root, Path::new(&climbing)).ok();
        let b = resolver.join(root, Path::new(&plain)).ok();
        prop_assert_eq!(a, b);
    }
}
