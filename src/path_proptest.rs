//! Property-based tests for path normalization and remote root derivation.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::normalize;
    use crate::remote::{HostFlavor, RemoteRoot};
    use proptest::prelude::*;
    use std::path::{Component, Path, PathBuf};

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => "[a-z]{1,6}",
            1 => Just("..".to_string()),
            1 => Just(".".to_string()),
        ]
    }

    proptest! {
        /// Property: an absolute path normalizes to a path with no `.` or `..`
        #[test]
        fn normalize_absolute_has_no_dot_components(parts in prop::collection::vec(segment(), 0..12)) {
            let path = PathBuf::from("/").join(parts.join("/"));
            let normalized = normalize(&path);
            prop_assert!(normalized.is_absolute());
            for component in normalized.components() {
                prop_assert!(
                    !matches!(component, Component::CurDir | Component::ParentDir),
                    "{:?} normalized to {:?}",
                    path,
                    normalized
                );
            }
        }

        /// Property: normalization is idempotent
        #[test]
        fn normalize_is_idempotent(parts in prop::collection::vec(segment(), 1..12)) {
            let path = PathBuf::from(parts.join("/"));
            let once = normalize(&path);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: paths without dot components are unchanged
        #[test]
        fn normalize_preserves_plain_paths(parts in prop::collection::vec("[a-z]{1,6}", 1..8)) {
            let joined = format!("/{}", parts.join("/"));
            prop_assert_eq!(normalize(Path::new(&joined)), PathBuf::from(&joined));
        }

        /// Property: root + own name reproduces the origin URL
        #[test]
        fn remote_root_round_trips_origin(
            host in "[a-z]{1,8}",
            group in "[a-zA-Z0-9_]{1,8}",
            name in "[a-zA-Z0-9_.-]{1,12}",
        ) {
            let origin = format!("ssh://{}/{}/{}", host, group, name);
            let remote = RemoteRoot::from_origin_url(&origin).unwrap();
            prop_assert!(remote.root().ends_with('/'));
            prop_assert_eq!(remote.url_for(&name), origin);
        }

        /// Property: the default branch follows the marker in the remote root
        #[test]
        fn default_branch_follows_marker(host in "[a-z]{1,10}", name in "[a-z]{1,8}") {
            let origin = format!("https://{}.com/org/{}", host, name);
            let remote = RemoteRoot::from_origin_url(&origin).unwrap();
            if remote.root().contains("github") {
                prop_assert_eq!(remote.flavor(), HostFlavor::Public);
                prop_assert_eq!(remote.default_branch(), "master");
            } else {
                prop_assert_eq!(remote.flavor(), HostFlavor::Internal);
                prop_assert_eq!(remote.default_branch(), "amd-master");
            }
        }
    }
}
