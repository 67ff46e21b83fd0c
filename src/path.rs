//! Path manipulation utilities for depfetch

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the root of an absolute path is dropped, so
/// `/a/../../b` becomes `/b`. For relative paths leading `..` components are
/// kept, so `../x/../y` becomes `../y`. An empty result is `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Resolve a dependency's `local_path` against the directory its table
/// belongs to.
pub fn resolve_destination(anchor: &Path, local_path: &str) -> PathBuf {
    normalize(&anchor.join(local_path))
}
