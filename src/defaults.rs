//! Default values for depfetch.
//!
//! Compiled-in constants shared by the synchronizer, the version stamper and
//! the CLI, so each convention is named in exactly one place.

/// Substring of a remote URL that marks the public hosting mirror.
pub const PUBLIC_HOST_MARKER: &str = "github";

/// Default branch name on the public mirror.
pub const PUBLIC_DEFAULT_BRANCH: &str = "master";

/// Default branch name on internal servers.
pub const INTERNAL_DEFAULT_BRANCH: &str = "amd-master";

/// Remote that every checkout is fetched from and pulled against.
pub const ORIGIN: &str = "origin";

/// Executable name of the version-control tool.
pub const GIT: &str = "git";

/// Version header rewritten by `stamp-version`, relative to the root.
pub const VERSION_FILE: &str = "source/Common/Version.h";

/// Prefix shared by the macros `stamp-version` rewrites.
pub const VERSION_TOKEN_PREFIX: &str = "DEV_DRIVER_TOOLS";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_names_differ() {
        assert_ne!(PUBLIC_DEFAULT_BRANCH, INTERNAL_DEFAULT_BRANCH);
    }

    #[test]
    fn test_version_file_is_relative() {
        assert!(!std::path::Path::new(VERSION_FILE).is_absolute());
    }
}
