//! # Remote Root Resolution
//!
//! Every dependency lives next to the current project on the same git
//! server. The URL of a dependency is therefore built from the project's own
//! `origin` URL: the last path segment (the project's repository name) is
//! stripped to give the *remote root*, and the dependency name is appended.
//!
//! The same table must work whether the project was cloned from the public
//! mirror or from an internal server, and the two hosts name their default
//! branch differently. [`HostFlavor`] captures that distinction.

use crate::defaults::{INTERNAL_DEFAULT_BRANCH, PUBLIC_DEFAULT_BRANCH, PUBLIC_HOST_MARKER};
use crate::error::{Error, Result};

/// Which hosting convention a remote follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFlavor {
    /// The public mirror.
    Public,
    /// An internal server.
    Internal,
}

impl HostFlavor {
    /// Classify a URL by looking for the public hosting marker.
    pub fn detect(url: &str) -> Self {
        if url.contains(PUBLIC_HOST_MARKER) {
            HostFlavor::Public
        } else {
            HostFlavor::Internal
        }
    }

    /// Conventional default branch for this flavor.
    pub fn default_branch(self) -> &'static str {
        match self {
            HostFlavor::Public => PUBLIC_DEFAULT_BRANCH,
            HostFlavor::Internal => INTERNAL_DEFAULT_BRANCH,
        }
    }
}

/// The shared URL prefix of all sibling repositories, with its flavor and
/// the branch dependencies are cloned and pulled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRoot {
    root: String,
    flavor: HostFlavor,
    branch: String,
}

impl RemoteRoot {
    /// Derive the remote root from the project's own remote URL.
    ///
    /// `ssh://host/group/project.git` becomes `ssh://host/group/`. Trailing
    /// whitespace (git prints a newline) is ignored.
    pub fn from_origin_url(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::RemoteUrl {
                url: url.to_string(),
                message: "remote URL is empty".to_string(),
            });
        }

        let (prefix, _) = url.rsplit_once('/').ok_or_else(|| Error::RemoteUrl {
            url: url.to_string(),
            message: "URL has no '/' separated path segment to strip".to_string(),
        })?;

        Ok(Self::with_root(format!("{}/", prefix)))
    }

    /// Use `root` verbatim as the remote root, adding a trailing `/` when it
    /// is missing.
    pub fn with_root(root: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.ends_with('/') {
            root.push('/');
        }
        let flavor = HostFlavor::detect(&root);
        Self {
            branch: flavor.default_branch().to_string(),
            root,
            flavor,
        }
    }

    /// Replace the default branch picked from the host flavor.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Full URL of a sibling repository.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}{}", self.root, name)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn flavor(&self) -> HostFlavor {
        self.flavor
    }

    pub fn default_branch(&self) -> &str {
        &self.branch
    }
}
