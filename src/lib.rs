//! # depfetch
//!
//! Build tooling for projects that depend on sibling git repositories hosted
//! next to them on the same server.
//!
//! ## Quick Example
//!
//! ```
//! use depfetch::manifest::DependencyEntry;
//! use depfetch::remote::RemoteRoot;
//! use depfetch::git::SystemGit;
//! use depfetch::sync::{Action, SyncContext, Synchronizer};
//!
//! let remote = RemoteRoot::from_origin_url("https://github.com/org/project.git").unwrap();
//! assert_eq!(remote.default_branch(), "master");
//!
//! let context = SyncContext::new("/nonexistent/project/build", remote);
//! let git = SystemGit::new();
//! let sync = Synchronizer::new(&git, &context);
//!
//! let entry = DependencyEntry::new("dep.git", "../dep").pinned("abc123");
//! let step = sync.plan_entry(&entry, false).unwrap();
//! assert_eq!(step.url, "https://github.com/org/dep.git");
//! assert_eq!(step.revision, "abc123");
//! assert_eq!(step.action, Action::Clone);
//! ```
//!
//! ## Core Concepts
//!
//! - **Dependency table (`manifest`)**: typed entries naming a repository, a
//!   checkout path and an optional pinned revision.
//! - **Remote root (`remote`)**: the URL prefix shared by all sibling
//!   repositories, and the default branch of the hosting convention.
//! - **Git driver (`git`)**: the `GitOperations` trait and its system `git`
//!   implementation.
//! - **Synchronizer (`sync`)**: clones missing checkouts, updates existing
//!   ones, and pins fresh clones to their revision.
//! - **Version stamping (`stamp`)**: rewrites build number, date and suffix
//!   tokens in a version header.

pub mod defaults;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod path;
pub mod remote;
pub mod stamp;
pub mod sync;

#[cfg(test)]
mod path_proptest;
