//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let server = GitServer::new();
//! let tip = server.create_repo("dep.git", "amd-master", 2);
//! let fixture = TestFixture::new().with_project(&server, "project.git");
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, git_output, manifests, GitServer, TestFixture};
}

/// Manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// One pinned dependency next to the project.
    pub fn pinned(revision: &str) -> String {
        format!(
            "dependencies:\n  - name: dep.git\n    path: ../dep\n    revision: {}\n",
            revision
        )
    }

    /// One dependency without a pin.
    pub const UNPINNED: &str = "dependencies:\n  - name: dep.git\n    path: ../dep\n";

    /// A repository that does not exist on the server, followed by one that does.
    pub const MISSING_THEN_VALID: &str = r#"dependencies:
  - name: missing.git
    path: ../missing
  - name: dep.git
    path: ../dep
"#;

    /// A destination occupied by a plain file, followed by a pinned entry.
    pub const BLOCKED_THEN_PINNED: &str = r#"dependencies:
  - name: blocked.git
    path: ../blocked
  - name: dep.git
    path: ../dep
    revision: abc123
"#;

    /// Two entries sharing a name.
    pub const DUPLICATE: &str = r#"dependencies:
  - { name: dep.git, path: ../a }
  - { name: dep.git, path: ../b }
"#;
}

/// Run git with a fixed identity, panicking on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) {
    let status = git_command(dir, args)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}

/// Run git and return its trimmed stdout.
#[allow(dead_code)]
pub fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = git_command(dir, args)
        .output()
        .expect("Failed to run git");
    assert!(output.status.success(), "git {:?} failed in {}", args, dir.display());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir)
        .args([
            "-c",
            "user.name=depfetch tests",
            "-c",
            "user.email=tests@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "init.defaultBranch=master",
        ])
        .args(args);
    cmd
}

/// A directory of bare repositories acting as the git server.
#[allow(dead_code)]
pub struct GitServer {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitServer {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// URL of a repository on this server.
    pub fn url(&self, name: &str) -> String {
        format!("{}/{}", self.path().display(), name)
    }

    /// Create bare repository `name` with `commits` commits on `branch`.
    /// Returns the commit hashes, oldest first.
    pub fn create_repo(&self, name: &str, branch: &str, commits: usize) -> Vec<String> {
        let bare = self.path().join(name);
        std::fs::create_dir_all(&bare).unwrap();
        git(&bare, &["init", "--bare", "--quiet"]);

        let work = self.path().join(format!("{}.work", name));
        std::fs::create_dir_all(&work).unwrap();
        git(&work, &["init", "--quiet"]);

        let mut hashes = Vec::new();
        for i in 0..commits {
            std::fs::write(work.join("version.txt"), format!("{}\n", i)).unwrap();
            git(&work, &["add", "version.txt"]);
            git(&work, &["commit", "--quiet", "-m", &format!("commit {}", i)]);
            hashes.push(git_output(&work, &["rev-parse", "HEAD"]));
        }
        self.push(name, branch);
        hashes
    }

    /// Add a commit to `name` and push it to `branch`. Returns its hash.
    pub fn add_commit(&self, name: &str, branch: &str, content: &str) -> String {
        let work = self.path().join(format!("{}.work", name));
        std::fs::write(work.join("version.txt"), content).unwrap();
        git(&work, &["commit", "--quiet", "-am", content]);
        self.push(name, branch);
        git_output(&work, &["rev-parse", "HEAD"])
    }

    fn push(&self, name: &str, branch: &str) {
        let work = self.path().join(format!("{}.work", name));
        let bare = self.path().join(name);
        git(
            &work,
            &[
                "push",
                "--quiet",
                bare.to_str().unwrap(),
                &format!("HEAD:refs/heads/{}", branch),
            ],
        );
    }
}

impl Default for GitServer {
    fn default() -> Self {
        Self::new()
    }
}

/// A workspace holding the project checkout that dependencies land next to.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create `project/` as a git checkout whose origin lives on `server`.
    pub fn with_project(self, server: &GitServer, name: &str) -> Self {
        let project = self.project_dir();
        std::fs::create_dir_all(&project).unwrap();
        git(&project, &["init", "--quiet"]);
        git(&project, &["remote", "add", "origin", &server.url(name)]);
        self
    }

    /// Write `project/deps.yaml`.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child("project/deps.yaml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn project_dir(&self) -> PathBuf {
        self.path().join("project")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir().join("deps.yaml")
    }

    /// Where a `../<name>` dependency is checked out.
    pub fn dep_dir(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
