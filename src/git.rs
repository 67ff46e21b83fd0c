//! # Git Driver
//!
//! The synchronizer talks to git only through the [`GitOperations`] trait.
//! [`SystemGit`] implements it by running the system `git` executable, which
//! picks up the user's SSH keys, credential helpers and `~/.gitconfig`
//! without any extra work. Tests substitute a recording mock.
//!
//! Commands that change a checkout inherit stdout and stderr so git's own
//! progress output reaches the CI log. Every invocation is logged at
//! `debug` level with its full argument list.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use log::debug;

use crate::defaults::GIT;
use crate::error::{Error, Result};

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// `git --version`, returning the trimmed version line.
    fn version(&self) -> Result<String>;

    /// `git -C <repo_dir> remote get-url <remote>`, returning the trimmed URL.
    fn remote_url(&self, repo_dir: &Path, remote: &str) -> Result<String>;

    /// `git -C <cwd> clone <url> <dest> --branch <branch>`
    fn clone_branch(&self, cwd: &Path, url: &str, dest: &Path, branch: &str) -> Result<()>;

    /// `git -C <repo_dir> pull <remote> <branch>`
    fn pull(&self, repo_dir: &Path, remote: &str, branch: &str) -> Result<()>;

    /// `git -C <repo_dir> checkout <revision>`
    fn checkout(&self, repo_dir: &Path, revision: &str) -> Result<()>;
}

/// The default implementation of `GitOperations`, which runs the system's
/// `git` command.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    pub fn new() -> Self {
        Self::with_program(GIT)
    }

    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `git -C <dir>`, ready for the subcommand arguments.
    fn command_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C").arg(dir);
        cmd
    }

    fn spawn_error(&self, err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::NotFound {
            Error::ToolNotFound {
                tool: self.program.display().to_string(),
                message: err.to_string(),
            }
        } else {
            Error::Io(err)
        }
    }

    /// Run with inherited stdio and fail on a non-zero exit.
    fn run(&self, label: &str, mut cmd: Command) -> Result<()> {
        debug!("running {:?}", cmd);
        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        check_status(label, status)
    }

    /// Run with captured output and fail on a non-zero exit.
    fn capture(&self, label: &str, mut cmd: Command) -> Result<String> {
        debug!("running {:?}", cmd);
        let Output {
            status,
            stdout,
            stderr,
        } = cmd.output().map_err(|e| self.spawn_error(e))?;
        if !status.success() {
            debug!("{} stderr: {}", label, String::from_utf8_lossy(&stderr).trim());
        }
        check_status(label, status)?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(label: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::SubprocessFailure {
            command: label.to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}

impl GitOperations for SystemGit {
    fn version(&self) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--version");
        self.capture("git --version", cmd)
    }

    fn remote_url(&self, repo_dir: &Path, remote: &str) -> Result<String> {
        let mut cmd = self.command_in(repo_dir);
        cmd.args(["remote", "get-url", remote]);
        self.capture("git remote get-url", cmd)
    }

    fn clone_branch(&self, cwd: &Path, url: &str, dest: &Path, branch: &str) -> Result<()> {
        let mut cmd = self.command_in(cwd);
        cmd.arg("clone").arg(url).arg(dest).args(["--branch", branch]);
        self.run("git clone", cmd)
    }

    fn pull(&self, repo_dir: &Path, remote: &str, branch: &str) -> Result<()> {
        let mut cmd = self.command_in(repo_dir);
        cmd.args(["pull", remote, branch]);
        self.run("git pull", cmd)
    }

    fn checkout(&self, repo_dir: &Path, revision: &str) -> Result<()> {
        let mut cmd = self.command_in(repo_dir);
        cmd.args(["checkout", revision]);
        self.run("git checkout", cmd)
    }
}
