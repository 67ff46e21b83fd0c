//! # Dependency Synchronizer
//!
//! Converges a set of sibling checkouts onto the revisions named by a
//! dependency table.
//!
//! ## Process
//!
//! 1.  **Remote discovery** ([`SyncContext::discover`]): read the `origin`
//!     URL of the anchor checkout once and derive the remote root and the
//!     default branch from it.
//!
//! 2.  **Planning** ([`Synchronizer::plan_entry`]): for each entry, resolve
//!     the destination against the anchor directory and pick the effective
//!     revision. `latest` or a missing pin selects the default branch.
//!
//! 3.  **Applying** ([`Synchronizer::apply`]):
//!     - existing destination: `git pull origin <default branch>`; the pin
//!       is not re-applied.
//!     - missing destination: `git clone <url> <dest> --branch <default
//!       branch>`, then `git checkout <effective revision>`.
//!
//! 4.  **Reporting**: every attempted entry yields an [`EntryOutcome`]. The
//!     [`FailurePolicy`] decides whether a failure stops the remaining
//!     entries.
//!
//! Entries are processed strictly in table order, one git call at a time.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::defaults::ORIGIN;
use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::manifest::DependencyEntry;
use crate::path::resolve_destination;
use crate::remote::RemoteRoot;

/// What to do when an entry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failed entry.
    #[default]
    Halt,
    /// Attempt every entry and report all failures at the end.
    Continue,
}

/// How an entry's checkout is brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The destination exists: pull in place.
    Update,
    /// The destination is missing: clone, then check out the revision.
    Clone,
}

/// Derived, read-only configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncContext {
    anchor: PathBuf,
    remote: RemoteRoot,
}

impl SyncContext {
    pub fn new(anchor: impl Into<PathBuf>, remote: RemoteRoot) -> Self {
        Self {
            anchor: anchor.into(),
            remote,
        }
    }

    /// Build the context for `anchor`, reading its `origin` URL unless a
    /// remote root is supplied.
    ///
    /// `branch` replaces the default branch picked from the host flavor.
    pub fn discover(
        git: &dyn GitOperations,
        anchor: &Path,
        remote_root: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Self> {
        if !anchor.is_dir() {
            return Err(Error::MissingPath {
                path: anchor.display().to_string(),
            });
        }

        let remote = match remote_root {
            Some(root) => RemoteRoot::with_root(root),
            None => {
                let url = git.remote_url(anchor, ORIGIN)?;
                debug!("origin of {} is {}", anchor.display(), url);
                RemoteRoot::from_origin_url(&url)?
            }
        };
        let remote = match branch {
            Some(branch) => remote.with_branch(branch),
            None => remote,
        };

        Ok(Self::new(anchor, remote))
    }

    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    pub fn remote(&self) -> &RemoteRoot {
        &self.remote
    }
}

/// A fully resolved unit of work for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub name: String,
    pub url: String,
    pub destination: PathBuf,
    /// Branch used for `clone --branch` and `pull`.
    pub branch: String,
    /// Revision checked out after a clone.
    pub revision: String,
    pub action: Action,
}

/// Result of one attempted entry.
#[derive(Debug)]
pub struct EntryOutcome {
    pub name: String,
    /// `None` when the entry could not be planned.
    pub step: Option<PlannedStep>,
    pub result: Result<()>,
}

impl EntryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a run, in table order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<EntryOutcome>,
    /// Entries left unattempted because the run halted.
    pub skipped: Vec<String>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(EntryOutcome::is_success) && self.skipped.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug)]
pub enum SyncEvent<'a> {
    /// About to run git for this step.
    Started(&'a PlannedStep),
    /// An entry finished, successfully or not.
    Finished(&'a EntryOutcome),
}

/// Drives git over a dependency table.
pub struct Synchronizer<'a> {
    git: &'a dyn GitOperations,
    context: &'a SyncContext,
    policy: FailurePolicy,
}

impl<'a> Synchronizer<'a> {
    pub fn new(git: &'a dyn GitOperations, context: &'a SyncContext) -> Self {
        Self {
            git,
            context,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve destination, revision and action for one entry.
    pub fn plan_entry(&self, entry: &DependencyEntry, latest: bool) -> Result<PlannedStep> {
        let remote = self.context.remote();
        let destination = resolve_destination(self.context.anchor(), &entry.local_path);
        let branch = remote.default_branch().to_string();

        let revision = match entry.pin_for(remote.flavor()) {
            Some(pin) if !latest => pin.to_string(),
            _ => branch.clone(),
        };

        let action = if destination.is_dir() {
            Action::Update
        } else if destination.exists() {
            return Err(Error::NotADirectory {
                path: destination.display().to_string(),
            });
        } else {
            Action::Clone
        };

        Ok(PlannedStep {
            name: entry.name.clone(),
            url: remote.url_for(&entry.name),
            destination,
            branch,
            revision,
            action,
        })
    }

    /// Run the git commands for one planned step.
    pub fn apply(&self, step: &PlannedStep) -> Result<()> {
        match step.action {
            Action::Update => {
                info!(
                    "{} exists, pulling {} from {}",
                    step.destination.display(),
                    step.branch,
                    step.url
                );
                self.git.pull(&step.destination, ORIGIN, &step.branch)
            }
            Action::Clone => {
                info!(
                    "{} does not exist, cloning {} at {}",
                    step.destination.display(),
                    step.url,
                    step.branch
                );
                self.git.clone_branch(
                    self.context.anchor(),
                    &step.url,
                    &step.destination,
                    &step.branch,
                )?;
                info!("checking out {} in {}", step.revision, step.destination.display());
                self.git.checkout(&step.destination, &step.revision)
            }
        }
    }

    /// Synchronize every entry, in order.
    pub fn sync(&self, entries: &[DependencyEntry], latest: bool) -> SyncReport {
        self.sync_with(entries, latest, |_| {})
    }

    /// Like [`sync`](Self::sync), reporting progress to `observer`.
    pub fn sync_with<F>(&self, entries: &[DependencyEntry], latest: bool, mut observer: F) -> SyncReport
    where
        F: FnMut(SyncEvent<'_>),
    {
        let mut report = SyncReport::default();

        for (index, entry) in entries.iter().enumerate() {
            let outcome = match self.plan_entry(entry, latest) {
                Ok(step) => {
                    observer(SyncEvent::Started(&step));
                    let result = self.apply(&step);
                    EntryOutcome {
                        name: entry.name.clone(),
                        step: Some(step),
                        result,
                    }
                }
                Err(e) => EntryOutcome {
                    name: entry.name.clone(),
                    step: None,
                    result: Err(e),
                },
            };

            if let Err(e) = &outcome.result {
                warn!("{}: {}", entry.name, e);
            }
            observer(SyncEvent::Finished(&outcome));

            let failed = !outcome.is_success();
            report.outcomes.push(outcome);

            if failed && self.policy == FailurePolicy::Halt {
                report.skipped = entries[index + 1..]
                    .iter()
                    .map(|e| e.name.clone())
                    .collect();
                break;
            }
        }

        report
    }
}
