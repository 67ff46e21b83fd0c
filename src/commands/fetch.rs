//! # Fetch Command Implementation
//!
//! Brings every sibling dependency to the revision its table asks for.
//!
//! - The table is the built-in one, or a YAML manifest given with
//!   `--manifest`.
//! - Dependency paths are resolved against the anchor directory: `--root`,
//!   else the manifest's directory, else the current directory. The built-in
//!   table is laid out for an anchor at the project's `build/` directory.
//! - The remote root comes from the anchor checkout's `origin` remote unless
//!   `--remote-root` is given.
//! - `latest` ignores every pin and follows the default branch.
//! - By default the run stops at the first failure; `--keep-going` attempts
//!   every entry and fails at the end if any entry failed.
//! - `--dry-run` prints what would be done without running clone, pull or
//!   checkout.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use log::warn;
use std::path::{Path, PathBuf};

use depfetch::git::{GitOperations, SystemGit};
use depfetch::manifest::{self, DependencyEntry};
use depfetch::output::{Marker, OutputConfig};
use depfetch::sync::{Action, FailurePolicy, PlannedStep, SyncContext, SyncEvent, Synchronizer};

/// Positional selector for `fetch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchTarget {
    /// Check out the tip of the default branch, ignoring pinned revisions
    Latest,
}

/// Clone or update the sibling repositories this project depends on
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Pass `latest` to ignore pinned revisions
    #[arg(value_enum, value_name = "TARGET")]
    pub target: Option<FetchTarget>,

    /// YAML manifest listing the dependencies (defaults to the built-in table)
    #[arg(short, long, value_name = "FILE", env = "DEPFETCH_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Directory dependency paths are relative to, and whose origin is read
    #[arg(long, value_name = "DIR", env = "DEPFETCH_ROOT")]
    pub root: Option<PathBuf>,

    /// Use this URL prefix instead of deriving it from the origin remote
    #[arg(long, value_name = "URL")]
    pub remote_root: Option<String>,

    /// Branch to clone and pull instead of the host's default branch
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Attempt every dependency even after one fails
    #[arg(short, long)]
    pub keep_going: bool,

    /// Show what would be done without running clone, pull or checkout
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the `fetch` command against the system `git`.
pub fn execute(args: FetchArgs, output: &OutputConfig) -> Result<()> {
    run(args, &SystemGit::new(), output)
}

fn run(args: FetchArgs, git: &dyn GitOperations, output: &OutputConfig) -> Result<()> {
    // Only a probe: a missing git is reported here and fails later on the
    // first command that needs it.
    match git.version() {
        Ok(version) => println!("{}", version),
        Err(e) => {
            warn!("{}", e);
            println!("Error calling command: git --version");
        }
    }

    let table = load_table(args.manifest.as_deref())?;
    let anchor = resolve_anchor(args.root.as_deref(), args.manifest.as_deref())?;

    let context = SyncContext::discover(
        git,
        &anchor,
        args.remote_root.as_deref(),
        args.branch.as_deref(),
    )
    .with_context(|| format!("Failed to determine the remote root for {}", anchor.display()))?;

    println!(
        "\nFetching dependencies from: {} - using branch: {}\n",
        context.remote().root(),
        context.remote().default_branch()
    );

    let policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Halt
    };
    let latest = args.target == Some(FetchTarget::Latest);
    let sync = Synchronizer::new(git, &context).with_policy(policy);

    if args.dry_run {
        println!("{} Dry run - no repositories will be changed", output.marker(Marker::Info));
        let mut unplannable = Vec::new();
        for entry in &table {
            match sync.plan_entry(entry, latest) {
                Ok(step) => print_step(&step, output),
                Err(e) => {
                    eprintln!("{} {}: {}", output.marker(Marker::Fail), entry.name, e);
                    unplannable.push(entry.name.as_str());
                }
            }
        }
        if !unplannable.is_empty() {
            bail!(
                "{} of {} dependencies cannot be fetched: {}",
                unplannable.len(),
                table.len(),
                unplannable.join(", ")
            );
        }
        return Ok(());
    }

    let report = sync.sync_with(&table, latest, |event| match event {
        SyncEvent::Started(step) => print_step(step, output),
        SyncEvent::Finished(outcome) => match &outcome.result {
            Ok(()) => println!("{} {}", output.marker(Marker::Ok), outcome.name),
            Err(e) => eprintln!("{} {}: {}", output.marker(Marker::Fail), outcome.name, e),
        },
    });

    for name in &report.skipped {
        println!("{} {} (not attempted)", output.marker(Marker::Skip), name);
    }

    if !report.is_success() {
        let failed: Vec<_> = report.failures().map(|o| o.name.as_str()).collect();
        bail!(
            "{} of {} dependencies failed: {}",
            failed.len(),
            table.len(),
            failed.join(", ")
        );
    }

    println!(
        "\n{} {} dependencies up to date",
        output.marker(Marker::Ok),
        report.succeeded()
    );
    Ok(())
}

// An update only pulls the branch; the pinned revision applies to fresh clones.
fn print_step(step: &PlannedStep, output: &OutputConfig) {
    match step.action {
        Action::Update => {
            println!("\nPulling {} for {}", step.branch, step.name);
            println!(
                "{} Directory {} exists.\n\tUsing 'git pull' to get latest from {}",
                output.marker(Marker::Update),
                step.destination.display(),
                step.url
            );
        }
        Action::Clone => {
            println!("\nChecking out commit: {} for {}", step.revision, step.name);
            println!(
                "{} Directory {} does not exist.\n\tUsing 'git clone' to get latest from {}",
                output.marker(Marker::Clone),
                step.destination.display(),
                step.url
            );
        }
    }
}

fn load_table(manifest_path: Option<&Path>) -> Result<Vec<DependencyEntry>> {
    match manifest_path {
        Some(path) => manifest::from_file(path)
            .with_context(|| format!("Failed to load manifest from {}", path.display())),
        None => Ok(manifest::builtin_table()),
    }
}

/// Pick the anchor directory and make it absolute.
fn resolve_anchor(root: Option<&Path>, manifest_path: Option<&Path>) -> Result<PathBuf> {
    let anchor = match (root, manifest_path) {
        (Some(root), _) => root.to_path_buf(),
        (None, Some(manifest)) => match manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
        (None, None) => PathBuf::from("."),
    };

    let anchor = if anchor.is_absolute() {
        anchor
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(anchor)
    };
    Ok(depfetch::path::normalize(&anchor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_anchor_prefers_root() {
        let anchor =
            resolve_anchor(Some(Path::new("/work/build")), Some(Path::new("/other/deps.yaml")))
                .unwrap();
        assert_eq!(anchor, PathBuf::from("/work/build"));
    }

    #[test]
    fn test_resolve_anchor_uses_manifest_dir() {
        let anchor = resolve_anchor(None, Some(Path::new("/work/build/deps.yaml"))).unwrap();
        assert_eq!(anchor, PathBuf::from("/work/build"));
    }

    #[test]
    fn test_resolve_anchor_bare_manifest_name_is_cwd() {
        let anchor = resolve_anchor(None, Some(Path::new("deps.yaml"))).unwrap();
        assert_eq!(
            anchor,
            depfetch::path::normalize(&std::env::current_dir().unwrap())
        );
    }

    #[test]
    fn test_resolve_anchor_normalizes() {
        let anchor = resolve_anchor(Some(Path::new("/work/build/../tools")), None).unwrap();
        assert_eq!(anchor, PathBuf::from("/work/tools"));
    }

    #[test]
    fn test_load_table_builtin() {
        assert_eq!(load_table(None).unwrap(), manifest::builtin_table());
    }

    #[test]
    fn test_load_table_missing_manifest() {
        let err = load_table(Some(Path::new("/nonexistent/deps.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load manifest"));
    }
}
