//! `stamp-version` subcommand.
//!
//! Rewrites the build number, build date and build suffix macros of the
//! version header under `ROOT`. The rewritten lines are echoed to stderr so
//! the build log shows exactly what was stamped.

use anyhow::{Context, Result};
use clap::Args;
use std::io;
use std::path::PathBuf;

use depfetch::defaults::{VERSION_FILE, VERSION_TOKEN_PREFIX};
use depfetch::stamp::{stamp_file, BuildStamp, VersionStamper};

/// Write build number, build date and build name into the version header
#[derive(Args, Debug)]
pub struct StampVersionArgs {
    /// Root directory of the source tree
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Build number to write
    #[arg(value_name = "BUILD_NUMBER")]
    pub build_number: String,

    /// Optional build name, written as "(NAME)" into the build suffix
    #[arg(value_name = "BUILD_NAME")]
    pub build_name: Option<String>,

    /// Header to rewrite, relative to ROOT
    #[arg(long, value_name = "PATH", default_value = VERSION_FILE)]
    pub file: PathBuf,

    /// Macro name prefix of the build tokens
    #[arg(long, value_name = "PREFIX", default_value = VERSION_TOKEN_PREFIX)]
    pub prefix: String,
}

pub fn execute(args: StampVersionArgs) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let stamp = BuildStamp::new(&args.build_number, args.build_name.as_deref(), today)?;
    let stamper = VersionStamper::new(&args.prefix)?;

    let stderr = io::stderr();
    let mut echo = stderr.lock();
    let written = stamp_file(&args.root, &args.file, &stamper, &stamp, &mut echo)
        .with_context(|| format!("Failed to stamp version under {}", args.root.display()))?;

    println!("Stamped build {} into {}", stamp.build_number, written.display());
    Ok(())
}
