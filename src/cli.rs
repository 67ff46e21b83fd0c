//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use depfetch::output::OutputConfig;

/// depfetch - Fetch sibling git dependencies and stamp build versions
#[derive(Parser, Debug)]
#[command(name = "depfetch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["auto", "always", "never"]
    )]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone or update the sibling repositories this project depends on
    ///
    /// Dependency paths are relative to the anchor directory: `--root`, else
    /// the manifest's directory, else the current directory. The built-in
    /// table's paths (`../../QtCommon`, ...) assume the anchor is the
    /// project's `build/` directory, so run from there or pass
    /// `--root <project>/build`.
    Fetch(commands::fetch::FetchArgs),

    /// Write build number, build date and build name into the version header
    StampVersion(commands::stamp_version::StampVersionArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Fetch(args) => commands::fetch::execute(args, &output),
            Commands::StampVersion(args) => commands::stamp_version::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
