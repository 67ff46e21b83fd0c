//! # CLI Command Implementations
//!
//! One module per `depfetch` subcommand. Each defines an `Args` struct
//! derived with `clap` and an `execute` function that calls into the
//! `depfetch` library and prints human-readable status.

pub mod completions;
pub mod fetch;
pub mod stamp_version;
