//! # Error Handling
//!
//! This module defines the centralized error type for `depfetch`. It uses the
//! `thiserror` library to create an `Error` enum that covers every failure
//! mode of the synchronizer and the version stamper, with messages meant to
//! be read by a person watching a CI log.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. The first four variants mirror the failure
//!   classes the tool reports to users:
//!   - `ToolNotFound`: the `git` executable could not be started.
//!   - `SubprocessFailure`: a `git` invocation exited with a non-zero code.
//!   - `InvalidArguments`: an argument passed parsing but is unusable.
//!   - `MissingPath`: a required directory or file does not exist.
//!
//!   The remaining variants cover manifest parsing, remote URL handling and
//!   wrapped library errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use thiserror::Error;

/// Main error type for depfetch operations
#[derive(Error, Debug)]
pub enum Error {
    /// The external tool could not be spawned at all.
    #[error("Unable to run '{tool}': {message}")]
    ToolNotFound { tool: String, message: String },

    /// An external command ran and exited unsuccessfully.
    ///
    /// `code` is `-1` when the process was terminated by a signal.
    #[error("'{command}' failed with returncode: {code}")]
    SubprocessFailure { command: String, code: i32 },

    /// An argument was syntactically accepted but cannot be used.
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// A required directory or file does not exist.
    #[error("Path does not exist: {path}")]
    MissingPath { path: String },

    /// A destination exists but is a file, so it can neither be updated nor
    /// cloned into.
    #[error("Destination exists but is not a directory: {path}")]
    NotADirectory { path: String },

    /// The dependency manifest is malformed.
    #[error("Manifest error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// The origin URL cannot be turned into a remote root.
    #[error("Cannot derive remote root from '{url}': {message}")]
    RemoteUrl { url: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
