//! # Output Configuration
//!
//! Decides whether status lines use emoji markers or plain bracketed tags.
//! CI logs are usually not a TTY, so the plain form is the common case.
//!
//! `--color=always|never` wins. Under `auto`, `NO_COLOR` (any value) turns
//! emoji off; otherwise the `console` crate decides, which covers
//! `CLICOLOR`, `CLICOLOR_FORCE`, `TERM=dumb` and TTY detection.

use std::env;

/// Output configuration for status markers.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub use_color: bool,
}

/// The kinds of status line the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Info,
    Clone,
    Update,
    Ok,
    Fail,
    Skip,
}

impl Marker {
    fn symbols(self) -> (&'static str, &'static str) {
        match self {
            Marker::Info => ("🔍", "[INFO]"),
            Marker::Clone => ("📥", "[CLONE]"),
            Marker::Update => ("🔄", "[PULL]"),
            Marker::Ok => ("✅", "[OK]"),
            Marker::Fail => ("❌", "[FAIL]"),
            Marker::Skip => ("⏭️", "[SKIP]"),
        }
    }
}

impl OutputConfig {
    /// Build from the `--color` flag value and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        Self::resolve(color_flag, env::var_os("NO_COLOR").is_some(), console::colors_enabled)
    }

    fn resolve(color_flag: &str, no_color: bool, terminal: impl FnOnce() -> bool) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => !no_color && terminal(),
        };
        Self { use_color }
    }

    /// The marker text to prefix a status line with.
    pub fn marker(&self, marker: Marker) -> &'static str {
        let (emoji, plain) = marker.symbols();
        if self.use_color {
            emoji
        } else {
            plain
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
