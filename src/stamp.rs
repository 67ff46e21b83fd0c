//! # Version Stamping
//!
//! Rewrites the build tokens of a generated version header in place. Three
//! macros are recognized, each named `<PREFIX>_BUILD_<KIND>`:
//!
//! - `BUILD_NUMBER`: the integer after the macro name becomes the build
//!   number.
//! - `BUILD_DATE_STRING`: the quoted text becomes the build date, formatted
//!   `M/D/YYYY` without zero padding.
//! - `BUILD_SUFFIX`: the quoted text becomes `(<build name>)`, or is emptied
//!   when no build name is given.
//!
//! All other lines are copied through with trailing whitespace removed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Values written into the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStamp {
    pub build_number: String,
    pub build_name: Option<String>,
    pub date: NaiveDate,
}

impl BuildStamp {
    /// Validate `build_number` and stamp with `date`.
    pub fn new(build_number: &str, build_name: Option<&str>, date: NaiveDate) -> Result<Self> {
        if build_number.is_empty() || !build_number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidArguments {
                message: format!("build number must be a non-negative integer, got '{}'", build_number),
            });
        }
        Ok(Self {
            build_number: build_number.to_string(),
            build_name: build_name.map(str::to_string),
            date,
        })
    }

    fn date_string(&self) -> String {
        format!("{}/{}/{}", self.date.month(), self.date.day(), self.date.year())
    }

    fn suffix(&self) -> String {
        self.build_name
            .as_ref()
            .map(|name| format!("({})", name))
            .unwrap_or_default()
    }
}

/// Compiled patterns for one token prefix.
#[derive(Debug, Clone)]
pub struct VersionStamper {
    number: Regex,
    date: Regex,
    suffix: Regex,
}

impl VersionStamper {
    pub fn new(prefix: &str) -> Result<Self> {
        let prefix = regex::escape(prefix);
        Ok(Self {
            number: Regex::new(&format!(r"^(.*{}_BUILD_NUMBER\s+)\d+(\D.*)?$", prefix))?,
            date: Regex::new(&format!(r#"^(.*{}_BUILD_DATE_STRING.*").*(".*)$"#, prefix))?,
            suffix: Regex::new(&format!(r#"^(.*{}_BUILD_SUFFIX\s+")(.*)(".*)$"#, prefix))?,
        })
    }

    /// Apply all three rewrites to a single line.
    pub fn stamp_line(&self, line: &str, stamp: &BuildStamp) -> String {
        let line = line.trim_end();
        let line = replace_between(&self.number, line, &stamp.build_number);
        let line = replace_between(&self.date, &line, &stamp.date_string());

        if let Some(caps) = self.suffix.captures(&line) {
            return format!("{}{}{}", &caps[1], stamp.suffix(), &caps[3]);
        }
        line
    }

    /// Apply [`stamp_line`](Self::stamp_line) to every line of `text`.
    pub fn stamp_text(&self, text: &str, stamp: &BuildStamp) -> Vec<String> {
        text.lines().map(|l| self.stamp_line(l, stamp)).collect()
    }
}

/// Keep capture groups 1 and 2, substituting `value` for whatever lies
/// between them. Group 2 may be absent.
fn replace_between(re: &Regex, line: &str, value: &str) -> String {
    match re.captures(line) {
        Some(caps) => join(&caps, value),
        None => line.to_string(),
    }
}

fn join(caps: &Captures<'_>, value: &str) -> String {
    format!(
        "{}{}{}",
        &caps[1],
        value,
        caps.get(2).map_or("", |m| m.as_str())
    )
}

/// Stamp `<root>/<relative>` in place, echoing every written line to
/// `echo`. Returns the path of the rewritten file.
pub fn stamp_file(
    root: &Path,
    relative: &Path,
    stamper: &VersionStamper,
    stamp: &BuildStamp,
    echo: &mut dyn Write,
) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(Error::MissingPath {
            path: root.display().to_string(),
        });
    }

    let target = crate::path::normalize(&root.join(relative));
    if !target.is_file() {
        return Err(Error::MissingPath {
            path: target.display().to_string(),
        });
    }

    let content = fs::read_to_string(&target)?;
    let lines = stamper.stamp_text(&content, stamp);

    let mut output = String::with_capacity(content.len() + 32);
    for line in &lines {
        output.push_str(line);
        output.push('\n');
        writeln!(echo, "{}", line)?;
    }
    fs::write(&target, output)?;

    Ok(target)
}
