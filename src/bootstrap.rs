//! Bootstrap pre-parse: discover `--config` and `-v` before the full parser
//! exists, and load the config file whose values seed option defaults.
//!
//! The scan is deliberately permissive. Tokens it does not recognize belong
//! to the not-yet-built full grammar and are skipped without error.

use crate::error::{Error, Result};
use crate::metadata::AppInfo;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of the bootstrap phase, read-only once created. Consumed by the
/// clap bridge to seed declared defaults and by the dispatcher for logging.
#[derive(Debug, Default)]
pub struct BootstrapResult {
    verbosity: u64,
    config_path: Option<PathBuf>,
    values: toml::Table,
}

impl BootstrapResult {
    pub fn verbosity(&self) -> u64 {
        self.verbosity
    }

    /// Path of the config file actually loaded, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn values(&self) -> &toml::Table {
        &self.values
    }

    /// Config value for an option name, rendered as the plain string the
    /// parser would have received on the command line. Tables and arrays
    /// have no single-value rendering and yield `None`.
    pub fn default_for(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(n) => Some(n.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            toml::Value::Datetime(d) => Some(d.to_string()),
            toml::Value::Array(_) | toml::Value::Table(_) => None,
        }
    }
}

/// Count `-v` occurrences the way the full parse will: standalone `-v`,
/// grouped `-vv...`, and `--verbose`. Scanning stops at a bare `--`.
pub fn count_verbosity(argv: &[String]) -> u64 {
    let mut count = 0;
    for token in argv {
        if token == "--" {
            break;
        }
        if token == "--verbose" {
            count += 1;
        } else if let Some(rest) = token.strip_prefix('-') {
            if !rest.is_empty() && !rest.starts_with('-') && rest.chars().all(|c| c == 'v') {
                count += rest.len() as u64;
            }
        }
    }
    count
}

/// Last `--config PATH` or `--config=PATH` before a bare `--`. A trailing
/// `--config` with no value is skipped; the full parse reports it.
fn explicit_config_path(argv: &[String]) -> Option<PathBuf> {
    let mut found = None;
    let mut tokens = argv.iter();
    while let Some(token) = tokens.next() {
        if token == "--" {
            break;
        }
        if token == "--config" {
            if let Some(value) = tokens.next() {
                found = Some(PathBuf::from(value));
            }
        } else if let Some(value) = token.strip_prefix("--config=") {
            if !value.is_empty() {
                found = Some(PathBuf::from(value));
            }
        }
    }
    found
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|p| p.strip_prefix("~/")) {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

/// Run the bootstrap pre-parse over `argv` (program name excluded).
///
/// An explicit `--config` that cannot be read or parsed is fatal. The
/// default path from [`AppInfo::config_file`] is tolerated when absent, so
/// the common no-config invocation does no I/O beyond one failed open.
pub fn bootstrap(info: &AppInfo, argv: &[String]) -> Result<BootstrapResult> {
    let verbosity = count_verbosity(argv);

    let (path, explicit) = match explicit_config_path(argv) {
        Some(path) => (Some(path), true),
        None => (info.config_file.clone(), false),
    };
    let Some(path) = path else {
        return Ok(BootstrapResult {
            verbosity,
            ..Default::default()
        });
    };

    let text = match fs::read_to_string(expand_tilde(&path)) {
        Ok(text) => text,
        Err(err) if !explicit => {
            tracing::debug!("default config file {}: {err}; ignoring", path.display());
            return Ok(BootstrapResult {
                verbosity,
                ..Default::default()
            });
        }
        Err(err) => {
            return Err(Error::ConfigFile {
                path,
                reason: err.to_string(),
            });
        }
    };

    let table: toml::Table = text.parse().map_err(|err: toml::de::Error| Error::ConfigFile {
        path: path.clone(),
        reason: err.message().to_owned(),
    })?;

    let values = match &info.config_section {
        Some(section) => match table.get(section) {
            Some(toml::Value::Table(inner)) => inner.clone(),
            _ => table,
        },
        None => table,
    };

    Ok(BootstrapResult {
        verbosity,
        config_path: Some(path),
        values,
    })
}
