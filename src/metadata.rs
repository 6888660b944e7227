//! Package metadata surfaced through `-V` and `--print-url`.

use std::path::PathBuf;

/// Application identity and configuration anchors, supplied once by the
/// application at startup. Typically constructed with [`crate::app_info!`],
/// which reads the `CARGO_PKG_*` values of the application crate.
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub url: String,
    pub description: String,
    /// Default config file path. `--config FILE` overrides it; a missing
    /// file at this default path is tolerated, a malformed one is not.
    pub config_file: Option<PathBuf>,
    /// TOML table name holding this application's keys. When set, only that
    /// table of the config file is consulted, and `--print-config` wraps its
    /// output in the same table.
    pub config_section: Option<String>,
}

impl AppInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            url: String::new(),
            description: String::new(),
            config_file: None,
            config_section: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_config_section(mut self, section: impl Into<String>) -> Self {
        self.config_section = Some(section.into());
        self
    }
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            .with_description(env!("CARGO_PKG_DESCRIPTION"))
            .with_url(env!("CARGO_PKG_REPOSITORY"))
    };
}
