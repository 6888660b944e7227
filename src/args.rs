//! Argument declaration model: specs, value arity and kinds, parsed values.
//!
//! `ArgumentSpec` is the framework's own declaration record. The clap bridge
//! in `parse` compiles specs into the real parser; the help renderer reads
//! them directly, so presentation never depends on parser internals.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// How many values an argument consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity {
    /// Presence only (`--force`).
    Flag,
    /// Repeatable presence (`-vv`).
    Count,
    /// Exactly one value.
    Single,
    /// Zero or one value; `missing` is substituted when the option is given
    /// bare (`--completion` with no shell name).
    Optional { missing: Option<String> },
    /// Zero or more values.
    Variadic,
}

/// Coercion target for argument values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    Int,
    Path,
}

/// One declared option or positional, immutable once its node is finalized.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    name: String,
    short: Option<char>,
    long: Option<String>,
    metavar: Option<String>,
    arity: Arity,
    kind: ValueKind,
    default: Option<String>,
    show_default: bool,
    help: String,
    hidden: bool,
    common: bool,
}

impl ArgumentSpec {
    /// A boolean option (`--force`).
    pub fn flag(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::option_base(name, Arity::Flag)
    }

    /// A repeatable counting option (`-v`, `-vv`).
    pub fn counted(name: impl Into<String>) -> Self {
        Self::option_base(name.into(), Arity::Count)
    }

    /// An option taking one value (`--config FILE`).
    pub fn option(name: impl Into<String>) -> Self {
        Self::option_base(name.into(), Arity::Single)
    }

    /// A positional argument.
    pub fn positional(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name,
            short: None,
            long: None,
            metavar: None,
            arity: Arity::Single,
            kind: ValueKind::Str,
            default: None,
            show_default: false,
            help: String::new(),
            hidden: false,
            common: false,
        }
    }

    fn option_base(name: String, arity: Arity) -> Self {
        Self {
            long: Some(name.clone()),
            name,
            short: None,
            metavar: None,
            arity,
            kind: ValueKind::Str,
            default: None,
            show_default: false,
            help: String::new(),
            hidden: false,
            common: false,
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Append `(default: ...)` to the help text at finalize time.
    pub fn show_default(mut self) -> Self {
        self.show_default = true;
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Make the value optional, substituting `missing` when the option is
    /// given without one.
    pub fn optional(mut self, missing: Option<&str>) -> Self {
        self.arity = Arity::Optional {
            missing: missing.map(str::to_owned),
        };
        self
    }

    pub fn variadic(mut self) -> Self {
        self.arity = Arity::Variadic;
        self
    }

    /// Omit from help and usage; still parsed.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub(crate) fn mark_common(mut self) -> Self {
        self.common = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_flag(&self) -> Option<char> {
        self.short
    }

    pub fn long_flag(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn arity(&self) -> &Arity {
        &self.arity
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn wants_default_in_help(&self) -> bool {
        self.show_default
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub(crate) fn set_help(&mut self, help: String) {
        self.help = help;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_common(&self) -> bool {
        self.common
    }

    pub fn is_positional(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }

    /// Display name for the argument's value.
    pub fn value_name(&self) -> String {
        match &self.metavar {
            Some(m) => m.clone(),
            None if self.is_positional() => self.name.clone(),
            None => self.name.to_uppercase(),
        }
    }

    /// Listing-column invocation, e.g. `-c, --config FILE` or `name`.
    pub fn invocation(&self) -> String {
        if self.is_positional() {
            return match self.arity {
                Arity::Variadic => format!("{} ...", self.value_name()),
                _ => self.value_name(),
            };
        }
        let suffix = match &self.arity {
            Arity::Single => format!(" {}", self.value_name()),
            Arity::Optional { .. } => format!(" [{}]", self.value_name()),
            Arity::Variadic => format!(" {} ...", self.value_name()),
            Arity::Flag | Arity::Count => String::new(),
        };
        let mut parts = Vec::new();
        if let Some(short) = self.short {
            parts.push(format!("-{short}{suffix}"));
        }
        if let Some(long) = &self.long {
            parts.push(format!("--{long}{suffix}"));
        }
        parts.join(", ")
    }

    /// Usage-line token, e.g. `[-v]`, `[--config FILE]`, or `name`.
    pub fn usage_token(&self) -> String {
        if self.is_positional() {
            let name = self.value_name();
            return match &self.arity {
                Arity::Variadic => format!("[{name} ...]"),
                Arity::Optional { .. } => format!("[{name}]"),
                _ if self.default.is_some() => format!("[{name}]"),
                _ => name,
            };
        }
        let flag = match self.short {
            Some(short) => format!("-{short}"),
            None => format!("--{}", self.long.as_deref().unwrap_or(&self.name)),
        };
        match &self.arity {
            Arity::Single => format!("[{flag} {}]", self.value_name()),
            Arity::Optional { .. } => format!("[{flag} [{}]]", self.value_name()),
            Arity::Variadic => format!("[{flag} {} ...]", self.value_name()),
            Arity::Flag | Arity::Count => format!("[{flag}]"),
        }
    }
}

/// A resolved argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Flag(bool),
    Count(u64),
    Str(String),
    Int(i64),
    Path(PathBuf),
    List(Vec<String>),
}

/// Flat result of a full parse: every resolved option and positional by
/// name, the selected command path, and the total verbosity. When the same
/// name exists on several nodes of the selected chain, the deepest node's
/// value wins.
#[derive(Debug, Default)]
pub struct ParsedOptions {
    values: BTreeMap<String, OptionValue>,
    explicit: BTreeSet<String>,
    command_path: Vec<String>,
    verbosity: u64,
}

impl ParsedOptions {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Flag(true)))
    }

    pub fn get_count(&self, name: &str) -> u64 {
        match self.values.get(name) {
            Some(OptionValue::Count(n)) => *n,
            _ => 0,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(OptionValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn get_path(&self, name: &str) -> Option<&Path> {
        match self.values.get(name) {
            Some(OptionValue::Path(p)) => Some(p),
            _ => None,
        }
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(OptionValue::List(v)) => Some(v),
            _ => None,
        }
    }

    /// Whether the value came from the command line rather than a default.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    /// Names of subcommands selected below the root, outermost first.
    /// Empty when the root itself is the target.
    pub fn command_path(&self) -> &[String] {
        &self.command_path
    }

    pub fn verbosity(&self) -> u64 {
        self.verbosity
    }

    pub(crate) fn insert(&mut self, name: &str, value: OptionValue, explicit: bool) {
        self.values.insert(name.to_owned(), value);
        if explicit {
            self.explicit.insert(name.to_owned());
        }
    }

    pub(crate) fn set_command_path(&mut self, path: Vec<String>) {
        self.command_path = path;
    }

    pub(crate) fn set_verbosity(&mut self, verbosity: u64) {
        self.verbosity = verbosity;
    }
}
