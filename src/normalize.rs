//! Help-text normalization applied once per spec at finalize time.
//!
//! Normalization edits text that exists; it never fabricates help for an
//! argument declared without any.

use crate::args::ArgumentSpec;

/// Capitalize the first letter and ensure a trailing period. Empty input
/// stays empty. Idempotent.
pub fn normalize_help(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.push_str(chars.as_str());
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Insert a `(default: ...)` annotation before the trailing period of an
/// already-normalized help string.
pub fn with_default_annotation(help: &str, default: &str) -> String {
    let base = help.strip_suffix('.').unwrap_or(help);
    format!("{base} (default: `{default}`).")
}

/// Apply both normalization steps to a spec in place.
pub fn normalize_spec(spec: &mut ArgumentSpec) {
    if spec.help_text().is_empty() {
        return;
    }
    let mut help = normalize_help(spec.help_text());
    if spec.wants_default_in_help() {
        if let Some(default) = spec.default_value() {
            help = with_default_annotation(&help, default);
        }
    }
    spec.set_help(help);
}
