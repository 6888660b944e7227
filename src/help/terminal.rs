//! Terminal rendering of a help document, plain or colorized.
//!
//! Both variants emit the same characters; the colorized one only wraps
//! them in escape sequences, so stripping ANSI codes recovers the plain
//! rendering byte for byte.

use crate::help::document::HelpDoc;
use owo_colors::OwoColorize;

/// Column cap for the help text, matching the two-space indent plus the
/// widest invocation up to this limit.
const MAX_HELP_COLUMN: usize = 24;
const INDENT: usize = 2;

pub fn render(doc: &HelpDoc, color: bool) -> String {
    let help_column = help_column(doc);
    let mut out = String::new();

    let prefix = if color {
        format!("{}", "Usage:".yellow().bold())
    } else {
        "Usage:".to_owned()
    };
    out.push_str(&format!("{prefix} {}\n", doc.usage));

    if !doc.description.is_empty() {
        out.push('\n');
        let text = if color {
            colorize_spans(&doc.description)
        } else {
            doc.description.clone()
        };
        out.push_str(&text);
        out.push('\n');
    }

    for section in &doc.sections {
        out.push('\n');
        let heading = if color {
            format!("{}", section.heading.yellow().bold())
        } else {
            section.heading.clone()
        };
        out.push_str(&format!("{heading}:\n"));
        for row in &section.rows {
            let invocation = if color {
                format!("{}", row.invocation.cyan())
            } else {
                row.invocation.clone()
            };
            if row.help.is_empty() {
                out.push_str(&format!("{}{invocation}\n", " ".repeat(INDENT)));
                continue;
            }
            let help = if color {
                colorize_spans(&row.help)
            } else {
                row.help.clone()
            };
            let used = INDENT + row.invocation.len();
            if used + 2 <= help_column {
                out.push_str(&format!(
                    "{}{invocation}{}{help}\n",
                    " ".repeat(INDENT),
                    " ".repeat(help_column - used)
                ));
            } else {
                out.push_str(&format!(
                    "{}{invocation}\n{}{help}\n",
                    " ".repeat(INDENT),
                    " ".repeat(help_column)
                ));
            }
        }
    }
    out
}

/// Help column shared by every section of one document.
fn help_column(doc: &HelpDoc) -> usize {
    let widest = doc
        .sections
        .iter()
        .flat_map(|s| &s.rows)
        .map(|r| r.invocation.len())
        .max()
        .unwrap_or(0);
    (INDENT + widest + 2).min(MAX_HELP_COLUMN)
}

/// Wrap backtick code spans in color; unbalanced backticks are left alone.
fn colorize_spans(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(start) = rest.find('`') {
        match rest[start + 1..].find('`') {
            Some(len) => {
                out.push_str(&rest[..start]);
                let span = &rest[start..start + len + 2];
                out.push_str(&format!("{}", span.yellow()));
                rest = &rest[start + len + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Remove ANSI escape sequences. Exposed so applications and tests can
/// compare colorized output against the plain rendering.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                for code in chars.by_ref() {
                    if code.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
