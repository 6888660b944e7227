//! Help rendering: one structured model per node, three presentations.

pub mod document;
pub mod markdown;
pub mod terminal;

use crate::command::CommandNode;
use crate::metadata::AppInfo;
use is_terminal::IsTerminal;

pub use document::{HelpDoc, HelpRow, HelpSection};
pub use terminal::strip_ansi;

/// Presentation target for help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpMode {
    Plain,
    Colorized,
    Markdown,
}

/// Mode for interactive output: colorized on a terminal unless `NO_COLOR`
/// is set, plain otherwise.
pub fn terminal_mode() -> HelpMode {
    if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        HelpMode::Colorized
    } else {
        HelpMode::Plain
    }
}

/// Render help for a single node.
pub fn render(node: &CommandNode, info: &AppInfo, mode: HelpMode) -> String {
    let doc = document::build(node, info);
    match mode {
        HelpMode::Plain => terminal::render(&doc, false),
        HelpMode::Colorized => terminal::render(&doc, true),
        HelpMode::Markdown => markdown::render(&doc),
    }
}

/// Aggregated help for the whole tree, pre-order in declaration order.
///
/// Terminal modes put each node under a dashed separator carrying its
/// upper-cased path; Markdown nests headings by depth with the plain render
/// fenced as code.
pub fn render_tree(root: &CommandNode, info: &AppInfo, mode: HelpMode) -> String {
    let mut blocks = Vec::new();
    root.walk(&mut |node| {
        let block = match mode {
            HelpMode::Markdown => {
                let depth = node.path().len().min(6);
                format!(
                    "{} {}\n```\n{}```\n",
                    "#".repeat(depth),
                    node.path_string(),
                    render(node, info, HelpMode::Plain)
                )
            }
            _ => format!(
                "{}\n\n{}",
                separator(&node.path_string()),
                render(node, info, mode)
            ),
        };
        blocks.push(block);
    });
    blocks.join("\n")
}

/// ` PATH ` upper-cased and centered in a line of 80 dashes.
fn separator(path: &str) -> String {
    let title = format!(" {} ", path.to_uppercase());
    let width: usize = 80;
    if title.len() >= width {
        return title;
    }
    let pad = width - title.len();
    let left = pad / 2;
    format!("{}{}{}", "-".repeat(left), title, "-".repeat(pad - left))
}
