//! Structured help model built once per node; every presentation renders
//! from this and nothing else, so the targets cannot drift apart.

use crate::command::CommandNode;
use crate::metadata::AppInfo;

/// One listing line: an invocation column and its help text. Help may be
/// empty, in which case only the invocation is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct HelpRow {
    pub invocation: String,
    pub help: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HelpSection {
    pub heading: String,
    pub rows: Vec<HelpRow>,
}

/// Semantic help content for a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct HelpDoc {
    /// Title used by the Markdown target; root gets `name - description`.
    pub title: String,
    /// Usage line without the `Usage: ` prefix.
    pub usage: String,
    pub description: String,
    pub sections: Vec<HelpSection>,
}

/// Usage line for a node, without the `Usage: ` prefix: options in
/// declaration order, then the COMMAND placeholder, then positionals.
pub fn usage_line(node: &CommandNode) -> String {
    let mut usage = node.path_string();
    for spec in node.specs() {
        if spec.is_hidden() || spec.is_positional() {
            continue;
        }
        usage.push(' ');
        usage.push_str(&spec.usage_token());
    }
    if node.has_children() {
        usage.push_str(" COMMAND ...");
    }
    for spec in node.specs() {
        if spec.is_hidden() || !spec.is_positional() {
            continue;
        }
        usage.push(' ');
        usage.push_str(&spec.usage_token());
    }
    usage
}

/// Build the help model for one node. Grouping is fixed: commands, then
/// positionals, then the node's own options, then the common set. Hidden
/// specs are omitted entirely.
pub fn build(node: &CommandNode, info: &AppInfo) -> HelpDoc {
    let title = if node.path().len() == 1 && !info.description.is_empty() {
        format!("{} - {}", node.name(), info.description)
    } else {
        node.path_string()
    };

    let usage = usage_line(node);

    let mut sections = Vec::new();
    if node.has_children() {
        sections.push(HelpSection {
            heading: "Commands".to_owned(),
            rows: node
                .children()
                .iter()
                .map(|child| HelpRow {
                    invocation: child.name().to_owned(),
                    help: child.about().to_owned(),
                })
                .collect(),
        });
    }

    let listed = |positional: bool, common: bool| -> Vec<HelpRow> {
        node.specs()
            .iter()
            .filter(|s| !s.is_hidden() && s.is_positional() == positional && s.is_common() == common)
            .map(|s| HelpRow {
                invocation: s.invocation(),
                help: s.help_text().to_owned(),
            })
            .collect()
    };

    let positionals = listed(true, false);
    if !positionals.is_empty() {
        sections.push(HelpSection {
            heading: "Positional Arguments".to_owned(),
            rows: positionals,
        });
    }
    let own = listed(false, false);
    if !own.is_empty() {
        sections.push(HelpSection {
            heading: "Options".to_owned(),
            rows: own,
        });
    }
    let common = listed(false, true);
    if !common.is_empty() {
        sections.push(HelpSection {
            heading: "General Options".to_owned(),
            rows: common,
        });
    }

    HelpDoc {
        title,
        usage,
        description: node.description().to_owned(),
        sections,
    }
}
