//! Markdown rendering of a help document.
//!
//! Levels 3 and 4 are used for headings so the output embeds cleanly in
//! project documentation.

use crate::help::document::HelpDoc;

pub fn render(doc: &HelpDoc) -> String {
    let mut out = String::new();
    out.push_str(&format!("### {}\n\n", doc.title));
    out.push_str("#### Usage\n\n");
    out.push_str(&format!("```\n{}\n```\n", doc.usage));

    if !doc.description.is_empty() {
        out.push('\n');
        out.push_str(&doc.description);
        out.push('\n');
    }

    for section in &doc.sections {
        out.push('\n');
        out.push_str(&format!("#### {}\n\n", section.heading));
        for row in &section.rows {
            if row.help.is_empty() {
                out.push_str(&format!("- `{}`\n", row.invocation));
            } else {
                out.push_str(&format!("- `{}`: {}\n", row.invocation, row.help));
            }
        }
    }
    out
}
