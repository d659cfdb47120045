//! Shared helpers for serializing nodes back into Gherkin text.
//!
//! Every node renders itself at column zero; enclosing containers indent
//! whole child blocks by one unit per nesting level. Blank lines are never
//! padded with indentation.

use crate::model::{Shared, Tag};

/// One level of indentation.
pub(crate) const INDENT: &str = "  ";

/// Indents every non-empty line of `block` by `levels` units.
pub(crate) fn indent_block(block: &str, levels: usize) -> String {
    let prefix = INDENT.repeat(levels);
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `<keyword>:` or `<keyword>: <name>`.
pub(crate) fn keyword_line(keyword: &str, name: &str) -> String {
    if name.is_empty() {
        format!("{keyword}:")
    } else {
        format!("{keyword}: {name}")
    }
}

/// Renders a tag list as a single space-separated line.
pub(crate) fn tag_line(tags: &[Shared<Tag>]) -> String {
    tags.iter()
        .map(|tag| tag.borrow().name.clone())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escapes the two characters that are special inside a table cell.
pub(crate) fn escape_cell(value: &str) -> String {
    value.replace('\\', "\\\\").replace('|', "\\|")
}
