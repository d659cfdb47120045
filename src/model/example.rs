//! Examples blocks belonging to scenario outlines.

use std::fmt;

use crate::model::{ParentRef, Shared, Table, Tag};
use crate::render::{indent_block, keyword_line, tag_line};
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// Models an examples block: the parameter/value rows of an outline.
#[derive(Debug, Default)]
pub struct Example {
    /// The examples keyword as written.
    pub keyword: String,
    /// The block name, empty when absent.
    pub name: String,
    /// The dedented free-text description, empty when absent.
    pub description: String,
    /// The block's tags, in source order.
    pub tags: Vec<Shared<Tag>>,
    /// The parameter/value table, if any rows were given.
    pub table: Option<Shared<Table>>,
    /// 1-based line of the keyword, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning outline.
    pub parent: Option<ParentRef>,
}

impl Example {
    /// Parses a stand-alone examples block.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Example;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let examples = parsed
            .ast
            .scenarios
            .first()
            .and_then(|scenario| scenario.examples.first())
            .ok_or_else(|| KIND.missing())?;
        Ok(populate::example(examples, &parsed.text, None))
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if !self.tags.is_empty() {
            out.push_str(&tag_line(&self.tags));
            out.push('\n');
        }
        out.push_str(&keyword_line(&self.keyword, &self.name));
        if !self.description.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.description);
        }
        let rows = self
            .table
            .as_ref()
            .map(|table| table.borrow().to_string())
            .unwrap_or_default();
        if !rows.is_empty() {
            out.push_str(if self.description.is_empty() { "\n" } else { "\n\n" });
            out.push_str(&indent_block(&rows, 1));
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_examples_render_only_the_keyword_line() {
        let example = Example {
            keyword: "Examples".to_owned(),
            ..Example::default()
        };
        assert_eq!(example.to_string(), "Examples:");
    }

    #[test]
    fn abstract_examples_with_missing_pieces_still_render() {
        let example = Example {
            name: "just a name".to_owned(),
            ..Example::default()
        };
        assert_eq!(example.to_string(), ": just a name");
    }
}
