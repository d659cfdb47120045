//! A single `@tag` token.

use std::fmt;

use crate::model::{ParentRef, Shared};
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// Models a Gherkin tag.
#[derive(Debug, Default)]
pub struct Tag {
    /// The tag text, including the leading sigil.
    pub name: String,
    /// 1-based line the tag appeared on, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning node.
    pub parent: Option<ParentRef>,
}

impl Tag {
    /// Parses a stand-alone tag.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Tag;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let name = parsed.ast.tags.first().ok_or_else(|| KIND.missing())?;
        Ok(populate::tag(
            name,
            parsed.ast.position.line,
            &parsed.text,
            None,
        ))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
