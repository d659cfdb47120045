//! `"""`-fenced doc strings.

use std::fmt;

use crate::model::{ParentRef, Shared};
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// Models a doc string attached to a step.
#[derive(Debug, Default)]
pub struct DocString {
    /// The content-type token after the opening fence, if any.
    pub content_type: Option<String>,
    /// The doc string content, without the fences.
    pub content: String,
    /// 1-based line of the opening fence, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning step.
    pub parent: Option<ParentRef>,
}

impl DocString {
    /// Parses a stand-alone doc string, fences included.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::DocString;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let step = parsed
            .ast
            .scenarios
            .first()
            .and_then(|scenario| scenario.steps.first())
            .ok_or_else(|| KIND.missing())?;
        let content = step.docstring.as_ref().ok_or_else(|| KIND.missing())?;
        Ok(populate::doc_string(step, content, &parsed.text, None))
    }
}

impl fmt::Display for DocString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("\"\"\"");
        if let Some(content_type) = self.content_type.as_deref() {
            if !content_type.is_empty() {
                out.push(' ');
                out.push_str(content_type);
            }
        }
        out.push('\n');
        if !self.content.is_empty() {
            out.push_str(&self.content);
            out.push('\n');
        }
        out.push_str("\"\"\"");
        f.write_str(&out)
    }
}

impl PartialEq for DocString {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.content_type == other.content_type
    }
}
