//! Steps and their attached blocks.

use std::fmt;

use crate::model::{DocString, ParentRef, Shared, Table};
use crate::render::indent_block;
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// The block attached to a step: a table or a doc string, never both.
#[derive(Clone, Debug, derive_more::From)]
pub enum StepBlock {
    /// A data table.
    Table(Shared<Table>),
    /// A doc string.
    DocString(Shared<DocString>),
}

/// Models a single step.
#[derive(Debug, Default)]
pub struct Step {
    /// The step keyword as written (`Given`, `*`, or a localized
    /// equivalent); never semantically interpreted.
    pub keyword: String,
    /// The step text after the keyword.
    pub text: String,
    /// The attached table or doc string, if any.
    pub block: Option<StepBlock>,
    /// 1-based source line, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning test case.
    pub parent: Option<ParentRef>,
}

impl Step {
    /// Parses a stand-alone step, block included.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Step;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let step = parsed
            .ast
            .scenarios
            .first()
            .and_then(|scenario| scenario.steps.first())
            .ok_or_else(|| KIND.missing())?;
        Ok(populate::step(step, &parsed.text, None))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = match (self.keyword.is_empty(), self.text.is_empty()) {
            (false, false) => format!("{} {}", self.keyword, self.text),
            (false, true) => self.keyword.clone(),
            (true, _) => self.text.clone(),
        };
        if let Some(block) = &self.block {
            out.push('\n');
            out.push_str(&indent_block(&block.to_string(), 1));
        }
        f.write_str(&out)
    }
}

impl fmt::Display for StepBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(table) => table.borrow().fmt(f),
            Self::DocString(doc) => doc.borrow().fmt(f),
        }
    }
}

/// Step equality ignores the keyword but considers the text and the whole
/// attached block, doc-string content type included.
impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && blocks_eq(self.block.as_ref(), other.block.as_ref())
    }
}

fn blocks_eq(left: Option<&StepBlock>, right: Option<&StepBlock>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(StepBlock::Table(a)), Some(StepBlock::Table(b))) => *a.borrow() == *b.borrow(),
        (Some(StepBlock::DocString(a)), Some(StepBlock::DocString(b))) => {
            *a.borrow() == *b.borrow()
        }
        _ => false,
    }
}
