//! Backgrounds: the shared steps of a feature.

use std::fmt;

use crate::model::{Outline, ParentRef, Scenario, Shared, Step, steps_eq};
use crate::render::{indent_block, keyword_line};
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// Models a background.
#[derive(Debug, Default)]
pub struct Background {
    /// The background keyword as written.
    pub keyword: String,
    /// The background name, empty when absent.
    pub name: String,
    /// The dedented free-text description, empty when absent.
    pub description: String,
    /// The background steps, in source order.
    pub steps: Vec<Shared<Step>>,
    /// 1-based line of the keyword, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning feature.
    pub parent: Option<ParentRef>,
}

impl Background {
    /// Parses a stand-alone background.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Background;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let background = parsed.ast.background.as_ref().ok_or_else(|| KIND.missing())?;
        Ok(populate::background(background, &parsed.text, None))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = keyword_line(&self.keyword, &self.name);
        if !self.description.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.description);
        }
        if !self.steps.is_empty() {
            out.push_str(if self.description.is_empty() { "\n" } else { "\n\n" });
            let steps: Vec<String> = self
                .steps
                .iter()
                .map(|step| indent_block(&step.borrow().to_string(), 1))
                .collect();
            out.push_str(&steps.join("\n"));
        }
        f.write_str(&out)
    }
}

// Test-case equality: step sequences only, regardless of concrete kind.

impl PartialEq for Background {
    fn eq(&self, other: &Self) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}

impl PartialEq<Scenario> for Background {
    fn eq(&self, other: &Scenario) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}

impl PartialEq<Outline> for Background {
    fn eq(&self, other: &Outline) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}
