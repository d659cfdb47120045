//! Scenarios: concrete test cases.

use std::fmt;

use crate::model::{Background, Outline, ParentRef, Shared, Step, Tag, steps_eq};
use crate::render::{indent_block, keyword_line, tag_line};
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// Models a scenario.
#[derive(Debug, Default)]
pub struct Scenario {
    /// The scenario keyword as written.
    pub keyword: String,
    /// The scenario name, empty when absent.
    pub name: String,
    /// The dedented free-text description, empty when absent.
    pub description: String,
    /// The scenario's tags, in source order.
    pub tags: Vec<Shared<Tag>>,
    /// The scenario steps, in source order.
    pub steps: Vec<Shared<Step>>,
    /// 1-based line of the keyword, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning feature.
    pub parent: Option<ParentRef>,
}

impl Scenario {
    /// Parses a stand-alone scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Scenario;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let scenario = parsed.ast.scenarios.first().ok_or_else(|| KIND.missing())?;
        Ok(populate::scenario(scenario, &parsed.text, None))
    }
}

impl fmt::Display for Scenario {
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

impl PartialEq for Scenario {
    fn eq(&self, other: &Self) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}

impl PartialEq<Background> for Scenario {
    fn eq(&self, other: &Background) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}

impl PartialEq<Outline> for Scenario {
    fn eq(&self, other: &Outline) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}
