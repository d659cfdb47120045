//! Scenario outlines: parameterised test cases.

use std::fmt;

use crate::model::{Background, Example, ParentRef, Scenario, Shared, Step, Tag, steps_eq};
use crate::render::{indent_block, keyword_line, tag_line};
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// Models a scenario outline.
#[derive(Debug, Default)]
pub struct Outline {
    /// The outline keyword as written.
    pub keyword: String,
    /// The outline name, empty when absent.
    pub name: String,
    /// The dedented free-text description, empty when absent.
    pub description: String,
    /// The outline's tags, in source order.
    pub tags: Vec<Shared<Tag>>,
    /// The outline steps, in source order.
    pub steps: Vec<Shared<Step>>,
    /// The examples blocks, in source order.
    pub examples: Vec<Shared<Example>>,
    /// 1-based line of the keyword, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning feature.
    pub parent: Option<ParentRef>,
}

impl Outline {
    /// Parses a stand-alone scenario outline.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Outline;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let scenario = parsed.ast.scenarios.first().ok_or_else(|| KIND.missing())?;
        Ok(populate::outline(scenario, &parsed.text, None))
    }
}

impl fmt::Display for Outline {
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
        // Examples blocks sit at the outline's own level, not indented under
        // it, each separated by a blank line.
        for example in &self.examples {
            out.push_str("\n\n");
            out.push_str(&example.borrow().to_string());
        }
        f.write_str(&out)
    }
}

impl PartialEq for Outline {
    fn eq(&self, other: &Self) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}

impl PartialEq<Background> for Outline {
    fn eq(&self, other: &Background) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}

impl PartialEq<Scenario> for Outline {
    fn eq(&self, other: &Scenario) -> bool {
        steps_eq(&self.steps, &other.steps)
    }
}
