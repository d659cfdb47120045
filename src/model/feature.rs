//! Features: the root grammar element of a feature file.

use std::fmt;
use std::rc::Rc;

use crate::model::{Background, Outline, ParentRef, Scenario, Shared, Tag};
use crate::render::{indent_block, keyword_line, tag_line};
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// A feature's direct test case: a scenario or an outline, in source order.
#[derive(Clone, Debug, derive_more::From)]
pub enum Test {
    /// A concrete scenario.
    Scenario(Shared<Scenario>),
    /// A parameterised scenario outline.
    Outline(Shared<Outline>),
}

impl Test {
    /// Returns the scenario handle when this test is one.
    #[must_use]
    pub fn as_scenario(&self) -> Option<Shared<Scenario>> {
        match self {
            Self::Scenario(scenario) => Some(Rc::clone(scenario)),
            Self::Outline(_) => None,
        }
    }

    /// Returns the outline handle when this test is one.
    #[must_use]
    pub fn as_outline(&self) -> Option<Shared<Outline>> {
        match self {
            Self::Outline(outline) => Some(Rc::clone(outline)),
            Self::Scenario(_) => None,
        }
    }
}

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scenario(scenario) => scenario.borrow().fmt(f),
            Self::Outline(outline) => outline.borrow().fmt(f),
        }
    }
}

/// Models a feature.
#[derive(Debug, Default)]
pub struct Feature {
    /// The feature keyword as written.
    pub keyword: String,
    /// The feature name, empty when absent.
    pub name: String,
    /// The dedented free-text description, empty when absent.
    pub description: String,
    /// The feature's tags, in source order.
    pub tags: Vec<Shared<Tag>>,
    /// The background, if the feature has one.
    pub background: Option<Shared<Background>>,
    /// The feature's test cases, in source order.
    pub tests: Vec<Test>,
    /// 1-based line of the keyword, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning feature file.
    pub parent: Option<ParentRef>,
}

impl Feature {
    /// Parses a stand-alone feature.
    ///
    /// A feature is a complete document already, so the text goes to the
    /// grammar engine as-is and line numbers match the caller's source.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the source text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Feature;
        let parsed = parsing::parse_text(source, KIND.filename())?;
        Ok(populate::feature(&parsed.ast, &parsed.text, None))
    }

    /// The feature's scenarios, in source order, outlines excluded.
    #[must_use]
    pub fn scenarios(&self) -> Vec<Shared<Scenario>> {
        self.tests.iter().filter_map(Test::as_scenario).collect()
    }

    /// The feature's outlines, in source order, scenarios excluded.
    #[must_use]
    pub fn outlines(&self) -> Vec<Shared<Outline>> {
        self.tests.iter().filter_map(Test::as_outline).collect()
    }
}

impl fmt::Display for Feature {
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
        // Each child block is preceded by a blank line and indented one
        // level, the background first.
        if let Some(background) = &self.background {
            out.push_str("\n\n");
            out.push_str(&indent_block(&background.borrow().to_string(), 1));
        }
        for test in &self.tests {
            out.push_str("\n\n");
            out.push_str(&indent_block(&test.to_string(), 1));
        }
        f.write_str(&out)
    }
}
