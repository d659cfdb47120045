//! Scaffolding for stand-alone fragment parsing.
//!
//! Most grammar elements cannot be parsed on their own: a table row, for
//! example, is only valid underneath a step. Each fragment kind therefore
//! knows how to embed its source text at the correct grammatical position
//! inside a minimal synthetic document, and which fixed sentinel filename to
//! parse that document under so that failures are attributable to the
//! stand-alone fragment rather than to a real file.

use crate::dialect;

/// The grammar elements that can be parsed from stand-alone source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// A whole feature.
    Feature,
    /// A background together with its steps.
    Background,
    /// A scenario together with its tags and steps.
    Scenario,
    /// A scenario outline together with its examples.
    Outline,
    /// A single examples block.
    Example,
    /// A single step, optionally with a table or doc string.
    Step,
    /// A table attached to a step.
    Table,
    /// A single table row.
    Row,
    /// A single table cell value.
    Cell,
    /// A `"""`-fenced doc string.
    DocString,
    /// A single tag token.
    Tag,
}

impl FragmentKind {
    /// The lower-case element name, used in diagnostics.
    #[must_use]
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Background => "background",
            Self::Scenario => "scenario",
            Self::Outline => "outline",
            Self::Example => "example",
            Self::Step => "step",
            Self::Table => "table",
            Self::Row => "row",
            Self::Cell => "cell",
            Self::DocString => "doc_string",
            Self::Tag => "tag",
        }
    }

    /// The fixed sentinel filename this fragment kind is parsed under.
    #[must_use]
    pub const fn filename(self) -> &'static str {
        match self {
            Self::Feature => "cuke_modeler_stand_alone_feature.feature",
            Self::Background => "cuke_modeler_stand_alone_background.feature",
            Self::Scenario => "cuke_modeler_stand_alone_scenario.feature",
            Self::Outline => "cuke_modeler_stand_alone_outline.feature",
            Self::Example => "cuke_modeler_stand_alone_example.feature",
            Self::Step => "cuke_modeler_stand_alone_step.feature",
            Self::Table => "cuke_modeler_stand_alone_table.feature",
            Self::Row => "cuke_modeler_stand_alone_row.feature",
            Self::Cell => "cuke_modeler_stand_alone_cell.feature",
            Self::DocString => "cuke_modeler_stand_alone_doc_string.feature",
            Self::Tag => "cuke_modeler_stand_alone_tag.feature",
        }
    }

    /// Embeds `fragment` in the minimal document needed to make it parse on
    /// its own, using the active dialect's keywords.
    #[must_use]
    pub fn scaffold(self, fragment: &str) -> String {
        let dialect = dialect();
        let language = format!("# language: {}\n", dialect.code);
        let feature = format!("{}: Fake feature to parse\n", dialect.feature_keyword());
        let scenario = format!("{}:\n", dialect.scenario_keyword());
        let outline = format!("{}: Fake outline to parse\n", dialect.outline_keyword());
        let step = "* fake step\n";

        log::trace!("scaffolding stand-alone {} text", self.kind_name());

        match self {
            // A feature is a complete document; it needs no embedding, and
            // adding lines above it would shift every reported source line.
            Self::Feature => fragment.to_owned(),
            Self::Background | Self::Scenario | Self::Outline => {
                format!("{language}{feature}{fragment}")
            }
            Self::Example => format!("{language}{feature}{outline}{step}{fragment}"),
            Self::Step => format!("{language}{feature}{scenario}{fragment}"),
            Self::Table | Self::Row | Self::DocString => {
                format!("{language}{feature}{scenario}{step}{fragment}")
            }
            Self::Cell => format!("{language}{feature}{scenario}{step}|{fragment}|"),
            Self::Tag => format!("{language}{fragment}\n{feature}"),
        }
    }

    /// Error value for a scaffold that parsed without yielding the fragment.
    pub(crate) fn missing(self) -> crate::ModelError {
        crate::ModelError::MissingFragment {
            kind: self.kind_name(),
            filename: self.filename(),
        }
    }
}
