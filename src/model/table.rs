//! Tables, their rows, and their cells.

use std::fmt;

use crate::model::{ParentRef, Shared};
use crate::render::escape_cell;
use crate::scaffold::FragmentKind;
use crate::{ModelError, parsing, populate};

/// Models a step or examples table.
#[derive(Debug, Default)]
pub struct Table {
    /// The table rows, in source order.
    pub rows: Vec<Shared<Row>>,
    /// 1-based line of the first row, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning node.
    pub parent: Option<ParentRef>,
}

/// Models a single table row.
#[derive(Debug, Default)]
pub struct Row {
    /// The row's cells, in source order.
    pub cells: Vec<Shared<Cell>>,
    /// 1-based source line, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning node.
    pub parent: Option<ParentRef>,
}

/// Models a single table cell.
#[derive(Debug, Default)]
pub struct Cell {
    /// The cell value, unescaped.
    pub value: String,
    /// 1-based source line, if parsed from source.
    pub source_line: Option<usize>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning node.
    pub parent: Option<ParentRef>,
}

impl Table {
    /// Parses a stand-alone table.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Table;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let table = first_step_table(&parsed.ast).ok_or_else(|| KIND.missing())?;
        Ok(populate::table(table, &parsed.text, None))
    }
}

impl Row {
    /// Parses a stand-alone table row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Row;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let table = first_step_table(&parsed.ast).ok_or_else(|| KIND.missing())?;
        let cells = table.rows.first().ok_or_else(|| KIND.missing())?;
        let line = populate::line_of_offset(&parsed.text, table.span.start);
        Ok(populate::row(cells, line, None))
    }
}

impl Cell {
    /// Parses a stand-alone cell value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] labelled with this kind's sentinel
    /// filename when the scaffolded text is rejected.
    pub fn from_source(source: &str) -> Result<Shared<Self>, ModelError> {
        const KIND: FragmentKind = FragmentKind::Cell;
        let parsed = parsing::parse_text(&KIND.scaffold(source), KIND.filename())?;
        let table = first_step_table(&parsed.ast).ok_or_else(|| KIND.missing())?;
        let value = table
            .rows
            .first()
            .and_then(|row| row.first())
            .ok_or_else(|| KIND.missing())?;
        let line = populate::line_of_offset(&parsed.text, table.span.start);
        Ok(populate::cell(value, line, None))
    }
}

fn first_step_table(ast: &gherkin::Feature) -> Option<&gherkin::Table> {
    ast.scenarios
        .first()
        .and_then(|scenario| scenario.steps.first())
        .and_then(|step| step.table.as_ref())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.rows.iter().map(|row| row.borrow().to_string()).collect();
        f.write_str(&rows.join("\n"))
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return Ok(());
        }
        let cells: Vec<String> = self
            .cells
            .iter()
            .map(|cell| cell.borrow().to_string())
            .collect();
        write!(f, "| {} |", cells.join(" | "))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape_cell(&self.value))
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| *a.borrow() == *b.borrow())
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| *a.borrow() == *b.borrow())
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
