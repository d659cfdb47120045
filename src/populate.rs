//! Population of model nodes from the grammar engine's output.
//!
//! Each function here turns one adapter node into a model node, wiring the
//! child's parent back-reference before returning. Attributes the adapter
//! exposes as typed fields are taken directly; everything it drops or leaves
//! untyped (descriptions, tag lines, doc-string content types, examples
//! names) is recovered by scanning the parsed source text around the
//! adapter's reported positions. Absent optional data populates empty
//! defaults rather than failing.

use std::rc::Rc;

use serde_json::json;

use crate::dialect;
use crate::model::{
    Background, Cell, DocString, Example, Feature, NodeRef, Outline, ParentRef, Row, Scenario,
    Shared, Step, StepBlock, Table, Tag, Test, shared,
};

pub(crate) fn feature(
    ast: &gherkin::Feature,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<Feature> {
    let keyword = ast.keyword.trim().to_owned();
    let header = ast.position.line;

    let background_header = ast
        .background
        .as_ref()
        .and_then(|bg| header_line(source, bg.keyword.trim()))
        .map(|(line, _)| line);
    let first_test = ast
        .scenarios
        .first()
        .map(|sc| first_line_of_block(source, sc.position.line));
    let boundary = [background_header, first_test]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or_else(|| section_boundary(source, header));
    let description = description_between(source, header, boundary);

    log::debug!(
        "populating feature '{}' with {} test case(s)",
        ast.name,
        ast.scenarios.len()
    );

    let parsing_data = json!({
        "keyword": ast.keyword,
        "name": ast.name,
        "description": description,
        "line": header,
        "tags": ast.tags,
        "background": ast.background.as_ref().map(|bg| background_payload(bg, source)),
        "scenarios": ast
            .scenarios
            .iter()
            .map(|sc| test_case_payload(sc, source))
            .collect::<Vec<_>>(),
    });
    let node = shared(Feature {
        keyword,
        name: ast.name.clone(),
        description,
        source_line: Some(header),
        parsing_data: Some(parsing_data),
        parent,
        ..Feature::default()
    });
    let parent_ref = NodeRef::Feature(Rc::clone(&node)).downgrade();

    let tags = tags(&ast.tags, header, source, &parent_ref);
    let feature_background = ast
        .background
        .as_ref()
        .map(|bg| background(bg, source, Some(parent_ref.clone())));
    let outline_dialect = dialect();
    let tests = ast
        .scenarios
        .iter()
        .map(|sc| {
            // Any examples block makes a scenario an outline, whatever its
            // keyword says.
            if outline_dialect.is_outline_keyword(sc.keyword.trim()) || !sc.examples.is_empty() {
                Test::Outline(outline(sc, source, Some(parent_ref.clone())))
            } else {
                Test::Scenario(scenario(sc, source, Some(parent_ref.clone())))
            }
        })
        .collect();

    {
        let mut feature = node.borrow_mut();
        feature.tags = tags;
        feature.background = feature_background;
        feature.tests = tests;
    }
    node
}

pub(crate) fn background(
    bg: &gherkin::Background,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<Background> {
    let keyword = bg.keyword.trim().to_owned();
    let header = header_line(source, &keyword);
    let (source_line, name) = match header {
        Some((line, name)) => (Some(line), name),
        None => (None, String::new()),
    };
    let description = source_line.map_or_else(String::new, |line| {
        let boundary = bg
            .steps
            .first()
            .map_or_else(|| section_boundary(source, line), |s| s.position.line);
        description_between(source, line, boundary)
    });

    let node = shared(Background {
        keyword,
        name,
        description,
        source_line,
        parsing_data: Some(background_payload(bg, source)),
        parent,
        ..Background::default()
    });
    let parent_ref = NodeRef::Background(Rc::clone(&node)).downgrade();
    node.borrow_mut().steps = steps(&bg.steps, source, &parent_ref);
    node
}

pub(crate) fn scenario(
    sc: &gherkin::Scenario,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<Scenario> {
    let header = sc.position.line;
    let node = shared(Scenario {
        keyword: sc.keyword.trim().to_owned(),
        name: sc.name.clone(),
        description: test_case_description(sc, source),
        source_line: Some(header),
        parsing_data: Some(test_case_payload(sc, source)),
        parent,
        ..Scenario::default()
    });
    let parent_ref = NodeRef::Scenario(Rc::clone(&node)).downgrade();
    {
        let mut scenario = node.borrow_mut();
        scenario.tags = tags(&sc.tags, header, source, &parent_ref);
        scenario.steps = steps(&sc.steps, source, &parent_ref);
    }
    node
}

pub(crate) fn outline(
    sc: &gherkin::Scenario,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<Outline> {
    let header = sc.position.line;
    let node = shared(Outline {
        keyword: sc.keyword.trim().to_owned(),
        name: sc.name.clone(),
        description: test_case_description(sc, source),
        source_line: Some(header),
        parsing_data: Some(test_case_payload(sc, source)),
        parent,
        ..Outline::default()
    });
    let parent_ref = NodeRef::Outline(Rc::clone(&node)).downgrade();
    {
        let mut outline = node.borrow_mut();
        outline.tags = tags(&sc.tags, header, source, &parent_ref);
        outline.steps = steps(&sc.steps, source, &parent_ref);
        outline.examples = sc
            .examples
            .iter()
            .map(|ex| example(ex, source, Some(parent_ref.clone())))
            .collect();
    }
    node
}

pub(crate) fn example(
    ex: &gherkin::Examples,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<Example> {
    let (header, keyword, name) = examples_header(source, ex);
    let boundary = ex.table.as_ref().map_or_else(
        || section_boundary(source, header),
        |table| line_of_offset(source, table.span.start),
    );
    let description = description_between(source, header, boundary);

    let node = shared(Example {
        keyword: keyword.clone(),
        name: name.clone(),
        description: description.clone(),
        source_line: Some(header),
        parsing_data: Some(json!({
            "keyword": keyword,
            "name": name,
            "description": description,
            "line": header,
            "tags": ex.tags,
            "table": ex.table.as_ref().map(|t| &t.rows),
        })),
        parent,
        ..Example::default()
    });
    let parent_ref = NodeRef::Example(Rc::clone(&node)).downgrade();
    {
        let mut example = node.borrow_mut();
        example.tags = tags(&ex.tags, header, source, &parent_ref);
        example.table = ex
            .table
            .as_ref()
            .map(|t| table(t, source, Some(parent_ref.clone())));
    }
    node
}

pub(crate) fn step(st: &gherkin::Step, source: &str, parent: Option<ParentRef>) -> Shared<Step> {
    let node = shared(Step {
        keyword: st.keyword.trim().to_owned(),
        text: st.value.clone(),
        source_line: Some(st.position.line),
        parsing_data: Some(step_payload(st)),
        parent,
        ..Step::default()
    });
    let parent_ref = NodeRef::Step(Rc::clone(&node)).downgrade();
    let block = if let Some(t) = &st.table {
        Some(StepBlock::Table(table(t, source, Some(parent_ref))))
    } else {
        st.docstring
            .as_ref()
            .map(|content| StepBlock::DocString(doc_string(st, content, source, Some(parent_ref))))
    };
    node.borrow_mut().block = block;
    node
}

pub(crate) fn doc_string(
    st: &gherkin::Step,
    content: &str,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<DocString> {
    // The adapter keeps the content but drops the fence line; the content
    // type and the fence's own line are recovered from the source text.
    let fence = doc_string_fence(source, st.position.line);
    let (source_line, content_type) = match fence {
        Some((line, content_type)) => (Some(line), content_type),
        None => (None, None),
    };
    let content = content.strip_suffix('\n').unwrap_or(content).to_owned();
    shared(DocString {
        content_type: content_type.clone(),
        content: content.clone(),
        source_line,
        parsing_data: Some(json!({
            "content": content,
            "content_type": content_type,
            "line": source_line,
        })),
        parent,
    })
}

pub(crate) fn table(
    t: &gherkin::Table,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<Table> {
    let start = line_of_offset(source, t.span.start);
    let node = shared(Table {
        source_line: Some(start),
        parsing_data: Some(json!({
            "rows": t.rows,
            "line": start,
        })),
        parent,
        ..Table::default()
    });
    let parent_ref = NodeRef::Table(Rc::clone(&node)).downgrade();
    node.borrow_mut().rows = t
        .rows
        .iter()
        .enumerate()
        .map(|(i, cells)| row(cells, start + i, Some(parent_ref.clone())))
        .collect();
    node
}

pub(crate) fn row(cells: &[String], line: usize, parent: Option<ParentRef>) -> Shared<Row> {
    let node = shared(Row {
        source_line: Some(line),
        parsing_data: Some(json!({
            "cells": cells,
            "line": line,
        })),
        parent,
        ..Row::default()
    });
    let parent_ref = NodeRef::Row(Rc::clone(&node)).downgrade();
    node.borrow_mut().cells = cells
        .iter()
        .map(|value| cell(value, line, Some(parent_ref.clone())))
        .collect();
    node
}

pub(crate) fn cell(value: &str, line: usize, parent: Option<ParentRef>) -> Shared<Cell> {
    shared(Cell {
        value: value.to_owned(),
        source_line: Some(line),
        parsing_data: Some(json!({
            "value": value,
            "line": line,
        })),
        parent,
    })
}

pub(crate) fn tag(
    name: &str,
    anchor_line: usize,
    source: &str,
    parent: Option<ParentRef>,
) -> Shared<Tag> {
    let display = if name.starts_with('@') {
        name.to_owned()
    } else {
        format!("@{name}")
    };
    let source_line = find_tag_line(source, &display, anchor_line);
    shared(Tag {
        name: display.clone(),
        source_line,
        parsing_data: Some(json!({
            "name": display,
            "line": source_line,
        })),
        parent,
    })
}

fn tags(
    names: &[String],
    anchor_line: usize,
    source: &str,
    parent: &ParentRef,
) -> Vec<Shared<Tag>> {
    names
        .iter()
        .map(|name| tag(name, anchor_line, source, Some(parent.clone())))
        .collect()
}

fn steps(steps: &[gherkin::Step], source: &str, parent: &ParentRef) -> Vec<Shared<Step>> {
    steps
        .iter()
        .map(|st| step(st, source, Some(parent.clone())))
        .collect()
}

fn test_case_description(sc: &gherkin::Scenario, source: &str) -> String {
    let header = sc.position.line;
    let boundary = sc
        .steps
        .first()
        .map(|st| st.position.line)
        .or_else(|| {
            sc.examples.first().map(|ex| {
                first_line_of_block(source, line_of_offset(source, ex.span.start))
            })
        })
        .unwrap_or_else(|| line_of_offset(source, sc.span.end.saturating_sub(1)) + 1);
    description_between(source, header, boundary)
}

// Parsing payloads retain what the adapter reported, nested children
// included, so callers can introspect the raw parse without re-parsing. The
// payload is opaque to the rest of the crate.

fn test_case_payload(sc: &gherkin::Scenario, source: &str) -> serde_json::Value {
    json!({
        "keyword": sc.keyword,
        "name": sc.name,
        "description": test_case_description(sc, source),
        "line": sc.position.line,
        "tags": sc.tags,
        "steps": sc.steps.iter().map(step_payload).collect::<Vec<_>>(),
        "examples": sc
            .examples
            .iter()
            .map(|ex| {
                json!({
                    "tags": ex.tags,
                    "table": ex.table.as_ref().map(|t| &t.rows),
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn background_payload(bg: &gherkin::Background, source: &str) -> serde_json::Value {
    let header = header_line(source, bg.keyword.trim());
    json!({
        "keyword": bg.keyword,
        "name": header.as_ref().map(|(_, name)| name),
        "line": header.as_ref().map(|(line, _)| line),
        "steps": bg.steps.iter().map(step_payload).collect::<Vec<_>>(),
    })
}

fn step_payload(st: &gherkin::Step) -> serde_json::Value {
    json!({
        "keyword": st.keyword,
        "text": st.value,
        "line": st.position.line,
        "table": st.table.as_ref().map(|t| &t.rows),
        "docstring": st.docstring,
    })
}

/// 1-based line number containing the given byte offset.
pub(crate) fn line_of_offset(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn line_at(source: &str, line: usize) -> &str {
    source.lines().nth(line.saturating_sub(1)).unwrap_or("")
}

/// Walks upward from `line` over the contiguous tag lines above it, returning
/// the first line of the whole block.
fn first_line_of_block(source: &str, mut line: usize) -> usize {
    while line > 1 && line_at(source, line - 1).trim().starts_with('@') {
        line -= 1;
    }
    line
}

/// The line a tag token appears on: the nearest tag line at or above the
/// anchored element's header that carries the token.
fn find_tag_line(source: &str, name: &str, anchor_line: usize) -> Option<usize> {
    for n in (1..anchor_line).rev() {
        let line = line_at(source, n).trim();
        if !line.starts_with('@') {
            break;
        }
        if line.split_whitespace().any(|token| token == name) {
            return Some(n);
        }
    }
    None
}

/// First line after `after` that opens a new section (a keyword line or a tag
/// line), or one past the last line when none does.
fn section_boundary(source: &str, after: usize) -> usize {
    let dialect = dialect();
    let total = source.lines().count();
    for n in (after + 1)..=total {
        let line = line_at(source, n).trim();
        if line.starts_with('@') {
            return n;
        }
        let opens_section = dialect.section_keywords().any(|kw| {
            line.strip_prefix(kw)
                .is_some_and(|rest| rest.starts_with(':'))
        });
        if opens_section {
            return n;
        }
    }
    total + 1
}

/// The dedented text of the lines strictly between `after_line` and
/// `before_line`.
fn description_between(source: &str, after_line: usize, before_line: usize) -> String {
    if before_line <= after_line + 1 {
        return String::new();
    }
    let lines: Vec<&str> = source
        .lines()
        .skip(after_line)
        .take(before_line - after_line - 1)
        .collect();
    dedent(&lines.join("\n"))
}

/// Normalizes a free-text block: trailing whitespace stripped per line, blank
/// edge lines dropped, and the common leading whitespace of the non-empty
/// lines removed. Blank interior lines survive as empty lines.
fn dedent(block: &str) -> String {
    let lines: Vec<&str> = block.lines().map(str::trim_end).collect();
    let Some(start) = lines.iter().position(|l| !l.is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .unwrap_or(start);
    let lines = &lines[start..=end];
    let margin = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                l.chars().skip(margin).collect()
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Finds the examples header at or after the block's span: its line, the
/// keyword as written, and the block name.
fn examples_header(source: &str, ex: &gherkin::Examples) -> (usize, String, String) {
    let start = line_of_offset(source, ex.span.start);
    let keywords = dialect().examples_keywords;
    let total = source.lines().count();
    for n in start..=total {
        let line = line_at(source, n).trim();
        for kw in &keywords {
            if let Some(name) = line
                .strip_prefix(kw.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
            {
                return (n, kw.clone(), name.trim().to_owned());
            }
        }
    }
    let fallback = keywords
        .first()
        .cloned()
        .unwrap_or_else(|| "Examples".to_owned());
    (start, fallback, String::new())
}

/// Finds the first `<keyword>: <name>` line in the source, returning its line
/// number and the name remainder.
fn header_line(source: &str, keyword: &str) -> Option<(usize, String)> {
    source.lines().enumerate().find_map(|(i, raw)| {
        raw.trim()
            .strip_prefix(keyword)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|name| (i + 1, name.trim().to_owned()))
    })
}

/// Finds the `"""` (or backtick) fence opening the doc string attached to the
/// step at `step_line`, returning the fence line and the content type token.
fn doc_string_fence(source: &str, step_line: usize) -> Option<(usize, Option<String>)> {
    let total = source.lines().count();
    for n in (step_line + 1)..=total {
        let line = line_at(source, n).trim();
        let rest = line
            .strip_prefix("\"\"\"")
            .or_else(|| line.strip_prefix("```"));
        if let Some(rest) = rest {
            let token = rest.trim();
            let content_type = (!token.is_empty()).then(|| token.to_owned());
            return Some((n, content_type));
        }
        // Anything else between the step and its doc string would not have
        // parsed.
        if !line.is_empty() {
            break;
        }
    }
    None
}
