//! Stand-alone fragment parsing behaviour.

use cuke_modeler::{
    Background, Cell, DocString, Example, Feature, ModelError, Outline, Row, Scenario, Step,
    StepBlock, Table, Tag, Test,
};
use rstest::rstest;

#[test]
fn tags_parse_on_their_own() {
    let tag = Tag::from_source("@lonely").expect("tag should parse");
    assert_eq!(tag.borrow().name, "@lonely");
}

#[test]
fn cells_parse_on_their_own() {
    let cell = Cell::from_source("a value").expect("cell should parse");
    assert_eq!(cell.borrow().value, "a value");
}

#[test]
fn rows_parse_on_their_own() {
    let row = Row::from_source("| a | b |").expect("row should parse");
    let cells: Vec<String> = row
        .borrow()
        .cells
        .iter()
        .map(|cell| cell.borrow().value.clone())
        .collect();
    assert_eq!(cells, ["a", "b"]);
}

#[test]
fn tables_parse_on_their_own() {
    let table = Table::from_source("| a | b |\n| 1 | 2 |").expect("table should parse");
    assert_eq!(table.borrow().rows.len(), 2);
}

#[test]
fn doc_strings_parse_with_their_content_type() {
    let doc = DocString::from_source("\"\"\" markdown\nSome text.\n\"\"\"")
        .expect("doc string should parse");
    assert_eq!(doc.borrow().content, "Some text.");
    assert_eq!(doc.borrow().content_type.as_deref(), Some("markdown"));
}

#[test]
fn steps_parse_with_an_attached_table() {
    let step = Step::from_source("Given a step\n  | a |\n  | b |").expect("step should parse");
    assert_eq!(step.borrow().keyword, "Given");
    assert_eq!(step.borrow().text, "a step");
    let Some(StepBlock::Table(table)) = step.borrow().block.clone() else {
        panic!("expected a table block");
    };
    assert_eq!(table.borrow().rows.len(), 2);
}

#[test]
fn backgrounds_parse_with_a_name() {
    let background =
        Background::from_source("Background: setup\n  Given ready").expect("should parse");
    assert_eq!(background.borrow().name, "setup");
    assert_eq!(background.borrow().steps.len(), 1);
}

#[test]
fn scenarios_parse_with_their_tags() {
    let scenario = Scenario::from_source("@wip\nScenario: fragment\n  Given a step")
        .expect("scenario should parse");
    assert_eq!(scenario.borrow().name, "fragment");
    assert_eq!(scenario.borrow().tags.len(), 1);
    assert_eq!(scenario.borrow().tags[0].borrow().name, "@wip");
    assert_eq!(scenario.borrow().steps.len(), 1);
}

#[test]
fn outlines_parse_with_their_examples() {
    let outline = Outline::from_source(
        "Scenario Outline: doubling\n  Given <n>\n\nExamples:\n  | n |\n  | 1 |",
    )
    .expect("outline should parse");
    assert_eq!(outline.borrow().name, "doubling");
    assert_eq!(outline.borrow().examples.len(), 1);
    let example = outline.borrow().examples[0].clone();
    let table = example.borrow().table.clone().expect("examples have rows");
    assert_eq!(table.borrow().rows.len(), 2);
}

#[test]
fn examples_parse_on_their_own() {
    let example =
        Example::from_source("Examples: stuff\n  | a |\n  | 1 |").expect("examples should parse");
    assert_eq!(example.borrow().name, "stuff");
    assert!(example.borrow().table.is_some());
}

#[test]
fn features_parse_unscaffolded_with_unshifted_lines() {
    let feature = Feature::from_source("Feature:").expect("bare feature should parse");
    assert_eq!(feature.borrow().source_line, Some(1));

    let feature = Feature::from_source("Feature: lines\n\n  @tagged\n  Scenario: third\n    * go")
        .expect("feature should parse");
    assert_eq!(feature.borrow().source_line, Some(1));
    let Test::Scenario(scenario) = feature.borrow().tests[0].clone() else {
        panic!("expected a scenario");
    };
    assert_eq!(scenario.borrow().source_line, Some(4));
    assert_eq!(scenario.borrow().tags[0].borrow().source_line, Some(3));
    assert_eq!(scenario.borrow().steps[0].borrow().source_line, Some(5));
}

#[test]
fn parsing_payloads_retain_the_nested_adapter_output() {
    let feature = Feature::from_source(
        "Feature: payload\n\nWords about it.\n\n  Background:\n    Given setup\n\n  Scenario: one\n    When acting\n      | a | b |",
    )
    .expect("feature should parse");
    let payload = feature
        .borrow()
        .parsing_data
        .clone()
        .expect("parsed nodes carry a payload");

    assert_eq!(payload["name"], "payload");
    assert_eq!(payload["description"], "Words about it.");
    assert_eq!(payload["background"]["steps"][0]["text"], "setup");
    let step = &payload["scenarios"][0]["steps"][0];
    assert_eq!(step["keyword"].as_str().map(str::trim), Some("When"));
    assert_eq!(step["table"][0][1], "b");

    let Test::Scenario(scenario) = feature.borrow().tests[0].clone() else {
        panic!("expected a scenario");
    };
    let step = scenario.borrow().steps[0].clone();
    let step_payload = step
        .borrow()
        .parsing_data
        .clone()
        .expect("steps carry a payload");
    assert_eq!(step_payload["table"][0][0], "a");
}

#[test]
fn parse_failures_name_the_sentinel_file() {
    let error = Step::from_source("Given a step\n  \"\"\"\n  never closed")
        .err()
        .expect("unclosed doc string should fail");
    assert!(matches!(error, ModelError::Parse { .. }));
    assert!(
        error
            .to_string()
            .contains("'cuke_modeler_stand_alone_step.feature'")
    );
}

#[rstest]
#[case::background("background")]
#[case::scenario("scenario")]
#[case::outline("outline")]
#[case::example("example")]
#[case::step("step")]
#[case::table("table")]
#[case::row("row")]
#[case::doc_string("doc_string")]
#[case::tag("tag")]
fn empty_fragment_text_reports_the_missing_kind(#[case] kind: &str) {
    let error = match kind {
        "background" => Background::from_source("").map(|_| ()).err(),
        "scenario" => Scenario::from_source("").map(|_| ()).err(),
        "outline" => Outline::from_source("").map(|_| ()).err(),
        "example" => Example::from_source("").map(|_| ()).err(),
        "step" => Step::from_source("").map(|_| ()).err(),
        "table" => Table::from_source("").map(|_| ()).err(),
        "row" => Row::from_source("").map(|_| ()).err(),
        "doc_string" => DocString::from_source("").map(|_| ()).err(),
        "tag" => Tag::from_source("").map(|_| ()).err(),
        other => panic!("unknown case {other}"),
    };
    let error = error.expect("empty fragment text should not produce a model");
    assert!(
        matches!(&error, ModelError::MissingFragment { kind: k, .. } if *k == kind),
        "unexpected error: {error}"
    );
}
