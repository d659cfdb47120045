//! Structural equality between test-case nodes.

use cuke_modeler::{Background, Outline, Scenario, Step};

#[test]
fn step_equality_ignores_keywords_but_not_text() {
    let given = Step::from_source("Given the same action").expect("should parse");
    let when = Step::from_source("When the same action").expect("should parse");
    let other = Step::from_source("Given a different action").expect("should parse");
    assert_eq!(*given.borrow(), *when.borrow());
    assert_ne!(*given.borrow(), *other.borrow());
}

#[test]
fn step_equality_considers_attached_tables() {
    let bare = Step::from_source("Given a step").expect("should parse");
    let with_table = Step::from_source("Given a step\n  | a |").expect("should parse");
    let same_table = Step::from_source("When a step\n  | a |").expect("should parse");
    let other_table = Step::from_source("Given a step\n  | b |").expect("should parse");
    assert_ne!(*bare.borrow(), *with_table.borrow());
    assert_eq!(*with_table.borrow(), *same_table.borrow());
    assert_ne!(*with_table.borrow(), *other_table.borrow());
}

#[test]
fn step_equality_considers_doc_string_content_types() {
    let plain = Step::from_source("Given a step\n  \"\"\"\n  text\n  \"\"\"").expect("should parse");
    let same = Step::from_source("Then a step\n  \"\"\"\n  text\n  \"\"\"").expect("should parse");
    let typed =
        Step::from_source("Given a step\n  \"\"\" json\n  text\n  \"\"\"").expect("should parse");
    assert_eq!(*plain.borrow(), *same.borrow());
    assert_ne!(*plain.borrow(), *typed.borrow());
}

#[test]
fn test_cases_compare_across_kinds_by_their_steps() {
    let background = Background::from_source("Background:\n  * a step\n  * another step")
        .expect("should parse");
    let scenario = Scenario::from_source("Scenario: named differently\n  * a step\n  * another step")
        .expect("should parse");
    let outline = Outline::from_source(
        "Scenario Outline: with examples\n  * a step\n  * another step\n\nExamples:\n  | x |\n  | 1 |",
    )
    .expect("should parse");

    assert_eq!(*background.borrow(), *scenario.borrow());
    assert_eq!(*scenario.borrow(), *outline.borrow());
    assert_eq!(*background.borrow(), *outline.borrow());
}

#[test]
fn names_tags_and_descriptions_do_not_affect_equality() {
    let plain = Scenario::from_source("Scenario: one\n  Given a step").expect("should parse");
    let decorated = Scenario::from_source(
        "@wip\nScenario: two\n\n  A description.\n\n  Given a step",
    )
    .expect("should parse");
    assert_eq!(*plain.borrow(), *decorated.borrow());
}

#[test]
fn step_order_and_count_matter() {
    let forward = Scenario::from_source("Scenario:\n  * first\n  * second").expect("should parse");
    let reversed = Scenario::from_source("Scenario:\n  * second\n  * first").expect("should parse");
    let shorter = Scenario::from_source("Scenario:\n  * first").expect("should parse");
    assert_ne!(*forward.borrow(), *reversed.borrow());
    assert_ne!(*forward.borrow(), *shorter.borrow());
}
