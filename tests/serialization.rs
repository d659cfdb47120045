//! Round-trip serialization behaviour.

use cuke_modeler::{Cell, Feature, FeatureFile, Row, Table};

const EVERYTHING: &str = r#"@tag1 @tag2
Feature: A feature with everything

Some feature description.

Some more.

  Background: Setup

  Background info.

    Given a prerequisite
      | col1 | col2 |
      | one | two |

  @wip @slow
  Scenario: A scenario
    Given a step
    When another step
      """ text/plain
      Some doc string.
      """

  Scenario Outline: An outline
    Given a <thing>

  @examples_tag
  Examples: Things
    | thing |
    | cuke |"#;

#[test]
fn canonical_source_survives_a_round_trip_unchanged() {
    let feature = Feature::from_source(EVERYTHING).expect("fixture should parse");
    assert_eq!(feature.borrow().to_string(), EVERYTHING);
}

#[test]
fn serialization_is_a_fixed_point_after_one_pass() {
    let messy = "@a\n@b\nFeature: messy\n  Scenario: s\n    Given a step\n      | x  |  y |\n";
    let first = Feature::from_source(messy)
        .expect("messy input should parse")
        .borrow()
        .to_string();
    assert_eq!(
        first,
        "@a @b\nFeature: messy\n\n  Scenario: s\n    Given a step\n      | x | y |"
    );
    let second = Feature::from_source(&first)
        .expect("normalized output should re-parse")
        .borrow()
        .to_string();
    assert_eq!(second, first);
}

#[test]
fn minimal_features_normalize_into_indented_blocks() {
    let feature = Feature::from_source("Feature:\nScenario:\n* a step").expect("should parse");
    assert_eq!(
        feature.borrow().to_string(),
        "Feature:\n\n  Scenario:\n    * a step"
    );
}

#[test]
fn cell_escapes_survive_a_round_trip() {
    let source = r"| a\\b | c\|d |";
    let row = Row::from_source(source).expect("escaped row should parse");
    assert_eq!(row.borrow().cells[0].borrow().value, r"a\b");
    assert_eq!(row.borrow().cells[1].borrow().value, "c|d");
    assert_eq!(row.borrow().to_string(), source);
}

#[test]
fn lone_cells_round_trip_their_escapes() {
    let cell = Cell::from_source(r"a\\\|b").expect("escaped cell should parse");
    assert_eq!(cell.borrow().value, r"a\|b");
    assert_eq!(cell.borrow().to_string(), r"a\\\|b");
}

#[test]
fn abstract_features_serialize_without_source_data() {
    assert_eq!(Feature::default().to_string(), ":");
    let named = Feature {
        name: "just a name".to_owned(),
        ..Feature::default()
    };
    assert_eq!(named.to_string(), ": just a name");
}

#[test]
fn abstract_tables_serialize_their_rows_only() {
    assert_eq!(Table::default().to_string(), "");
}

#[test]
fn files_and_directories_display_as_their_paths() {
    let file = FeatureFile::from_source("specs/everything.feature", EVERYTHING)
        .expect("fixture should parse");
    assert_eq!(file.borrow().to_string(), "specs/everything.feature");
    assert_eq!(file.borrow().name(), "everything.feature");
    let feature = file.borrow().feature.clone().expect("file holds a feature");
    assert_eq!(feature.borrow().to_string(), EVERYTHING);
}
