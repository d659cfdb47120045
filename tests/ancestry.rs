//! Upward navigation through parent back-references.

use std::rc::Rc;

use camino::Utf8PathBuf;
use cuke_modeler::{
    AncestorKind, Directory, FeatureFile, ModelError, Nested, Shared, Step, Test, shared,
};

const SOURCE: &str = "Feature: navigable

  Background:
    Given shared setup

  Scenario: one
    Given a step
      | a | b |
";

fn modeled_tree() -> (Shared<Directory>, Shared<FeatureFile>) {
    let directory = shared(Directory {
        path: Utf8PathBuf::from("specs"),
        ..Directory::default()
    });
    let file = FeatureFile::from_source("specs/navigable.feature", SOURCE)
        .expect("fixture should parse");
    Directory::push_feature_file(&directory, Rc::clone(&file));
    (directory, file)
}

fn scenario_step(file: &Shared<FeatureFile>) -> Shared<Step> {
    let feature = file.borrow().feature.clone().expect("file holds a feature");
    let Test::Scenario(scenario) = feature.borrow().tests[0].clone() else {
        panic!("expected a scenario");
    };
    let step = scenario.borrow().steps[0].clone();
    step
}

#[test]
fn steps_reach_every_level_above_them() {
    let (_directory, file) = modeled_tree();
    let step = scenario_step(&file);

    let feature = step.borrow().get_ancestor(AncestorKind::Feature);
    assert!(feature.is_some_and(|node| node.as_feature().is_some()));

    let ancestor_file = step.borrow().get_ancestor(AncestorKind::FeatureFile);
    assert!(
        ancestor_file
            .and_then(|node| node.as_feature_file())
            .is_some_and(|found| Rc::ptr_eq(&found, &file))
    );

    let directory = step.borrow().get_ancestor(AncestorKind::Directory);
    assert!(directory.is_some_and(|node| node.as_directory().is_some()));
}

#[test]
fn the_test_kind_matches_the_nearest_test_case() {
    let (_directory, file) = modeled_tree();
    let feature = file.borrow().feature.clone().expect("file holds a feature");
    let background = feature.borrow().background.clone().expect("background");
    let background_step = background.borrow().steps[0].clone();

    let ancestor = background_step.borrow().get_ancestor(AncestorKind::Test);
    assert!(ancestor.is_some_and(|node| node.as_background().is_some()));

    let scenario_step = scenario_step(&file);
    let ancestor = scenario_step.borrow().get_ancestor(AncestorKind::Test);
    assert!(ancestor.is_some_and(|node| node.as_scenario().is_some()));
}

#[test]
fn table_cells_climb_through_their_rows() {
    let (_directory, file) = modeled_tree();
    let step = scenario_step(&file);
    let Some(cuke_modeler::StepBlock::Table(table)) = step.borrow().block.clone() else {
        panic!("expected a table block");
    };
    let cell = table.borrow().rows[0].borrow().cells[0].clone();

    let row = cell.borrow().get_ancestor(AncestorKind::Row);
    assert!(row.is_some_and(|node| node.as_row().is_some()));
    let ancestor_step = cell.borrow().get_ancestor(AncestorKind::Step);
    assert!(
        ancestor_step
            .and_then(|node| node.as_step())
            .is_some_and(|found| Rc::ptr_eq(&found, &step))
    );
}

#[test]
fn missing_ancestors_are_not_found_rather_than_errors() {
    let (_directory, file) = modeled_tree();
    let step = scenario_step(&file);
    assert!(step.borrow().get_ancestor(AncestorKind::Example).is_none());

    // An unparented node has nothing above it at all.
    let orphan = Step::default();
    assert!(orphan.get_ancestor(AncestorKind::Feature).is_none());
}

#[test]
fn named_lookups_reject_unknown_kinds() {
    let (_directory, file) = modeled_tree();
    let step = scenario_step(&file);

    let found = step
        .borrow()
        .get_ancestor_named("feature")
        .expect("known kind");
    assert!(found.is_some());

    let error = step
        .borrow()
        .get_ancestor_named("bogus_kind")
        .err()
        .expect("unknown kind should fail");
    assert!(matches!(
        error,
        ModelError::InvalidAncestorKind { kind } if kind == "bogus_kind"
    ));
}
