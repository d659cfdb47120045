//! Object models for Gherkin feature files.
//!
//! `cuke-modeler` hands source text to the `gherkin` crate and exposes the
//! result as a navigable, mutable tree of typed nodes. The tree can be walked
//! upward through parent back-references, compared structurally, mutated in
//! place, and serialized back into Gherkin text that re-parses to the same
//! tree.
//!
//! Models can also be built without any source text at all and still
//! serialize cleanly; missing optional pieces simply produce no output.
//!
//! # Examples
//!
//! ```
//! use cuke_modeler::{AncestorKind, Feature, Nested, Test};
//!
//! let feature = Feature::from_source(
//!     "Feature: example\n\n  Scenario:\n    Given a step",
//! )?;
//!
//! assert_eq!(feature.borrow().name, "example");
//!
//! let Test::Scenario(scenario) = feature.borrow().tests[0].clone() else {
//!     panic!("expected a scenario");
//! };
//! let step = scenario.borrow().steps[0].clone();
//! assert!(step.borrow().get_ancestor(AncestorKind::Feature).is_some());
//! # Ok::<(), cuke_modeler::ModelError>(())
//! ```

mod dialect;
mod error;
mod model;
mod parsing;
mod populate;
mod render;
mod scaffold;

pub use dialect::{Dialect, dialect, set_dialect};
pub use error::ModelError;
pub use model::{
    AncestorKind, Background, Cell, Directory, DocString, Example, Feature, FeatureFile, Nested,
    NodeRef, Outline, ParentRef, Row, Scenario, Shared, Step, StepBlock, Table, Tag, Test, shared,
};
pub use scaffold::FragmentKind;
