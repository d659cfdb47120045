//! The node catalog and the plumbing shared by every node kind.
//!
//! Parents own their children through [`Shared`] handles; children point back
//! at their parents through non-owning [`ParentRef`] handles. The back-
//! references drive upward navigation ([`Nested::get_ancestor`]) without
//! creating ownership cycles. The tree is single-threaded by design.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::str::FromStr;

mod background;
mod directory;
mod doc_string;
mod example;
mod feature;
mod feature_file;
mod outline;
mod scenario;
mod step;
mod table;
mod tag;

pub use background::Background;
pub use directory::Directory;
pub use doc_string::DocString;
pub use example::Example;
pub use feature::{Feature, Test};
pub use feature_file::FeatureFile;
pub use outline::Outline;
pub use scenario::Scenario;
pub use step::{Step, StepBlock};
pub use table::{Cell, Row, Table};
pub use tag::Tag;

use crate::ModelError;

/// Owning handle to a tree node.
///
/// Nodes are freely mutable after construction; the interior mutability is
/// what lets a fully built tree be edited in place while parents and children
/// keep referring to one another.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a node value in an owning [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// A strong, typed handle to any node that can own children.
#[derive(Clone, Debug, derive_more::From)]
pub enum NodeRef {
    /// A modeled directory.
    Directory(Shared<Directory>),
    /// A modeled feature file.
    FeatureFile(Shared<FeatureFile>),
    /// A modeled feature.
    Feature(Shared<Feature>),
    /// A modeled background.
    Background(Shared<Background>),
    /// A modeled scenario.
    Scenario(Shared<Scenario>),
    /// A modeled scenario outline.
    Outline(Shared<Outline>),
    /// A modeled examples block.
    Example(Shared<Example>),
    /// A modeled step.
    Step(Shared<Step>),
    /// A modeled table.
    Table(Shared<Table>),
    /// A modeled table row.
    Row(Shared<Row>),
}

macro_rules! node_ref_accessors {
    ($(($variant:ident, $as_fn:ident, $ty:ty)),+ $(,)?) => {
        impl NodeRef {
            $(
                /// Returns the inner handle when this reference is of the
                /// matching kind.
                #[must_use]
                pub fn $as_fn(&self) -> Option<Shared<$ty>> {
                    match self {
                        Self::$variant(node) => Some(Rc::clone(node)),
                        _ => None,
                    }
                }
            )+
        }
    };
}

node_ref_accessors!(
    (Directory, as_directory, Directory),
    (FeatureFile, as_feature_file, FeatureFile),
    (Feature, as_feature, Feature),
    (Background, as_background, Background),
    (Scenario, as_scenario, Scenario),
    (Outline, as_outline, Outline),
    (Example, as_example, Example),
    (Step, as_step, Step),
    (Table, as_table, Table),
    (Row, as_row, Row),
);

impl NodeRef {
    /// Non-owning handle to this node, suitable for a child's back-reference.
    #[must_use]
    pub fn downgrade(&self) -> ParentRef {
        match self {
            Self::Directory(node) => ParentRef::Directory(Rc::downgrade(node)),
            Self::FeatureFile(node) => ParentRef::FeatureFile(Rc::downgrade(node)),
            Self::Feature(node) => ParentRef::Feature(Rc::downgrade(node)),
            Self::Background(node) => ParentRef::Background(Rc::downgrade(node)),
            Self::Scenario(node) => ParentRef::Scenario(Rc::downgrade(node)),
            Self::Outline(node) => ParentRef::Outline(Rc::downgrade(node)),
            Self::Example(node) => ParentRef::Example(Rc::downgrade(node)),
            Self::Step(node) => ParentRef::Step(Rc::downgrade(node)),
            Self::Table(node) => ParentRef::Table(Rc::downgrade(node)),
            Self::Row(node) => ParentRef::Row(Rc::downgrade(node)),
        }
    }

    /// This node's own parent, if one is wired and still alive.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef> {
        match self {
            Self::Directory(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::FeatureFile(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Feature(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Background(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Scenario(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Outline(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Example(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Step(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Table(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
            Self::Row(node) => node.borrow().parent.as_ref().and_then(ParentRef::upgrade),
        }
    }
}

/// A non-owning, typed handle to a node's structural parent.
///
/// The parent owns the child; the child never owns the parent. A dropped
/// parent simply makes the back-reference dangle, at which point upward
/// navigation stops.
#[derive(Clone, Debug)]
pub enum ParentRef {
    /// Parent is a directory.
    Directory(Weak<RefCell<Directory>>),
    /// Parent is a feature file.
    FeatureFile(Weak<RefCell<FeatureFile>>),
    /// Parent is a feature.
    Feature(Weak<RefCell<Feature>>),
    /// Parent is a background.
    Background(Weak<RefCell<Background>>),
    /// Parent is a scenario.
    Scenario(Weak<RefCell<Scenario>>),
    /// Parent is a scenario outline.
    Outline(Weak<RefCell<Outline>>),
    /// Parent is an examples block.
    Example(Weak<RefCell<Example>>),
    /// Parent is a step.
    Step(Weak<RefCell<Step>>),
    /// Parent is a table.
    Table(Weak<RefCell<Table>>),
    /// Parent is a table row.
    Row(Weak<RefCell<Row>>),
}

impl ParentRef {
    /// Recovers a strong handle to the parent, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<NodeRef> {
        match self {
            Self::Directory(weak) => weak.upgrade().map(NodeRef::Directory),
            Self::FeatureFile(weak) => weak.upgrade().map(NodeRef::FeatureFile),
            Self::Feature(weak) => weak.upgrade().map(NodeRef::Feature),
            Self::Background(weak) => weak.upgrade().map(NodeRef::Background),
            Self::Scenario(weak) => weak.upgrade().map(NodeRef::Scenario),
            Self::Outline(weak) => weak.upgrade().map(NodeRef::Outline),
            Self::Example(weak) => weak.upgrade().map(NodeRef::Example),
            Self::Step(weak) => weak.upgrade().map(NodeRef::Step),
            Self::Table(weak) => weak.upgrade().map(NodeRef::Table),
            Self::Row(weak) => weak.upgrade().map(NodeRef::Row),
        }
    }
}

/// The node kinds an ancestor query may name.
///
/// `Test` is the polymorphic query matching any test-case-like ancestor
/// (background, scenario, or outline).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AncestorKind {
    /// Nearest directory.
    Directory,
    /// Nearest feature file.
    FeatureFile,
    /// Nearest feature.
    Feature,
    /// Nearest background.
    Background,
    /// Nearest scenario.
    Scenario,
    /// Nearest scenario outline.
    Outline,
    /// Nearest examples block.
    Example,
    /// Nearest step.
    Step,
    /// Nearest table.
    Table,
    /// Nearest table row.
    Row,
    /// Nearest test case of any kind.
    Test,
}

impl AncestorKind {
    /// Whether `node` satisfies this ancestor query.
    #[must_use]
    pub fn matches(self, node: &NodeRef) -> bool {
        matches!(
            (self, node),
            (Self::Directory, NodeRef::Directory(_))
                | (Self::FeatureFile, NodeRef::FeatureFile(_))
                | (Self::Feature, NodeRef::Feature(_))
                | (Self::Background, NodeRef::Background(_))
                | (Self::Scenario, NodeRef::Scenario(_))
                | (Self::Outline, NodeRef::Outline(_))
                | (Self::Example, NodeRef::Example(_))
                | (Self::Step, NodeRef::Step(_))
                | (Self::Table, NodeRef::Table(_))
                | (Self::Row, NodeRef::Row(_))
                | (
                    Self::Test,
                    NodeRef::Background(_) | NodeRef::Scenario(_) | NodeRef::Outline(_)
                )
        )
    }
}

impl FromStr for AncestorKind {
    type Err = ModelError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "directory" => Ok(Self::Directory),
            "feature_file" => Ok(Self::FeatureFile),
            "feature" => Ok(Self::Feature),
            "background" => Ok(Self::Background),
            "scenario" => Ok(Self::Scenario),
            "outline" => Ok(Self::Outline),
            "example" => Ok(Self::Example),
            "step" => Ok(Self::Step),
            "table" => Ok(Self::Table),
            "row" => Ok(Self::Row),
            "test" => Ok(Self::Test),
            _ => Err(ModelError::InvalidAncestorKind {
                kind: name.to_owned(),
            }),
        }
    }
}

/// Upward navigation through parent back-references.
pub trait Nested {
    /// The wired parent back-reference, if any.
    fn parent_ref(&self) -> Option<&ParentRef>;

    /// The structural parent, if one is wired and still alive.
    fn parent(&self) -> Option<NodeRef> {
        self.parent_ref().and_then(ParentRef::upgrade)
    }

    /// Walks the parent chain upward and returns the nearest ancestor
    /// matching `kind`, or `None` when the chain is exhausted.
    fn get_ancestor(&self, kind: AncestorKind) -> Option<NodeRef> {
        let mut current = self.parent();
        while let Some(node) = current {
            if kind.matches(&node) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// As [`Nested::get_ancestor`], with the kind given by name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidAncestorKind`] when `kind` does not name
    /// a node kind; an exhausted parent chain is `Ok(None)`.
    fn get_ancestor_named(&self, kind: &str) -> Result<Option<NodeRef>, ModelError> {
        Ok(self.get_ancestor(kind.parse()?))
    }
}

macro_rules! impl_nested {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Nested for $ty {
                fn parent_ref(&self) -> Option<&ParentRef> {
                    self.parent.as_ref()
                }
            }
        )+
    };
}

impl_nested!(
    Directory,
    FeatureFile,
    Feature,
    Background,
    Scenario,
    Outline,
    Example,
    Step,
    Table,
    Row,
    Cell,
    DocString,
    Tag,
);

/// Element-wise step-sequence equality, the shared core of test-case
/// comparison.
pub(crate) fn steps_eq(left: &[Shared<Step>], right: &[Shared<Step>]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| *a.borrow() == *b.borrow())
}
