//! Feature files: a parsed source file and its feature.

use std::fmt;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::model::{Feature, ParentRef, Shared, shared};
use crate::{ModelError, parsing, populate};

/// Models a single `.feature` source file.
#[derive(Debug, Default)]
pub struct FeatureFile {
    /// The file's path.
    pub path: Utf8PathBuf,
    /// The feature the file holds, if any was parsed or assigned.
    pub feature: Option<Shared<Feature>>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning directory.
    pub parent: Option<ParentRef>,
}

impl FeatureFile {
    /// Parses `text` as the content of the feature file at `path`, wiring the
    /// resulting feature's parent back to the file.
    ///
    /// Unlike the fragment constructors, parse failures are labelled with the
    /// real path rather than a sentinel filename.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] when `text` is not a valid feature
    /// document.
    pub fn from_source(
        path: impl Into<Utf8PathBuf>,
        text: &str,
    ) -> Result<Shared<Self>, ModelError> {
        let path = path.into();
        let parsed = parsing::parse_text(text, path.as_str())?;
        let file = shared(Self {
            path,
            ..Self::default()
        });
        let parent = ParentRef::FeatureFile(Rc::downgrade(&file));
        let feature = populate::feature(&parsed.ast, &parsed.text, Some(parent));
        file.borrow_mut().parsing_data = feature.borrow().parsing_data.clone();
        file.borrow_mut().feature = Some(feature);
        Ok(file)
    }

    /// The file's name: the final component of its path.
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(String::new, str::to_owned)
    }

    /// The directory portion of the file's path.
    #[must_use]
    pub fn directory_path(&self) -> Option<&Utf8Path> {
        self.path.parent()
    }
}

impl fmt::Display for FeatureFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_the_final_path_component() {
        let file = FeatureFile {
            path: Utf8PathBuf::from("specs/billing/refunds.feature"),
            ..FeatureFile::default()
        };
        assert_eq!(file.name(), "refunds.feature");
        assert_eq!(file.to_string(), "specs/billing/refunds.feature");
    }
}
