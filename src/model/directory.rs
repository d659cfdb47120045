//! Directories: containers for feature files and nested directories.

use std::fmt;
use std::rc::Rc;

use camino::Utf8PathBuf;

use crate::model::{FeatureFile, ParentRef, Shared};

/// Models a directory holding feature files and other directories.
///
/// The library never walks the filesystem; directory trees are assembled by
/// the caller, with [`Directory::push_feature_file`] and
/// [`Directory::push_directory`] wiring the parent back-references.
#[derive(Debug, Default)]
pub struct Directory {
    /// The directory's path.
    pub path: Utf8PathBuf,
    /// The feature files directly inside this directory.
    pub feature_files: Vec<Shared<FeatureFile>>,
    /// The directories directly inside this directory.
    pub directories: Vec<Shared<Directory>>,
    /// The raw adapter output this node was populated from.
    pub parsing_data: Option<serde_json::Value>,
    /// Back-reference to the owning directory.
    pub parent: Option<ParentRef>,
}

impl Directory {
    /// Adds `file` to `directory`, wiring the file's parent back-reference.
    pub fn push_feature_file(directory: &Shared<Self>, file: Shared<FeatureFile>) {
        file.borrow_mut().parent = Some(ParentRef::Directory(Rc::downgrade(directory)));
        directory.borrow_mut().feature_files.push(file);
    }

    /// Adds `child` to `directory`, wiring the child's parent back-reference.
    pub fn push_directory(directory: &Shared<Self>, child: Shared<Self>) {
        child.borrow_mut().parent = Some(ParentRef::Directory(Rc::downgrade(directory)));
        directory.borrow_mut().directories.push(child);
    }

    /// The directory's name: the final component of its path.
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(String::new, str::to_owned)
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path.as_str())
    }
}
