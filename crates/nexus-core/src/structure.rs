//! Project layout detection.

use std::fmt;
use std::path::Path;

use nexus_util::errors::UploadError;
use nexus_util::fs::is_regular_file;

use crate::module::{MTA_FILE, POM_FILE};

/// The two supported project shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLayout {
    /// Multi-target application described by `mta.yaml`.
    Mta,
    /// Maven project with a root `pom.xml` and an optional `application/` module.
    Maven,
}

impl fmt::Display for ProjectLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectLayout::Mta => write!(f, "MTA"),
            ProjectLayout::Maven => write!(f, "Maven"),
        }
    }
}

/// Classify the project rooted at `root`. `mta.yaml` takes precedence over `pom.xml`.
pub fn detect(root: &Path) -> Result<ProjectLayout, UploadError> {
    if is_regular_file(&root.join(MTA_FILE)) {
        Ok(ProjectLayout::Mta)
    } else if is_regular_file(&root.join(POM_FILE)) {
        Ok(ProjectLayout::Maven)
    } else {
        Err(UploadError::UnsupportedProjectStructure {
            root: root.to_path_buf(),
        })
    }
}
