//! A unit of publication: one descriptor, one output folder, one set of coordinates.

use std::path::PathBuf;

/// File name of the Maven module descriptor.
pub const POM_FILE: &str = "pom.xml";

/// File name of the MTA descriptor.
pub const MTA_FILE: &str = "mta.yaml";

/// Folder holding Maven build outputs, relative to the module.
pub const TARGET_DIR: &str = "target";

/// The fixed optional submodule uploaded after the root module.
pub const APPLICATION_MODULE: &str = "application";

/// Packaging value of a descriptor-only Maven module.
pub const POM_PACKAGING: &str = "pom";

/// Packaging assumed when the build tool reports none.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Where a module's primary build output comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutput {
    /// Packaging and final name are looked up from the descriptor.
    Evaluated,
    /// An already-known file, e.g. an `.mtar` archive.
    File { path: PathBuf, packaging: String },
}

/// A resolved module, ready to be turned into an artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub descriptor_path: PathBuf,
    /// Artifact type of the descriptor itself (`pom`, `yaml`).
    pub descriptor_type: String,
    pub output_folder: PathBuf,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub output: BuildOutput,
}

impl Module {
    /// `<artifactId>-<version>`, the name Maven gives outputs by default.
    pub fn default_final_name(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }
}
