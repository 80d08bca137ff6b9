//! Values persisted by earlier pipeline steps.
//!
//! Each parameter is a plain file `<root>/<scope>/<key>`; earlier steps write
//! them, this tool only reads.

use std::path::{Path, PathBuf};

use nexus_util::fs::read_trimmed;

/// Scope holding step outputs such as `mtarFilePath`.
pub const PIPELINE_SCOPE: &str = ".pipeline/commonPipelineEnvironment";

/// Scope holding project configuration such as `artifactId`.
pub const CONFIGURATION_SCOPE: &str = ".pipeline/commonPipelineEnvironment/configuration";

/// Key-value lookup into the pipeline environment.
pub trait ConfigurationStore {
    /// The stored value, or an empty string if none was recorded.
    fn get_parameter(&self, scope: &str, key: &str) -> String;
}

/// File-backed [`ConfigurationStore`] rooted at the project directory.
#[derive(Debug, Clone)]
pub struct PipelineEnvironment {
    root: PathBuf,
}

impl PipelineEnvironment {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn parameter_path(&self, scope: &str, key: &str) -> PathBuf {
        self.root.join(Path::new(scope)).join(key)
    }
}

impl ConfigurationStore for PipelineEnvironment {
    fn get_parameter(&self, scope: &str, key: &str) -> String {
        let path = self.parameter_path(scope, key);
        match read_trimmed(&path) {
            Some(value) => value,
            None => {
                tracing::debug!("No pipeline parameter at {}", path.display());
                String::new()
            }
        }
    }
}
