use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all nexus-upload operations.
#[derive(Debug, Error, Diagnostic)]
pub enum UploadError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither an `mta.yaml` nor a `pom.xml` was found in the project root.
    #[error("Unsupported project structure in {}", root.display())]
    #[diagnostic(help("Run from a directory containing mta.yaml or pom.xml"))]
    UnsupportedProjectStructure { root: PathBuf },

    /// MTA projects carry no group id of their own.
    #[error("The 'groupId' parameter needs to be provided for MTA projects")]
    #[diagnostic(help("Pass --group-id or set group-id in .nexus-upload.toml"))]
    MissingGroupId,

    /// A module descriptor (`pom.xml`, `mta.yaml`) is absent or is a directory.
    #[error("Descriptor not found: {}", path.display())]
    DescriptorNotFound { path: PathBuf },

    /// A descriptor exists but could not be parsed.
    #[error("Failed to parse {}: {message}", path.display())]
    DescriptorParse { path: PathBuf, message: String },

    /// The build tool ran but reported the expression as unresolvable.
    #[error("Expression '{expression}' in file '{}' could not be resolved", descriptor.display())]
    PropertyUnresolved {
        expression: String,
        descriptor: PathBuf,
    },

    /// The build tool could not be started or exited with a failure.
    #[error("Could not run Maven to evaluate '{expression}' in '{}': {message}", descriptor.display())]
    #[diagnostic(help("Check that Maven is installed and the POM builds"))]
    ToolExecutionFailed {
        expression: String,
        descriptor: PathBuf,
        message: String,
    },

    /// An additional classifier entry is missing its classifier or type.
    #[error("Invalid additional classifier description (classifier: '{classifier}', type: '{file_type}')")]
    InvalidClassifier {
        classifier: String,
        file_type: String,
    },

    /// The additional classifiers value is not a valid JSON array.
    #[error("Invalid additional classifiers: {message}")]
    #[diagnostic(help("Expected a JSON array of objects with 'classifier' and 'type' fields"))]
    ClassifierConfig { message: String },

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The repository client rejected a call (bad input or out-of-order use).
    #[error("Repository error: {message}")]
    Repository { message: String },

    /// Network request or upload failed.
    #[error("Network error: {message}")]
    Network { message: String },
}

impl UploadError {
    /// Whether this error means a module descriptor is missing.
    pub fn is_descriptor_not_found(&self) -> bool {
        matches!(self, UploadError::DescriptorNotFound { .. })
    }
}
