use std::path::PathBuf;

use nexus_util::errors::UploadError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = UploadError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_unsupported_structure_display() {
    let err = UploadError::UnsupportedProjectStructure {
        root: PathBuf::from("/work/project"),
    };
    assert_eq!(
        err.to_string(),
        "Unsupported project structure in /work/project"
    );
}

#[test]
fn test_property_unresolved_names_expression_and_file() {
    let err = UploadError::PropertyUnresolved {
        expression: "project.build.finalName".to_string(),
        descriptor: PathBuf::from("pom.xml"),
    };
    assert_eq!(
        err.to_string(),
        "Expression 'project.build.finalName' in file 'pom.xml' could not be resolved"
    );
}

#[test]
fn test_tool_execution_failed_is_distinct_from_unresolved() {
    let err = UploadError::ToolExecutionFailed {
        expression: "project.groupId".to_string(),
        descriptor: PathBuf::from("pom.xml"),
        message: "exit status: 1".to_string(),
    };
    assert!(!matches!(err, UploadError::PropertyUnresolved { .. }));
    assert!(err.to_string().contains("exit status: 1"));
}

#[test]
fn test_invalid_classifier_display() {
    let err = UploadError::InvalidClassifier {
        classifier: "sources".to_string(),
        file_type: String::new(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid additional classifier description (classifier: 'sources', type: '')"
    );
}

#[test]
fn test_descriptor_not_found_predicate() {
    let err = UploadError::DescriptorNotFound {
        path: PathBuf::from("application/pom.xml"),
    };
    assert!(err.is_descriptor_not_found());
    assert!(!UploadError::MissingGroupId.is_descriptor_not_found());
}

#[test]
fn test_network_error_display() {
    let err = UploadError::Network {
        message: "timeout".to_string(),
    };
    assert_eq!(err.to_string(), "Network error: timeout");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: UploadError = io_err.into();
    assert!(matches!(err, UploadError::Io(_)));
}
