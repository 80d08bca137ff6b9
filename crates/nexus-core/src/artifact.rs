use std::path::PathBuf;

use serde::Deserialize;

use nexus_util::errors::UploadError;

/// One file to be uploaded as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescription {
    pub file: PathBuf,
    /// File extension / packaging kind, e.g. `jar`, `pom`, `mtar`.
    pub type_: String,
    /// Empty means no classifier.
    pub classifier: String,
    pub artifact_id: String,
}

impl ArtifactDescription {
    pub fn new(
        file: impl Into<PathBuf>,
        type_: impl Into<String>,
        classifier: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            type_: type_.into(),
            classifier: classifier.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Repository file name for this artifact at the given version:
    /// `<artifactId>-<version>[-<classifier>].<type>`.
    pub fn remote_file_name(&self, version: &str) -> String {
        if self.classifier.is_empty() {
            format!("{}-{version}.{}", self.artifact_id, self.type_)
        } else {
            format!(
                "{}-{version}-{}.{}",
                self.artifact_id, self.classifier, self.type_
            )
        }
    }
}

/// An additional classified artifact produced next to the primary output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifierDescription {
    #[serde(default)]
    pub classifier: String,
    #[serde(default, rename = "type")]
    pub file_type: String,
}

impl ClassifierDescription {
    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.classifier.is_empty() || self.file_type.is_empty() {
            return Err(UploadError::InvalidClassifier {
                classifier: self.classifier.clone(),
                file_type: self.file_type.clone(),
            });
        }
        Ok(())
    }
}

/// Parse the JSON classifier list, e.g. `[{"classifier":"sources","type":"jar"}]`.
///
/// A blank string is an empty list. Entries are not validated here.
pub fn parse_classifiers(json: &str) -> Result<Vec<ClassifierDescription>, UploadError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|e| UploadError::ClassifierConfig {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_file_name_without_classifier() {
        let a = ArtifactDescription::new("target/core-2.0.0.jar", "jar", "", "core");
        assert_eq!(a.remote_file_name("2.0.0"), "core-2.0.0.jar");
    }

    #[test]
    fn remote_file_name_with_classifier() {
        let a = ArtifactDescription::new("target/core-sources.jar", "jar", "sources", "core");
        assert_eq!(a.remote_file_name("2.0.0"), "core-2.0.0-sources.jar");
    }

    #[test]
    fn parse_classifiers_blank_is_empty() {
        assert!(parse_classifiers("  ").unwrap().is_empty());
    }

    #[test]
    fn parse_classifiers_reads_type_field() {
        let list = parse_classifiers(r#"[{"classifier":"sources","type":"jar"}]"#).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].classifier, "sources");
        assert_eq!(list[0].file_type, "jar");
    }

    #[test]
    fn parse_classifiers_missing_field_defaults_empty() {
        let list = parse_classifiers(r#"[{"classifier":"javadoc"}]"#).unwrap();
        assert!(list[0].file_type.is_empty());
        assert!(list[0].validate().is_err());
    }

    #[test]
    fn parse_classifiers_malformed_json() {
        let err = parse_classifiers("{not json").unwrap_err();
        assert!(matches!(err, UploadError::ClassifierConfig { .. }));
    }
}
