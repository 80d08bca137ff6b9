//! MTA descriptor (`mta.yaml`) reading.

use std::path::Path;

use serde::Deserialize;

use nexus_util::errors::UploadError;
use nexus_util::fs::is_regular_file;

/// The fields of `mta.yaml` that matter for publishing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MtaDescriptor {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    pub version: String,
}

/// Read the identifier and version from the descriptor at `path`.
pub fn read_descriptor(path: &Path) -> Result<MtaDescriptor, UploadError> {
    if !is_regular_file(path) {
        return Err(UploadError::DescriptorNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_descriptor(&content).map_err(|message| UploadError::DescriptorParse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_descriptor(content: &str) -> Result<MtaDescriptor, String> {
    serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
}
