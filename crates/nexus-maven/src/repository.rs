//! Nexus repository URL layout.

use nexus_core::config::NexusVersion;

/// A Nexus-hosted Maven repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexusRepository {
    pub url: String,
    pub version: NexusVersion,
    pub name: String,
}

impl NexusRepository {
    pub fn new(url: &str, version: NexusVersion, name: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            version,
            name: name.to_string(),
        }
    }

    /// Root of the repository's content, ending in `/`.
    ///
    /// Nexus 2 serves hosted repositories under `/content/repositories/`,
    /// Nexus 3 under `/repository/`.
    pub fn content_url(&self) -> String {
        match self.version {
            NexusVersion::Nexus2 => format!("{}/content/repositories/{}/", self.url, self.name),
            NexusVersion::Nexus3 => format!("{}/repository/{}/", self.url, self.name),
        }
    }

    /// Base URL for every artifact of `group`, ending in `/`.
    ///
    /// `com.acme.tools` becomes `<content>/com/acme/tools/`.
    pub fn group_url(&self, group: &str) -> String {
        format!("{}{}/", self.content_url(), group.replace('.', "/"))
    }

    /// Maven layout path of a coordinate: `com.acme:core:2.0.0` is `com/acme/core/2.0.0`.
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Full URL to a specific file within the repository.
    pub fn file_url(&self, group: &str, artifact: &str, version: &str, filename: &str) -> String {
        format!(
            "{}{}/{}",
            self.content_url(),
            Self::coordinate_path(group, artifact, version),
            filename
        )
    }
}
