//! Batch upload protocol and its Nexus implementation.
//!
//! A batch is opened with [`RepositoryClient::set_base_url`], given a version,
//! filled with artifacts and finally uploaded. Every artifact in one batch
//! shares the batch's group id and version.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use nexus_core::artifact::ArtifactDescription;
use nexus_core::config::NexusVersion;
use nexus_util::errors::UploadError;
use nexus_util::progress;

use crate::auth::{self, Credentials};
use crate::repository::NexusRepository;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// The stateful upload protocol driven by the orchestrator.
pub trait RepositoryClient {
    /// Open a new batch for `group_id`; pending artifacts of a previous batch are dropped.
    fn set_base_url(
        &mut self,
        url: &str,
        nexus_version: NexusVersion,
        repository: &str,
        group_id: &str,
    ) -> Result<(), UploadError>;

    fn set_artifacts_version(&mut self, version: &str) -> Result<(), UploadError>;

    fn add_artifact(&mut self, artifact: ArtifactDescription) -> Result<(), UploadError>;

    /// Upload every pending artifact, then empty the batch.
    fn upload_artifacts(&mut self) -> Result<(), UploadError>;
}

/// Artifacts waiting to be uploaded under one group id and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    pub repository: NexusRepository,
    pub group_id: String,
    pub version: String,
    pub artifacts: Vec<ArtifactDescription>,
}

impl UploadBatch {
    pub fn open(
        url: &str,
        nexus_version: NexusVersion,
        repository: &str,
        group_id: &str,
    ) -> Result<Self, UploadError> {
        if url.trim().is_empty() {
            return Err(repository_error("url must not be empty"));
        }
        if repository.trim().is_empty() {
            return Err(repository_error("repository must not be empty"));
        }
        if group_id.trim().is_empty() {
            return Err(repository_error("groupId must not be empty"));
        }
        Ok(Self {
            repository: NexusRepository::new(url, nexus_version, repository),
            group_id: group_id.to_string(),
            version: String::new(),
            artifacts: Vec::new(),
        })
    }

    pub fn set_version(&mut self, version: &str) -> Result<(), UploadError> {
        if version.trim().is_empty() {
            return Err(repository_error("version must not be empty"));
        }
        self.version = version.to_string();
        Ok(())
    }

    pub fn add(&mut self, artifact: ArtifactDescription) -> Result<(), UploadError> {
        if artifact.file.as_os_str().is_empty()
            || artifact.type_.is_empty()
            || artifact.artifact_id.is_empty()
        {
            return Err(repository_error(&format!(
                "artifact description needs file, type and artifact id (file: '{}', type: '{}', id: '{}')",
                artifact.file.display(),
                artifact.type_,
                artifact.artifact_id
            )));
        }
        if self.artifacts.contains(&artifact) {
            return Err(repository_error(&format!(
                "artifact {} already added",
                artifact.file.display()
            )));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Target URL for one artifact of this batch.
    pub fn artifact_url(&self, artifact: &ArtifactDescription) -> String {
        self.repository.file_url(
            &self.group_id,
            &artifact.artifact_id,
            &self.version,
            &artifact.remote_file_name(&self.version),
        )
    }

    fn ensure_ready(&self) -> Result<(), UploadError> {
        if self.version.is_empty() {
            return Err(repository_error(
                "the batch needs a version, call set_artifacts_version() first",
            ));
        }
        if self.artifacts.is_empty() {
            return Err(repository_error(
                "no artifacts to upload, call add_artifact() first",
            ));
        }
        Ok(())
    }
}

fn repository_error(message: &str) -> UploadError {
    UploadError::Repository {
        message: message.to_string(),
    }
}

/// The single open batch of a client.
#[derive(Debug, Default)]
struct BatchSlot {
    current: Option<UploadBatch>,
}

impl BatchSlot {
    fn open(
        &mut self,
        url: &str,
        nexus_version: NexusVersion,
        repository: &str,
        group_id: &str,
    ) -> Result<(), UploadError> {
        self.current = Some(UploadBatch::open(url, nexus_version, repository, group_id)?);
        Ok(())
    }

    fn get_mut(&mut self) -> Result<&mut UploadBatch, UploadError> {
        self.current
            .as_mut()
            .ok_or_else(|| repository_error("no batch open, call set_base_url() first"))
    }

    fn ready(&self) -> Result<&UploadBatch, UploadError> {
        let batch = self
            .current
            .as_ref()
            .ok_or_else(|| repository_error("no batch open, call set_base_url() first"))?;
        batch.ensure_ready()?;
        Ok(batch)
    }
}

/// Uploads batches to a Nexus repository with HTTP `PUT`.
pub struct NexusUpload {
    client: Client,
    credentials: Credentials,
    slot: BatchSlot,
}

impl NexusUpload {
    pub fn new(credentials: Credentials) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("nexus-upload/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UploadError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        if !credentials.is_set() {
            tracing::debug!("No repository credentials configured, uploading anonymously");
        }
        Ok(Self {
            client,
            credentials,
            slot: BatchSlot::default(),
        })
    }

    fn put_file(&self, file: &Path, url: &str) -> Result<(), UploadError> {
        let body = File::open(file).map_err(|e| UploadError::Repository {
            message: format!("Cannot read artifact {}: {e}", file.display()),
        })?;
        let label = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());

        let pb = progress::spinner(&format!("Uploading {label}"));
        let request = auth::apply_auth(self.client.put(url).body(body), &self.credentials);
        let result = request.send();
        pb.finish_and_clear();

        let resp = result.map_err(|e| UploadError::Network {
            message: format!("Upload of {} to {url} failed: {e}", file.display()),
        })?;
        if !resp.status().is_success() {
            return Err(UploadError::Network {
                message: format!("HTTP {} uploading {} to {url}", resp.status(), file.display()),
            });
        }

        tracing::info!("Uploaded {} to {url}", file.display());
        progress::status("Uploaded", url);
        Ok(())
    }
}

impl RepositoryClient for NexusUpload {
    fn set_base_url(
        &mut self,
        url: &str,
        nexus_version: NexusVersion,
        repository: &str,
        group_id: &str,
    ) -> Result<(), UploadError> {
        self.slot.open(url, nexus_version, repository, group_id)
    }

    fn set_artifacts_version(&mut self, version: &str) -> Result<(), UploadError> {
        self.slot.get_mut()?.set_version(version)
    }

    fn add_artifact(&mut self, artifact: ArtifactDescription) -> Result<(), UploadError> {
        self.slot.get_mut()?.add(artifact)
    }

    fn upload_artifacts(&mut self) -> Result<(), UploadError> {
        let batch = self.slot.ready()?;
        for artifact in &batch.artifacts {
            let url = batch.artifact_url(artifact);
            self.put_file(&artifact.file, &url)?;
        }
        self.slot.get_mut()?.artifacts.clear();
        Ok(())
    }
}

/// Keeps uploaded batches in memory instead of sending them; backs `--dry-run`.
#[derive(Debug, Default)]
pub struct RecordingClient {
    slot: BatchSlot,
    uploaded: Vec<UploadBatch>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch passed to `upload_artifacts`, in order.
    pub fn uploaded(&self) -> &[UploadBatch] {
        &self.uploaded
    }
}

impl RepositoryClient for RecordingClient {
    fn set_base_url(
        &mut self,
        url: &str,
        nexus_version: NexusVersion,
        repository: &str,
        group_id: &str,
    ) -> Result<(), UploadError> {
        self.slot.open(url, nexus_version, repository, group_id)
    }

    fn set_artifacts_version(&mut self, version: &str) -> Result<(), UploadError> {
        self.slot.get_mut()?.set_version(version)
    }

    fn add_artifact(&mut self, artifact: ArtifactDescription) -> Result<(), UploadError> {
        self.slot.get_mut()?.add(artifact)
    }

    fn upload_artifacts(&mut self) -> Result<(), UploadError> {
        let batch = self.slot.ready()?.clone();
        self.uploaded.push(batch);
        self.slot.get_mut()?.artifacts.clear();
        Ok(())
    }
}
