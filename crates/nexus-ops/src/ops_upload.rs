//! Operation: publish a project's build outputs to a Nexus repository.
//!
//! MTA projects upload `mta.yaml` and the built `.mtar` as one batch. Maven
//! projects upload the root module and then, if present, the `application/`
//! module, each as its own batch. A failing step stops its module before
//! anything is uploaded.

use std::path::{Path, PathBuf};

use nexus_core::artifact::{parse_classifiers, ArtifactDescription, ClassifierDescription};
use nexus_core::config::UploadConfig;
use nexus_core::descriptor::read_descriptor;
use nexus_core::module::{
    BuildOutput, Module, APPLICATION_MODULE, MTA_FILE, POM_FILE, TARGET_DIR,
};
use nexus_core::pipeline_env::{
    ConfigurationStore, PipelineEnvironment, CONFIGURATION_SCOPE, PIPELINE_SCOPE,
};
use nexus_core::structure::{self, ProjectLayout};
use nexus_maven::artifacts::ArtifactSetBuilder;
use nexus_maven::auth::Credentials;
use nexus_maven::client::{NexusUpload, RecordingClient, RepositoryClient};
use nexus_maven::evaluate::{MavenEvaluator, PropertyEvaluator, ARTIFACT_ID, GROUP_ID, VERSION};
use nexus_maven::repository::NexusRepository;
use nexus_util::errors::UploadError;
use nexus_util::fs::is_regular_file;
use nexus_util::progress;

/// Artifact type of `mta.yaml`.
const MTA_DESCRIPTOR_TYPE: &str = "yaml";
/// Artifact type of `pom.xml`.
const POM_DESCRIPTOR_TYPE: &str = "pom";
const MTAR_PACKAGING: &str = "mtar";

/// The collaborators one upload run talks to.
pub struct UploadContext<'a> {
    pub evaluator: &'a dyn PropertyEvaluator,
    pub store: &'a dyn ConfigurationStore,
    pub client: &'a mut dyn RepositoryClient,
}

/// One artifact and where it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifact {
    pub artifact: ArtifactDescription,
    pub url: String,
}

/// One uploaded batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedModule {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub artifacts: Vec<PublishedArtifact>,
}

/// Result of an upload run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub layout: ProjectLayout,
    pub modules: Vec<UploadedModule>,
}

/// Upload with the real collaborators: Maven for property lookups, the
/// project's pipeline environment, and either Nexus or (for `dry_run`) an
/// in-memory recorder.
pub fn run(project_dir: &Path, config: &UploadConfig, dry_run: bool) -> Result<UploadReport, UploadError> {
    let evaluator = MavenEvaluator::new(config.maven.clone());
    let store = PipelineEnvironment::new(project_dir);

    if dry_run {
        let mut client = RecordingClient::new();
        let mut ctx = UploadContext {
            evaluator: &evaluator,
            store: &store,
            client: &mut client,
        };
        return upload(project_dir, config, &mut ctx);
    }

    let mut client = NexusUpload::new(Credentials::new(
        config.username.clone(),
        config.password.clone(),
    ))?;
    let mut ctx = UploadContext {
        evaluator: &evaluator,
        store: &store,
        client: &mut client,
    };
    upload(project_dir, config, &mut ctx)
}

/// Detect the project layout and upload every module it defines.
pub fn upload(
    project_dir: &Path,
    config: &UploadConfig,
    ctx: &mut UploadContext<'_>,
) -> Result<UploadReport, UploadError> {
    let layout = structure::detect(project_dir)?;
    tracing::info!("{layout} project structure detected");
    progress::status_info("Detected", &format!("{layout} project structure"));

    let modules = match layout {
        ProjectLayout::Mta => vec![upload_mta(project_dir, config, ctx)?],
        ProjectLayout::Maven => upload_maven(project_dir, config, ctx)?,
    };
    Ok(UploadReport { layout, modules })
}

fn upload_mta(
    project_dir: &Path,
    config: &UploadConfig,
    ctx: &mut UploadContext<'_>,
) -> Result<UploadedModule, UploadError> {
    if config.group_id.is_empty() {
        return Err(UploadError::MissingGroupId);
    }
    let descriptor_path = project_dir.join(MTA_FILE);
    let descriptor = read_descriptor(&descriptor_path)?;

    let artifact_id = if config.artifact_id.is_empty() {
        ctx.store.get_parameter(CONFIGURATION_SCOPE, "artifactId")
    } else {
        config.artifact_id.clone()
    };
    let mtar = mtar_file_path(config, ctx.store)?;

    let module = Module {
        descriptor_path,
        descriptor_type: MTA_DESCRIPTOR_TYPE.to_string(),
        output_folder: project_dir.to_path_buf(),
        group_id: config.group_id.clone(),
        artifact_id,
        version: descriptor.version,
        output: BuildOutput::File {
            path: project_dir.join(mtar),
            packaging: MTAR_PACKAGING.to_string(),
        },
    };
    publish(&module, &[], config, ctx)
}

fn mtar_file_path(config: &UploadConfig, store: &dyn ConfigurationStore) -> Result<PathBuf, UploadError> {
    let path = if config.mtar_file_path.is_empty() {
        store.get_parameter(PIPELINE_SCOPE, "mtarFilePath")
    } else {
        config.mtar_file_path.clone()
    };
    if path.is_empty() {
        return Err(UploadError::Config {
            message: "no MTA archive given: pass --mtar-file-path or run the MTA build step first"
                .to_string(),
        });
    }
    Ok(PathBuf::from(path))
}

fn upload_maven(
    project_dir: &Path,
    config: &UploadConfig,
    ctx: &mut UploadContext<'_>,
) -> Result<Vec<UploadedModule>, UploadError> {
    let mut uploaded = vec![upload_maven_module(project_dir, "", config, ctx)?];

    let application_dir = project_dir.join(APPLICATION_MODULE);
    match upload_maven_module(&application_dir, &config.additional_classifiers, config, ctx) {
        Ok(module) => uploaded.push(module),
        Err(err) if err.is_descriptor_not_found() => {
            tracing::warn!("No {APPLICATION_MODULE} module in {}", project_dir.display());
            progress::status_warn("Skipping", &format!("no {APPLICATION_MODULE}/{POM_FILE}"));
        }
        Err(err) => return Err(err),
    }
    Ok(uploaded)
}

/// Resolve and upload the Maven module rooted at `module_dir`.
fn upload_maven_module(
    module_dir: &Path,
    additional_classifiers: &str,
    config: &UploadConfig,
    ctx: &mut UploadContext<'_>,
) -> Result<UploadedModule, UploadError> {
    let pom = module_dir.join(POM_FILE);
    if !is_regular_file(&pom) {
        return Err(UploadError::DescriptorNotFound { path: pom });
    }

    // An empty groupId falls back to the configured one; the lookup error is dropped with it.
    let group_id = match ctx.evaluator.evaluate(&pom, GROUP_ID) {
        Ok(group) if !group.is_empty() => group,
        Ok(_) => config.group_id.clone(),
        Err(err) => {
            tracing::warn!("{err}; using configured group id '{}'", config.group_id);
            config.group_id.clone()
        }
    };
    let artifact_id = ctx.evaluator.evaluate(&pom, ARTIFACT_ID)?;
    let version = ctx.evaluator.evaluate(&pom, VERSION)?;
    let classifiers = parse_classifiers(additional_classifiers)?;

    let module = Module {
        descriptor_path: pom,
        descriptor_type: POM_DESCRIPTOR_TYPE.to_string(),
        output_folder: module_dir.join(TARGET_DIR),
        group_id,
        artifact_id,
        version,
        output: BuildOutput::Evaluated,
    };
    publish(&module, &classifiers, config, ctx)
}

/// Build the module's artifact set, then open, fill and upload one batch.
fn publish(
    module: &Module,
    classifiers: &[ClassifierDescription],
    config: &UploadConfig,
    ctx: &mut UploadContext<'_>,
) -> Result<UploadedModule, UploadError> {
    let artifacts =
        ArtifactSetBuilder::new(ctx.evaluator, config.final_name_policy).build(module, classifiers)?;

    ctx.client.set_base_url(
        &config.url,
        config.nexus_version,
        &config.repository,
        &module.group_id,
    )?;
    ctx.client.set_artifacts_version(&module.version)?;
    for artifact in &artifacts {
        ctx.client.add_artifact(artifact.clone())?;
    }

    progress::status(
        "Uploading",
        &format!(
            "{}:{}:{} ({} files)",
            module.group_id,
            module.artifact_id,
            module.version,
            artifacts.len()
        ),
    );
    ctx.client.upload_artifacts()?;

    let repository = NexusRepository::new(&config.url, config.nexus_version, &config.repository);
    let artifacts = artifacts
        .into_iter()
        .map(|artifact| PublishedArtifact {
            url: repository.file_url(
                &module.group_id,
                &artifact.artifact_id,
                &module.version,
                &artifact.remote_file_name(&module.version),
            ),
            artifact,
        })
        .collect();

    Ok(UploadedModule {
        group_id: module.group_id.clone(),
        artifact_id: module.artifact_id.clone(),
        version: module.version.clone(),
        artifacts,
    })
}
