//! Assembling the ordered artifact set of one module.
//!
//! The set is always: the descriptor, then the primary build output (unless
//! the module is descriptor-only), then any additional classified files.

use nexus_core::artifact::{ArtifactDescription, ClassifierDescription};
use nexus_core::config::FinalNamePolicy;
use nexus_core::module::{BuildOutput, Module, DEFAULT_PACKAGING, POM_PACKAGING};
use nexus_util::errors::UploadError;
use nexus_util::fs::compose_file_path;

use crate::evaluate::{PropertyEvaluator, FINAL_NAME, PACKAGING};

pub struct ArtifactSetBuilder<'a> {
    evaluator: &'a dyn PropertyEvaluator,
    final_name_policy: FinalNamePolicy,
}

impl<'a> ArtifactSetBuilder<'a> {
    pub fn new(evaluator: &'a dyn PropertyEvaluator, final_name_policy: FinalNamePolicy) -> Self {
        Self {
            evaluator,
            final_name_policy,
        }
    }

    /// Produce every artifact of `module` in upload order.
    ///
    /// Nothing is returned unless every step succeeds.
    pub fn build(
        &self,
        module: &Module,
        classifiers: &[ClassifierDescription],
    ) -> Result<Vec<ArtifactDescription>, UploadError> {
        let mut artifacts = vec![descriptor_artifact(module)];
        artifacts.extend(self.primary_artifact(module)?);
        artifacts.extend(classifier_artifacts(module, classifiers)?);
        Ok(artifacts)
    }

    /// The main build output, or `None` for a `pom`-packaged module.
    pub fn primary_artifact(
        &self,
        module: &Module,
    ) -> Result<Option<ArtifactDescription>, UploadError> {
        let (file, packaging) = match &module.output {
            BuildOutput::File { path, packaging } => (path.clone(), packaging.clone()),
            BuildOutput::Evaluated => {
                let packaging = self
                    .evaluator
                    .evaluate(&module.descriptor_path, PACKAGING)?;
                if packaging == POM_PACKAGING {
                    return Ok(None);
                }
                let packaging = if packaging.is_empty() {
                    DEFAULT_PACKAGING.to_string()
                } else {
                    packaging
                };
                let final_name = self.final_name(module)?;
                (
                    compose_file_path(&module.output_folder, &final_name, &packaging),
                    packaging,
                )
            }
        };
        Ok(Some(ArtifactDescription::new(
            file,
            packaging,
            "",
            &module.artifact_id,
        )))
    }

    fn final_name(&self, module: &Module) -> Result<String, UploadError> {
        match self.evaluator.evaluate(&module.descriptor_path, FINAL_NAME) {
            Ok(name) if !name.is_empty() => Ok(name),
            Ok(_) => Ok(module.default_final_name()),
            Err(err @ UploadError::PropertyUnresolved { .. })
                if self.final_name_policy == FinalNamePolicy::Derive =>
            {
                tracing::warn!("{err}; using {}", module.default_final_name());
                Ok(module.default_final_name())
            }
            Err(err) => Err(err),
        }
    }
}

/// The module's own descriptor file.
pub fn descriptor_artifact(module: &Module) -> ArtifactDescription {
    ArtifactDescription::new(
        module.descriptor_path.clone(),
        &module.descriptor_type,
        "",
        &module.artifact_id,
    )
}

/// `<output>/<artifactId>-<classifier>.<type>` for each entry.
///
/// Every entry is validated before any artifact is produced.
pub fn classifier_artifacts(
    module: &Module,
    classifiers: &[ClassifierDescription],
) -> Result<Vec<ArtifactDescription>, UploadError> {
    for classifier in classifiers {
        classifier.validate()?;
    }
    Ok(classifiers
        .iter()
        .map(|c| {
            let name = format!("{}-{}", module.artifact_id, c.classifier);
            ArtifactDescription::new(
                compose_file_path(&module.output_folder, &name, &c.file_type),
                &c.file_type,
                &c.classifier,
                &module.artifact_id,
            )
        })
        .collect())
}
