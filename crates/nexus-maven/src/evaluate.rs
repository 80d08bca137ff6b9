//! Property evaluation through `maven-help-plugin:evaluate`.
//!
//! Every lookup is one Maven invocation; results are not cached.

use std::path::Path;

use nexus_core::config::MavenSettings;
use nexus_util::errors::UploadError;
use nexus_util::process::CommandBuilder;

/// Fully qualified goal used to evaluate an expression against a POM.
pub const HELP_EVALUATE_GOAL: &str = "org.apache.maven.plugins:maven-help-plugin:3.1.0:evaluate";

/// Prefix printed by the help plugin when an expression has no value.
pub const UNRESOLVED_SENTINEL: &str = "null object or invalid expression";

pub const GROUP_ID: &str = "project.groupId";
pub const ARTIFACT_ID: &str = "project.artifactId";
pub const VERSION: &str = "project.version";
pub const PACKAGING: &str = "project.packaging";
pub const FINAL_NAME: &str = "project.build.finalName";

/// Resolves a single build property for a module descriptor.
pub trait PropertyEvaluator {
    fn evaluate(&self, descriptor: &Path, expression: &str) -> Result<String, UploadError>;
}

/// Result of reading the help plugin's standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Value(String),
    Unresolved,
}

/// Interpret the help plugin's standard output.
///
/// Blank lines and log lines (`[INFO]`, `[WARNING]`, ...) are skipped; the
/// last remaining line is the value.
pub fn parse_evaluation_output(stdout: &str) -> Evaluation {
    let value = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .last()
        .unwrap_or("");
    if value.starts_with(UNRESOLVED_SENTINEL) {
        Evaluation::Unresolved
    } else {
        Evaluation::Value(value.to_string())
    }
}

/// The `[ERROR]` lines of a failed run, joined with `; `.
///
/// With `-q` Maven reports build errors on stdout.
pub fn error_lines(stdout: &str) -> String {
    stdout
        .lines()
        .filter_map(|line| line.trim().strip_prefix("[ERROR]"))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// [`PropertyEvaluator`] that shells out to Maven.
#[derive(Debug, Clone, Default)]
pub struct MavenEvaluator {
    settings: MavenSettings,
}

impl MavenEvaluator {
    pub fn new(settings: MavenSettings) -> Self {
        Self { settings }
    }

    fn command(&self, descriptor: &Path, expression: &str) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.settings.executable)
            .arg("--file")
            .arg(descriptor.display().to_string());
        if let Some(ref global) = self.settings.global_settings {
            cmd = cmd.arg("--global-settings").arg(global.display().to_string());
        }
        if let Some(ref project) = self.settings.project_settings {
            cmd = cmd.arg("--settings").arg(project.display().to_string());
        }
        if let Some(ref m2) = self.settings.m2_path {
            cmd = cmd.arg(format!("-Dmaven.repo.local={}", m2.display()));
        }
        cmd.arg("--batch-mode")
            .arg(HELP_EVALUATE_GOAL)
            .arg(format!("-Dexpression={expression}"))
            .args(["-DforceStdout", "-q"])
            .discard_stderr()
    }
}

impl PropertyEvaluator for MavenEvaluator {
    fn evaluate(&self, descriptor: &Path, expression: &str) -> Result<String, UploadError> {
        let failed = |message: String| UploadError::ToolExecutionFailed {
            expression: expression.to_string(),
            descriptor: descriptor.to_path_buf(),
            message,
        };

        let output = self
            .command(descriptor, expression)
            .exec()
            .map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            let mut message = format!("{} exited with {}", self.settings.executable, output.status);
            let errors = error_lines(&String::from_utf8_lossy(&output.stdout));
            if !errors.is_empty() {
                message.push_str(": ");
                message.push_str(&errors);
            }
            return Err(failed(message));
        }

        match parse_evaluation_output(&String::from_utf8_lossy(&output.stdout)) {
            Evaluation::Value(value) => {
                tracing::debug!(
                    "Evaluated expression '{expression}' in file '{}' as '{value}'",
                    descriptor.display()
                );
                Ok(value)
            }
            Evaluation::Unresolved => Err(UploadError::PropertyUnresolved {
                expression: expression.to_string(),
                descriptor: descriptor.to_path_buf(),
            }),
        }
    }
}
