use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use nexus_util::errors::UploadError;

use crate::properties::{interpolate, load_env_file, ENV_FILE};

/// Name of the optional project configuration file.
pub const CONFIG_FILE: &str = ".nexus-upload.toml";

/// Default Maven executable looked up on `PATH`.
pub const DEFAULT_MAVEN_EXECUTABLE: &str = "mvn";

/// Nexus server generation; decides the repository URL layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NexusVersion {
    Nexus2,
    #[default]
    Nexus3,
}

impl FromStr for NexusVersion {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nexus2" => Ok(NexusVersion::Nexus2),
            "nexus3" => Ok(NexusVersion::Nexus3),
            other => Err(UploadError::Config {
                message: format!("nexus version must be one of 'nexus2' or 'nexus3', got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for NexusVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NexusVersion::Nexus2 => write!(f, "nexus2"),
            NexusVersion::Nexus3 => write!(f, "nexus3"),
        }
    }
}

/// What to do when `project.build.finalName` cannot be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalNamePolicy {
    /// An unresolved final name is an error.
    #[default]
    Strict,
    /// Fall back to `<artifactId>-<version>` when unresolved.
    Derive,
}

impl FromStr for FinalNamePolicy {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FinalNamePolicy::Strict),
            "derive" => Ok(FinalNamePolicy::Derive),
            other => Err(UploadError::Config {
                message: format!("final name policy must be 'strict' or 'derive', got '{other}'"),
            }),
        }
    }
}

/// Raw settings as written in `.nexus-upload.toml` or given on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub nexus: NexusSection,
    #[serde(default)]
    pub maven: MavenSection,
}

/// `[nexus]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NexusSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub version: Option<NexusVersion>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub additional_classifiers: Option<String>,
    #[serde(default)]
    pub mtar_file_path: Option<String>,
    #[serde(default)]
    pub final_name_policy: Option<FinalNamePolicy>,
}

/// `[maven]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MavenSection {
    #[serde(default)]
    pub executable: Option<String>,
    #[serde(default)]
    pub m2_path: Option<String>,
    #[serde(default)]
    pub global_settings: Option<String>,
    #[serde(default)]
    pub project_settings: Option<String>,
}

impl ConfigFile {
    /// Load `.nexus-upload.toml` from `project_dir`, or defaults if it doesn't exist.
    pub fn load(project_dir: &Path) -> Result<Self, UploadError> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| UploadError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| UploadError::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn overridden_by(self, overrides: ConfigFile) -> ConfigFile {
        let (n, o) = (self.nexus, overrides.nexus);
        let (m, mo) = (self.maven, overrides.maven);
        ConfigFile {
            nexus: NexusSection {
                url: o.url.or(n.url),
                version: o.version.or(n.version),
                repository: o.repository.or(n.repository),
                group_id: o.group_id.or(n.group_id),
                artifact_id: o.artifact_id.or(n.artifact_id),
                username: o.username.or(n.username),
                password: o.password.or(n.password),
                additional_classifiers: o.additional_classifiers.or(n.additional_classifiers),
                mtar_file_path: o.mtar_file_path.or(n.mtar_file_path),
                final_name_policy: o.final_name_policy.or(n.final_name_policy),
            },
            maven: MavenSection {
                executable: mo.executable.or(m.executable),
                m2_path: mo.m2_path.or(m.m2_path),
                global_settings: mo.global_settings.or(m.global_settings),
                project_settings: mo.project_settings.or(m.project_settings),
            },
        }
    }
}

/// How Maven is invoked for property evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenSettings {
    pub executable: String,
    pub m2_path: Option<PathBuf>,
    pub global_settings: Option<PathBuf>,
    pub project_settings: Option<PathBuf>,
}

impl Default for MavenSettings {
    fn default() -> Self {
        Self {
            executable: DEFAULT_MAVEN_EXECUTABLE.to_string(),
            m2_path: None,
            global_settings: None,
            project_settings: None,
        }
    }
}

/// Fully resolved settings for one upload run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub url: String,
    pub nexus_version: NexusVersion,
    pub repository: String,
    pub group_id: String,
    pub artifact_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// JSON array of `{classifier, type}`; parsed only when a module needs it.
    pub additional_classifiers: String,
    pub mtar_file_path: String,
    pub final_name_policy: FinalNamePolicy,
    pub maven: MavenSettings,
}

impl UploadConfig {
    /// Read `.nexus-upload.toml` and `.nexus-upload.env` from `project_dir`,
    /// apply `overrides`, and resolve the result.
    pub fn load(project_dir: &Path, overrides: ConfigFile) -> Result<Self, UploadError> {
        let file = ConfigFile::load(project_dir)?.overridden_by(overrides);
        let env = load_env_file(&project_dir.join(ENV_FILE))?;
        Self::resolve(file, &env)
    }

    /// Interpolate `${env:VAR}` references, apply defaults and validate.
    pub fn resolve(file: ConfigFile, env: &BTreeMap<String, String>) -> Result<Self, UploadError> {
        let text = |v: Option<String>| -> String {
            v.map(|s| interpolate(&s, env))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        let optional = |v: Option<String>| -> Option<String> {
            Some(text(v)).filter(|s| !s.is_empty())
        };

        let url = text(file.nexus.url);
        if url.is_empty() {
            return Err(UploadError::Config {
                message: "the repository 'url' must be provided".to_string(),
            });
        }
        let repository = text(file.nexus.repository);
        if repository.is_empty() {
            return Err(UploadError::Config {
                message: "the 'repository' name must be provided".to_string(),
            });
        }

        let maven = MavenSettings {
            executable: optional(file.maven.executable)
                .unwrap_or_else(|| DEFAULT_MAVEN_EXECUTABLE.to_string()),
            m2_path: optional(file.maven.m2_path).map(PathBuf::from),
            global_settings: optional(file.maven.global_settings).map(PathBuf::from),
            project_settings: optional(file.maven.project_settings).map(PathBuf::from),
        };

        Ok(Self {
            url: normalize_url(&url),
            nexus_version: file.nexus.version.unwrap_or_default(),
            repository,
            group_id: text(file.nexus.group_id),
            artifact_id: text(file.nexus.artifact_id),
            username: optional(file.nexus.username),
            password: optional(file.nexus.password),
            additional_classifiers: text(file.nexus.additional_classifiers),
            mtar_file_path: text(file.nexus.mtar_file_path),
            final_name_policy: file.nexus.final_name_policy.unwrap_or_default(),
            maven,
        })
    }
}

/// Prefix `http://` when no scheme is given and drop trailing slashes.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
