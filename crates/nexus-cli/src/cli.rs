//! CLI argument definitions for nexus-upload.
//!
//! Every upload flag is optional here: unset flags fall back to
//! `.nexus-upload.toml` in the project directory, then to built-in defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nexus_core::config::{FinalNamePolicy, NexusVersion};

#[derive(Parser, Debug)]
#[command(
    name = "nexus-upload",
    version,
    about = "Publish MTA and Maven build outputs to a Nexus repository",
    long_about = "nexus-upload detects whether a project is a multi-target application \
                  (mta.yaml) or a Maven project (pom.xml), collects the descriptor and \
                  build outputs of each module, and uploads them to Nexus 2 or Nexus 3."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload the project's artifacts to Nexus
    Upload(UploadArgs),

    /// Print the detected project layout
    Detect {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct UploadArgs {
    /// Nexus server URL (scheme defaults to http)
    #[arg(long, env = "NEXUS_URL")]
    pub url: Option<String>,

    /// Nexus server generation: nexus2, nexus3
    #[arg(long)]
    pub nexus_version: Option<NexusVersion>,

    /// Target repository name
    #[arg(long)]
    pub repository: Option<String>,

    /// Group id; required for MTA projects, fallback for Maven modules
    #[arg(long)]
    pub group_id: Option<String>,

    /// Artifact id for MTA projects
    #[arg(long)]
    pub artifact_id: Option<String>,

    /// Repository user
    #[arg(long, env = "NEXUS_USERNAME")]
    pub username: Option<String>,

    /// Repository password
    #[arg(long, env = "NEXUS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// JSON list of extra files, e.g. '[{"classifier":"sources","type":"jar"}]'
    #[arg(long)]
    pub additional_classifiers: Option<String>,

    /// Built MTA archive, relative to the project directory
    #[arg(long)]
    pub mtar_file_path: Option<String>,

    /// Behaviour for an unresolved finalName: strict, derive
    #[arg(long)]
    pub final_name_policy: Option<FinalNamePolicy>,

    /// Maven executable used for property lookups
    #[arg(long)]
    pub maven_executable: Option<String>,

    /// Local Maven repository (-Dmaven.repo.local)
    #[arg(long)]
    pub m2_path: Option<String>,

    /// Maven global settings file
    #[arg(long)]
    pub global_settings: Option<String>,

    /// Maven user settings file
    #[arg(long)]
    pub project_settings: Option<String>,

    /// Project directory
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Resolve and list artifacts without contacting the server
    #[arg(long)]
    pub dry_run: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_typed_flags() {
        let cli = Cli::try_parse_from([
            "nexus-upload",
            "upload",
            "--nexus-version",
            "nexus2",
            "--final-name-policy",
            "derive",
            "--dry-run",
        ])
        .unwrap();
        let Command::Upload(args) = cli.command else {
            panic!("expected upload");
        };
        assert_eq!(args.nexus_version, Some(NexusVersion::Nexus2));
        assert_eq!(args.final_name_policy, Some(FinalNamePolicy::Derive));
        assert!(args.dry_run);
    }

    #[test]
    fn rejects_unknown_nexus_version() {
        assert!(Cli::try_parse_from(["nexus-upload", "upload", "--nexus-version", "nexus4"]).is_err());
    }
}
