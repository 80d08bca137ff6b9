use console::style;
use miette::Result;

use nexus_core::config::{ConfigFile, MavenSection, NexusSection, UploadConfig};
use nexus_ops::ops_upload;

use crate::cli::UploadArgs;

pub fn exec(args: UploadArgs) -> Result<()> {
    let project_dir = args.project_dir.clone();
    let dry_run = args.dry_run;
    let config = UploadConfig::load(&project_dir, overrides(args))?;

    tracing::debug!(
        "Uploading to {} ({}, repository {})",
        config.url,
        config.nexus_version,
        config.repository
    );
    let report = ops_upload::run(&project_dir, &config, dry_run)?;

    let verb = if dry_run { "Would upload" } else { "Uploaded" };
    for module in &report.modules {
        println!(
            "{} {}:{}:{}",
            style(verb).green().bold(),
            module.group_id,
            module.artifact_id,
            module.version
        );
        for published in &module.artifacts {
            println!("  {} -> {}", published.artifact.file.display(), published.url);
        }
    }
    Ok(())
}

/// Command-line values as a config layer over `.nexus-upload.toml`.
fn overrides(args: UploadArgs) -> ConfigFile {
    ConfigFile {
        nexus: NexusSection {
            url: args.url,
            version: args.nexus_version,
            repository: args.repository,
            group_id: args.group_id,
            artifact_id: args.artifact_id,
            username: args.username,
            password: args.password,
            additional_classifiers: args.additional_classifiers,
            mtar_file_path: args.mtar_file_path,
            final_name_policy: args.final_name_policy,
        },
        maven: MavenSection {
            executable: args.maven_executable,
            m2_path: args.m2_path,
            global_settings: args.global_settings,
            project_settings: args.project_settings,
        },
    }
}
