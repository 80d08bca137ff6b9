#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use nexus_core::config::MavenSettings;
use nexus_maven::evaluate::{MavenEvaluator, PropertyEvaluator};
use nexus_util::errors::UploadError;
use tempfile::TempDir;

const FAKE_MVN: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    -Dexpression=*) expr="${arg#-Dexpression=}" ;;
  esac
done
echo "noise on stderr" 1>&2
echo "[INFO] Scanning for projects..."
case "$expr" in
  project.groupId) printf 'com.acme' ;;
  project.version) printf '2.0.0' ;;
  project.packaging) printf '' ;;
  project.broken) echo "[ERROR] Non-resolvable parent POM"; exit 1 ;;
  *) printf 'null object or invalid expression' ;;
esac
"#;

fn fake_maven(dir: &Path) -> PathBuf {
    let path = dir.join("mvn");
    std::fs::write(&path, FAKE_MVN).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn evaluator(executable: &Path) -> MavenEvaluator {
    MavenEvaluator::new(MavenSettings {
        executable: executable.display().to_string(),
        ..Default::default()
    })
}

#[test]
fn evaluates_value_after_log_preamble() {
    let tmp = TempDir::new().unwrap();
    let mvn = fake_maven(tmp.path());
    let value = evaluator(&mvn)
        .evaluate(Path::new("pom.xml"), "project.groupId")
        .unwrap();
    assert_eq!(value, "com.acme");
}

#[test]
fn each_lookup_runs_the_tool() {
    let tmp = TempDir::new().unwrap();
    let mvn = fake_maven(tmp.path());
    let eval = evaluator(&mvn);
    assert_eq!(eval.evaluate(Path::new("pom.xml"), "project.version").unwrap(), "2.0.0");
    assert_eq!(eval.evaluate(Path::new("pom.xml"), "project.groupId").unwrap(), "com.acme");
}

#[test]
fn empty_output_is_empty_value() {
    let tmp = TempDir::new().unwrap();
    let mvn = fake_maven(tmp.path());
    let value = evaluator(&mvn)
        .evaluate(Path::new("pom.xml"), "project.packaging")
        .unwrap();
    assert_eq!(value, "");
}

#[test]
fn sentinel_is_property_unresolved() {
    let tmp = TempDir::new().unwrap();
    let mvn = fake_maven(tmp.path());
    let err = evaluator(&mvn)
        .evaluate(Path::new("app/pom.xml"), "project.build.finalName")
        .unwrap_err();
    match err {
        UploadError::PropertyUnresolved {
            expression,
            descriptor,
        } => {
            assert_eq!(expression, "project.build.finalName");
            assert_eq!(descriptor, PathBuf::from("app/pom.xml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_zero_exit_is_tool_execution_failed() {
    let tmp = TempDir::new().unwrap();
    let mvn = fake_maven(tmp.path());
    let err = evaluator(&mvn)
        .evaluate(Path::new("pom.xml"), "project.broken")
        .unwrap_err();
    assert!(matches!(err, UploadError::ToolExecutionFailed { .. }), "got: {err}");
    assert!(err.to_string().contains("Non-resolvable parent POM"), "got: {err}");
}

#[test]
fn missing_executable_is_tool_execution_failed() {
    let tmp = TempDir::new().unwrap();
    let err = evaluator(&tmp.path().join("no-such-mvn"))
        .evaluate(Path::new("pom.xml"), "project.groupId")
        .unwrap_err();
    assert!(matches!(err, UploadError::ToolExecutionFailed { .. }), "got: {err}");
}
