//! Secrets file and `${env:VAR}` references in settings.

use std::collections::BTreeMap;
use std::path::Path;

use nexus_util::errors::UploadError;

/// Name of the secrets file next to `.nexus-upload.toml`.
pub const ENV_FILE: &str = ".nexus-upload.env";

const REFERENCE_OPEN: &str = "${env:";

/// Read `KEY=value` lines from `path`; `#` starts a comment line.
///
/// A missing file is an empty map. Double quotes around a value are removed.
pub fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>, UploadError> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
        .collect())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Replace every `${env:VAR}` in `input`, left to right.
///
/// `vars` is consulted before the process environment; unknown names become
/// empty. Substituted text is never scanned again, so a value may itself
/// contain `${env:...}`. An unterminated reference is kept verbatim.
pub fn interpolate(input: &str, vars: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(REFERENCE_OPEN) {
        let after_open = &rest[start + REFERENCE_OPEN.len()..];
        let Some(close) = after_open.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &after_open[..close];
        match vars.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&std::env::var(name).unwrap_or_default()),
        }
        rest = &after_open[close + 1..];
    }
    out.push_str(rest);
    out
}
