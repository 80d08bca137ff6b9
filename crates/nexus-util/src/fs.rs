use std::path::{Path, PathBuf};

/// Join `folder` with a file named `<name>.<extension>`.
///
/// An empty `folder` yields the bare file name.
pub fn compose_file_path(folder: &Path, name: &str, extension: &str) -> PathBuf {
    folder.join(format!("{name}.{extension}"))
}

/// Returns `true` if `path` exists and is a regular file (not a directory).
pub fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Read a file to a trimmed string, or `None` if it cannot be read.
pub fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}
