use std::ffi::OsStr;
use std::path::Path;

/// Directory names that are never descended into.
pub const SKIP_DIRECTORIES: &[&str] = &[
    ".expo",
    "node_modules",
    ".git",
    "__pycache__",
    ".vscode",
    ".idea",
    "dist",
    "build",
    ".next",
    "coverage",
    ".nyc_output",
    "logs",
    "temp",
    "tmp",
];

/// Returns true when a directory with this basename must be pruned.
///
/// Matching is exact and case-sensitive. Any other name starting with `.`
/// is pruned as well.
pub fn should_skip_directory(dir_name: &str) -> bool {
    SKIP_DIRECTORIES.contains(&dir_name) || dir_name.starts_with('.')
}

/// Path-based variant used by the scanner. Names that are not valid UTF-8
/// cannot be in the skip list, but may still carry a leading dot.
pub fn should_skip_path(path: &Path) -> bool {
    match path.file_name() {
        Some(name) => should_skip_os_name(name),
        None => false,
    }
}

fn should_skip_os_name(name: &OsStr) -> bool {
    match name.to_str() {
        Some(name) => should_skip_directory(name),
        None => name.to_string_lossy().starts_with('.'),
    }
}
