use std::path::{Component, Path, PathBuf};

/// Lexically normalizes `source`: `.` components are dropped and `..` pops the
/// previous component. The filesystem is never consulted.
pub fn normalize_path(source: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.components() {
        match component {
            Component::CurDir => {}

            Component::ParentDir => {
                new_path.pop();
            }

            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}

/// Module path used when the base path has no final component, e.g. `/`.
pub const FALLBACK_MODULE: &str = "app";

/// Derives a Go module path from the project's base path: the final component of
/// the base path made absolute and normalized, so `./new-project` and
/// `/home/me/.work/new-project` both become `new-project` and `.` becomes the
/// name of the current directory. Pass an explicit module to use anything else.
pub fn module_path(base_path: &str) -> String {
    let path = Path::new(base_path);
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    normalize_path(&absolute)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_MODULE.to_string())
}
