use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The filesystem action that was being attempted when an [`IoError`] occurred.
#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a template")]
    ReadTemplate,
    #[error("creating a file")]
    Create,
    #[error("writing a rendered file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(algo::io),
    help("Check file permissions, disk space, or that nothing else occupies the path.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            source: error,
        }
    }
}

/// Creates `path` and all of its missing parents. Existing directories are fine.
pub fn create_dir_all(path: &Path) -> Result<(), IoError> {
    std::fs::create_dir_all(path).map_err(|error| IoError::new(FileOperation::Mkdir, path, error))
}

/// Creates an empty file at `path`, truncating it when it already exists.
pub fn create_empty_file(path: &Path) -> Result<(), IoError> {
    std::fs::File::create(path)
        .map(drop)
        .map_err(|error| IoError::new(FileOperation::Create, path, error))
}

/// Writes `contents` to `path`, creating or truncating it.
pub fn write_file(path: &Path, contents: &str) -> Result<(), IoError> {
    std::fs::write(path, contents).map_err(|error| IoError::new(FileOperation::Write, path, error))
}
