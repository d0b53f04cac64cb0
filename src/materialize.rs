use crate::{
    errors::{self, IoError},
    structure::{Node, Structure},
    template::{TemplateContext, TemplateError, TemplateRenderer, TemplateSource},
};
use colored::Colorize;
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),
}

/// Turns a [`Structure`] into directories and files on disk.
pub struct Materializer<'a, S> {
    renderer: &'a TemplateRenderer<S>,
    context: &'a TemplateContext,
}
impl<'a, S: TemplateSource> Materializer<'a, S> {
    pub fn new(renderer: &'a TemplateRenderer<S>, context: &'a TemplateContext) -> Self {
        Self { renderer, context }
    }

    /// Creates every entry of `structure` under `root`, depth first.
    ///
    /// Existing directories are reused and existing files are truncated or
    /// re-rendered. The first failure stops the walk; whatever was created up to
    /// that point is left in place.
    pub fn materialize(&self, root: &Path, structure: &Structure) -> Result<(), MaterializeError> {
        self.walk(root, Path::new(""), structure)
    }

    fn walk(
        &self,
        directory: &Path,
        logical: &Path,
        structure: &Structure,
    ) -> Result<(), MaterializeError> {
        for (name, node) in structure.iter() {
            let current_path = directory.join(name);
            let logical_path = logical.join(name);

            match node {
                Node::EmptyFile => {
                    if let Some(parent) = current_path.parent() {
                        errors::create_dir_all(parent)?;
                    }
                    errors::create_empty_file(&current_path)?;
                    report_file(&current_path);
                }
                Node::TemplateFile => {
                    self.renderer
                        .render(&current_path, &logical_path, self.context)?;
                    report_file(&current_path);
                }
                Node::Directory(children) => {
                    errors::create_dir_all(&current_path)?;
                    log::debug!("directory ready: {}", current_path.display());

                    self.walk(&current_path, &logical_path, children)?;
                }
            }
        }

        Ok(())
    }
}

fn report_file(path: &Path) {
    println!("{} {}", "create".green(), path.display());
}
