use crate::{
    errors::{self, IoError},
    materialize::{MaterializeError, Materializer},
    module::{GoModule, ModuleError, ModuleInitializer},
    preview::preview_as_tree,
    structure::{Structure, StructureError},
    template::{EmbeddedTemplates, TemplateContext, TemplateRenderer, TemplateSource},
};
use colored::Colorize;
use std::path::Path;

/// Base path used when the user does not pass one.
pub const DEFAULT_BASE_PATH: &str = "./new-project";

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum AlgoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Module(#[from] ModuleError),
}

/// What `create` should do.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub base_path: String,
    /// Go module path; derived from `base_path` when `None`.
    pub module: Option<String>,
    /// Only print the tree that would be generated.
    pub dry_run: bool,
    /// Run `go mod init` once the tree exists.
    pub init_module: bool,
}
impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            module: None,
            dry_run: false,
            init_module: true,
        }
    }
}

/// Generates the built-in Go project layout at `options.base_path` and
/// initializes its module.
///
/// # Errors
///
/// Returns an [`AlgoError`] if:
///
/// - The built-in structure description is malformed.
/// - A directory or file cannot be created or written to.
/// - A template cannot be found, parsed or rendered.
/// - `go mod init` cannot be started or exits unsuccessfully.
pub fn create_project(options: &CreateOptions) -> Result<(), AlgoError> {
    let structure = Structure::builtin()?;

    if options.dry_run {
        preview_as_tree(&structure, Path::new(&options.base_path));
        return Ok(());
    }

    let mut context = TemplateContext::new(&options.base_path);
    if let Some(module) = &options.module {
        context = context.with_module(module);
    }

    let initializer = options.init_module.then(GoModule::default);

    scaffold(
        &context,
        &structure,
        &TemplateRenderer::new(EmbeddedTemplates),
        initializer.as_ref(),
    )?;

    println!(
        "{} {}",
        "Folder structure generated successfully at".green(),
        options.base_path
    );

    Ok(())
}

/// Creates `structure` under `context.base_path` and hands the result to
/// `initializer` along with `context.module`.
///
/// Nothing is rolled back on failure: files created before the error stay on disk.
pub fn scaffold<S, M>(
    context: &TemplateContext,
    structure: &Structure,
    renderer: &TemplateRenderer<S>,
    initializer: Option<&M>,
) -> Result<(), AlgoError>
where
    S: TemplateSource,
    M: ModuleInitializer,
{
    let root = Path::new(&context.base_path);

    errors::create_dir_all(root)?;

    Materializer::new(renderer, context).materialize(root, structure)?;

    if let Some(initializer) = initializer {
        initializer.init_module(root, &context.module)?;
    }

    Ok(())
}
