use crate::{
    assets,
    errors::{self, FileOperation, IoError},
    utils,
};
use miette::Diagnostic;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tera::Tera;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error("no template found at '{template}' for '{file}'")]
    #[diagnostic(
        code(algo::template::not_found),
        help("Templated files need a matching .tmpl file under the templates directory")
    )]
    NotFound { file: PathBuf, template: PathBuf },

    #[error("unable to parse template '{template}' for '{file}'")]
    #[diagnostic(code(algo::template::parse))]
    Parse {
        file: PathBuf,
        template: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("unable to render template '{template}' for '{file}'")]
    #[diagnostic(code(algo::template::render))]
    Render {
        file: PathBuf,
        template: PathBuf,
        #[source]
        source: tera::Error,
    },
}

/// Root that templated files are looked up under.
pub const TEMPLATES_ROOT: &str = "templates";
/// Leading directory of generated sources that has no counterpart under [`TEMPLATES_ROOT`].
pub const SOURCE_ROOT: &str = "internal";
pub const TEMPLATE_FILE_EXTENSION: &str = "tmpl";

/// Values available to every template, threaded through the whole run.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// The project path exactly as the user supplied it.
    pub base_path: String,
    /// Go module path used for `go mod init` and for imports in rendered files.
    pub module: String,
}
impl TemplateContext {
    /// Context whose module path is derived from `base_path`, see [`utils::module_path`].
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        let module = utils::module_path(&base_path);

        Self { base_path, module }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }
}

/// Maps the path of a generated file, relative to the project root, to its template.
///
/// The file's directory loses a leading `internal` component and is placed under
/// `templates`, and the file name becomes its stem plus `.tmpl`:
///
/// ```
/// use std::path::Path;
/// use algo::template::resolve_template_path;
///
/// assert_eq!(
///     resolve_template_path(Path::new("internal/repository/user.repository.go")),
///     Path::new("templates/repository/user.repository.tmpl"),
/// );
/// assert_eq!(
///     resolve_template_path(Path::new("cmd/app/main.go")),
///     Path::new("templates/cmd/app/main.tmpl"),
/// );
/// ```
///
/// Nothing is read from disk here.
pub fn resolve_template_path(logical: &Path) -> PathBuf {
    let parent = logical.parent().unwrap_or_else(|| Path::new(""));
    let relative = parent.strip_prefix(SOURCE_ROOT).unwrap_or(parent);

    let mut file_name = logical.file_stem().unwrap_or_default().to_os_string();
    file_name.push(".");
    file_name.push(TEMPLATE_FILE_EXTENSION);

    let mut template = PathBuf::from(TEMPLATES_ROOT);
    template.extend(relative.components().filter(|c| matches!(c, Component::Normal(_))));
    template.push(file_name);

    template
}

/// Somewhere template sources can be loaded from.
pub trait TemplateSource {
    /// Returns the source of the template at `template`, a path produced by
    /// [`resolve_template_path`]. `file` is the generated file it is loaded for.
    fn load(&self, template: &Path, file: &Path) -> Result<String, TemplateError>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;
impl TemplateSource for EmbeddedTemplates {
    fn load(&self, template: &Path, file: &Path) -> Result<String, TemplateError> {
        let key = template
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        assets::template(&key)
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotFound {
                file: file.to_path_buf(),
                template: template.to_path_buf(),
            })
    }
}

/// Templates read from a directory that contains the `templates` root.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    pub root: PathBuf,
}
impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}
impl TemplateSource for DirectoryTemplates {
    fn load(&self, template: &Path, file: &Path) -> Result<String, TemplateError> {
        let path = self.root.join(template);

        std::fs::read_to_string(&path).map_err(|error| match error.kind() {
            std::io::ErrorKind::NotFound => TemplateError::NotFound {
                file: file.to_path_buf(),
                template: template.to_path_buf(),
            },
            _ => IoError::new(FileOperation::ReadTemplate, path, error).into(),
        })
    }
}

/// Renders templated files with [`Tera`].
#[derive(Debug)]
pub struct TemplateRenderer<S> {
    source: S,
}
impl<S: TemplateSource> TemplateRenderer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolves, parses and renders the template for `logical`.
    pub fn render_to_string(
        &self,
        logical: &Path,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        let template = resolve_template_path(logical);

        log::debug!(
            "rendering {} from {}",
            logical.display(),
            template.display()
        );

        let content = self.source.load(&template, logical)?;

        let name = template.to_string_lossy();
        let mut tera = Tera::default();
        tera.add_raw_template(&name, &content)
            .map_err(|error| TemplateError::Parse {
                file: logical.to_path_buf(),
                template: template.clone(),
                source: error,
            })?;

        let render_error = |error| TemplateError::Render {
            file: logical.to_path_buf(),
            template: template.clone(),
            source: error,
        };

        let ctx = tera::Context::from_serialize(context).map_err(render_error)?;

        tera.render(&name, &ctx).map_err(render_error)
    }

    /// Renders the template for `logical` and writes it to `target`, truncating any
    /// existing file.
    ///
    /// The output is rendered in memory first, so `target` is only opened once
    /// rendering has succeeded.
    pub fn render(
        &self,
        target: &Path,
        logical: &Path,
        context: &TemplateContext,
    ) -> Result<(), TemplateError> {
        let rendered = self.render_to_string(logical, context)?;

        errors::write_file(target, &rendered)?;

        Ok(())
    }
}
