use algo::{
    materialize::MaterializeError,
    module::{GoModule, ModuleError, ModuleInitializer},
    scaffold,
    structure::Structure,
    template::{
        DirectoryTemplates, EmbeddedTemplates, TemplateContext, TemplateError, TemplateRenderer,
    },
    AlgoError,
};
use std::{
    cell::RefCell,
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

fn no_templates(dir: &Path) -> TemplateRenderer<DirectoryTemplates> {
    TemplateRenderer::new(DirectoryTemplates::new(dir.join("no-templates")))
}

fn write_template(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Every path below `root`, relative to it, with a trailing `/` on directories.
fn tree(root: &Path) -> BTreeSet<String> {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            if entry.file_type().is_dir() {
                format!("{relative}/")
            } else {
                relative
            }
        })
        .collect()
}

fn base(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().to_string()
}

fn context(base_path: &str) -> TemplateContext {
    TemplateContext::new(base_path)
}

#[derive(Default)]
struct RecordingInitializer {
    calls: RefCell<Vec<(PathBuf, String, bool)>>,
}
impl ModuleInitializer for RecordingInitializer {
    fn init_module(&self, base_path: &Path, module: &str) -> Result<(), ModuleError> {
        let tree_exists = base_path.join("pkg").is_dir();
        self.calls
            .borrow_mut()
            .push((base_path.to_path_buf(), module.to_string(), tree_exists));
        Ok(())
    }
}

#[test]
fn creates_exactly_the_described_tree() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "out");

    let structure = Structure::new()
        .empty_file(".env")
        .dir(
            "internal",
            Structure::new()
                .dir("domain", Structure::new().empty_file("user.go"))
                .dir("handler", Structure::new()),
        )
        .dir("pkg", Structure::new().empty_file("util.go").empty_file("log.go"));

    scaffold::<_, GoModule>(
        &context(&base_path),
        &structure,
        &no_templates(dir.path()),
        None,
    )
    .unwrap();

    let expected: BTreeSet<String> = [
        ".env",
        "internal/",
        "internal/domain/",
        "internal/domain/user.go",
        "internal/handler/",
        "pkg/",
        "pkg/log.go",
        "pkg/util.go",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let root = Path::new(&base_path);
    assert_eq!(tree(root), expected);

    for file in [".env", "internal/domain/user.go", "pkg/util.go", "pkg/log.go"] {
        assert_eq!(fs::metadata(root.join(file)).unwrap().len(), 0, "{file}");
    }
}

#[test]
fn renders_templates_and_creates_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("assets");
    write_template(
        &templates,
        "templates/main.tmpl",
        "package main\n\n// generated in {{ base_path }}\n",
    );

    let base_path = base(dir.path(), "out");
    let structure = Structure::new()
        .template("main.go")
        .dir("pkg", Structure::new().empty_file("util.go"));
    let renderer = TemplateRenderer::new(DirectoryTemplates::new(&templates));

    scaffold::<_, GoModule>(&context(&base_path), &structure, &renderer, None).unwrap();

    let root = Path::new(&base_path);
    let main = fs::read_to_string(root.join("main.go")).unwrap();
    assert_eq!(main, format!("package main\n\n// generated in {base_path}\n"));
    assert!(main.contains("out"));
    assert!(root.join("pkg").is_dir());
    assert_eq!(fs::metadata(root.join("pkg/util.go")).unwrap().len(), 0);
}

#[test]
fn templates_under_internal_are_looked_up_without_it() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("assets");
    write_template(
        &templates,
        "templates/repository/user.repository.tmpl",
        "package repository",
    );

    let base_path = base(dir.path(), "out");
    let structure = Structure::new().dir(
        "internal",
        Structure::new().dir("repository", Structure::new().template("user.repository.go")),
    );
    let renderer = TemplateRenderer::new(DirectoryTemplates::new(&templates));

    scaffold::<_, GoModule>(&context(&base_path), &structure, &renderer, None).unwrap();

    let rendered =
        fs::read_to_string(Path::new(&base_path).join("internal/repository/user.repository.go"))
            .unwrap();
    assert_eq!(rendered, "package repository");
}

#[test]
fn missing_template_fails_without_creating_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "out");
    let structure = Structure::new().dir("cmd", Structure::new().template("main.go"));

    let error =
        scaffold::<_, GoModule>(
            &context(&base_path),
            &structure,
            &no_templates(dir.path()),
            None,
        )
        .unwrap_err();

    assert!(matches!(
        error,
        AlgoError::Materialize(MaterializeError::Template(TemplateError::NotFound { .. }))
    ));
    assert!(!Path::new(&base_path).join("cmd/main.go").exists());
}

#[test]
fn invalid_template_fails_without_creating_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("assets");
    write_template(&templates, "templates/main.tmpl", "{{ base_path ");

    let base_path = base(dir.path(), "out");
    let structure = Structure::new().template("main.go");
    let renderer = TemplateRenderer::new(DirectoryTemplates::new(&templates));

    let error =
        scaffold::<_, GoModule>(&context(&base_path), &structure, &renderer, None).unwrap_err();

    assert!(matches!(
        error,
        AlgoError::Materialize(MaterializeError::Template(TemplateError::Parse { .. }))
    ));
    assert!(!Path::new(&base_path).join("main.go").exists());
}

#[test]
fn rerunning_truncates_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "out");
    let structure = Structure::new().dir("pkg", Structure::new().empty_file("util.go"));
    let renderer = no_templates(dir.path());

    scaffold::<_, GoModule>(&context(&base_path), &structure, &renderer, None).unwrap();

    let util = Path::new(&base_path).join("pkg/util.go");
    fs::write(&util, "package pkg\n\nfunc Helper() {}\n").unwrap();

    scaffold::<_, GoModule>(&context(&base_path), &structure, &renderer, None).unwrap();

    assert_eq!(fs::read_to_string(&util).unwrap(), "");
}

#[test]
fn file_in_place_of_a_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "out");
    fs::create_dir_all(&base_path).unwrap();
    fs::write(Path::new(&base_path).join("pkg"), "not a directory").unwrap();

    let structure = Structure::new().dir("pkg", Structure::new().empty_file("util.go"));

    let error =
        scaffold::<_, GoModule>(
            &context(&base_path),
            &structure,
            &no_templates(dir.path()),
            None,
        )
        .unwrap_err();

    assert!(matches!(error, AlgoError::Materialize(MaterializeError::Io(_))));
}

#[test]
fn module_is_initialized_once_after_the_tree_exists() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "out");
    let structure = Structure::new().dir("pkg", Structure::new().empty_file("util.go"));
    let initializer = RecordingInitializer::default();

    scaffold(
        &context(&base_path),
        &structure,
        &no_templates(dir.path()),
        Some(&initializer),
    )
    .unwrap();

    let calls = initializer.calls.borrow();
    assert_eq!(calls.len(), 1);

    let (path, module, tree_exists) = &calls[0];
    assert_eq!(path, Path::new(&base_path));
    assert_eq!(module, "out");
    assert!(*tree_exists);
}

#[test]
fn explicit_module_reaches_the_initializer_and_the_templates() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("assets");
    write_template(
        &templates,
        "templates/cmd/main.tmpl",
        "import \"{{ module }}/internal/config\"",
    );

    let base_path = base(dir.path(), "out");
    let structure = Structure::new()
        .dir("cmd", Structure::new().template("main.go"))
        .dir("pkg", Structure::new());
    let renderer = TemplateRenderer::new(DirectoryTemplates::new(&templates));
    let initializer = RecordingInitializer::default();

    scaffold(
        &context(&base_path).with_module("github.com/me/demo"),
        &structure,
        &renderer,
        Some(&initializer),
    )
    .unwrap();

    let calls = initializer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Path::new(&base_path));
    assert_eq!(calls[0].1, "github.com/me/demo");

    let main = fs::read_to_string(Path::new(&base_path).join("cmd/main.go")).unwrap();
    assert_eq!(main, "import \"github.com/me/demo/internal/config\"");
}

#[test]
fn module_is_not_initialized_when_materializing_fails() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "out");
    let structure = Structure::new().template("main.go");
    let initializer = RecordingInitializer::default();

    let result = scaffold(
        &context(&base_path),
        &structure,
        &no_templates(dir.path()),
        Some(&initializer),
    );

    assert!(result.is_err());
    assert!(initializer.calls.borrow().is_empty());
}

#[test]
fn failed_module_init_leaves_files_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "out");
    let structure = Structure::new().dir("pkg", Structure::new().empty_file("util.go"));
    let initializer = GoModule::with_program("algo-definitely-not-a-real-program");

    let error = scaffold(
        &context(&base_path),
        &structure,
        &no_templates(dir.path()),
        Some(&initializer),
    )
    .unwrap_err();

    assert!(matches!(error, AlgoError::Module(ModuleError::Spawn { .. })));
    assert!(Path::new(&base_path).join("pkg/util.go").is_file());
}

#[test]
fn builtin_structure_renders_with_embedded_templates() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = base(dir.path(), "new-project");
    let structure = Structure::builtin().unwrap();

    scaffold::<_, GoModule>(
        &context(&base_path),
        &structure,
        &TemplateRenderer::new(EmbeddedTemplates),
        None,
    )
    .unwrap();

    let root = Path::new(&base_path);
    let main = fs::read_to_string(root.join("cmd/app/main.go")).unwrap();
    assert!(main.starts_with("package main"));
    assert!(main.contains("new-project/internal/config"));

    let repository =
        fs::read_to_string(root.join("internal/repository/user.repository.go")).unwrap();
    assert!(repository.contains("type UserRepository struct"));

    assert!(root.join("migrations").is_dir());
    assert_eq!(fs::metadata(root.join(".env")).unwrap().len(), 0);
}
