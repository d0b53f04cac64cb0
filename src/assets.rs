//! Files bundled into the binary at compile time.
//!
//! Every `.tmpl` file under `templates/` must be listed in [`TEMPLATES`] under the
//! same relative path, since that is the path [`crate::template::resolve_template_path`]
//! produces for the file it renders.

/// The built-in project layout, see [`crate::structure::Structure::builtin`].
pub const STRUCTURE: &str = include_str!("../assets/structure.toml");

/// Template sources keyed by their resolved path.
pub const TEMPLATES: &[(&str, &str)] = &[
    (
        "templates/README.tmpl",
        include_str!("../templates/README.tmpl"),
    ),
    (
        "templates/cmd/app/main.tmpl",
        include_str!("../templates/cmd/app/main.tmpl"),
    ),
    (
        "templates/config/config.tmpl",
        include_str!("../templates/config/config.tmpl"),
    ),
    (
        "templates/domain/user.tmpl",
        include_str!("../templates/domain/user.tmpl"),
    ),
    (
        "templates/repository/user.repository.tmpl",
        include_str!("../templates/repository/user.repository.tmpl"),
    ),
    (
        "templates/service/user.service.tmpl",
        include_str!("../templates/service/user.service.tmpl"),
    ),
    (
        "templates/handler/user.handler.tmpl",
        include_str!("../templates/handler/user.handler.tmpl"),
    ),
    (
        "templates/pkg/response/response.tmpl",
        include_str!("../templates/pkg/response/response.tmpl"),
    ),
];

/// Looks up an embedded template by its resolved path.
pub fn template(path: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, source)| *source)
}
