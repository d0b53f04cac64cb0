use crate::assets;
use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

/// String value that marks a file as rendered from its template.
pub const TEMPLATE_MARKER: &str = "template";

#[derive(Debug, Error, Diagnostic)]
pub enum StructureError {
    #[error("invalid structure for '{key}': expected a string or a table, found {kind}")]
    #[diagnostic(
        code(algo::structure::invalid_node),
        help("Use \"\" for an empty file, \"template\" for a rendered file, or a table for a directory")
    )]
    InvalidNode { key: String, kind: &'static str },

    #[error("unable to parse structure description: {source}")]
    #[diagnostic(code(algo::structure::parse_toml), help("Review the structure toml"))]
    ParseToml {
        #[source]
        source: toml::de::Error,
    },
}

/// A single entry of a [`Structure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A zero-length file.
    EmptyFile,
    /// A file rendered from the template resolved for its path.
    TemplateFile,
    /// A directory holding a nested structure.
    Directory(Structure),
}

/// A directory layout: path segment names mapped to [`Node`]s.
///
/// Entries iterate in insertion order, but nothing that consumes a structure
/// may rely on the order in which siblings are created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure(pub IndexMap<String, Node>);
impl Structure {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn empty_file(mut self, name: &str) -> Self {
        self.0.insert(name.to_string(), Node::EmptyFile);
        self
    }

    pub fn template(mut self, name: &str) -> Self {
        self.0.insert(name.to_string(), Node::TemplateFile);
        self
    }

    pub fn dir(mut self, name: &str, children: Structure) -> Self {
        self.0.insert(name.to_string(), Node::Directory(children));
        self
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The project layout shipped with the binary.
    pub fn builtin() -> Result<Self, StructureError> {
        Self::from_toml_str(assets::STRUCTURE)
    }

    /// Parses a structure description written as toml.
    ///
    /// Strings equal to `"template"` become [`Node::TemplateFile`], every other
    /// string becomes [`Node::EmptyFile`] and tables become directories. Any other
    /// value is rejected before a single path is touched.
    pub fn from_toml_str(source: &str) -> Result<Self, StructureError> {
        let table: toml::Table =
            toml::from_str(source).map_err(|error| StructureError::ParseToml { source: error })?;

        Self::from_table(&table, "")
    }

    fn from_table(table: &toml::Table, parent: &str) -> Result<Self, StructureError> {
        let mut entries = IndexMap::with_capacity(table.len());

        for (name, value) in table {
            let key = if parent.is_empty() {
                name.clone()
            } else {
                format!("{parent}/{name}")
            };

            let node = match value {
                toml::Value::String(marker) if marker == TEMPLATE_MARKER => Node::TemplateFile,
                toml::Value::String(content) => {
                    // NOTE: literal content is dropped; the file is created empty
                    if !content.is_empty() {
                        log::warn!("discarding literal content for '{key}', creating it empty");
                    }
                    Node::EmptyFile
                }
                toml::Value::Table(children) => Node::Directory(Self::from_table(children, &key)?),
                other => {
                    return Err(StructureError::InvalidNode {
                        key,
                        kind: other.type_str(),
                    })
                }
            };

            entries.insert(name.clone(), node);
        }

        Ok(Self(entries))
    }
}
