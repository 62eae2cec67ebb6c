//! Named query template storage.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, TemplateError};

/// File extension of query template files.
pub const TEMPLATE_EXTENSION: &str = "gql";

/// A named GraphQL query body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTemplate {
    name: String,
    body: String,
}

impl QueryTemplate {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A set of query templates keyed by name.
///
/// Loaded once when a session is built and never modified by it.
#[derive(Clone, Debug, Default)]
pub struct TemplateStore {
    templates: HashMap<String, QueryTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from in-memory templates. Later duplicates win.
    pub fn from_templates(templates: impl IntoIterator<Item = QueryTemplate>) -> Self {
        let mut store = Self::new();
        for template in templates {
            store.insert(template);
        }
        store
    }

    /// Load every `*.gql` file in `dir` (non-recursive). The file stem is the
    /// template name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or one of its template files
    /// cannot be read as UTF-8.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let io_err = |source| TemplateError::Io {
            path: dir.display().to_string(),
            source,
        };

        let mut store = Self::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let body = fs::read_to_string(&path).map_err(|source| TemplateError::Io {
                path: path.display().to_string(),
                source,
            })?;
            debug!(name, "loaded query template");
            store.insert(QueryTemplate::new(name, body));
        }

        Ok(store)
    }

    pub fn insert(&mut self, template: QueryTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Result<&QueryTemplate, Error> {
        self.templates
            .get(name)
            .ok_or_else(|| Error::missing_template(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_dir_reads_only_gql_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ReadProfile.gql"), "query ReadProfile { me { id } }").unwrap();
        fs::write(dir.path().join("newsItem.gql"), "query newsItem($id: String!) { x }").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a query").unwrap();
        fs::create_dir(dir.path().join("nested.gql")).unwrap();

        let store = TemplateStore::load_dir(dir.path()).unwrap();
        assert_eq!(store.names(), vec!["ReadProfile", "newsItem"]);
        assert_eq!(
            store.get("ReadProfile").unwrap().body(),
            "query ReadProfile { me { id } }"
        );
    }

    #[test]
    fn load_dir_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let err = TemplateStore::load_dir(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::Template(TemplateError::Io { .. })));
    }

    #[test]
    fn get_missing_template_is_error() {
        let store = TemplateStore::from_templates([QueryTemplate::new("a", "query a {}")]);
        assert!(store.contains("a"));
        let err = store.get("b").unwrap_err();
        assert!(matches!(err, Error::Template(TemplateError::Missing { ref name }) if name == "b"));
    }
}
