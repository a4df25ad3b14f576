use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Declared pre-bound variable names, in declaration order.
///
/// The scanner does not consume this type directly: it consumes the blob from
/// [`VariableCatalog::catalog_string`], where every declared name appears
/// wrapped as `<name>`. Membership is case-insensitive throughout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableCatalog {
    #[serde(default)]
    variables: Vec<String>,
}

impl VariableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut catalog = Self::default();
        for name in names {
            catalog.declare(name.as_ref());
        }
        catalog
    }

    /// Record a name as pre-bound. A leading `:` is tolerated, duplicates
    /// (compared case-insensitively) are ignored, declaration order is kept.
    pub fn declare(&mut self, name: &str) {
        let name = name.trim().trim_start_matches(':');
        if name.is_empty() || self.is_declared(name) {
            return;
        }
        self.variables.push(name.to_string());
    }

    pub fn is_declared(&self, name: &str) -> bool {
        let name = name.trim().trim_start_matches(':').to_lowercase();
        self.variables.iter().any(|v| v.to_lowercase() == name)
    }

    /// The membership blob the scanner consumes: `<a><b>…`.
    pub fn catalog_string(&self) -> String {
        let mut blob = String::new();
        for name in &self.variables {
            blob.push('<');
            blob.push_str(name);
            blob.push('>');
        }
        blob
    }

    pub fn names(&self) -> &[String] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Load a catalog from a JSON file of the shape `{ "variables": [ … ] }`.
    /// The path comes from the user, so failures surface instead of falling
    /// back to an empty catalog.
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let loaded: VariableCatalog = serde_json::from_str(&content)?;
        // Re-declare everything so trimming and duplicate collapse apply to
        // file contents too.
        Ok(Self::from_names(loaded.variables))
    }
}
