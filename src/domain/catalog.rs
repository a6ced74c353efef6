//! The car catalog.
//!
//! A catalog is fixed for the lifetime of a plugin session. It is either the
//! built-in list or loaded once from a TOML file at startup:
//!
//! ```toml
//! [[items]]
//! make = "Honda"
//! model = "Accord"
//! color = "Blue"
//! ```

use super::error::{CarpickerError, Result};
use super::item::Item;
use serde::Deserialize;
use std::path::Path;

/// Ordered, read-only sequence of [`Item`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
}

impl Catalog {
    #[must_use]
    pub const fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// The catalog shipped with the plugin.
    ///
    /// ```
    /// use carpicker::domain::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// assert_eq!(catalog.len(), 3);
    /// assert_eq!(catalog.get(1).map(|i| i.label()), Some("Toyota Camry".to_string()));
    /// ```
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            Item::new("Honda", "Accord").with_color("Blue"),
            Item::new("Toyota", "Camry").with_color("Red"),
            Item::new("Ford", "Mustang").with_color("Green"),
        ])
    }

    /// Parses a catalog from TOML text.
    ///
    /// A document without any `[[items]]` is a valid, empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CarpickerError::Catalog`] on malformed TOML or missing
    /// `make`/`model` fields.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)
            .map_err(|e| CarpickerError::Catalog(format!("failed to parse catalog TOML: {e}")))?;
        Ok(Self::new(file.items))
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CarpickerError::Catalog`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CarpickerError::Catalog(format!("failed to read catalog file {}: {e}", path.display()))
        })?;
        let catalog = Self::from_toml_str(&contents)?;

        tracing::debug!(path = %path.display(), item_count = catalog.len(), "catalog loaded from file");
        Ok(catalog)
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_order() {
        let labels: Vec<String> = Catalog::builtin().iter().map(Item::label).collect();
        assert_eq!(labels, vec!["Honda Accord", "Toyota Camry", "Ford Mustang"]);
    }

    #[test]
    fn test_from_toml_str_keeps_order_and_color() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[items]]
            make = "Volvo"
            model = "240"
            color = "Beige"

            [[items]]
            make = "Saab"
            model = "900"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().color.as_deref(), Some("Beige"));
        assert_eq!(catalog.get(1).unwrap(), &Item::new("Saab", "900"));
    }

    #[test]
    fn test_from_toml_str_without_items_is_empty() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_toml_str_missing_model_is_error() {
        let err = Catalog::from_toml_str("[[items]]\nmake = \"Honda\"\n").unwrap_err();
        assert!(matches!(err, CarpickerError::Catalog(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[items]]\nmake = \"Honda\"\nmodel = \"Civic\"").unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.items(), &[Item::new("Honda", "Civic")]);
    }

    #[test]
    fn test_from_missing_file_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CarpickerError::Catalog(_)));
    }
}
