//! Catalog entries and paint colors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Palette used when the plugin configuration does not override it.
pub const DEFAULT_PALETTE: [&str; 3] = ["Red", "Blue", "Green"];

/// A selectable catalog entry.
///
/// `color` is the color listed next to the car in the catalog. Selection
/// logic never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Item {
    /// Creates an item without a catalog color.
    #[must_use]
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            color: None,
        }
    }

    /// Sets the inert catalog color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns `"{make} {model}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// Compares make and model only.
    #[must_use]
    pub fn same_car(&self, other: &Self) -> bool {
        self.make == other.make && self.model == other.model
    }
}

/// A paint color drawn from the configured palette.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(String);

impl Color {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, fixed set of colors offered by the color selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Builds a palette from names, dropping blanks and duplicates.
    ///
    /// Falls back to [`DEFAULT_PALETTE`] if nothing usable remains.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut colors: Vec<Color> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || colors.iter().any(|c| c.name() == name) {
                continue;
            }
            colors.push(Color::new(name));
        }

        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Color> {
        self.colors.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Position of `color` in the palette, if present.
    #[must_use]
    pub fn position(&self, color: &Color) -> Option<usize> {
        self.colors.iter().position(|c| c == color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().copied().map(Color::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_order() {
        let palette = Palette::default();
        let names: Vec<&str> = palette.colors().iter().map(Color::name).collect();
        assert_eq!(names, vec!["Red", "Blue", "Green"]);
    }

    #[test]
    fn test_palette_from_names_dedups_and_trims() {
        let palette = Palette::from_names([" Black ", "", "White", "Black"]);
        let names: Vec<&str> = palette.colors().iter().map(Color::name).collect();
        assert_eq!(names, vec!["Black", "White"]);
    }

    #[test]
    fn test_palette_from_blank_names_falls_back() {
        let palette = Palette::from_names(["", "  "]);
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn test_same_car_ignores_catalog_color() {
        let a = Item::new("Ford", "Mustang").with_color("Green");
        let b = Item::new("Ford", "Mustang");
        assert!(a.same_car(&b));
        assert_ne!(a, b);
        assert_eq!(a.label(), "Ford Mustang");
    }
}
