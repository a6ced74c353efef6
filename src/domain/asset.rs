//! Preview asset identity, requests and load outcomes.
//!
//! The preview asks the host to load one image per car. Loading happens on the
//! worker thread; its outcome is reported back as an [`AssetOutcome`] and
//! folded into an [`AssetStatus`] that is independent of the selection.

use super::item::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width hint for the preview asset, in pixels.
pub const PREVIEW_WIDTH: u32 = 500;

/// Height hint for the preview asset, in pixels.
pub const PREVIEW_HEIGHT: u32 = 300;

/// File extensions probed for an asset, in order.
pub const ASSET_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Size hints handed to the rendering layer and the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self {
            width: PREVIEW_WIDTH,
            height: PREVIEW_HEIGHT,
        }
    }
}

impl fmt::Display for PreviewSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Identifies the asset for a make and model, e.g. `toyota-camry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey(String);

impl AssetKey {
    /// Derives the key from an item's make and model.
    ///
    /// ```
    /// use carpicker::domain::{AssetKey, Item};
    ///
    /// let key = AssetKey::for_item(&Item::new("Alfa Romeo", "Giulia"));
    /// assert_eq!(key.as_str(), "alfa-romeo-giulia");
    /// ```
    #[must_use]
    pub fn for_item(item: &Item) -> Self {
        let raw = format!("{} {}", item.make, item.model).to_lowercase();
        let mut key = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c.is_alphanumeric() {
                key.push(c);
            } else if !key.is_empty() && !key.ends_with('-') {
                key.push('-');
            }
        }
        while key.ends_with('-') {
            key.pop();
        }
        Self(key)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Candidate file names, one per entry in [`ASSET_EXTENSIONS`].
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        ASSET_EXTENSIONS
            .iter()
            .map(|ext| format!("{}.{ext}", self.0))
            .collect()
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request to load the preview asset for one car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRequest {
    pub key: AssetKey,
    /// Directory the worker looks in, already expanded for the sandbox.
    pub asset_dir: String,
    pub size: PreviewSize,
}

/// Result of an asset load, carrying the key it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetOutcome {
    Loaded {
        key: AssetKey,
        file_name: String,
        byte_len: u64,
        size: PreviewSize,
    },
    Failed {
        key: AssetKey,
        message: String,
    },
}

impl AssetOutcome {
    #[must_use]
    pub const fn key(&self) -> &AssetKey {
        match self {
            Self::Loaded { key, .. } | Self::Failed { key, .. } => key,
        }
    }
}

/// Load state of the asset for the current preview.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssetStatus {
    /// Nothing requested since the last car change.
    #[default]
    Idle,
    Loading(AssetKey),
    Loaded {
        key: AssetKey,
        file_name: String,
        byte_len: u64,
    },
    Failed {
        key: AssetKey,
        message: String,
    },
}

impl AssetStatus {
    /// Key of the asset this status is about, if any.
    #[must_use]
    pub const fn key(&self) -> Option<&AssetKey> {
        match self {
            Self::Idle => None,
            Self::Loading(key) | Self::Loaded { key, .. } | Self::Failed { key, .. } => Some(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_key_for_builtin_cars() {
        assert_eq!(AssetKey::for_item(&Item::new("Toyota", "Camry")).as_str(), "toyota-camry");
        assert_eq!(AssetKey::for_item(&Item::new("Ford", "Mustang")).as_str(), "ford-mustang");
    }

    #[test]
    fn test_asset_key_collapses_punctuation() {
        let key = AssetKey::for_item(&Item::new(" Mercedes-Benz ", "C  Class!"));
        assert_eq!(key.as_str(), "mercedes-benz-c-class");
    }

    #[test]
    fn test_asset_key_file_names() {
        let key = AssetKey::for_item(&Item::new("Honda", "Accord"));
        assert_eq!(
            key.file_names(),
            vec!["honda-accord.jpg", "honda-accord.jpeg", "honda-accord.png"]
        );
    }

    #[test]
    fn test_preview_size_defaults() {
        let size = PreviewSize::default();
        assert_eq!((size.width, size.height), (500, 300));
        assert_eq!(size.to_string(), "500x300");
    }
}
