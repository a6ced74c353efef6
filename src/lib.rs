//! Carpicker: a Zellij plugin for choosing a car and a paint color.
//!
//! The user walks a three-step flow:
//! - pick a car from the catalog (with fuzzy search),
//! - pick a color for it from the palette,
//! - read a summary of the choice next to its preview image.
//!
//! Preview images are loaded on a Zellij worker thread so the selection UI
//! never waits on the filesystem.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Selection state machine                          │
//! │  - Event handling, actions                          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ Worker Layer  │
//! │ (ui/)         │                     │ (worker/)     │
//! │ - Rendering   │                     │ - Asset loads │
//! │ - Theming     │                     │ - IPC bridge  │
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (catalog, items, colors, assets, errors)    │
//! │  Infrastructure (sandbox paths)                     │
//! │  Observability (file-based OTLP traces)             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/carpicker.wasm" {
//!     theme "catppuccin-mocha"
//!     catalog_file "~/.config/carpicker/cars.toml"
//!     asset_dir "~/Pictures/cars"
//!     palette "Red,Blue,Green,Silver"
//!     trace_level "debug"
//! }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, Panel, SearchFocus, Selection};
pub use domain::{CarpickerError, Catalog, Color, Item, Palette, Result, SelectionError};
pub use ui::Theme;

use infrastructure::expand_tilde;
use std::collections::BTreeMap;

/// Plugin configuration parsed from the Zellij plugin block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; see [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for traces. Default: `"info"`
    pub trace_level: Option<String>,

    /// TOML catalog replacing the built-in cars.
    pub catalog_file: Option<String>,

    /// Directory searched for `{key}.{jpg,jpeg,png}` preview images.
    ///
    /// Default: `~/.local/share/zellij/carpicker/assets`
    pub asset_dir: Option<String>,

    /// Colors offered by the color selector.
    pub palette: Palette,
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// `palette` is a comma-separated list; blank entries and duplicates are
    /// dropped, and an empty list falls back to the default palette.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use carpicker::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("palette".to_string(), "Silver, Black".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.palette.len(), 2);
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let palette = config
            .get("palette")
            .map_or_else(Palette::default, |s| Palette::from_names(s.split(',')));

        Self {
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            catalog_file: config.get("catalog_file").cloned(),
            asset_dir: config.get("asset_dir").cloned(),
            palette,
        }
    }
}

/// Builds the initial [`AppState`] from configuration.
///
/// Every configuration problem degrades to a default and is logged: an
/// unknown theme or unreadable theme file gives Catppuccin Mocha, an
/// unreadable catalog file gives the built-in catalog.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing carpicker plugin");

    let theme = load_theme(config);
    let catalog = load_catalog(config);

    tracing::info!(
        items = catalog.len(),
        colors = config.palette.len(),
        theme = %theme.name,
        "catalog ready"
    );

    let mut state = AppState::new(catalog, config.palette.clone(), theme);
    if let Some(asset_dir) = &config.asset_dir {
        state.asset_dir = expand_tilde(asset_dir);
    }
    state
}

fn load_theme(config: &Config) -> Theme {
    config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                builtin_theme(theme_name).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "using default theme");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    )
}

fn builtin_theme(name: &str) -> Result<Theme> {
    Theme::from_name(name).ok_or_else(|| {
        CarpickerError::Config(format!(
            "unknown theme \"{name}\", expected one of {}",
            ui::theme::BUILTIN_THEMES.join(", ")
        ))
    })
}

fn load_catalog(config: &Config) -> Catalog {
    let Some(catalog_file) = &config.catalog_file else {
        return Catalog::builtin();
    };

    Catalog::from_file(expand_tilde(catalog_file)).unwrap_or_else(|e| {
        tracing::warn!(catalog_file = %catalog_file, error = %e, "failed to load catalog, using built-in cars");
        Catalog::builtin()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_blank_palette_falls_back_to_default() {
        let mut map = BTreeMap::new();
        map.insert("palette".to_string(), " , ,".to_string());
        assert_eq!(Config::from_zellij(&map).palette, Palette::default());
    }

    #[test]
    fn test_initialize_with_defaults() {
        let state = initialize(&Config::default());
        assert_eq!(state.catalog, Catalog::builtin());
        assert_eq!(state.theme.name, "catppuccin-mocha");
        assert_eq!(state.selection, Selection::NoSelection);
    }

    #[test]
    fn test_initialize_unknown_theme_uses_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-mocha");
        assert!(matches!(builtin_theme("no-such-theme"), Err(CarpickerError::Config(_))));
    }

    #[test]
    fn test_initialize_loads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[items]]\nmake = \"Mazda\"\nmodel = \"MX-5\"\n").unwrap();

        let config = Config {
            catalog_file: Some(file.path().to_string_lossy().to_string()),
            asset_dir: Some("~/cars".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.catalog.items(), &[Item::new("Mazda", "MX-5")]);
        assert_eq!(state.asset_dir, "/host/cars");
    }

    #[test]
    fn test_initialize_empty_catalog_file_is_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config {
            catalog_file: Some(file.path().to_string_lossy().to_string()),
            ..Config::default()
        };
        assert!(initialize(&config).catalog.is_empty());
    }

    #[test]
    fn test_initialize_missing_catalog_falls_back() {
        let config = Config {
            catalog_file: Some("/nonexistent/cars.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).catalog, Catalog::builtin());
    }
}
