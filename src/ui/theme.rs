//! Color themes and ANSI escape sequence generation.
//!
//! Four Catppuccin variants ship with the plugin (`catppuccin-mocha` is the
//! default); custom themes use the same TOML schema:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! chosen_fg = "#a6e3a1"
//! preview_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//!
//! [colors.swatches]
//! Red = "#f38ba8"
//! ```
//!
//! Swatches map palette color names to the hex value drawn in the color
//! selector. Names missing from the table are drawn in `text_normal`.

use crate::domain::error::{CarpickerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in theme names, in the order they are documented.
pub const BUILTIN_THEMES: [&str; 4] = [
    "catppuccin-mocha",
    "catppuccin-latte",
    "catppuccin-frappe",
    "catppuccin-macchiato",
];

/// A named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,

    /// Cursor row / swatch foreground.
    pub selection_fg: String,
    /// Cursor row / swatch background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer and secondary text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Marker for the car or color that is actually chosen.
    pub chosen_fg: String,

    /// Preview summary line.
    pub preview_fg: String,

    /// Asset failures.
    pub error_fg: String,

    #[serde(default)]
    pub swatches: BTreeMap<String, String>,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// ```
    /// use carpicker::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").map(|t| t.name), Some("catppuccin-latte".to_string()));
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CarpickerError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CarpickerError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| CarpickerError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Hex color used to draw the swatch for a palette entry.
    #[must_use]
    pub fn swatch(&self, color_name: &str) -> &str {
        self.colors
            .swatches
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(color_name))
            .map_or(self.colors.text_normal.as_str(), |(_, hex)| hex.as_str())
    }

    /// Parses `#rrggbb`; anything malformed renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_all_builtin_themes_parse() {
        for name in BUILTIN_THEMES {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
            assert_eq!(theme.colors.swatches.len(), 3);
        }
    }

    #[test]
    fn test_fg_bg_escapes() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("00ff00"), "\u{1b}[48;2;0;255;0m");
        assert_eq!(Theme::fg("nonsense"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn test_swatch_lookup_is_case_insensitive_with_fallback() {
        let theme = Theme::default();
        assert_eq!(theme.swatch("green"), "#a6e3a1");
        assert_eq!(theme.swatch("Chartreuse"), theme.colors.text_normal);
    }

    #[test]
    fn test_from_file_round_trip() {
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = ").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(CarpickerError::Theme(_))));
    }
}
