//! Display-ready snapshots of the application state.
//!
//! `AppState::compute_viewmodel` builds a [`UIViewModel`]; components only
//! read it. Panels that must not exist for the current selection are `None`,
//! and the color and preview views can only be built from the selection data
//! they require.

use crate::domain::{AssetStatus, Color, Item, Palette, PreviewSize};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while catalog search is active.
    pub search_bar: Option<SearchBarInfo>,

    pub car_list: CarListView,

    /// Present iff a car is selected.
    pub color_selector: Option<ColorSelectorView>,

    /// Present iff both a car and a color are selected.
    pub preview: Option<PreviewView>,

    pub footer: FooterInfo,
}

/// The car selector: either the empty-catalog affordance or the item rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarListView {
    /// The catalog has no items at all.
    Empty(EmptyState),

    /// The catalog has items; `rows` is the visible window of the filtered list.
    Items {
        rows: Vec<CarRow>,
        /// Set when a search filter hides every item.
        no_matches: Option<String>,
        focused: bool,
    },
}

/// One activation row in the car selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarRow {
    pub label: String,
    /// Keyboard cursor is on this row.
    pub is_cursor: bool,
    /// This car is the current selection.
    pub is_chosen: bool,
    /// Matched character ranges `(start, end)` in `label`, in chars.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// The color selector for the selected car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSelectorView {
    pub title: String,
    pub swatches: Vec<Swatch>,
    pub focused: bool,
}

impl ColorSelectorView {
    /// Builds the selector; `chosen` marks only a color the user actually picked.
    #[must_use]
    pub fn new(item: &Item, palette: &Palette, chosen: Option<&Color>, cursor: Option<usize>, focused: bool) -> Self {
        let swatches = palette
            .colors()
            .iter()
            .enumerate()
            .map(|(idx, color)| Swatch {
                name: color.name().to_string(),
                is_cursor: cursor == Some(idx),
                is_chosen: chosen == Some(color),
            })
            .collect();

        Self {
            title: format!("Select a Color for your {} {}", item.make, item.model),
            swatches,
            focused,
        }
    }
}

/// One activation control in the color selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub name: String,
    pub is_cursor: bool,
    pub is_chosen: bool,
}

/// Summary and image status for a completed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub summary: String,
    pub image: ImageLine,
}

impl PreviewView {
    /// Text is derived from the selection alone; the asset status only feeds
    /// the image line.
    #[must_use]
    pub fn new(item: &Item, color: &Color, asset: &AssetStatus, size: PreviewSize) -> Self {
        Self {
            summary: preview_summary(item, color),
            image: ImageLine::new(item, asset, size),
        }
    }
}

/// `"Your selected car is a {make} {model} painted {color}."`
#[must_use]
pub fn preview_summary(item: &Item, color: &Color) -> String {
    format!("Your selected car is a {} {} painted {}.", item.make, item.model, color)
}

/// Rendering state of the preview image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Ready,
    Unavailable,
}

/// Status line describing the preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLine {
    pub text: String,
    pub state: ImageState,
}

impl ImageLine {
    fn new(item: &Item, asset: &AssetStatus, size: PreviewSize) -> Self {
        let alt = item.label();
        match asset {
            AssetStatus::Loaded { file_name, byte_len, .. } => Self {
                text: format!("[{alt}] {file_name} ({byte_len} bytes, shown at {size})"),
                state: ImageState::Ready,
            },
            AssetStatus::Failed { message, .. } => Self {
                text: format!("[{alt}] image unavailable: {message}"),
                state: ImageState::Unavailable,
            },
            AssetStatus::Idle | AssetStatus::Loading(_) => Self {
                text: format!("[{alt}] loading image ({size})..."),
                state: ImageState::Pending,
            },
        }
    }
}

/// Title bar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Keybinding hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown in place of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search input box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssetKey;

    #[test]
    fn test_preview_summary_text() {
        let summary = preview_summary(&Item::new("Toyota", "Camry"), &Color::new("Green"));
        assert_eq!(summary, "Your selected car is a Toyota Camry painted Green.");
    }

    #[test]
    fn test_color_selector_marks_only_real_choice() {
        let item = Item::new("Honda", "Accord");
        let view = ColorSelectorView::new(&item, &Palette::default(), None, Some(0), true);

        assert_eq!(view.title, "Select a Color for your Honda Accord");
        assert!(view.swatches[0].is_cursor);
        assert!(view.swatches.iter().all(|s| !s.is_chosen));

        let blue = Color::new("Blue");
        let view = ColorSelectorView::new(&item, &Palette::default(), Some(&blue), None, false);
        let chosen: Vec<&str> = view.swatches.iter().filter(|s| s.is_chosen).map(|s| s.name.as_str()).collect();
        assert_eq!(chosen, vec!["Blue"]);
    }

    #[test]
    fn test_failed_asset_keeps_summary() {
        let item = Item::new("Ford", "Mustang");
        let status = AssetStatus::Failed {
            key: AssetKey::for_item(&item),
            message: "no image".to_string(),
        };

        let view = PreviewView::new(&item, &Color::new("Red"), &status, PreviewSize::default());
        assert_eq!(view.summary, "Your selected car is a Ford Mustang painted Red.");
        assert_eq!(view.image.state, ImageState::Unavailable);
        assert!(view.image.text.contains("no image"));
    }
}
