//! Focus and input mode types.
//!
//! Selection state lives in [`Selection`](super::Selection); these enums only
//! decide how keys are interpreted:
//!
//! - [`Panel`] picks which selector the cursor keys move in.
//! - [`InputMode`] switches between plain navigation and catalog search.

/// Selector panel holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// The car list. Always available.
    #[default]
    Cars,

    /// The color swatches. Only focusable once a car is chosen.
    Colors,
}

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query.
    Typing,

    /// Keys move through the filtered cars; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and activation keys.
    #[default]
    Normal,

    /// Catalog search, filtering the car list.
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// True while typed characters belong to the query.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}
