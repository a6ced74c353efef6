//! The car -> color -> preview selection state machine.
//!
//! ```text
//!   NoSelection ──select_item──▶ ItemChosen ──select_color──▶ FullSelection
//!                                   ▲  ▲                          │  │
//!                                   │  └──────select_item─────────┘  │
//!                                   └─select_item            select_color
//! ```
//!
//! Choosing a car always lands in `ItemChosen`, dropping any chosen color.
//! Choosing a color needs a car; without one the call is rejected with
//! [`SelectionError::NoItemSelected`] and nothing changes. There is no exit
//! state.

use crate::domain::{Color, Item, SelectionError};

/// Which step of the flow the user is on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoSelection,
    ItemChosen(Item),
    FullSelection(Item, Color),
}

impl Selection {
    /// Chooses a car from any state, clearing the color.
    pub fn select_item(&mut self, item: Item) {
        tracing::debug!(make = %item.make, model = %item.model, from = ?self.phase(), "car selected");
        *self = Self::ItemChosen(item);
    }

    /// Chooses a color for the selected car.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NoItemSelected`] in `NoSelection`; the state is
    /// left as it was.
    pub fn select_color(&mut self, color: Color) -> Result<(), SelectionError> {
        let item = match std::mem::take(self) {
            Self::NoSelection => {
                tracing::warn!(color = %color, "color chosen without a car");
                return Err(SelectionError::NoItemSelected);
            }
            Self::ItemChosen(item) | Self::FullSelection(item, _) => item,
        };

        tracing::debug!(color = %color, "color selected");
        *self = Self::FullSelection(item, color);
        Ok(())
    }

    #[must_use]
    pub const fn selected_item(&self) -> Option<&Item> {
        match self {
            Self::NoSelection => None,
            Self::ItemChosen(item) | Self::FullSelection(item, _) => Some(item),
        }
    }

    #[must_use]
    pub const fn selected_color(&self) -> Option<&Color> {
        match self {
            Self::FullSelection(_, color) => Some(color),
            Self::NoSelection | Self::ItemChosen(_) => None,
        }
    }

    /// Both halves of a completed selection.
    #[must_use]
    pub const fn full(&self) -> Option<(&Item, &Color)> {
        match self {
            Self::FullSelection(item, color) => Some((item, color)),
            Self::NoSelection | Self::ItemChosen(_) => None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::NoSelection => Phase::NoSelection,
            Self::ItemChosen(_) => Phase::ItemChosen,
            Self::FullSelection(..) => Phase::FullSelection,
        }
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        Visibility::of(self)
    }
}

/// Data-free view of [`Selection`], for logs and footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoSelection,
    ItemChosen,
    FullSelection,
}

/// Which selector panels are rendered for a given selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub car_selector: bool,
    pub color_selector: bool,
    pub preview: bool,
}

impl Visibility {
    #[must_use]
    pub const fn of(selection: &Selection) -> Self {
        Self {
            car_selector: true,
            color_selector: selection.selected_item().is_some(),
            preview: selection.full().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camry() -> Item {
        Item::new("Toyota", "Camry")
    }

    fn accord() -> Item {
        Item::new("Honda", "Accord")
    }

    #[test]
    fn test_initial_state_is_empty() {
        let selection = Selection::default();
        assert_eq!(selection.phase(), Phase::NoSelection);
        assert!(selection.selected_item().is_none());
        assert!(selection.selected_color().is_none());
    }

    #[test]
    fn test_select_item_always_clears_color() {
        let mut selection = Selection::default();
        let sequence = [accord(), camry(), camry(), accord()];

        for item in sequence {
            selection.select_item(item.clone());
            assert_eq!(selection.selected_item(), Some(&item));
            assert!(selection.selected_color().is_none());

            selection.select_color(Color::new("Blue")).unwrap();
            assert_eq!(selection.phase(), Phase::FullSelection);
        }

        selection.select_item(camry());
        assert_eq!(selection, Selection::ItemChosen(camry()));
    }

    #[test]
    fn test_select_color_without_item_is_rejected() {
        let mut selection = Selection::default();
        let err = selection.select_color(Color::new("Red")).unwrap_err();

        assert_eq!(err, SelectionError::NoItemSelected);
        assert_eq!(selection, Selection::NoSelection);
        assert!(selection.selected_color().is_none());
    }

    #[test]
    fn test_select_color_is_idempotent() {
        let mut once = Selection::default();
        once.select_item(camry());
        once.select_color(Color::new("Green")).unwrap();

        let mut twice = once.clone();
        twice.select_color(Color::new("Green")).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_reselecting_color_updates_value() {
        let mut selection = Selection::default();
        selection.select_item(camry());
        selection.select_color(Color::new("Green")).unwrap();
        selection.select_color(Color::new("Red")).unwrap();

        assert_eq!(selection.full(), Some((&camry(), &Color::new("Red"))));
    }

    #[test]
    fn test_visibility_law() {
        let mut selection = Selection::default();
        assert_eq!(
            selection.visibility(),
            Visibility { car_selector: true, color_selector: false, preview: false }
        );

        selection.select_item(camry());
        assert_eq!(
            selection.visibility(),
            Visibility { car_selector: true, color_selector: true, preview: false }
        );

        selection.select_color(Color::new("Green")).unwrap();
        assert_eq!(
            selection.visibility(),
            Visibility { car_selector: true, color_selector: true, preview: true }
        );

        selection.select_item(accord());
        assert_eq!(
            selection.visibility(),
            Visibility { car_selector: true, color_selector: true, preview: false }
        );
    }
}
