//! Car selector rows.
//!
//! One line per visible car. The cursor row gets the selection background,
//! the chosen car gets a marker in the two-column gutter, and characters
//! matched by the search query are highlighted.

use crate::ui::helpers::{self, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CarRow;

/// Marker drawn in the gutter of the chosen car.
const CHOSEN_MARKER: &str = "● ";
const GUTTER_WIDTH: usize = 2;

/// Renders the visible car rows starting at the specified row.
///
/// ```text
///   Honda Accord
/// ● Toyota Camry      <- chosen
///   Ford Mustang      <- cursor (selection background)
/// ```
///
/// # Parameters
///
/// * `row` - First row to draw on (1-indexed)
/// * `rows` - Windowed car rows from the view model
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns; each line is padded to it
///
/// # Returns
///
/// The next free row (`row + rows.len()`).
pub fn render_car_rows(row: usize, rows: &[CarRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for car in rows {
        current_row = render_car_row(current_row, car, theme, cols);
    }
    current_row
}

/// Renders the hint shown when a search hides every car.
pub fn render_no_matches(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}{message}", " ".repeat(GUTTER_WIDTH));
    print!("{}", " ".repeat(cols.saturating_sub(GUTTER_WIDTH + char_len(message))));
    print!("{}", Theme::reset());
    row + 1
}

fn render_car_row(row: usize, car: &CarRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if car.is_cursor {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    if car.is_chosen {
        if !car.is_cursor {
            print!("{}", Theme::fg(&theme.colors.chosen_fg));
        }
        print!("{CHOSEN_MARKER}");
        print!("{base}");
    } else {
        print!("{}", " ".repeat(GUTTER_WIDTH));
    }

    helpers::render_highlighted_text(&car.label, &car.highlight_ranges, theme, &base);

    let line_len = GUTTER_WIDTH + char_len(&car.label);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());

    row + 1
}
