//! Composable UI component renderers.
//!
//! Each component prints one section at a given row and returns the next
//! free row, so [`render_layout`] can stack them:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]      search mode only
//! [Car rows | no-match hint | empty-catalog message]
//! [Color selector - 3 lines]  once a car is chosen
//! [Preview - 3 lines]         once a color is chosen
//! [Border]
//! [Footer]
//! ```

mod car_list;
mod color_selector;
mod empty;
mod footer;
mod header;
mod preview;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CarListView, UIViewModel};

use car_list::{render_car_rows, render_no_matches};
use color_selector::render_color_selector;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use preview::render_preview;
use search::render_search_bar;

/// Renders a horizontal rule. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every section present in `vm`, top to bottom.
///
/// Sections are stacked from row 2. The bottom border and footer are pinned
/// to `rows - 2` and `rows - 1` whatever the content height, so the car
/// list must already be windowed to fit (see
/// [`CHROME_ROWS`](crate::app::state::CHROME_ROWS)).
///
/// # Parameters
///
/// * `vm` - View model for this frame
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
/// * `rows` - Pane height in rows
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    current_row = match &vm.car_list {
        CarListView::Empty(empty) => render_empty_state(current_row, empty, theme, cols),
        CarListView::Items { rows: cars, no_matches, .. } => {
            let next = render_car_rows(current_row, cars, theme, cols);
            no_matches
                .as_deref()
                .map_or(next, |message| render_no_matches(next, message, theme, cols))
        }
    };

    if let Some(colors) = &vm.color_selector {
        current_row = render_color_selector(current_row, colors, theme, cols);
    }

    if let Some(preview) = &vm.preview {
        let _current_row = render_preview(current_row, preview, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
