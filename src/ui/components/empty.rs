//! Empty-catalog message.

use crate::ui::helpers::render_centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Leaves `row` blank, then renders the message with a dimmed hint under it.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    render_centered_line(row + 1, &empty.message, &theme.colors.empty_state_fg, cols);

    print!("{}", Theme::dim());
    render_centered_line(row + 2, &empty.subtitle, &theme.colors.text_dim, cols);

    row + 3
}
