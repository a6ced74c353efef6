//! Keybinding hints.

use crate::ui::helpers::render_centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the dimmed hint line. Returns the next free row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    render_centered_line(row, &footer.keybindings, &theme.colors.text_dim, cols);
    row + 1
}
