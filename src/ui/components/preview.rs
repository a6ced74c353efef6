//! Selection summary and preview image status.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ImageState, PreviewView};

/// Renders the preview once both a car and a color are chosen.
///
/// ```text
///
///   Your selected car is a Toyota Camry painted Red.
///   [Toyota Camry] loading image (500x300)...
/// ```
///
/// The image line uses the dim color while pending and the error color
/// when the image is unavailable.
///
/// # Parameters
///
/// * `row` - Row of the blank spacer line (1-indexed)
/// * `view` - Summary and image line from the view model
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next free row (`row + 3`).
pub fn render_preview(row: usize, view: &PreviewView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row + 1, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.preview_fg));
    print!("  {}", view.summary);
    print!("{}", " ".repeat(cols.saturating_sub(2 + char_len(&view.summary))));
    print!("{}", Theme::reset());

    let image_color = match view.image.state {
        ImageState::Ready => &theme.colors.chosen_fg,
        ImageState::Pending => &theme.colors.text_dim,
        ImageState::Unavailable => &theme.colors.error_fg,
    };

    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(image_color));
    print!("  {}", view.image.text);
    print!("{}", " ".repeat(cols.saturating_sub(2 + char_len(&view.image.text))));
    print!("{}", Theme::reset());

    row + 3
}
