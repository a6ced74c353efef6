//! Color swatches for the selected car.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColorSelectorView, Swatch};

/// Renders the color selector below the car list.
///
/// ```text
///
///   Select a Color for your Toyota Camry
///   [ Red ] [●Blue ] [ Green ]
/// ```
///
/// The title is dimmed unless the selector has focus. Each swatch is drawn
/// in its own color, except the cursor swatch which takes the selection
/// colors.
///
/// # Parameters
///
/// * `row` - Row of the blank spacer line (1-indexed)
/// * `view` - Title and swatches from the view model
/// * `theme` - Active color theme (swatch colors come from it)
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next free row (`row + 3`).
pub fn render_color_selector(row: usize, view: &ColorSelectorView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row + 1, 1);
    print!("{}", Theme::bold());
    let title_color = if view.focused {
        &theme.colors.header_fg
    } else {
        &theme.colors.text_dim
    };
    print!("{}", Theme::fg(title_color));
    print!("  {}", view.title);
    print!("{}", " ".repeat(cols.saturating_sub(2 + char_len(&view.title))));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("  ");
    let mut used = 2;
    for swatch in &view.swatches {
        let label = swatch_label(swatch);
        if swatch.is_cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(theme.swatch(&swatch.name)));
        }
        if swatch.is_chosen {
            print!("{}", Theme::bold());
        }
        print!("{label}");
        print!("{} ", Theme::reset());
        used += char_len(&label) + 1;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    row + 3
}

/// `[ Red ]`, or `[●Red ]` for the chosen color.
fn swatch_label(swatch: &Swatch) -> String {
    let marker = if swatch.is_chosen { '●' } else { ' ' };
    format!("[{marker}{} ]", swatch.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_label_marks_chosen() {
        let mut swatch = Swatch {
            name: "Blue".to_string(),
            is_cursor: true,
            is_chosen: false,
        };
        assert_eq!(swatch_label(&swatch), "[ Blue ]");

        swatch.is_chosen = true;
        assert_eq!(swatch_label(&swatch), "[●Blue ]");
    }
}
