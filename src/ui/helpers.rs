//! Shared rendering utilities.
//!
//! Everything here works in chars, not bytes, so labels with non-ASCII
//! makes or models line up.

use crate::ui::theme::Theme;

/// Moves the terminal cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in chars.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Left and right padding that centers `text_len` chars in `cols`.
///
/// ```
/// use carpicker::ui::helpers::center_padding;
///
/// assert_eq!(center_padding(4, 10), (3, 3));
/// assert_eq!(center_padding(5, 10), (2, 3));
/// assert_eq!(center_padding(20, 10), (0, 0));
/// ```
#[must_use]
pub const fn center_padding(text_len: usize, cols: usize) -> (usize, usize) {
    let left = cols.saturating_sub(text_len) / 2;
    (left, cols.saturating_sub(left + text_len))
}

/// Prints `text` centered on `row` in `color`, padded to the full width.
pub fn render_centered_line(row: usize, text: &str, color: &str, cols: usize) {
    let (left, right) = center_padding(char_len(text), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(left));
    print!("{text}");
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());
}

/// Prints `text` with the char ranges in `ranges` drawn as match highlights.
///
/// `restore` is re-applied after each highlight so the rest of the line keeps
/// its colors (for example the cursor row background).
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    print!("{remaining}");
}
