//! Footer and flash line renderers.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FlashInfo, FooterInfo};

/// Renders the dimmed, centered keybinding hints and returns the next row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = char_len(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the flash line, or clears it when there is nothing to show.
pub fn render_flash(row: usize, flash: Option<&FlashInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(flash) = flash else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let (marker, color) = if flash.is_error {
        ("✗", &theme.colors.flash_error_fg)
    } else {
        ("✓", &theme.colors.flash_info_fg)
    };
    let text = truncate(&format!(" {marker} {}", flash.message), cols);

    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&text))));
    print!("{}", Theme::reset());
    row + 1
}
