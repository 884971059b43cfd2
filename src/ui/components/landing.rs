//! Landing screen renderer: title, role options, catalog summary.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LandingInfo;

fn centered(row: usize, text: &str, style: &str, cols: usize) {
    let len = char_len(text);
    let padding = cols.saturating_sub(len) / 2;
    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

/// Renders the landing content below the header, starting at `row`.
pub fn render_landing(row: usize, landing: &LandingInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row + 1;

    let title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg));
    centered(current_row, &landing.title, &title_style, cols);
    current_row += 1;
    centered(current_row, &landing.subtitle, &Theme::fg(&theme.colors.text_dim), cols);
    current_row += 2;

    for (key, label) in &landing.options {
        let line = format!("[{key}]  {label}");
        centered(current_row, &line, &Theme::fg(&theme.colors.text_normal), cols);
        current_row += 1;
    }
    current_row += 1;

    centered(current_row, &landing.summary, &Theme::fg(&theme.colors.empty_state_fg), cols);
    current_row += 1;
    let source_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    centered(current_row, &landing.source, &source_style, cols);

    current_row + 1
}
