//! Catalog table renderer.
//!
//! Two column sets share one row renderer:
//!
//! ```text
//! User:   NAME                        CATEGORY              STATUS
//! Admin:  NAME                        STATUS    RENTER            CONTACT       DUE
//! ```
//!
//! Status text is colored by availability (overdue wins) except on the
//! selected row, which keeps the selection colors throughout.

use crate::ui::helpers::{self, char_len, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, TableLayout};

const NAME_WIDTH: usize = 28;
const CATEGORY_WIDTH: usize = 22;
const STATUS_WIDTH: usize = 10;
const RENTER_WIDTH: usize = 18;
const CONTACT_WIDTH: usize = 14;

/// Renders the column headers and returns the next row.
pub fn render_table_headers(row: usize, layout: TableLayout, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    match layout {
        TableLayout::User => print!("{}{}STATUS", pad("NAME", NAME_WIDTH), pad("CATEGORY", CATEGORY_WIDTH)),
        TableLayout::Admin => print!(
            "{}{}{}{}DUE",
            pad("NAME", NAME_WIDTH),
            pad("STATUS", STATUS_WIDTH),
            pad("RENTER", RENTER_WIDTH),
            pad("CONTACT", CONTACT_WIDTH)
        ),
    }
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row` and returns the row after the last one.
pub fn render_table_rows(row: usize, items: &[DisplayItem], layout: TableLayout, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, layout, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, layout: TableLayout, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected, &base);
    print!("{}", " ".repeat(NAME_WIDTH.saturating_sub(char_len(&item.name))));

    let status = status_cell(item, theme, &base, STATUS_WIDTH);
    let line_len = match layout {
        TableLayout::User => {
            print!("{}", pad(&item.category, CATEGORY_WIDTH));
            print!("{status}");
            NAME_WIDTH + CATEGORY_WIDTH + STATUS_WIDTH
        }
        TableLayout::Admin => {
            print!("{status}");
            print!("{}", pad(&item.renter, RENTER_WIDTH));
            print!("{}", pad(&item.contact, CONTACT_WIDTH));
            if item.is_overdue && !item.is_selected {
                print!("{}{}{base}", Theme::fg(&theme.colors.overdue_fg), item.due);
            } else {
                print!("{}", item.due);
            }
            NAME_WIDTH + STATUS_WIDTH + RENTER_WIDTH + CONTACT_WIDTH + char_len(&item.due)
        }
    };

    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Status text padded to `width`, colored unless the row is selected.
fn status_cell(item: &DisplayItem, theme: &Theme, base: &str, width: usize) -> String {
    let text = pad(&item.status, width);
    if item.is_selected {
        return text;
    }
    let color = if item.is_overdue {
        &theme.colors.overdue_fg
    } else if item.is_available {
        &theme.colors.available_fg
    } else {
        &theme.colors.rented_fg
    };
    format!("{}{text}{base}", Theme::fg(color))
}
