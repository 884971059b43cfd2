//! Composable UI component renderers.
//!
//! Each component draws one part of the frame at an explicit row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Centered title bar
//! - [`footer`]: Keybinding hints and the flash line
//! - [`search`]: Search input box
//! - [`table`]: Catalog rows in the user or admin column set
//! - [`empty`]: Empty state message
//! - [`landing`]: Role picker
//! - [`modal`]: Dialog overlay
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search box, 3 rows]   (search mode only)
//! [Table Headers]
//! [Table Rows]
//! ...
//! [Flash]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod landing;
mod modal;
mod search;
mod table;

pub use modal::render_modal;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::{render_flash, render_footer};
use header::render_header;
use landing::render_landing;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the bottom three rows: flash, border, footer.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.max(3);
    render_flash(footer_row - 2, vm.flash.as_ref(), theme, cols);
    render_border(footer_row - 1, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Header, role options, and catalog summary.
pub fn render_landing_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(landing) = &vm.landing {
        render_landing(current_row, landing, theme, cols);
    }
    render_bottom(vm, theme, cols, rows);
}

/// Header, optional search box, then the table or the empty state.
pub fn render_catalog_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, vm.layout, theme);
        let _current_row = render_table_rows(current_row, &vm.display_items, vm.layout, theme, cols);
    }

    render_bottom(vm, theme, cols, rows);
}
