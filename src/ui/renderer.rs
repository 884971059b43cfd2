//! Top-level rendering coordinator.
//!
//! Computes the view model from [`AppState`] and hands it to the components:
//! the landing screen or the catalog screen first, then the modal on top.
//!
//! # Example
//!
//! ```rust
//! use rentdesk::app::AppState;
//! use rentdesk::catalog::CatalogStore;
//! use rentdesk::domain::RentalPeriod;
//! use rentdesk::ui::{render, Theme};
//!
//! let catalog = CatalogStore::from_seed(vec![], RentalPeriod::default())?;
//! let state = AppState::new(catalog, Theme::default());
//! render(&state, 24, 80);
//! # Ok::<(), rentdesk::RentDeskError>(())
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a `rows` x `cols` pane to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if vm.landing.is_some() {
        components::render_landing_screen(vm, theme, cols, rows);
    } else {
        components::render_catalog_screen(vm, theme, cols, rows);
    }

    if let Some(modal) = &vm.modal {
        components::render_modal(modal, theme, rows, cols);
    }
}
