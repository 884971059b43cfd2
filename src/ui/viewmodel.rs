//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings only: dates are formatted,
//! text is truncated and highlight ranges are resolved.
//!
//! # Example
//!
//! ```rust
//! use rentdesk::ui::viewmodel::{FooterInfo, HeaderInfo, TableLayout, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " RentDesk ".to_string() },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     layout: TableLayout::User,
//!     display_items: vec![],
//!     selected_index: 0,
//!     empty_state: None,
//!     search_bar: None,
//!     landing: None,
//!     flash: None,
//!     modal: None,
//! };
//! assert!(vm.display_items.is_empty());
//! ```

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Column set of the catalog table.
    pub layout: TableLayout,

    /// Visible window of catalog rows.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Present on the landing screen only.
    pub landing: Option<LandingInfo>,

    /// Transient status line above the footer.
    pub flash: Option<FlashInfo>,

    /// Dialog drawn over everything else.
    pub modal: Option<ModalView>,
}

/// Which columns the catalog table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// NAME, CATEGORY, STATUS.
    User,
    /// NAME, STATUS, RENTER, CONTACT, DUE.
    Admin,
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,
    pub category: String,
    pub status: String,
    /// Renter name, empty when available. Only filled on the admin screen.
    pub renter: String,
    pub contact: String,
    /// Due date plus a relative note, e.g. `2026-10-22 (in 3d)`.
    pub due: String,
    pub is_available: bool,
    pub is_overdue: bool,
    pub is_selected: bool,
    /// Character ranges of `name` matched by the search query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Role picker content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingInfo {
    pub title: String,
    pub subtitle: String,
    /// `(key, label)` pairs.
    pub options: Vec<(String, String)>,
    /// Catalog summary line, e.g. `4 available, 2 rented (1 overdue)`.
    pub summary: String,
    /// Where the catalog came from.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashInfo {
    pub message: String,
    pub is_error: bool,
}

/// A dialog, flattened into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub lines: Vec<ModalLine>,
    /// Inline error under the content.
    pub error: Option<String>,
    /// Key hints on the last line of the box.
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalLine {
    /// Paragraph, wrapped to the box width.
    Text(String),
    /// Paragraph drawn in the accent color.
    Emphasis(String),
    /// Label and current value of an input.
    Field {
        label: String,
        value: String,
        focused: bool,
    },
    Checkbox {
        label: String,
        checked: bool,
        focused: bool,
    },
    Blank,
}
