//! Screen, modal and input mode types.
//!
//! The view coordinator is a small state machine over three enums:
//!
//! - [`Screen`]: which top-level view is shown (landing, user, admin)
//! - [`Modal`]: an optional dialog drawn on top of the screen
//! - [`InputMode`]: how list keys are interpreted (normal or search)
//!
//! A modal captures all input while it is open.
//!
//! # Example
//!
//! ```rust
//! use rentdesk::app::modes::{InputMode, Screen, SearchFocus};
//!
//! let screen = Screen::User;
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! assert!(screen.shows_catalog());
//! assert_ne!(input_mode, InputMode::Normal);
//! ```

use super::forms::{EditForm, LoginForm, RentForm, ReminderView};

/// Top-level view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Role picker.
    #[default]
    Landing,
    /// Requester view: browse the catalog and rent available items.
    User,
    /// Administrator view, reached through the access code.
    Admin,
}

impl Screen {
    /// True for the screens that list the catalog.
    #[must_use]
    pub const fn shows_catalog(self) -> bool {
        matches!(self, Self::User | Self::Admin)
    }
}

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Typing into the query.
    Typing,
    /// Moving through the filtered results.
    Navigating,
}

/// How list input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search(SearchFocus),
}

/// Dialog drawn over the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Access code prompt guarding the admin screen.
    AdminLogin(LoginForm),
    /// Rental request for one available item.
    RentForm(RentForm),
    /// Confirmation after a successful rental.
    RentSuccess {
        item_name: String,
        /// Expected return date, already formatted.
        return_date: String,
    },
    /// Metadata editor for an existing or a new item.
    EditItem(EditForm),
    /// Composed reminder text with copy and close.
    Reminder(ReminderView),
    /// "Reset the catalog to its seed?" prompt.
    ConfirmReset,
}

impl Modal {
    /// Short name used in tracing fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AdminLogin(_) => "admin_login",
            Self::RentForm(_) => "rent_form",
            Self::RentSuccess { .. } => "rent_success",
            Self::EditItem(_) => "edit_item",
            Self::Reminder(_) => "reminder",
            Self::ConfirmReset => "confirm_reset",
        }
    }
}
