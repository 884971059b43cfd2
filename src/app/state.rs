//! Application state and view model computation.
//!
//! [`AppState`] is the single container for everything the plugin holds in
//! memory: the catalog store, the current screen and modal, search and
//! selection, the pending reminder request and the flash line. The event
//! handler mutates it and the renderer reads it through
//! [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use rentdesk::app::AppState;
//! use rentdesk::catalog::{available_item, CatalogStore};
//! use rentdesk::domain::RentalPeriod;
//! use rentdesk::ui::Theme;
//!
//! let catalog = CatalogStore::from_seed(
//!     vec![available_item("t1", "Tent", "Outdoor", "4-person")],
//!     RentalPeriod::default(),
//! )?;
//! let mut state = AppState::new(catalog, Theme::default());
//! state.apply_search_filter();
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.landing.is_some());
//! # Ok::<(), rentdesk::RentDeskError>(())
//! ```

use super::forms::{EditTarget, RentField, ReminderStatus};
use super::gate::AccessGate;
use super::modes::{InputMode, Modal, Screen, SearchFocus};
use crate::catalog::CatalogStore;
use crate::domain::{Clock, ItemId, RentalItem};
use crate::reminder::{GenerationClient, ReminderComposer, ReminderRequest, ReminderStrategy};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FlashInfo, FooterInfo, HeaderInfo, LandingInfo, ModalLine, ModalView,
    SearchBarInfo, TableLayout, UIViewModel,
};
use chrono::{DateTime, Duration, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Default in-flight limit for a generation request, in seconds.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 10;

/// Interval of the clock refresh timer, in seconds.
pub const REFRESH_INTERVAL_SECS: f64 = 60.0;

const NAME_COLUMN_WIDTH: usize = 28;

/// A generation request waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReminder {
    pub request_id: u64,
    pub item_id: ItemId,
    pub request: ReminderRequest,
    /// After this instant the fallback is used.
    pub deadline: DateTime<Utc>,
}

/// Transient status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub message: String,
    pub is_error: bool,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Owner of every rental item.
    pub catalog: CatalogStore,

    /// Source of "now" for rentals and overdue markers.
    pub clock: Clock,

    pub screen: Screen,

    /// Open dialog, if any. Captures all input.
    pub modal: Option<Modal>,

    pub input_mode: InputMode,

    pub search_query: String,

    /// Indices into `catalog.list()` matching the search query.
    pub filtered: Vec<usize>,

    /// Zero-based index within `filtered`.
    pub selected_index: usize,

    pub flash: Option<Flash>,

    pub gate: AccessGate,

    pub composer: ReminderComposer,

    pub strategy: ReminderStrategy,

    pub generator: GenerationClient,

    /// How long a generation request may stay in flight.
    pub generation_timeout: Duration,

    /// At most one generation request is in flight.
    pub pending_reminder: Option<PendingReminder>,

    next_request_id: u64,

    /// Human-readable origin of the catalog, shown on the landing screen.
    pub catalog_source: String,

    pub theme: Theme,
}

impl AppState {
    /// Creates a state on the landing screen with default settings.
    #[must_use]
    pub fn new(catalog: CatalogStore, theme: Theme) -> Self {
        let mut state = Self {
            catalog,
            clock: Clock::System,
            screen: Screen::Landing,
            modal: None,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            filtered: vec![],
            selected_index: 0,
            flash: None,
            gate: AccessGate::default(),
            composer: ReminderComposer::default(),
            strategy: ReminderStrategy::Template,
            generator: GenerationClient::default(),
            generation_timeout: Duration::seconds(DEFAULT_GENERATION_TIMEOUT_SECS as i64),
            pending_reminder: None,
            next_request_id: 0,
            catalog_source: "built-in demo catalog".to_string(),
            theme,
        };
        state.apply_search_filter();
        state
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Hands out a fresh id for a generation request.
    pub fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub fn flash_info(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash {
            message: message.into(),
            is_error: false,
        });
    }

    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash {
            message: message.into(),
            is_error: true,
        });
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered.len();
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The highlighted catalog item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&RentalItem> {
        self.filtered
            .get(self.selected_index)
            .and_then(|&index| self.catalog.list().get(index))
    }

    /// Recomputes `filtered` from the search query.
    ///
    /// Every whitespace-separated token must fuzzy-match the item's name or
    /// category. Called after each catalog mutation as well, so that renamed
    /// or registered items show up.
    pub fn apply_search_filter(&mut self) {
        use fuzzy_matcher::FuzzyMatcher;

        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_items = self.catalog.list().len(),
            query_len = self.search_query.len()
        )
        .entered();

        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let matcher = (!tokens.is_empty()).then(SkimMatcherV2::default);

        self.filtered = self
            .catalog
            .list()
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                matcher.as_ref().map_or(true, |m| {
                    let haystack = format!("{} {}", item.name, item.category).to_lowercase();
                    tokens.iter().all(|token| m.fuzzy_match(&haystack, token).is_some())
                })
            })
            .map(|(index, _)| index)
            .collect();

        if self.filtered.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered.len(), "search filter applied");
    }

    /// Leaves search mode and clears the query.
    pub fn clear_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_query.clear();
        self.apply_search_filter();
    }

    /// Computes the view model for a frame of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let now = self.now();
        let layout = if self.screen == Screen::Admin {
            TableLayout::Admin
        } else {
            TableLayout::User
        };

        let mut vm = UIViewModel {
            header: self.compute_header(now),
            footer: self.compute_footer(),
            layout,
            display_items: vec![],
            selected_index: 0,
            empty_state: None,
            search_bar: self.compute_search_bar(),
            landing: None,
            flash: self.flash.as_ref().map(|flash| FlashInfo {
                message: flash.message.clone(),
                is_error: flash.is_error,
            }),
            modal: self.modal.as_ref().map(|modal| self.compute_modal(modal)),
        };

        if self.screen == Screen::Landing {
            vm.landing = Some(self.compute_landing(now));
            return vm;
        }

        if self.filtered.is_empty() {
            vm.empty_state = Some(self.compute_empty_state());
            return vm;
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered.len());
        if visible_end - visible_start < available_rows && self.filtered.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = (matches!(self.input_mode, InputMode::Search(_)) && !self.search_query.is_empty())
            .then(SkimMatcherV2::default);

        vm.display_items = self.filtered[visible_start..visible_end]
            .iter()
            .enumerate()
            .filter_map(|(relative_idx, &index)| {
                let item = self.catalog.list().get(index)?;
                Some(self.compute_display_item(
                    item,
                    visible_start + relative_idx,
                    layout,
                    now,
                    cols,
                    matcher.as_ref(),
                ))
            })
            .collect();
        vm.selected_index = self.selected_index.saturating_sub(visible_start);

        vm
    }

    fn compute_display_item(
        &self,
        item: &RentalItem,
        absolute_idx: usize,
        layout: TableLayout,
        now: DateTime<Utc>,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let is_overdue = item.is_overdue(now);
        let name = truncate(&item.name, NAME_COLUMN_WIDTH.saturating_sub(2));
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(&name, m));

        let status = if is_overdue {
            "Overdue".to_string()
        } else {
            item.status().label().to_string()
        };

        let (renter, contact, due) = match (layout, item.renter()) {
            (TableLayout::Admin, Some(renter)) => (
                truncate(&renter.name, 16),
                renter.contact.clone(),
                format!(
                    "{} ({})",
                    self.composer.format_date(renter.expected_return_date),
                    due_note(item, now)
                ),
            ),
            _ => (String::new(), String::new(), String::new()),
        };

        DisplayItem {
            name,
            category: truncate(&item.category, cols.saturating_sub(NAME_COLUMN_WIDTH + 14).clamp(4, 20)),
            status,
            renter,
            contact,
            due,
            is_available: item.is_available(),
            is_overdue,
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Coalesces fuzzy match indices into `(start, end)` character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.search_query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self, now: DateTime<Utc>) -> HeaderInfo {
        let items = self.catalog.list();
        let title = match self.screen {
            Screen::Landing => " RentDesk ".to_string(),
            Screen::User => {
                let available = items.iter().filter(|item| item.is_available()).count();
                format!(" Rental Catalog ({available} of {} available) ", items.len())
            }
            Screen::Admin => {
                let rented = items.iter().filter(|item| !item.is_available()).count();
                let overdue = items.iter().filter(|item| item.is_overdue(now)).count();
                format!(" Admin Dashboard ({rented} rented, {overdue} overdue) ")
            }
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.screen, self.input_mode) {
            (Screen::Landing, _) => "u: rent items  a: admin  q: quit",
            (_, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (_, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: select"
            }
            (Screen::User, InputMode::Normal) => "j/k: navigate  /: search  Enter: rent  Esc: back  q: quit",
            (Screen::Admin, InputMode::Normal) => {
                "j/k: navigate  /: search  r: return  e: edit  n: new  m: notify  R: reset  Esc: log out"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        matches!(self.input_mode, InputMode::Search(_)).then(|| SearchBarInfo {
            query: self.search_query.clone(),
        })
    }

    fn compute_landing(&self, now: DateTime<Utc>) -> LandingInfo {
        let items = self.catalog.list();
        let available = items.iter().filter(|item| item.is_available()).count();
        let rented = items.len() - available;
        let overdue = items.iter().filter(|item| item.is_overdue(now)).count();

        LandingInfo {
            title: "RentDesk".to_string(),
            subtitle: format!("Item rentals for {}", self.composer.organization),
            options: vec![
                ("u".to_string(), "Rent an item".to_string()),
                ("a".to_string(), "Admin".to_string()),
            ],
            summary: format!("{available} available, {rented} rented ({overdue} overdue)"),
            source: format!("Catalog: {}", self.catalog_source),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.catalog.list().is_empty() {
            EmptyState {
                message: "The catalog is empty".to_string(),
                subtitle: if self.screen == Screen::Admin {
                    "Press 'n' to register an item".to_string()
                } else {
                    "Ask an administrator to register items".to_string()
                },
            }
        } else {
            EmptyState {
                message: "No items match your search".to_string(),
                subtitle: "Press ESC to clear the query".to_string(),
            }
        }
    }

    fn compute_modal(&self, modal: &Modal) -> ModalView {
        match modal {
            Modal::AdminLogin(form) => ModalView {
                title: "Admin access".to_string(),
                lines: vec![
                    ModalLine::Text("Enter the admin access code.".to_string()),
                    ModalLine::Blank,
                    ModalLine::Field {
                        label: "Code".to_string(),
                        value: form.masked(),
                        focused: true,
                    },
                ],
                error: form.error.clone(),
                hint: "Enter: confirm  Esc: cancel".to_string(),
            },
            Modal::RentForm(form) => ModalView {
                title: format!("Rent {}", form.item_name),
                lines: vec![
                    ModalLine::Text("Enter your details to rent this item.".to_string()),
                    ModalLine::Blank,
                    ModalLine::Field {
                        label: "Name".to_string(),
                        value: form.name.clone(),
                        focused: form.focus == RentField::Name,
                    },
                    ModalLine::Field {
                        label: "Contact".to_string(),
                        value: form.contact.clone(),
                        focused: form.focus == RentField::Contact,
                    },
                    ModalLine::Blank,
                    ModalLine::Checkbox {
                        label: format!("I understand the rental period is {} days", form.rental_days),
                        checked: form.period_acknowledged,
                        focused: form.focus == RentField::PeriodAck,
                    },
                    ModalLine::Checkbox {
                        label: "I agree to receive a return reminder".to_string(),
                        checked: form.notice_acknowledged,
                        focused: form.focus == RentField::NoticeAck,
                    },
                ],
                error: form.error.clone(),
                hint: if form.can_submit() {
                    "Tab: next  Space: tick  Enter: rent  Esc: cancel".to_string()
                } else {
                    "Tab: next  Space: tick  Esc: cancel".to_string()
                },
            },
            Modal::RentSuccess { item_name, return_date } => ModalView {
                title: "Rental complete".to_string(),
                lines: vec![
                    ModalLine::Emphasis(format!("{item_name} is yours.")),
                    ModalLine::Blank,
                    ModalLine::Text(format!("Please return it by {return_date}.")),
                ],
                error: None,
                hint: "Enter: close".to_string(),
            },
            Modal::EditItem(form) => {
                use super::forms::EditField;
                ModalView {
                    title: match form.target {
                        EditTarget::Existing(_) => "Edit item".to_string(),
                        EditTarget::New => "Register item".to_string(),
                    },
                    lines: vec![
                        ModalLine::Field {
                            label: "Name".to_string(),
                            value: form.name.clone(),
                            focused: form.focus == EditField::Name,
                        },
                        ModalLine::Field {
                            label: "Category".to_string(),
                            value: form.category.clone(),
                            focused: form.focus == EditField::Category,
                        },
                        ModalLine::Field {
                            label: "Description".to_string(),
                            value: form.description.clone(),
                            focused: form.focus == EditField::Description,
                        },
                    ],
                    error: form.error.clone(),
                    hint: "Tab: next  Enter: save  Esc: cancel".to_string(),
                }
            }
            Modal::Reminder(view) => {
                let (lines, hint) = match &view.status {
                    ReminderStatus::Composing => (
                        vec![ModalLine::Text(format!(
                            "Composing a reminder for {} ({})...",
                            view.renter_name, view.item_name
                        ))],
                        "Esc: close",
                    ),
                    ReminderStatus::Ready(reminder) => {
                        let mut lines = vec![ModalLine::Emphasis(reminder.text().to_string()), ModalLine::Blank];
                        lines.push(ModalLine::Text(
                            "Copy the text above and send it to the renter.".to_string(),
                        ));
                        (lines, "c: copy  Esc: close")
                    }
                };
                ModalView {
                    title: "Return reminder".to_string(),
                    lines,
                    error: None,
                    hint: hint.to_string(),
                }
            }
            Modal::ConfirmReset => ModalView {
                title: "Reset catalog".to_string(),
                lines: vec![ModalLine::Text(
                    "Restore every item to its initial state? Rentals and edits made since start-up are lost."
                        .to_string(),
                )],
                error: None,
                hint: "Enter: reset  Esc: cancel".to_string(),
            },
        }
    }

    /// Rows left for catalog entries after the chrome.
    ///
    /// Normal mode reserves 7 rows (blank, header, border, column header,
    /// flash, border, footer); search mode adds the 3-row search box.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(7),
            InputMode::Search(_) => total_rows.saturating_sub(10),
        }
    }
}

/// Relative due note for the admin table.
fn due_note(item: &RentalItem, now: DateTime<Utc>) -> String {
    match item.days_until_due(now) {
        None => String::new(),
        Some(days) if item.is_overdue(now) => {
            if days <= -1 {
                format!("{}d late", -days)
            } else {
                "overdue".to_string()
            }
        }
        Some(0) => "due today".to_string(),
        Some(days) => format!("in {days}d"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{available_item, SeedCatalog};
    use crate::domain::RentalPeriod;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn demo_state() -> AppState {
        let catalog =
            CatalogStore::from_seed(SeedCatalog::builtin(now()).into_items(), RentalPeriod::default()).unwrap();
        let mut state = AppState::new(catalog, Theme::default());
        state.clock = Clock::Fixed(now());
        state
    }

    #[test]
    fn filter_matches_name_and_category() {
        let mut state = demo_state();
        assert_eq!(state.filtered.len(), 6);

        state.search_query = "outdoor".to_string();
        state.apply_search_filter();
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.selected_item().unwrap().id.as_str(), "2");

        state.search_query = "zzzz".to_string();
        state.apply_search_filter();
        assert!(state.filtered.is_empty());
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn selection_wraps() {
        let mut state = demo_state();
        state.move_selection_up();
        assert_eq!(state.selected_index, 5);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn admin_rows_mark_overdue() {
        let mut state = demo_state();
        state.screen = Screen::Admin;
        let vm = state.compute_viewmodel(30, 120);

        assert_eq!(vm.layout, TableLayout::Admin);
        assert_eq!(vm.display_items.len(), 6);
        let speaker = &vm.display_items[5];
        assert!(speaker.is_overdue);
        assert_eq!(speaker.status, "Overdue");
        assert_eq!(speaker.renter, "Kim Cheolsu");
        assert_eq!(speaker.due, "2026-10-18 (1d late)");

        let projector = &vm.display_items[2];
        assert_eq!(projector.due, "2026-10-23 (in 4d)");
        assert!(vm.header.title.contains("2 rented, 1 overdue"));
    }

    #[test]
    fn user_rows_hide_renter() {
        let mut state = demo_state();
        state.screen = Screen::User;
        let vm = state.compute_viewmodel(30, 120);
        assert!(vm.display_items.iter().all(|item| item.renter.is_empty() && item.contact.is_empty()));
        assert!(vm.header.title.contains("4 of 6 available"));
    }

    #[test]
    fn window_follows_selection() {
        let mut state = demo_state();
        state.screen = Screen::User;
        state.selected_index = 5;
        let vm = state.compute_viewmodel(10, 80);
        assert_eq!(vm.display_items.len(), 3);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].name, "Bluetooth speaker");
    }

    #[test]
    fn empty_catalog_shows_empty_state() {
        let catalog = CatalogStore::from_seed(vec![], RentalPeriod::default()).unwrap();
        let mut state = AppState::new(catalog, Theme::default());
        state.screen = Screen::Admin;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "The catalog is empty");
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let catalog = CatalogStore::from_seed(
            vec![available_item("t1", "Tent", "Outdoor", "4-person")],
            RentalPeriod::default(),
        )
        .unwrap();
        let mut state = AppState::new(catalog, Theme::default());
        state.screen = Screen::User;
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.search_query = "te".to_string();
        state.apply_search_filter();

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(0, 2)]);
    }
}
