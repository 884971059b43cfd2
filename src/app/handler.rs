//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. It returns
//! whether the frame must be redrawn together with the side effects the plugin
//! shim has to perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Select`, `Back`
//! - **Screens**: `OpenUserView`, `OpenAdminLogin`
//! - **Input**: `Char`, `Backspace`, `NextField`, `PrevField`, `Submit`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Admin**: `ReturnSelected`, `EditSelected`, `NewItem`, `NotifySelected`,
//!   `CopyReminder`, `RequestReset`
//! - **System**: `GenerationResponse`, `Timer`, `PermissionsResult`
//!
//! Catalog errors never escape: they become flash text or inline form errors
//! and are logged at `warn`.
//!
//! # Example
//!
//! ```rust
//! use rentdesk::app::{handle_event, AppState, Event, Screen};
//! use rentdesk::catalog::{CatalogStore, SeedCatalog};
//! use rentdesk::domain::RentalPeriod;
//! use rentdesk::ui::Theme;
//!
//! let seed = SeedCatalog::builtin(chrono::Utc::now()).into_items();
//! let catalog = CatalogStore::from_seed(seed, RentalPeriod::default())?;
//! let mut state = AppState::new(catalog, Theme::default());
//!
//! let (render, actions) = handle_event(&mut state, &Event::OpenUserView)?;
//! assert!(render && actions.is_empty());
//! assert_eq!(state.screen, Screen::User);
//! # Ok::<(), rentdesk::RentDeskError>(())
//! ```

use super::forms::{EditForm, EditTarget, LoginForm, RentForm, ReminderStatus, ReminderView};
use super::modes::{InputMode, Modal, Screen, SearchFocus};
use super::state::{PendingReminder, REFRESH_INTERVAL_SECS};
use crate::app::{Action, AppState};
use crate::domain::error::{RentDeskError, Result};
use crate::infrastructure::osc52_sequence;
use crate::reminder::{parse_response, GenerationError, ReminderRequest, ReminderStrategy};

/// Events produced by the plugin shim from keys and host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down (wraps to the top).
    KeyDown,
    /// Moves the selection up (wraps to the bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Landing → user screen.
    OpenUserView,
    /// Opens the access code prompt.
    OpenAdminLogin,
    /// Closes the modal, leaves search, or returns to the landing screen.
    Back,

    /// Acts on the selected row: rent on the user screen, edit on the admin
    /// screen.
    Select,
    /// Confirms the open modal.
    Submit,
    /// Moves focus to the next form field.
    NextField,
    /// Moves focus to the previous form field.
    PrevField,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the query (from navigating).
    FocusSearchBar,
    /// Focuses the results (from typing).
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Types into the focused input.
    Char(char),
    Backspace,

    /// Records the return of the selected item.
    ReturnSelected,
    /// Opens the metadata editor for the selected item.
    EditSelected,
    /// Opens an empty editor that registers a new item.
    NewItem,
    /// Composes a reminder for the renter of the selected item.
    NotifySelected,
    /// Copies the text of the reminder modal.
    CopyReminder,
    /// Asks for confirmation before resetting the catalog.
    RequestReset,

    /// Reply to a generation request.
    GenerationResponse {
        request_id: u64,
        status: u16,
        body: Vec<u8>,
    },

    /// A host timer fired. The shim converts the host's seconds to
    /// milliseconds.
    Timer { elapsed_ms: u64 },

    /// Result of the permission request made on load.
    PermissionsResult { granted: bool },
}

impl Event {
    /// True for events caused by a key press. Those clear the flash line.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::GenerationResponse { .. } | Self::Timer { .. } | Self::PermissionsResult { .. }
        )
    }
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Catalog failures are absorbed into the flash line, so this only returns
/// errors for broken invariants of the state itself.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!(
        "handle_event",
        event_type = ?event,
        screen = ?state.screen,
        modal = state.modal.as_ref().map(Modal::kind)
    )
    .entered();

    let had_flash = state.flash.is_some();
    if event.is_user_input() {
        state.flash = None;
    }

    if state.modal.is_some() && event.is_user_input() {
        return handle_modal_event(state, event).map(|(render, actions)| (render || had_flash, actions));
    }

    let outcome = match event {
        Event::KeyDown => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::OpenUserView => {
            if state.screen != Screen::Landing {
                return Ok((had_flash, vec![]));
            }
            tracing::debug!("entering user view");
            state.screen = Screen::User;
            state.clear_search();
            state.selected_index = 0;
            (true, vec![])
        }
        Event::OpenAdminLogin => {
            if state.screen == Screen::Admin {
                return Ok((had_flash, vec![]));
            }
            state.modal = Some(Modal::AdminLogin(LoginForm::default()));
            (true, vec![])
        }
        Event::Back => {
            match (state.screen, state.input_mode) {
                (Screen::Landing, _) => return Ok((had_flash, vec![])),
                (_, InputMode::Search(_)) => state.clear_search(),
                (Screen::User | Screen::Admin, InputMode::Normal) => {
                    tracing::debug!(from = ?state.screen, "returning to landing screen");
                    state.screen = Screen::Landing;
                }
            }
            (true, vec![])
        }
        Event::Select => select_item(state),
        Event::Submit | Event::NextField | Event::PrevField => (had_flash, vec![]),
        Event::SearchMode => {
            if !state.screen.shows_catalog() {
                return Ok((had_flash, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            (true, vec![])
        }
        Event::FocusSearchBar => {
            if matches!(state.input_mode, InputMode::Search(_)) {
                state.input_mode = InputMode::Search(SearchFocus::Typing);
            }
            (true, vec![])
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.clear_search();
            } else if matches!(state.input_mode, InputMode::Search(_)) {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            (true, vec![])
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.clear_search();
            (true, vec![])
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((had_flash, vec![]));
            }
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, "search query updated");
            state.apply_search_filter();
            (true, vec![])
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((had_flash, vec![]));
            }
            state.search_query.pop();
            state.apply_search_filter();
            (true, vec![])
        }
        Event::ReturnSelected => admin_only(state, had_flash, return_selected),
        Event::EditSelected => admin_only(state, had_flash, |state| {
            let Some(item) = state.selected_item() else {
                return (false, vec![]);
            };
            state.modal = Some(Modal::EditItem(EditForm::for_item(item)));
            (true, vec![])
        }),
        Event::NewItem => admin_only(state, had_flash, |state| {
            state.modal = Some(Modal::EditItem(EditForm::new_item()));
            (true, vec![])
        }),
        Event::NotifySelected => admin_only(state, had_flash, notify_selected),
        Event::RequestReset => admin_only(state, had_flash, |state| {
            state.modal = Some(Modal::ConfirmReset);
            (true, vec![])
        }),
        Event::CopyReminder => (had_flash, vec![]),
        Event::GenerationResponse { request_id, status, body } => {
            generation_response(state, *request_id, *status, body)
        }
        Event::Timer { elapsed_ms } => timer_fired(state, *elapsed_ms),
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!("permissions granted");
            } else {
                tracing::warn!("permissions denied, reminder generation unavailable");
            }
            (false, vec![])
        }
    };

    Ok(outcome)
}

/// Input while a modal is open. Every key goes to the modal.
#[allow(clippy::too_many_lines)]
fn handle_modal_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let Some(modal) = state.modal.as_mut() else {
        return Ok((false, vec![]));
    };

    match event {
        Event::Back => {
            tracing::debug!(modal = modal.kind(), "modal closed");
            state.modal = None;
            return Ok((true, vec![]));
        }
        Event::CloseFocus => return Ok((false, vec![Action::CloseFocus])),
        _ => {}
    }

    match modal {
        Modal::AdminLogin(form) => match event {
            Event::Char(c) => form.input_char(*c),
            Event::Backspace => form.backspace(),
            Event::Submit => {
                let attempt = std::mem::take(&mut form.code);
                match state.gate.verify(&attempt) {
                    Ok(()) => {
                        state.modal = None;
                        state.screen = Screen::Admin;
                        state.clear_search();
                        state.selected_index = 0;
                        tracing::debug!("admin screen unlocked");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "admin login rejected");
                        form.error = Some(err.to_string());
                    }
                }
            }
            _ => return Ok((false, vec![])),
        },
        Modal::RentForm(form) => match event {
            Event::Char(c) => form.input_char(*c),
            Event::Backspace => form.backspace(),
            Event::NextField => form.next_field(),
            Event::PrevField => form.prev_field(),
            Event::Submit => {
                let form = form.clone();
                submit_rent(state, &form);
            }
            _ => return Ok((false, vec![])),
        },
        Modal::RentSuccess { .. } | Modal::ConfirmReset if !matches!(event, Event::Submit) => {
            return Ok((false, vec![]));
        }
        Modal::RentSuccess { .. } => state.modal = None,
        Modal::ConfirmReset => {
            state.catalog.reset();
            state.modal = None;
            state.apply_search_filter();
            tracing::debug!("catalog reset by admin");
            state.flash_info("Catalog restored to its initial state");
        }
        Modal::EditItem(form) => match event {
            Event::Char(c) => form.input_char(*c),
            Event::Backspace => form.backspace(),
            Event::NextField => form.next_field(),
            Event::PrevField => form.prev_field(),
            Event::Submit => {
                let form = form.clone();
                submit_edit(state, &form);
            }
            _ => return Ok((false, vec![])),
        },
        Modal::Reminder(view) => match event {
            Event::CopyReminder => {
                let text = view.text().to_string();
                return Ok(copy_reminder(state, &text));
            }
            Event::Submit => state.modal = None,
            _ => return Ok((false, vec![])),
        },
    }

    Ok((true, vec![]))
}

/// Runs `f` only on the admin screen.
fn admin_only<F>(state: &mut AppState, had_flash: bool, f: F) -> (bool, Vec<Action>)
where
    F: FnOnce(&mut AppState) -> (bool, Vec<Action>),
{
    if state.screen != Screen::Admin {
        return (had_flash, vec![]);
    }
    let (render, actions) = f(state);
    (render || had_flash, actions)
}

fn select_item(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(item) = state.selected_item() else {
        if matches!(state.input_mode, InputMode::Search(_)) {
            tracing::debug!("exiting search mode (no selection)");
            state.clear_search();
            return (true, vec![]);
        }
        return (false, vec![]);
    };

    match state.screen {
        Screen::Landing => (false, vec![]),
        Screen::User => {
            if item.is_available() {
                tracing::debug!(item_id = %item.id, "opening rent form");
                state.modal = Some(Modal::RentForm(RentForm::new(item, state.catalog.period())));
            } else {
                let message = format!("{} is currently rented", item.name);
                state.flash_error(message);
            }
            (true, vec![])
        }
        Screen::Admin => {
            state.modal = Some(Modal::EditItem(EditForm::for_item(item)));
            (true, vec![])
        }
    }
}

fn submit_rent(state: &mut AppState, form: &RentForm) {
    if !form.can_submit() {
        set_rent_error(state, "Fill in both fields and tick both boxes");
        return;
    }

    let now = state.now();
    match state.catalog.rent(&form.item_id, &form.request(), now) {
        Ok(item) => {
            let return_date = item
                .renter()
                .map(|renter| state.composer.format_date(renter.expected_return_date))
                .unwrap_or_default();
            tracing::debug!(item_id = %form.item_id, "rental recorded");
            state.modal = Some(Modal::RentSuccess {
                item_name: item.name.clone(),
                return_date,
            });
        }
        Err(RentDeskError::Validation(err)) => {
            tracing::warn!(error = %err, "rental request rejected");
            set_rent_error(state, &err.to_string());
        }
        Err(err) => {
            tracing::warn!(error = %err, item_id = %form.item_id, "rent failed");
            state.modal = None;
            state.flash_error(err.to_string());
        }
    }
}

fn set_rent_error(state: &mut AppState, message: &str) {
    if let Some(Modal::RentForm(form)) = state.modal.as_mut() {
        form.error = Some(message.to_string());
    }
}

fn submit_edit(state: &mut AppState, form: &EditForm) {
    let metadata = form.metadata();
    let result = match &form.target {
        EditTarget::Existing(id) => state.catalog.update_metadata(id, &metadata),
        EditTarget::New => state.catalog.register(&metadata),
    };

    match result {
        Ok(item) => {
            let message = match form.target {
                EditTarget::Existing(_) => format!("Saved {}", item.name),
                EditTarget::New => format!("Registered {}", item.name),
            };
            state.modal = None;
            state.apply_search_filter();
            state.flash_info(message);
        }
        Err(RentDeskError::Validation(err)) => {
            tracing::warn!(error = %err, "item edit rejected");
            if let Some(Modal::EditItem(form)) = state.modal.as_mut() {
                form.error = Some(err.to_string());
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "item edit failed");
            state.modal = None;
            state.flash_error(err.to_string());
        }
    }
}

fn return_selected(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(id) = state.selected_item().map(|item| item.id.clone()) else {
        return (false, vec![]);
    };

    match state.catalog.return_item(&id) {
        Ok(item) => {
            let message = format!("{} returned", item.name);
            state.flash_info(message);
        }
        Err(err) => {
            tracing::warn!(error = %err, "return failed");
            state.flash_error(err.to_string());
        }
    }
    (true, vec![])
}

fn notify_selected(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.pending_reminder.is_some() {
        tracing::debug!("reminder generation already in flight, ignoring notify");
        return (false, vec![]);
    }

    let now = state.now();
    let Some(item) = state.selected_item() else {
        return (false, vec![]);
    };
    let Some(request) = ReminderRequest::from_item(item, now) else {
        let message = format!("{} is not rented", item.name);
        state.flash_error(message);
        return (true, vec![]);
    };
    let item_id = item.id.clone();

    let mut view = ReminderView {
        item_id: item_id.clone(),
        item_name: request.item_name.clone(),
        renter_name: request.renter_name.clone(),
        status: ReminderStatus::Composing,
    };

    if state.strategy == ReminderStrategy::Template {
        view.status = ReminderStatus::Ready(state.composer.notice_reminder(&request));
        state.modal = Some(Modal::Reminder(view));
        return (true, vec![]);
    }

    let prompt = state.composer.prompt(&request, now);
    match state.generator.build_request(&prompt) {
        Ok(generation_request) => {
            let request_id = state.next_request_id();
            tracing::debug!(request_id, item_id = %item_id, "requesting reminder generation");
            state.pending_reminder = Some(PendingReminder {
                request_id,
                item_id,
                request,
                deadline: now + state.generation_timeout,
            });
            state.modal = Some(Modal::Reminder(view));

            #[allow(clippy::cast_precision_loss)]
            let seconds = state.generation_timeout.num_milliseconds() as f64 / 1000.0;
            (
                true,
                vec![
                    Action::RequestGeneration {
                        request_id,
                        request: generation_request,
                    },
                    Action::ScheduleTimer { seconds },
                ],
            )
        }
        Err(err) => {
            view.status = ReminderStatus::Ready(state.composer.resolve(&request, Err(err)));
            state.modal = Some(Modal::Reminder(view));
            (true, vec![])
        }
    }
}

/// Finishes the pending reminder with `outcome`.
fn complete_pending(state: &mut AppState, outcome: std::result::Result<String, GenerationError>) {
    let Some(pending) = state.pending_reminder.take() else {
        return;
    };
    let reminder = state.composer.resolve(&pending.request, outcome);
    tracing::debug!(
        request_id = pending.request_id,
        fallback = reminder.is_fallback(),
        "reminder resolved"
    );

    if let Some(Modal::Reminder(view)) = state.modal.as_mut() {
        if view.item_id == pending.item_id && view.status == ReminderStatus::Composing {
            view.status = ReminderStatus::Ready(reminder);
        }
    }
}

fn generation_response(state: &mut AppState, request_id: u64, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
    let is_current = state
        .pending_reminder
        .as_ref()
        .is_some_and(|pending| pending.request_id == request_id);
    if !is_current {
        tracing::debug!(request_id, "discarding stale generation response");
        return (false, vec![]);
    }

    complete_pending(state, parse_response(status, body));
    (true, vec![])
}

fn timer_fired(state: &mut AppState, elapsed_ms: u64) -> (bool, Vec<Action>) {
    let now = state.now();
    let mut render = false;
    let mut actions = vec![];

    let timed_out = state
        .pending_reminder
        .as_ref()
        .is_some_and(|pending| now >= pending.deadline);
    if timed_out {
        tracing::debug!("reminder generation timed out");
        complete_pending(state, Err(GenerationError::TimedOut));
        render = true;
    }

    // Host timers may report slightly less than requested.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let refresh_ms = (REFRESH_INTERVAL_SECS * 1000.0) as u64;
    if elapsed_ms + 500 >= refresh_ms {
        render = true;
        actions.push(Action::ScheduleTimer {
            seconds: REFRESH_INTERVAL_SECS,
        });
    }

    (render, actions)
}

fn copy_reminder(state: &mut AppState, text: &str) -> (bool, Vec<Action>) {
    match osc52_sequence(text) {
        Ok(sequence) => {
            tracing::debug!(text_len = text.len(), "copying reminder to clipboard");
            state.flash_info("Reminder copied to the clipboard");
            (true, vec![Action::WriteClipboard { sequence }])
        }
        Err(err) => {
            tracing::warn!(error = %err, "clipboard write rejected");
            state.flash_error(err.to_string());
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogStore, SeedCatalog};
    use crate::domain::{Clock, ItemId, RentalPeriod};
    use crate::reminder::{GenerationClient, Reminder};
    use crate::ui::Theme;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn state() -> AppState {
        let catalog =
            CatalogStore::from_seed(SeedCatalog::builtin(now()).into_items(), RentalPeriod::default()).unwrap();
        let mut state = AppState::new(catalog, Theme::default());
        state.clock = Clock::Fixed(now());
        state
    }

    fn send(state: &mut AppState, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|event| handle_event(state, event).unwrap().1)
            .collect()
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn login(state: &mut AppState) {
        send(state, &[Event::OpenAdminLogin]);
        type_text(state, "2026prime");
        send(state, &[Event::Submit]);
    }

    fn select(state: &mut AppState, id: &str) {
        state.selected_index = state
            .filtered
            .iter()
            .position(|&index| state.catalog.list()[index].id.as_str() == id)
            .unwrap();
    }

    fn generated_state() -> AppState {
        let mut state = state();
        state.strategy = ReminderStrategy::Generated;
        state.generator = GenerationClient {
            api_key: Some("key".to_string()),
            ..GenerationClient::default()
        };
        login(&mut state);
        select(&mut state, "6");
        state
    }

    #[test]
    fn wrong_admin_code_shows_inline_error() {
        let mut state = state();
        send(&mut state, &[Event::OpenAdminLogin]);
        type_text(&mut state, "letmein");
        send(&mut state, &[Event::Submit]);

        assert_eq!(state.screen, Screen::Landing);
        let Some(Modal::AdminLogin(form)) = &state.modal else {
            panic!("login modal should stay open");
        };
        assert_eq!(form.error.as_deref(), Some("Invalid admin code"));
        assert!(form.code.is_empty());

        type_text(&mut state, "2026prime");
        send(&mut state, &[Event::Submit]);
        assert_eq!(state.screen, Screen::Admin);
        assert!(state.modal.is_none());
    }

    #[test]
    fn user_rents_an_available_item() {
        let mut state = state();
        send(&mut state, &[Event::OpenUserView]);
        select(&mut state, "2");
        send(&mut state, &[Event::Select]);
        assert!(matches!(state.modal, Some(Modal::RentForm(_))));

        type_text(&mut state, "Kim");
        send(&mut state, &[Event::NextField]);
        type_text(&mut state, "01011112222");
        send(&mut state, &[Event::Submit]);
        assert!(state.catalog.get(&ItemId::from("2")).unwrap().is_available());

        send(&mut state, &[Event::NextField]);
        type_text(&mut state, " ");
        send(&mut state, &[Event::NextField]);
        type_text(&mut state, " ");
        send(&mut state, &[Event::Submit]);

        let Some(Modal::RentSuccess { item_name, return_date }) = &state.modal else {
            panic!("expected success modal");
        };
        assert_eq!(item_name, "Camping tent (4-person)");
        assert_eq!(return_date, "2026-10-22");

        let renter = state.catalog.get(&ItemId::from("2")).unwrap().renter().unwrap();
        assert_eq!(renter.expected_return_date, now() + Duration::days(3));
    }

    #[test]
    fn selecting_a_rented_item_flashes() {
        let mut state = state();
        send(&mut state, &[Event::OpenUserView]);
        select(&mut state, "3");
        send(&mut state, &[Event::Select]);
        assert!(state.modal.is_none());
        assert!(state.flash.as_ref().unwrap().is_error);
    }

    #[test]
    fn stale_rent_becomes_flash_error() {
        let mut state = state();
        send(&mut state, &[Event::OpenUserView]);
        select(&mut state, "1");
        send(&mut state, &[Event::Select]);
        let Some(Modal::RentForm(form)) = &state.modal else {
            panic!("expected rent form");
        };
        let mut form = form.clone();
        form.name = "Lee".into();
        form.contact = "0102".into();
        form.period_acknowledged = true;
        form.notice_acknowledged = true;
        state.modal = Some(Modal::RentForm(form));

        state
            .catalog
            .rent(&ItemId::from("1"), &crate::domain::RentalRequest::new("Kim", "0101"), now())
            .unwrap();
        send(&mut state, &[Event::Submit]);

        assert!(state.modal.is_none());
        let flash = state.flash.unwrap();
        assert!(flash.is_error);
        assert_eq!(flash.message, "Item 1 is already rented");
    }

    #[test]
    fn admin_returns_and_edits() {
        let mut state = state();
        login(&mut state);
        select(&mut state, "3");
        send(&mut state, &[Event::ReturnSelected]);
        assert!(state.catalog.get(&ItemId::from("3")).unwrap().is_available());

        send(&mut state, &[Event::ReturnSelected]);
        assert_eq!(state.flash.as_ref().unwrap().message, "Item 3 is not rented");

        select(&mut state, "6");
        send(&mut state, &[Event::EditSelected]);
        for _ in 0.."Bluetooth speaker".len() {
            send(&mut state, &[Event::Backspace]);
        }
        type_text(&mut state, "Speaker");
        send(&mut state, &[Event::Submit]);

        let item = state.catalog.get(&ItemId::from("6")).unwrap();
        assert_eq!(item.name, "Speaker");
        assert!(!item.is_available());
    }

    #[test]
    fn blank_edit_keeps_modal_open() {
        let mut state = state();
        login(&mut state);
        send(&mut state, &[Event::NewItem]);
        send(&mut state, &[Event::Submit]);
        let Some(Modal::EditItem(form)) = &state.modal else {
            panic!("editor should stay open");
        };
        assert_eq!(form.error.as_deref(), Some("name is required"));
        assert_eq!(state.catalog.list().len(), 6);
    }

    #[test]
    fn new_item_is_registered_available() {
        let mut state = state();
        login(&mut state);
        send(&mut state, &[Event::NewItem]);
        type_text(&mut state, "Kayak");
        send(&mut state, &[Event::NextField]);
        type_text(&mut state, "Outdoor");
        send(&mut state, &[Event::NextField]);
        type_text(&mut state, "Two-seat kayak");
        send(&mut state, &[Event::Submit]);

        assert!(state.modal.is_none());
        assert_eq!(state.flash.as_ref().unwrap().message, "Registered Kayak");
        let item = state.catalog.list().last().unwrap();
        assert_eq!(item.category, "Outdoor");
        assert!(item.is_available());
        assert_eq!(state.catalog.list().len(), 7);
    }

    #[test]
    fn template_notify_shows_notice() {
        let mut state = state();
        login(&mut state);
        select(&mut state, "6");
        let actions = send(&mut state, &[Event::NotifySelected]);
        assert!(actions.is_empty());

        let Some(Modal::Reminder(view)) = &state.modal else {
            panic!("expected reminder modal");
        };
        assert!(view.text().contains("Kim Cheolsu"));
        assert!(view.text().contains("the rental desk"));
        let ReminderStatus::Ready(reminder) = &view.status else {
            panic!("notice should be ready at once");
        };
        assert!(matches!(reminder, Reminder::Notice(_)));
        assert!(!reminder.is_fallback());
    }

    #[test]
    fn second_notify_in_flight_is_ignored() {
        let mut state = generated_state();
        let actions = send(&mut state, &[Event::NotifySelected]);
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], Action::RequestGeneration { request_id: 1, .. }));

        send(&mut state, &[Event::Back]);
        select(&mut state, "3");
        assert!(send(&mut state, &[Event::NotifySelected]).is_empty());
        assert!(state.modal.is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = generated_state();
        send(&mut state, &[Event::NotifySelected]);

        let (render, _) = handle_event(
            &mut state,
            &Event::GenerationResponse {
                request_id: 99,
                status: 200,
                body: br#"{"candidates":[{"content":{"parts":[{"text":"old"}]}}]}"#.to_vec(),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.pending_reminder.is_some());

        handle_event(
            &mut state,
            &Event::GenerationResponse {
                request_id: 1,
                status: 200,
                body: br#"{"candidates":[{"content":{"parts":[{"text":"Please return the speaker."}]}}]}"#
                    .to_vec(),
            },
        )
        .unwrap();
        let Some(Modal::Reminder(view)) = &state.modal else {
            panic!("expected reminder modal");
        };
        assert_eq!(view.text(), "Please return the speaker.");
        assert!(state.pending_reminder.is_none());
    }

    #[test]
    fn failed_generation_uses_fallback() {
        let mut state = generated_state();
        send(&mut state, &[Event::NotifySelected]);
        handle_event(
            &mut state,
            &Event::GenerationResponse {
                request_id: 1,
                status: 500,
                body: vec![],
            },
        )
        .unwrap();

        let Some(Modal::Reminder(view)) = &state.modal else {
            panic!("expected reminder modal");
        };
        assert_eq!(
            view.text(),
            "Kim Cheolsu, the return date for your rented Bluetooth speaker is 2026-10-18. Please return it."
        );
    }

    #[test]
    fn timeout_yields_fallback() {
        let mut state = generated_state();
        send(&mut state, &[Event::NotifySelected]);

        state.clock.advance(Duration::seconds(5));
        handle_event(&mut state, &Event::Timer { elapsed_ms: 5_000 }).unwrap();
        assert!(state.pending_reminder.is_some());

        state.clock.advance(Duration::seconds(5));
        handle_event(&mut state, &Event::Timer { elapsed_ms: 10_000 }).unwrap();
        assert!(state.pending_reminder.is_none());
        let Some(Modal::Reminder(view)) = &state.modal else {
            panic!("expected reminder modal");
        };
        assert!(matches!(&view.status, ReminderStatus::Ready(reminder) if reminder.is_fallback()));
    }

    #[test]
    fn missing_api_key_falls_back_without_request() {
        let mut state = state();
        state.strategy = ReminderStrategy::Generated;
        login(&mut state);
        select(&mut state, "6");
        assert!(send(&mut state, &[Event::NotifySelected]).is_empty());
        assert!(state.pending_reminder.is_none());
        let Some(Modal::Reminder(view)) = &state.modal else {
            panic!("expected reminder modal");
        };
        assert!(view.text().starts_with("Kim Cheolsu, the return date"));
    }

    #[test]
    fn copy_emits_clipboard_sequence() {
        let mut state = state();
        login(&mut state);
        select(&mut state, "6");
        send(&mut state, &[Event::NotifySelected]);
        let actions = send(&mut state, &[Event::CopyReminder]);
        assert!(matches!(&actions[..], [Action::WriteClipboard { sequence }] if sequence.starts_with("\x1b]52;c;")));
        assert!(!state.flash.as_ref().unwrap().is_error);
    }

    #[test]
    fn copy_while_composing_is_rejected() {
        let mut state = generated_state();
        send(&mut state, &[Event::NotifySelected]);
        let actions = send(&mut state, &[Event::CopyReminder]);
        assert!(actions.is_empty());
        assert_eq!(state.flash.as_ref().unwrap().message, "Nothing to copy");
    }

    #[test]
    fn refresh_timer_rearms() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Timer { elapsed_ms: 60_000 }).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 60.0 }]);
    }

    #[test]
    fn reset_requires_confirmation() {
        let mut state = state();
        login(&mut state);
        select(&mut state, "3");
        send(&mut state, &[Event::ReturnSelected, Event::RequestReset]);
        assert!(state.catalog.get(&ItemId::from("3")).unwrap().is_available());

        send(&mut state, &[Event::Submit]);
        assert!(!state.catalog.get(&ItemId::from("3")).unwrap().is_available());
    }

    #[test]
    fn admin_actions_need_admin_screen() {
        let mut state = state();
        send(&mut state, &[Event::OpenUserView]);
        select(&mut state, "3");
        send(&mut state, &[Event::ReturnSelected, Event::NewItem]);
        assert!(!state.catalog.get(&ItemId::from("3")).unwrap().is_available());
        assert!(state.modal.is_none());
    }
}
