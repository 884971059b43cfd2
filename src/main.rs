//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the RentDesk library and the Zellij plugin
//! system: it translates Zellij events into [`Event`]s, hands them to
//! [`handle_event`], and performs the returned [`Action`]s through the host
//! API. The library never calls into `zellij_tile`.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build `AppState`
//! 2. **Subscribe**: `Key`, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Refresh timer**: every 60 s so overdue markers follow the clock
//! 4. **Update**: Map the event, delegate to the library, run actions
//! 5. **Render**: Draw the frame, then any pending clipboard sequence
//!
//! # Keybindings
//!
//! Landing: `u` rent items, `a` admin login, `q` close.
//!
//! Catalog screens (normal mode):
//! - `j`/`Down`, `k`/`Up`, `Ctrl+n`/`Ctrl+p`: Move
//! - `/`: Search
//! - `Enter`: Rent (user) or edit (admin)
//! - `Esc`: Back to the landing screen
//! - `q`: Close plugin
//!
//! Admin screen: `r` return, `e` edit, `n` new item, `m` notify, `R` reset.
//!
//! Search mode: type to filter, `Enter` jumps to the results, `/` back to the
//! query, `Esc` exits.
//!
//! Modals: type into the focused field, `Tab`/`Shift+Tab` move between fields,
//! `Space` ticks a checkbox, `Enter` confirms, `Esc` cancels, `c` copies a
//! reminder.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use rentdesk::app::state::REFRESH_INTERVAL_SECS;
use rentdesk::app::{InputMode, Modal, Screen, SearchFocus};
use rentdesk::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Context key carrying the generation request id through `web_request`.
const REQUEST_ID_KEY: &str = "request_id";

/// Plugin state wrapper.
struct State {
    /// Core application state from the library layer.
    app: rentdesk::AppState,

    /// OSC 52 sequence to emit with the next frame.
    pending_clipboard: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: rentdesk::initialize(&Config::default()),
            pending_clipboard: None,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the app state, requests web access for
    /// reminder generation, and starts the refresh timer.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(err) = rentdesk::observability::init_tracing(&config) {
            eprintln!("rentdesk: tracing disabled: {err}");
        }

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        self.app = rentdesk::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        set_timeout(REFRESH_INTERVAL_SECS);
        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(elapsed) => Self::map_timer_event(elapsed),
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(action);
                }
                should_render || self.pending_clipboard.is_some()
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        rentdesk::ui::render(&self.app, rows, cols);
        if let Some(sequence) = self.pending_clipboard.take() {
            print!("{sequence}");
        }
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_web_request_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request_id) = context.get(REQUEST_ID_KEY).and_then(|id| id.parse::<u64>().ok()) else {
            tracing::debug!(status, "web request result without a request id");
            return None;
        };
        tracing::debug!(request_id, status, body_len = body.len(), "generation response received");
        Some(Event::GenerationResponse {
            request_id,
            status,
            body,
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn map_timer_event(elapsed: f64) -> Event {
        Event::Timer {
            elapsed_ms: (elapsed.max(0.0) * 1000.0).round() as u64,
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// An open modal captures every key; otherwise the mapping depends on the
    /// screen and the search mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if let Some(modal) = &self.app.modal {
            return Self::map_modal_key(modal, key);
        }

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        let screen = self.app.screen;
        let mode = self.app.input_mode;

        if screen == Screen::Landing {
            return match key.bare_key {
                BareKey::Char('u') | BareKey::Enter => Some(Event::OpenUserView),
                BareKey::Char('a') => Some(Event::OpenAdminLogin),
                BareKey::Char('q') | BareKey::Esc => Some(Event::CloseFocus),
                _ => None,
            };
        }

        if mode == InputMode::Search(SearchFocus::Typing) {
            return Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::Select,
            BareKey::Esc => match mode {
                InputMode::Search(_) => Event::ExitSearch,
                InputMode::Normal => Event::Back,
            },
            BareKey::Char('/') => match mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('r') if screen == Screen::Admin => Event::ReturnSelected,
            BareKey::Char('e') if screen == Screen::Admin => Event::EditSelected,
            BareKey::Char('n') if screen == Screen::Admin => Event::NewItem,
            BareKey::Char('m') if screen == Screen::Admin => Event::NotifySelected,
            BareKey::Char('R') if screen == Screen::Admin => Event::RequestReset,
            _ => return None,
        })
    }

    fn map_modal_key(modal: &Modal, key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Esc => Event::Back,
            BareKey::Enter => Event::Submit,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char('c') if matches!(modal, Modal::Reminder(_)) => Event::CopyReminder,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::RequestGeneration { request_id, request } => {
                tracing::debug!(request_id, "sending generation request");
                let mut context = BTreeMap::new();
                context.insert(REQUEST_ID_KEY.to_string(), request_id.to_string());
                web_request(request.url, HttpVerb::Post, request.headers, request.body, context);
            }
            Action::ScheduleTimer { seconds } => {
                set_timeout(seconds);
            }
            Action::WriteClipboard { sequence } => {
                self.pending_clipboard = Some(sequence);
            }
        }
    }
}
