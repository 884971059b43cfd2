//! Side effects requested by the event handler.
//!
//! The handler never calls host functions. It returns a `Vec<Action>` and the
//! plugin shim (`main.rs`) performs each one through the Zellij API.
//!
//! # Example
//!
//! ```rust
//! use rentdesk::app::Action;
//!
//! let actions = vec![Action::ScheduleTimer { seconds: 60.0 }, Action::CloseFocus];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::reminder::GenerationRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a text-generation request.
    ///
    /// The shim must put `request_id` into the web request context so that
    /// the reply can be matched against the pending reminder.
    RequestGeneration {
        request_id: u64,
        request: GenerationRequest,
    },

    /// Arms a host timer that fires a `Timer` event after `seconds`.
    ScheduleTimer { seconds: f64 },

    /// Emits an OSC 52 clipboard sequence with the next frame.
    WriteClipboard { sequence: String },
}
