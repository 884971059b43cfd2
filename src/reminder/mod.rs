//! Reminder composition for renters.
//!
//! - [`composer`]: prompt, fallback and notice text, plus outcome resolution
//! - [`generator`]: request/response handling for the external generator
//!
//! The composer is read-only with respect to the catalog. Generation failures
//! never escape this module: [`ReminderComposer::resolve`] always yields a
//! [`Reminder`].

pub mod composer;
pub mod generator;

pub use composer::{Locale, Reminder, ReminderComposer, ReminderRequest, ReminderStrategy};
pub use generator::{parse_response, GenerationClient, GenerationError, GenerationRequest};
