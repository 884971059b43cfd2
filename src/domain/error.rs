//! Error types for the RentDesk plugin.
//!
//! This module defines the centralized error type [`RentDeskError`], the
//! input validation error [`ValidationError`], and a [`Result`] alias used
//! throughout the crate. All errors are implemented with `thiserror`.
//!
//! Errors raised by the optional text-generation call and the clipboard live
//! next to their collaborators ([`crate::reminder::GenerationError`],
//! [`crate::infrastructure::ClipboardError`]) because they never reach the
//! catalog.

use crate::domain::item::ItemId;
use thiserror::Error;

/// The main error type for RentDesk operations.
///
/// Catalog mutations return the first three variants instead of silently
/// ignoring a request made against stale view state.
///
/// # Examples
///
/// ```
/// use rentdesk::domain::{ItemId, RentDeskError};
///
/// let err = RentDeskError::ItemNotAvailable(ItemId::from("t1"));
/// assert_eq!(err.to_string(), "Item t1 is already rented");
/// ```
#[derive(Debug, Error)]
pub enum RentDeskError {
    /// An operation referenced an id that is not in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// `rent` was attempted on an item that is already rented.
    #[error("Item {0} is already rented")]
    ItemNotAvailable(ItemId),

    /// `return` was attempted on an item that is not rented.
    #[error("Item {0} is not rented")]
    ItemNotRented(ItemId),

    /// The submitted admin code does not match the configured one.
    ///
    /// Shown inline in the login modal, never propagated past the handler.
    #[error("Invalid admin code")]
    InvalidAdminCode,

    /// User-supplied input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The seed catalog could not be read or parsed.
    #[error("Seed catalog error: {0}")]
    Seed(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input validation failures.
///
/// Produced by [`crate::domain::validation`] and by catalog initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty after trimming.
    #[error("{field} is required")]
    Required {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A field contains characters it must not contain.
    #[error("{field} {reason}")]
    InvalidFormat {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable reason.
        reason: &'static str,
    },

    /// Two catalog entries share the same id.
    #[error("Duplicate item id: {0}")]
    DuplicateId(ItemId),

    /// The configured rental period is not a positive number of days.
    #[error("Rental period must be at least one day, got {0}")]
    InvalidPeriod(i64),
}

/// A specialized `Result` type for RentDesk operations.
pub type Result<T> = std::result::Result<T, RentDeskError>;
