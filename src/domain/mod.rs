//! Domain layer for the RentDesk plugin.
//!
//! Core rental types and rules, independent of Zellij APIs and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Rental items and the Available/Rented state machine
//! - [`validation`]: Rental request and metadata validation
//! - [`clock`]: System or pinned time source
//!
//! # Examples
//!
//! ```
//! use rentdesk::domain::{ItemMetadata, RentalItem, ItemStatus};
//!
//! let item = RentalItem::new("t1", ItemMetadata {
//!     name: "Tent".into(),
//!     category: "Outdoor".into(),
//!     description: "4-person dome tent".into(),
//! });
//! assert_eq!(item.status(), ItemStatus::Available);
//! assert!(item.renter().is_none());
//! ```

pub mod clock;
pub mod error;
pub mod item;
pub mod validation;

pub use clock::Clock;
pub use error::{RentDeskError, Result, ValidationError};
pub use item::{
    ItemId, ItemMetadata, ItemState, ItemStatus, RentalItem, RentalPeriod, RenterInfo,
    TransitionRefused, DEFAULT_RENTAL_DAYS,
};
pub use validation::RentalRequest;
