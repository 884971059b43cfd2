//! Rental item model and the rental state machine.
//!
//! A [`RentalItem`] is either [`ItemState::Available`] or
//! [`ItemState::Rented`] carrying the [`RenterInfo`] of the current renter.
//! Because the renter lives inside the `Rented` variant, an item can never be
//! marked rented without a renter, or carry a renter while available.
//!
//! ```text
//!              rent(RenterInfo)
//!   Available ─────────────────▶ Rented(RenterInfo)
//!       ▲                              │
//!       └──────────── release ─────────┘
//! ```
//!
//! There is no terminal state and no "overdue" state: overdue is computed from
//! the clock by [`RentalItem::is_overdue`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;

/// Default rental period in days.
pub const DEFAULT_RENTAL_DAYS: i64 = 3;

/// Longest rental period accepted from configuration.
const MAX_RENTAL_DAYS: i64 = 365;

/// Stable identifier of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random id for an item registered at runtime.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of an item, derived from its [`ItemState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    Available,
    Rented,
}

impl ItemStatus {
    /// Short label used in tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Rented => "Rented",
        }
    }
}

/// Record of the party currently holding a rented item.
///
/// Created together with the `Rented` transition and dropped with the return.
/// A re-rent always builds a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenterInfo {
    pub name: String,
    /// Digits only.
    pub contact: String,
    pub rent_date: DateTime<Utc>,
    pub expected_return_date: DateTime<Utc>,
}

/// Why a transition was refused by [`ItemState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRefused {
    /// `rent` on an item that already has a renter.
    AlreadyRented,
    /// `release` on an item without a renter.
    NotRented,
}

/// Rental state of a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    #[default]
    Available,
    Rented(RenterInfo),
}

impl ItemState {
    /// `Available → Rented`. Guarded by "no renter attached".
    ///
    /// # Errors
    ///
    /// Returns [`TransitionRefused::AlreadyRented`] if a renter is attached.
    pub fn rent(&mut self, renter: RenterInfo) -> Result<(), TransitionRefused> {
        match self {
            Self::Available => {
                *self = Self::Rented(renter);
                Ok(())
            }
            Self::Rented(_) => Err(TransitionRefused::AlreadyRented),
        }
    }

    /// `Rented → Available`. The renter record is handed back and not kept.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionRefused::NotRented`] if no renter is attached.
    pub fn release(&mut self) -> Result<RenterInfo, TransitionRefused> {
        match std::mem::take(self) {
            Self::Rented(renter) => Ok(renter),
            Self::Available => Err(TransitionRefused::NotRented),
        }
    }

    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        match self {
            Self::Available => ItemStatus::Available,
            Self::Rented(_) => ItemStatus::Rented,
        }
    }

    #[must_use]
    pub const fn renter(&self) -> Option<&RenterInfo> {
        match self {
            Self::Available => None,
            Self::Rented(renter) => Some(renter),
        }
    }
}

/// Editable display fields of an item.
///
/// This is the only payload accepted by metadata edits, so an edit cannot
/// touch the rental state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub name: String,
    pub category: String,
    pub description: String,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub state: ItemState,
}

impl RentalItem {
    /// Creates an available item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, metadata: ItemMetadata) -> Self {
        Self {
            id: id.into(),
            name: metadata.name,
            category: metadata.category,
            description: metadata.description,
            state: ItemState::Available,
        }
    }

    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        self.state.status()
    }

    #[must_use]
    pub const fn renter(&self) -> Option<&RenterInfo> {
        self.state.renter()
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.state, ItemState::Available)
    }

    /// Copies out the editable fields.
    #[must_use]
    pub fn metadata(&self) -> ItemMetadata {
        ItemMetadata {
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }

    /// Replaces the editable fields, leaving `id` and `state` untouched.
    pub fn set_metadata(&mut self, metadata: ItemMetadata) {
        self.name = metadata.name;
        self.category = metadata.category;
        self.description = metadata.description;
    }

    /// True iff the item is rented and `now` is past the expected return date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use rentdesk::domain::{ItemMetadata, ItemState, RentalItem, RenterInfo};
    ///
    /// let rented_at = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    /// let mut item = RentalItem::new("t1", ItemMetadata::default());
    /// item.state = ItemState::Rented(RenterInfo {
    ///     name: "Kim".into(),
    ///     contact: "01011112222".into(),
    ///     rent_date: rented_at,
    ///     expected_return_date: rented_at + Duration::days(3),
    /// });
    ///
    /// assert!(!item.is_overdue(rented_at + Duration::days(3)));
    /// assert!(item.is_overdue(rented_at + Duration::days(3) + Duration::seconds(1)));
    /// ```
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.renter()
            .is_some_and(|renter| now > renter.expected_return_date)
    }

    /// Signed time left until the expected return date, `None` when available.
    ///
    /// Negative once the item is overdue.
    #[must_use]
    pub fn time_until_due(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.renter()
            .map(|renter| renter.expected_return_date.signed_duration_since(now))
    }

    /// Whole days left until the expected return date, rounded toward zero.
    ///
    /// `Some(0)` on the due day, negative once overdue by at least a day.
    #[must_use]
    pub fn days_until_due(&self, now: DateTime<Utc>) -> Option<i64> {
        self.time_until_due(now).map(|left| left.num_days())
    }
}

/// Length of a rental, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    days: i64,
}

impl RentalPeriod {
    /// Creates a period of `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPeriod`] unless `1 <= days <= 365`.
    pub fn days(days: i64) -> Result<Self, ValidationError> {
        if days < 1 || days > MAX_RENTAL_DAYS {
            return Err(ValidationError::InvalidPeriod(days));
        }
        Ok(Self { days })
    }

    #[must_use]
    pub const fn as_days(self) -> i64 {
        self.days
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::days(self.days)
    }
}

impl Default for RentalPeriod {
    fn default() -> Self {
        Self {
            days: DEFAULT_RENTAL_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn renter_at(rent_date: DateTime<Utc>) -> RenterInfo {
        RenterInfo {
            name: "Kim".to_string(),
            contact: "01011112222".to_string(),
            rent_date,
            expected_return_date: rent_date + Duration::days(3),
        }
    }

    #[test]
    fn rent_then_release_cycles_state() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let mut state = ItemState::Available;

        state.rent(renter_at(now)).unwrap();
        assert_eq!(state.status(), ItemStatus::Rented);
        assert!(state.renter().is_some());

        let released = state.release().unwrap();
        assert_eq!(released.name, "Kim");
        assert_eq!(state, ItemState::Available);
        assert!(state.renter().is_none());
    }

    #[test]
    fn guards_refuse_wrong_state() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let mut state = ItemState::Available;
        assert_eq!(state.release(), Err(TransitionRefused::NotRented));
        assert_eq!(state, ItemState::Available);

        state.rent(renter_at(now)).unwrap();
        let before = state.clone();
        assert_eq!(
            state.rent(renter_at(now + Duration::days(1))),
            Err(TransitionRefused::AlreadyRented)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn overdue_flips_after_the_due_instant() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let mut item = RentalItem::new("t1", ItemMetadata::default());
        assert!(!item.is_overdue(now + Duration::days(30)));

        item.state = ItemState::Rented(renter_at(now));
        assert!(!item.is_overdue(now));
        assert!(!item.is_overdue(now + Duration::days(2)));
        assert!(item.is_overdue(now + Duration::days(3) + Duration::minutes(1)));
        assert_eq!(item.time_until_due(now), Some(Duration::days(3)));
        assert_eq!(item.days_until_due(now + Duration::hours(30)), Some(1));
        assert_eq!(item.days_until_due(now + Duration::days(5)), Some(-2));
    }

    #[test]
    fn rental_period_bounds() {
        assert_eq!(RentalPeriod::default().as_days(), 3);
        assert!(RentalPeriod::days(0).is_err());
        assert!(RentalPeriod::days(366).is_err());
        assert_eq!(RentalPeriod::days(7).unwrap().as_duration(), Duration::days(7));
    }
}
