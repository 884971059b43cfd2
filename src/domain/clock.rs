//! Time source for rentals and overdue checks.
//!
//! The plugin reads the system clock; tests pin it to a fixed instant so that
//! rent dates and overdue flags are deterministic.

use chrono::{DateTime, Duration, Utc};

/// Where "now" comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Wall-clock UTC time.
    #[default]
    System,
    /// A pinned instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(instant) => *instant,
        }
    }

    /// Moves a fixed clock forward. No-op for the system clock.
    pub fn advance(&mut self, by: Duration) {
        if let Self::Fixed(instant) = self {
            *instant += by;
        }
    }
}
