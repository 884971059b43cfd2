//! Seed catalogs: the built-in demo list and TOML seed files.
//!
//! A seed may contain items that are already rented, with their renter record
//! attached. See the crate-level docs for the file format.

use crate::domain::error::{RentDeskError, Result};
use crate::domain::{ItemId, ItemMetadata, ItemState, RentalItem, RenterInfo};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;

/// Top-level structure of a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub items: Vec<SeedItem>,
}

/// One `[[items]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Present for items seeded in the rented state.
    #[serde(default)]
    pub renter: Option<RenterInfo>,
}

impl SeedItem {
    fn into_item(self) -> RentalItem {
        let state = self.renter.map_or(ItemState::Available, ItemState::Rented);
        RentalItem {
            id: ItemId::from(self.id),
            name: self.name,
            category: self.category,
            description: self.description,
            state,
        }
    }
}

impl SeedCatalog {
    /// Parses a seed catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RentDeskError::Seed`] if the TOML is malformed or a field has
    /// the wrong type (for example a non RFC 3339 date).
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| RentDeskError::Seed(format!("failed to parse seed TOML: {e}")))
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns [`RentDeskError::Io`] if the file cannot be read, or
    /// [`RentDeskError::Seed`] if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading seed catalog");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The demo catalog: six items, two of them rented and one of those
    /// overdue relative to `now`.
    #[must_use]
    pub fn builtin(now: DateTime<Utc>) -> Self {
        let available = |id: &str, name: &str, category: &str, description: &str| SeedItem {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            renter: None,
        };

        let mut projector = available(
            "3",
            "Wireless projector",
            "Electronics",
            "Portable HD projector with HDMI and Bluetooth input.",
        );
        projector.renter = Some(RenterInfo {
            name: "Hong Gildong".to_string(),
            contact: "01012345678".to_string(),
            rent_date: now - Duration::days(3),
            expected_return_date: now + Duration::days(4),
        });

        let mut speaker = available(
            "6",
            "Bluetooth speaker",
            "Electronics",
            "Waterproof portable speaker with up to 20 hours of battery.",
        );
        speaker.renter = Some(RenterInfo {
            name: "Kim Cheolsu".to_string(),
            contact: "01098765432".to_string(),
            rent_date: now - Duration::days(8),
            expected_return_date: now - Duration::days(1),
        });

        Self {
            items: vec![
                available(
                    "1",
                    "DSLR camera kit",
                    "Electronics",
                    "Canon EOS 5D Mark IV with a 24-70mm lens. Good for photography practice.",
                ),
                available(
                    "2",
                    "Camping tent (4-person)",
                    "Outdoor",
                    "Waterproof dome tent. Quick to pitch, rain fly included.",
                ),
                projector,
                available(
                    "4",
                    "Cordless drill set",
                    "Tools",
                    "Cordless drill with two batteries and a bit set.",
                ),
                available(
                    "5",
                    "Folding bicycle",
                    "Sports",
                    "Lightweight aluminium frame with 7-speed gearing.",
                ),
                speaker,
            ],
        }
    }

    /// Converts the seed entries into catalog items, preserving order.
    #[must_use]
    pub fn into_items(self) -> Vec<RentalItem> {
        self.items.into_iter().map(SeedItem::into_item).collect()
    }
}

/// Builds a single available item, handy for small seeds.
#[must_use]
pub fn available_item(id: &str, name: &str, category: &str, description: &str) -> RentalItem {
    RentalItem::new(
        id,
        ItemMetadata {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemStatus;
    use chrono::TimeZone;

    const SEED: &str = r#"
[[items]]
id = "t1"
name = "Tent"
category = "Outdoor"
description = "4-person dome tent"

[[items]]
id = "p1"
name = "Projector"
category = "Electronics"
description = "HD projector"

[items.renter]
name = "Hong Gildong"
contact = "01012345678"
rent_date = "2026-10-16T09:00:00Z"
expected_return_date = "2026-10-19T09:00:00Z"
"#;

    #[test]
    fn parses_available_and_rented_entries() {
        let items = SeedCatalog::from_toml_str(SEED).unwrap().into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "t1");
        assert_eq!(items[0].status(), ItemStatus::Available);

        let renter = items[1].renter().unwrap();
        assert_eq!(renter.name, "Hong Gildong");
        assert_eq!(
            renter.expected_return_date,
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        let broken = SEED.replace("2026-10-16T09:00:00Z", "last tuesday");
        assert!(matches!(
            SeedCatalog::from_toml_str(&broken),
            Err(RentDeskError::Seed(_))
        ));
    }

    #[test]
    fn builtin_has_one_overdue_item() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let items = SeedCatalog::builtin(now).into_items();
        assert_eq!(items.len(), 6);
        let overdue: Vec<_> = items.iter().filter(|item| item.is_overdue(now)).collect();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id.as_str(), "6");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, SEED.as_bytes()).unwrap();
        let seed = SeedCatalog::from_file(file.path()).unwrap();
        assert_eq!(seed.items.len(), 2);
    }
}
