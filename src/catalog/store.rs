//! The catalog store: single owner of the rental items.
//!
//! [`CatalogStore`] holds the ordered item list and performs every mutation.
//! Views only ever see `&[RentalItem]` snapshots and ask for changes through
//! the methods below. Failed operations leave the catalog untouched.
//!
//! # Invariants
//!
//! - Item ids are unique.
//! - No operation removes or reorders items; `register` only appends.
//! - Rental state changes only through `rent` and `return_item`.

use crate::domain::error::{RentDeskError, Result};
use crate::domain::validation::{validate_metadata, validate_seeded_renter};
use crate::domain::{
    ItemId, ItemMetadata, RentalItem, RentalPeriod, RentalRequest, RenterInfo, TransitionRefused,
    ValidationError,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Authoritative, in-memory catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Current items in insertion order.
    items: Vec<RentalItem>,

    /// Items the store was created from, restored by [`CatalogStore::reset`].
    seed: Vec<RentalItem>,

    /// Length of every new rental.
    period: RentalPeriod,
}

impl CatalogStore {
    /// Creates a store from a seed list.
    ///
    /// Every entry must satisfy what the mutation API enforces: non-blank
    /// metadata, and for rented entries a digits-only contact and an expected
    /// return date no earlier than the rent date. Entries are checked as
    /// given, never cleaned.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateId`] if two entries share an id, or
    /// a validation error for blank metadata or a malformed seeded renter.
    pub fn from_seed(seed: Vec<RentalItem>, period: RentalPeriod) -> Result<Self> {
        let _span = tracing::debug_span!("catalog_from_seed", item_count = seed.len()).entered();

        let mut seen = HashSet::with_capacity(seed.len());
        for item in &seed {
            if !seen.insert(&item.id) {
                return Err(ValidationError::DuplicateId(item.id.clone()).into());
            }
            validate_metadata(&item.metadata())?;
            if let Some(renter) = item.renter() {
                validate_seeded_renter(renter)?;
            }
        }

        tracing::debug!(
            rented = seed.iter().filter(|item| !item.is_available()).count(),
            rental_days = period.as_days(),
            "catalog seeded"
        );

        Ok(Self {
            items: seed.clone(),
            seed,
            period,
        })
    }

    /// A store with no items.
    #[must_use]
    pub const fn empty(period: RentalPeriod) -> Self {
        Self {
            items: Vec::new(),
            seed: Vec::new(),
            period,
        }
    }

    /// Read-only snapshot in insertion order.
    #[must_use]
    pub fn list(&self) -> &[RentalItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&RentalItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub const fn period(&self) -> RentalPeriod {
        self.period
    }

    /// Rents an available item to the requester.
    ///
    /// The renter record gets `rent_date = now` and
    /// `expected_return_date = now + period`.
    ///
    /// # Errors
    ///
    /// - [`RentDeskError::ItemNotFound`] if `id` is unknown
    /// - [`RentDeskError::ItemNotAvailable`] if the item is already rented
    /// - [`RentDeskError::Validation`] if the request is incomplete
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use rentdesk::catalog::{available_item, CatalogStore};
    /// use rentdesk::domain::{ItemId, RentalPeriod, RentalRequest};
    ///
    /// let seed = vec![available_item("t1", "Tent", "Outdoor", "4-person")];
    /// let mut store = CatalogStore::from_seed(seed, RentalPeriod::default())?;
    ///
    /// let now = Utc::now();
    /// let item = store.rent(&ItemId::from("t1"), &RentalRequest::new("Kim", "01011112222"), now)?;
    /// assert_eq!(item.renter().unwrap().expected_return_date - now, Duration::days(3));
    /// # Ok::<(), rentdesk::RentDeskError>(())
    /// ```
    pub fn rent(&mut self, id: &ItemId, request: &RentalRequest, now: DateTime<Utc>) -> Result<&RentalItem> {
        let _span = tracing::debug_span!("catalog_rent", item_id = %id).entered();

        let expected_return_date = now + self.period.as_duration();
        let item = self.item_mut(id)?;
        if !item.is_available() {
            tracing::debug!("rent refused, item already rented");
            return Err(RentDeskError::ItemNotAvailable(id.clone()));
        }

        let request = request.validated()?;
        let renter = RenterInfo {
            name: request.name,
            contact: request.contact,
            rent_date: now,
            expected_return_date,
        };

        item.state
            .rent(renter)
            .map_err(|_| RentDeskError::ItemNotAvailable(id.clone()))?;

        tracing::debug!(item_name = %item.name, due = %expected_return_date, "item rented");
        Ok(&*item)
    }

    /// Records the return of a rented item and drops its renter record.
    ///
    /// # Errors
    ///
    /// - [`RentDeskError::ItemNotFound`] if `id` is unknown
    /// - [`RentDeskError::ItemNotRented`] if the item is already available
    pub fn return_item(&mut self, id: &ItemId) -> Result<&RentalItem> {
        let _span = tracing::debug_span!("catalog_return", item_id = %id).entered();

        let item = self.item_mut(id)?;
        match item.state.release() {
            Ok(renter) => {
                tracing::debug!(item_name = %item.name, renter = %renter.name, "item returned");
                Ok(&*item)
            }
            Err(TransitionRefused::NotRented | TransitionRefused::AlreadyRented) => {
                tracing::debug!("return refused, item not rented");
                Err(RentDeskError::ItemNotRented(id.clone()))
            }
        }
    }

    /// Replaces name, category and description of an item.
    ///
    /// # Errors
    ///
    /// - [`RentDeskError::ItemNotFound`] if `id` is unknown
    /// - [`RentDeskError::Validation`] if a field is empty
    pub fn update_metadata(&mut self, id: &ItemId, metadata: &ItemMetadata) -> Result<&RentalItem> {
        let _span = tracing::debug_span!("catalog_update_metadata", item_id = %id).entered();

        let item = self.item_mut(id)?;
        let metadata = validate_metadata(metadata)?;
        item.set_metadata(metadata);

        tracing::debug!(item_name = %item.name, "item metadata updated");
        Ok(&*item)
    }

    /// Applies an edited copy of an item.
    ///
    /// Only the metadata of `edited` is used; its `state` is ignored, so an
    /// edit can never rent or return an item.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogStore::update_metadata`].
    pub fn apply_edit(&mut self, edited: &RentalItem) -> Result<&RentalItem> {
        self.update_metadata(&edited.id, &edited.metadata())
    }

    /// Appends a new available item with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`RentDeskError::Validation`] if a field is empty.
    pub fn register(&mut self, metadata: &ItemMetadata) -> Result<&RentalItem> {
        let metadata = validate_metadata(metadata)?;

        let mut id = ItemId::generate();
        while self.get(&id).is_some() {
            id = ItemId::generate();
        }

        tracing::debug!(item_id = %id, item_name = %metadata.name, "item registered");
        let index = self.items.len();
        self.items.push(RentalItem::new(id, metadata));
        Ok(&self.items[index])
    }

    /// Restores the catalog to the seed it was created from.
    pub fn reset(&mut self) {
        tracing::debug!(item_count = self.seed.len(), "catalog reset to seed");
        self.items.clone_from(&self.seed);
    }

    fn item_mut(&mut self, id: &ItemId) -> Result<&mut RentalItem> {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| RentDeskError::ItemNotFound(id.clone()))
    }
}
