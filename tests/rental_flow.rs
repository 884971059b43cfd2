//! End-to-end rental lifecycle through the public library API.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rentdesk::app::{handle_event, AppState, Event, Modal, Screen};
use rentdesk::catalog::{available_item, CatalogStore, SeedCatalog};
use rentdesk::domain::{Clock, ItemId, ItemStatus, RentalPeriod, RentalRequest};
use rentdesk::{RentDeskError, Theme};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

fn tent_store() -> CatalogStore {
    CatalogStore::from_seed(
        vec![available_item("t1", "Tent", "Outdoor", "4-person dome tent")],
        RentalPeriod::default(),
    )
    .unwrap()
}

#[test]
fn tent_is_rented_returned_and_rented_again() {
    let mut store = tent_store();
    let t1 = ItemId::from("t1");

    let rented = store.rent(&t1, &RentalRequest::new("Kim", "01011112222"), now()).unwrap();
    assert_eq!(rented.status(), ItemStatus::Rented);
    let renter = rented.renter().unwrap();
    assert_eq!(renter.name, "Kim");
    assert_eq!(renter.contact, "01011112222");
    assert_eq!(renter.expected_return_date - renter.rent_date, Duration::days(3));

    assert!(!rented.is_overdue(now()));
    assert!(!rented.is_overdue(now() + Duration::days(3)));
    assert!(rented.is_overdue(now() + Duration::days(3) + Duration::seconds(1)));

    let returned = store.return_item(&t1).unwrap();
    assert!(returned.renter().is_none());
    assert_eq!(returned.name, "Tent");
    assert_eq!(returned.description, "4-person dome tent");

    let later = now() + Duration::days(10);
    let again = store.rent(&t1, &RentalRequest::new("Lee", "01022223333"), later).unwrap();
    assert_eq!(again.renter().unwrap().rent_date, later);
}

#[test]
fn failures_leave_the_catalog_unchanged() {
    let mut store = tent_store();
    let before = store.list().to_vec();

    assert!(matches!(
        store.rent(&ItemId::from("missing-id"), &RentalRequest::new("Kim", "0101"), now()),
        Err(RentDeskError::ItemNotFound(_))
    ));
    assert!(matches!(
        store.rent(&ItemId::from("t1"), &RentalRequest::new("Kim", "010-1111"), now()),
        Err(RentDeskError::Validation(_))
    ));
    assert!(matches!(
        store.return_item(&ItemId::from("t1")),
        Err(RentDeskError::ItemNotRented(_))
    ));

    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn user_and_admin_share_one_catalog() {
    let catalog = CatalogStore::from_seed(SeedCatalog::builtin(now()).into_items(), RentalPeriod::default()).unwrap();
    let mut state = AppState::new(catalog, Theme::default());
    state.clock = Clock::Fixed(now());

    let send = |state: &mut AppState, events: &[Event]| {
        for event in events {
            handle_event(state, event).unwrap();
        }
    };
    let type_text = |state: &mut AppState, text: &str| {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    };

    // The requester rents the first item (DSLR camera kit).
    send(&mut state, &[Event::OpenUserView, Event::Select]);
    type_text(&mut state, "Park");
    send(&mut state, &[Event::NextField]);
    type_text(&mut state, "01055556666");
    send(&mut state, &[Event::NextField]);
    type_text(&mut state, " ");
    send(&mut state, &[Event::NextField]);
    type_text(&mut state, " ");
    send(&mut state, &[Event::Submit]);
    assert!(matches!(state.modal, Some(Modal::RentSuccess { .. })));
    send(&mut state, &[Event::Submit, Event::Back]);
    assert_eq!(state.screen, Screen::Landing);

    // The administrator sees the rental and records the return.
    send(&mut state, &[Event::OpenAdminLogin]);
    type_text(&mut state, "2026prime");
    send(&mut state, &[Event::Submit]);
    assert_eq!(state.screen, Screen::Admin);

    let vm = state.compute_viewmodel(24, 120);
    assert_eq!(vm.display_items[0].renter, "Park");
    assert_eq!(vm.display_items[0].due, "2026-10-22 (in 3d)");

    send(&mut state, &[Event::ReturnSelected]);
    assert!(state.catalog.get(&ItemId::from("1")).unwrap().is_available());
    assert_eq!(state.flash.as_ref().unwrap().message, "DSLR camera kit returned");
}
