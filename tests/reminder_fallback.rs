//! Reminder composition never fails: every generation failure ends in the
//! local template.

use chrono::{Duration, TimeZone, Utc};
use rentdesk::catalog::available_item;
use rentdesk::domain::{ItemState, RenterInfo};
use rentdesk::reminder::{
    parse_response, GenerationClient, GenerationError, Locale, Reminder, ReminderComposer, ReminderRequest,
};

fn rented_request() -> ReminderRequest {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    let mut item = available_item("t1", "Tent", "Outdoor", "4-person dome tent");
    item.state = ItemState::Rented(RenterInfo {
        name: "Kim".to_string(),
        contact: "01011112222".to_string(),
        rent_date: now - Duration::days(4),
        expected_return_date: now - Duration::days(1),
    });
    ReminderRequest::from_item(&item, now).unwrap()
}

#[test]
fn every_failure_resolves_to_the_fallback() {
    let composer = ReminderComposer::default();
    let request = rented_request();
    assert!(request.is_overdue);

    let failures = [
        GenerationClient::default().build_request("prompt").map(|_| String::new()),
        parse_response(503, b""),
        parse_response(200, b"not json"),
        parse_response(200, br#"{"candidates":[]}"#),
        Err(GenerationError::TimedOut),
    ];

    for outcome in failures {
        let reminder = composer.resolve(&request, outcome);
        assert!(reminder.is_fallback());
        assert!(reminder.text().contains("Kim"));
        assert!(reminder.text().contains("Tent"));
    }
}

#[test]
fn successful_generation_is_kept() {
    let composer = ReminderComposer::default();
    let body = br#"{"candidates":[{"content":{"parts":[{"text":"Kim, please bring the tent back today."}]}}]}"#;

    let reminder = composer.resolve(&rented_request(), parse_response(200, body));
    assert_eq!(
        reminder,
        Reminder::Generated("Kim, please bring the tent back today.".to_string())
    );
}

#[test]
fn korean_fallback_uses_local_date_format() {
    let composer = ReminderComposer::new(Locale::Ko, chrono::FixedOffset::east_opt(9 * 3600).unwrap(), "프라임");
    let reminder = composer.resolve(&rented_request(), Err(GenerationError::Empty));
    assert_eq!(
        reminder.text(),
        "Kim님, 대여하신 Tent의 반납일은 2026. 10. 18.입니다. 반납 부탁드립니다."
    );
}
