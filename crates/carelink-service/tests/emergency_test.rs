//! Emergency orchestration: booking creation on both paths, audience
//! resolution, alert fan-out, and failure containment.

mod common;

use carelink_core::error::ErrorKind;
use carelink_core::types::pagination::PageRequest;
use carelink_database::stores::BookingStore;
use carelink_entity::booking::{BookingStatus, EMERGENCY_NOTES_MARKER};
use carelink_entity::caregiver::CaregiverWithUser;
use carelink_entity::notification::NotificationKind;
use carelink_entity::user::{User, UserRole};
use carelink_service::emergency::CreateEmergencyRequest;

use common::*;

/// A directory of three verified caregivers and one active admin, plus
/// the submitting customer "Jane".
fn jane_and_audience() -> (User, Vec<User>, Vec<CaregiverWithUser>) {
    let jane = make_user("Jane", "jane@example.com", UserRole::Customer, true);

    let mut users = vec![jane.clone()];
    let mut caregivers = Vec::new();
    for i in 0..3 {
        let user = make_user(
            &format!("Caregiver {i}"),
            &format!("cg{i}@example.com"),
            UserRole::Caregiver,
            true,
        );
        caregivers.push(CaregiverWithUser {
            profile: make_profile(user.id, true, 4500),
            user: user.clone(),
        });
        users.push(user);
    }
    users.push(make_user("Ana", "ana@example.com", UserRole::Admin, true));

    (jane, users, caregivers)
}

fn jane_request() -> CreateEmergencyRequest {
    CreateEmergencyRequest {
        caregiver_id: None,
        address: "12 Oak Street, Springfield".to_string(),
        notes: Some("fell down, needs help".to_string()),
        phone: Some("555-1234".to_string()),
    }
}

#[tokio::test]
async fn broadcast_emergency_creates_booking_and_notifies_audience() {
    let (jane, users, caregivers) = jane_and_audience();
    let harness = TestHarness::new(users, caregivers);

    let booking = harness
        .emergency_service
        .create_emergency_request(&ctx_for(&jane), jane_request())
        .await
        .unwrap();

    assert_eq!(booking.customer_id, jane.id);
    assert_eq!(booking.caregiver_id, None);
    assert_eq!(booking.price_cents, 0);
    assert_eq!(booking.status, BookingStatus::Requested);
    assert!(booking.is_emergency);
    assert_eq!(
        booking.notes.as_deref(),
        Some("fell down, needs help [EMERGENCY]")
    );

    // 3 verified caregivers + 1 active admin → 4 rows, all unread emergency.
    let notifications = harness.notifications.all();
    assert_eq!(notifications.len(), 4);
    for n in &notifications {
        assert_eq!(n.kind, NotificationKind::Emergency);
        assert!(n.is_unread());
        assert_eq!(
            n.metadata.get("address").and_then(|v| v.as_str()),
            Some("12 Oak Street, Springfield")
        );
        assert_eq!(
            n.metadata.get("customerPhone").and_then(|v| v.as_str()),
            Some("555-1234")
        );
        assert_eq!(
            n.metadata.get("bookingId").and_then(|v| v.as_str()),
            Some(booking.id.to_string().as_str())
        );
    }

    // Emails went out to the whole audience.
    assert_eq!(harness.mailer.sent_to().len(), 4);
}

#[tokio::test]
async fn broadcast_without_notes_uses_default_phrase() {
    let (jane, users, caregivers) = jane_and_audience();
    let harness = TestHarness::new(users, caregivers);

    let booking = harness
        .emergency_service
        .create_emergency_request(
            &ctx_for(&jane),
            CreateEmergencyRequest {
                notes: None,
                ..jane_request()
            },
        )
        .await
        .unwrap();

    let notes = booking.notes.unwrap();
    assert!(notes.starts_with("Emergency care request"));
    assert!(notes.ends_with(EMERGENCY_NOTES_MARKER));
}

#[tokio::test]
async fn targeted_emergency_delegates_to_booking_service() {
    let (jane, users, caregivers) = jane_and_audience();
    let target = caregivers[0].profile.id;
    let harness = TestHarness::new(users, caregivers);

    let booking = harness
        .emergency_service
        .create_emergency_request(
            &ctx_for(&jane),
            CreateEmergencyRequest {
                caregiver_id: Some(target),
                ..jane_request()
            },
        )
        .await
        .unwrap();

    // Ordinary creation rules applied: caregiver assigned, price from the
    // caregiver's hourly rate, no broadcast marker.
    assert_eq!(booking.caregiver_id, Some(target));
    assert_eq!(booking.price_cents, 4500);
    assert_eq!(booking.status, BookingStatus::Requested);
    assert!(booking.is_emergency);
    assert_eq!(booking.notes.as_deref(), Some("fell down, needs help"));

    // The whole audience is still alerted, with the target in metadata.
    let notifications = harness.notifications.all();
    assert_eq!(notifications.len(), 4);
    assert_eq!(
        notifications[0]
            .metadata
            .get("caregiverId")
            .and_then(|v| v.as_str()),
        Some(target.to_string().as_str())
    );
}

#[tokio::test]
async fn unknown_caregiver_fails_without_side_effects() {
    let (jane, users, caregivers) = jane_and_audience();
    let harness = TestHarness::new(users, caregivers);

    let err = harness
        .emergency_service
        .create_emergency_request(
            &ctx_for(&jane),
            CreateEmergencyRequest {
                caregiver_id: Some(uuid::Uuid::new_v4()),
                ..jane_request()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(harness.bookings.all().is_empty());
    assert!(harness.notifications.all().is_empty());
}

#[tokio::test]
async fn blank_address_is_rejected_before_any_write() {
    let (jane, users, caregivers) = jane_and_audience();
    let harness = TestHarness::new(users, caregivers);

    let err = harness
        .emergency_service
        .create_emergency_request(
            &ctx_for(&jane),
            CreateEmergencyRequest {
                address: "   ".to_string(),
                ..jane_request()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(harness.bookings.all().is_empty());
    assert!(harness.notifications.all().is_empty());
}

#[tokio::test]
async fn unknown_customer_is_rejected() {
    let (_, users, caregivers) = jane_and_audience();
    let harness = TestHarness::new(users, caregivers);

    let ghost = make_user("Ghost", "ghost@example.com", UserRole::Customer, true);
    let err = harness
        .emergency_service
        .create_emergency_request(&ctx_for(&ghost), jane_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(harness.bookings.all().is_empty());
}

#[tokio::test]
async fn user_reachable_via_both_paths_gets_one_notification() {
    // An admin who also carries a verified caregiver profile: the roles
    // are normally disjoint, but resolution must tolerate the overlap.
    let jane = make_user("Jane", "jane@example.com", UserRole::Customer, true);
    let dual = make_user("Dual", "dual@example.com", UserRole::Admin, true);
    let caregivers = vec![CaregiverWithUser {
        profile: make_profile(dual.id, true, 3000),
        user: dual.clone(),
    }];
    let harness = TestHarness::new(vec![jane.clone(), dual.clone()], caregivers);

    harness
        .emergency_service
        .create_emergency_request(&ctx_for(&jane), jane_request())
        .await
        .unwrap();

    let notifications = harness.notifications.all();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id, dual.id);
}

#[tokio::test]
async fn unverified_caregivers_and_inactive_admins_are_excluded() {
    let jane = make_user("Jane", "jane@example.com", UserRole::Customer, true);
    let verified = make_user("Ok", "ok@example.com", UserRole::Caregiver, true);
    let unverified = make_user("Nope", "nope@example.com", UserRole::Caregiver, true);
    let inactive_admin = make_user("Gone", "gone@example.com", UserRole::Admin, false);

    let caregivers = vec![
        CaregiverWithUser {
            profile: make_profile(verified.id, true, 3000),
            user: verified.clone(),
        },
        CaregiverWithUser {
            profile: make_profile(unverified.id, false, 3000),
            user: unverified.clone(),
        },
    ];
    let harness = TestHarness::new(
        vec![jane.clone(), verified.clone(), unverified, inactive_admin],
        caregivers,
    );

    harness
        .emergency_service
        .create_emergency_request(&ctx_for(&jane), jane_request())
        .await
        .unwrap();

    let notifications = harness.notifications.all();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id, verified.id);
}

#[tokio::test]
async fn audience_resolution_failure_leaves_booking_standing() {
    let (jane, users, caregivers) = jane_and_audience();
    let harness = TestHarness::new(users, caregivers);
    harness.caregivers.set_fail_directory(true);

    let booking = harness
        .emergency_service
        .create_emergency_request(&ctx_for(&jane), jane_request())
        .await
        .unwrap();

    // The emergency is still logged even though nobody could be notified.
    assert!(booking.is_emergency);
    assert_eq!(harness.bookings.all().len(), 1);
    assert!(harness.notifications.all().is_empty());
}

#[tokio::test]
async fn list_emergency_requests_filters_flag_and_status() {
    let (jane, users, caregivers) = jane_and_audience();
    let harness = TestHarness::new(users, caregivers);
    let ctx = ctx_for(&jane);

    let first = harness
        .emergency_service
        .create_emergency_request(&ctx, jane_request())
        .await
        .unwrap();
    let second = harness
        .emergency_service
        .create_emergency_request(&ctx, jane_request())
        .await
        .unwrap();

    // Cancel the first; it should drop out of the emergency listing.
    harness
        .bookings
        .update_status(first.id, BookingStatus::Cancelled)
        .await
        .unwrap();

    let page = harness
        .emergency_service
        .list_emergency_requests(&PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, second.id);
}
