//! The booking wizard end to end: step rules, submission and reset.

mod common;

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use staydesk_app::error::AppError;
use staydesk_core::booking::BookingStatus;
use staydesk_core::draft::{BookingDraft, ContactDetails};
use staydesk_core::error::{CoreError, StepError};
use staydesk_core::wizard::WizardStep;

use common::{date, fill_wizard, harness, signed_in};

#[sqlx::test(migrations = "../db/migrations")]
async fn start_prefills_name_and_email(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    h.system.start_booking();

    let draft = h.system.wizard.draft();
    assert_eq!(draft.name, "Demo User");
    assert_eq!(draft.email, "demo@example.com");
    assert!(draft.phone.is_empty());
    assert_eq!(h.system.wizard.step(), WizardStep::SelectHotel);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn step_two_without_dates_does_not_advance(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    h.system.start_booking();
    let catalog = h.system.catalog.snapshot();

    assert_eq!(h.system.wizard.advance(), Err(StepError::MissingHotel));

    h.system.wizard.select_hotel(catalog, 1).unwrap();
    assert_eq!(h.system.wizard.advance(), Ok(WizardStep::SelectRoomAndDates));

    h.system.wizard.select_room(catalog, 10).unwrap();
    assert_eq!(h.system.wizard.advance(), Err(StepError::MissingRoomOrDates));
    assert_eq!(h.system.wizard.step(), WizardStep::SelectRoomAndDates);

    h.system
        .wizard
        .set_dates(Some(date("2025-03-04")), Some(date("2025-03-04")));
    assert_eq!(h.system.wizard.advance(), Err(StepError::InvalidDateRange));
    assert_eq!(h.system.wizard.step(), WizardStep::SelectRoomAndDates);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn room_must_be_available_and_in_selected_hotel(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    h.system.start_booking();
    let catalog = h.system.catalog.snapshot();

    assert_matches!(
        h.system.wizard.select_room(catalog, 10),
        Err(CoreError::Step(StepError::MissingHotel))
    );
    assert_matches!(
        h.system.wizard.select_hotel(catalog, 99),
        Err(CoreError::Validation(_))
    );

    h.system.wizard.select_hotel(catalog, 1).unwrap();
    assert_matches!(
        h.system.wizard.select_room(catalog, 11),
        Err(CoreError::Validation(_))
    );
    assert_matches!(
        h.system.wizard.select_room(catalog, 20),
        Err(CoreError::Validation(_))
    );
    assert_eq!(h.system.wizard.draft().room_id, None);

    h.system.wizard.select_room(catalog, 10).unwrap();
    assert_eq!(h.system.wizard.draft().room_id, Some(10));

    // Switching hotel drops the room.
    h.system.wizard.select_hotel(catalog, 2).unwrap();
    assert_eq!(h.system.wizard.draft().room_id, None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_reflects_draft(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");

    let summary = h.system.wizard.summary(h.system.catalog.snapshot());
    assert_eq!(summary.hotel_name, "Burj Al Arab");
    assert_eq!(summary.room_type, "deluxe suite");
    assert_eq!(summary.nights, 3);
    assert_eq!(summary.total, 600);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_requires_a_signed_in_user(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");
    h.system.session.sign_out();

    let err = h.system.submit_booking().await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotAuthenticated));
    assert_eq!(h.bookings.request_count(), 0);
    assert_eq!(h.system.wizard.step(), WizardStep::Review);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_before_review_is_rejected(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");
    h.system.wizard.retreat();

    let err = h.system.submit_booking().await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotReviewed { step: 3 }));
    assert_eq!(h.bookings.request_count(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn provider_failure_leaves_everything_untouched(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");
    let draft_before: BookingDraft = h.system.wizard.draft().clone();
    h.bookings.reject("Room already booked for these dates");

    let err = h.system.submit_booking().await.unwrap_err();
    assert_matches!(
        err,
        AppError::Core(CoreError::Submission(ref reason)) if reason == "Room already booked for these dates"
    );

    assert_eq!(h.system.wizard.step(), WizardStep::Review);
    assert_eq!(h.system.wizard.draft(), &draft_before);
    let bookings = h.system.my_bookings(date("2025-02-01")).await.unwrap();
    assert!(bookings.upcoming.is_empty());
    assert!(bookings.history.is_empty());

    // The same draft goes through once the backend accepts it.
    h.bookings.accept();
    h.system.submit_booking().await.unwrap();
    assert_eq!(h.bookings.request_count(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn successful_submission_freezes_price_and_resets(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    *h.bookings.next_id.lock().unwrap() = Some("bk-1001".into());
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");

    let booking = h.system.submit_booking().await.unwrap();
    assert_eq!(booking.backend_id.as_deref(), Some("bk-1001"));
    assert_ne!(booking.id, "bk-1001");
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.nights, 3);
    assert_eq!(booking.total, 600);
    assert_eq!(booking.name, "Demo User");
    assert_eq!(booking.notes, "Late arrival");

    let sent = h.bookings.requests.lock().unwrap()[0].clone();
    assert_eq!(sent.room_id, 10);
    assert_eq!(sent.guest_name, "Demo User");
    assert_eq!(sent.check_in, date("2025-03-01"));
    assert_eq!(sent.check_out, date("2025-03-04"));

    // Wizard starts over with the user's details pre-filled.
    assert_eq!(h.system.wizard.step(), WizardStep::SelectHotel);
    assert_eq!(
        h.system.wizard.draft(),
        &BookingDraft::prefilled("Demo User", "demo@example.com")
    );

    // A later price change does not touch the stored total.
    h.catalog.rooms.lock().unwrap()[0].price = 999;
    h.system.catalog.refresh().await.unwrap();
    let bookings = h.system.my_bookings(date("2025-02-01")).await.unwrap();
    assert_eq!(bookings.upcoming.len(), 1);
    assert_eq!(bookings.upcoming[0].total, 600);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_backend_id_gets_a_local_one(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-02");
    let first = h.system.submit_booking().await.unwrap();

    fill_wizard(&mut h.system, "2025-04-01", "2025-04-02");
    let second = h.system.submit_booking().await.unwrap();

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
    assert_eq!(first.backend_id, None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_backend_id_still_records_both_bookings(pool: SqlitePool) {
    let mut h = signed_in(pool).await;

    *h.bookings.next_id.lock().unwrap() = Some("1".into());
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");
    let first = h.system.submit_booking().await.unwrap();

    *h.bookings.next_id.lock().unwrap() = Some("1".into());
    fill_wizard(&mut h.system, "2025-04-01", "2025-04-02");
    let second = h.system.submit_booking().await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.backend_id.as_deref(), Some("1"));
    assert_eq!(h.bookings.request_count(), 2);
    assert_eq!(h.system.wizard.step(), WizardStep::SelectHotel);

    let bookings = h.system.my_bookings(date("2025-02-01")).await.unwrap();
    assert_eq!(bookings.upcoming.len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn draft_edited_after_review_is_revalidated(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");
    h.system.wizard.set_contact(ContactDetails {
        phone: "   ".into(),
        ..common::contact()
    });

    let err = h.system.submit_booking().await.unwrap_err();
    assert_matches!(
        err,
        AppError::Core(CoreError::Step(StepError::MissingContactFields))
    );
    assert_eq!(h.bookings.request_count(), 0);
    assert_eq!(h.system.wizard.step(), WizardStep::Review);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn room_gone_from_catalog_blocks_submission(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");

    h.catalog.rooms.lock().unwrap()[0].status = staydesk_core::catalog::RoomStatus::Unavailable;
    h.system.catalog.refresh().await.unwrap();

    let err = h.system.submit_booking().await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    assert_eq!(h.bookings.request_count(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_refresh_after_booking_does_not_fail_it(pool: SqlitePool) {
    let mut h = signed_in(pool).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");
    h.catalog
        .fail_rooms
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let booking = h.system.submit_booking().await.unwrap();
    assert_eq!(booking.total, 600);
    assert_eq!(h.system.catalog.hotels().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn anonymous_wizard_has_blank_contact(pool: SqlitePool) {
    let mut h = harness(pool).await;
    h.system.start_booking();
    assert_eq!(h.system.wizard.draft(), &BookingDraft::default());
}
