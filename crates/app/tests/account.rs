//! Profile edits, password changes and account deletion.

mod common;

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use staydesk_app::error::AppError;
use staydesk_core::draft::BookingDraft;
use staydesk_core::error::CoreError;
use staydesk_core::user::ProfileUpdate;
use staydesk_db::repositories::{BookingRepo, UserRepo};

use common::{fill_wizard, harness, signed_in, PASSWORD};

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_update_applies_present_fields(pool: SqlitePool) {
    let mut h = signed_in(pool.clone()).await;

    let user = h
        .system
        .session
        .update_profile(ProfileUpdate {
            phone: Some("+1 555 0100".into()),
            bio: Some("Frequent traveller".into()),
            ..ProfileUpdate::default()
        })
        .await
        .unwrap();
    assert_eq!(user.full_name, "Demo User");
    assert_eq!(user.phone, "+1 555 0100");
    assert_eq!(user.bio, "Frequent traveller");

    let stored = UserRepo::find_by_email(&pool, "demo@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.phone, "+1 555 0100");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn email_change_must_stay_unique(pool: SqlitePool) {
    let mut h = harness(pool).await;
    h.system
        .session
        .sign_up("taken@example.com", PASSWORD, "First Guest")
        .await
        .unwrap();
    h.system.session.sign_out();
    h.system
        .session
        .sign_up("demo@example.com", PASSWORD, "Demo User")
        .await
        .unwrap();

    let err = h
        .system
        .session
        .update_profile(ProfileUpdate {
            email: Some("Taken@Example.com".into()),
            ..ProfileUpdate::default()
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::DuplicateUser));

    // Re-saving one's own email is fine.
    let user = h
        .system
        .session
        .update_profile(ProfileUpdate {
            email: Some("DEMO@example.com".into()),
            ..ProfileUpdate::default()
        })
        .await
        .unwrap();
    assert_eq!(user.email, "demo@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_checks_current_and_confirmation(pool: SqlitePool) {
    let mut h = signed_in(pool).await;

    let wrong = h
        .system
        .session
        .change_password("not-it", "new-secret", "new-secret")
        .await
        .unwrap_err();
    assert_matches!(wrong, AppError::Core(CoreError::InvalidCredentials));

    let mismatch = h
        .system
        .session
        .change_password(PASSWORD, "new-secret", "new-secrets")
        .await
        .unwrap_err();
    assert_matches!(mismatch, AppError::Core(CoreError::Validation(ref m)) if m == "Passwords do not match");

    let short = h
        .system
        .session
        .change_password(PASSWORD, "abc", "abc")
        .await
        .unwrap_err();
    assert_matches!(short, AppError::Core(CoreError::Validation(_)));

    h.system
        .session
        .change_password(PASSWORD, "new-secret", "new-secret")
        .await
        .unwrap();
    h.system.session.sign_out();

    assert_matches!(
        h.system.session.sign_in("demo@example.com", PASSWORD).await,
        Err(AppError::Core(CoreError::InvalidCredentials))
    );
    h.system
        .session
        .sign_in("demo@example.com", "new-secret")
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_account_removes_user_and_bookings(pool: SqlitePool) {
    let mut h = signed_in(pool.clone()).await;
    fill_wizard(&mut h.system, "2025-03-01", "2025-03-04");
    let booking = h.system.submit_booking().await.unwrap();

    h.system.start_booking();
    let err = h.system.delete_account("delete").await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    assert!(h.system.session.is_signed_in());

    assert_eq!(h.system.wizard.draft().email, "demo@example.com");

    h.system.delete_account("DELETE").await.unwrap();
    assert!(h.system.session.current().is_none());
    assert_eq!(h.system.wizard.draft(), &BookingDraft::default());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
    assert!(BookingRepo::find_by_id(&pool, &booking.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn account_operations_require_sign_in(pool: SqlitePool) {
    let mut h = harness(pool).await;

    assert_matches!(
        h.system.session.update_profile(ProfileUpdate::default()).await,
        Err(AppError::Core(CoreError::NotAuthenticated))
    );
    assert_matches!(
        h.system.session.delete_account("DELETE").await,
        Err(AppError::Core(CoreError::NotAuthenticated))
    );
}
