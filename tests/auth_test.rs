//! Account registration and authentication tests

mod helpers;

use assert_matches::assert_matches;

use EventDesk::models::NewUserAccount;
use EventDesk::EventDeskError;

use helpers::{auth_service, setup_test_db};

fn account(username: &str, password: &str, email: &str) -> NewUserAccount {
    NewUserAccount {
        username: username.to_string(),
        password: password.to_string(),
        email: email.to_string(),
        is_staff: false,
    }
}

#[tokio::test]
async fn test_register_and_authenticate_roundtrip() {
    let db = setup_test_db().await;
    let auth = auth_service(&db);

    let user = auth
        .register(account("alice", "s3cret", "alice@example.com"))
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert!(!user.is_staff);

    let session = auth.authenticate("alice", "s3cret").await.unwrap();
    assert_eq!(session.user_id, user.id);
    assert_eq!(session.username, "alice");
    assert!(!session.is_staff);

    let by_id = db.users.find_by_id(user.id).await.unwrap().unwrap();
    let by_email = db
        .users
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.username, by_email.username);
}

#[tokio::test]
async fn test_password_is_stored_hashed_and_salted() {
    let db = setup_test_db().await;
    let auth = auth_service(&db);

    auth.register(account("alice", "s3cret", "alice@example.com"))
        .await
        .unwrap();

    let stored = db
        .users
        .find_by_username("alice")
        .await
        .unwrap()
        .expect("user exists");
    assert_ne!(stored.password_hash, "s3cret");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let db = setup_test_db().await;
    let auth = auth_service(&db);

    auth.register(account("alice", "s3cret", "alice@example.com"))
        .await
        .unwrap();

    let wrong_password = auth.authenticate("alice", "guess").await.unwrap_err();
    let unknown_user = auth.authenticate("mallory", "guess").await.unwrap_err();
    assert_matches!(wrong_password, EventDeskError::Authentication(_));
    assert_matches!(unknown_user, EventDeskError::Authentication(_));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_duplicate_username_and_email_conflict() {
    let db = setup_test_db().await;
    let auth = auth_service(&db);

    auth.register(account("alice", "pw", "alice@example.com"))
        .await
        .unwrap();

    let same_name = auth
        .register(account("alice", "pw", "other@example.com"))
        .await
        .unwrap_err();
    assert_matches!(same_name, EventDeskError::DuplicateUser(_));
    assert!(same_name.is_conflict());

    let same_email = auth
        .register(account("alice2", "pw", "alice@example.com"))
        .await
        .unwrap_err();
    assert_matches!(same_email, EventDeskError::DuplicateUser(_));
}

#[tokio::test]
async fn test_register_validates_input() {
    let db = setup_test_db().await;
    let auth = auth_service(&db);

    assert_matches!(
        auth.register(account("", "pw", "a@example.com")).await,
        Err(EventDeskError::InvalidInput(_))
    );
    assert_matches!(
        auth.register(account("bob", "", "b@example.com")).await,
        Err(EventDeskError::InvalidInput(_))
    );
    assert_matches!(
        auth.register(account("carol", "pw", "not-an-email")).await,
        Err(EventDeskError::InvalidInput(_))
    );
}
