//! Integration tests for the users slice

mod test_helpers;

use chrono::{Duration, Utc};
use planzen_core::types::{Email, TokenGrant, UserId};
use planzen_core::{PlanZenError, Storage};
use test_helpers::{new_user, TestDb};

#[tokio::test]
async fn test_create_and_get_user() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    let created = db.create_user(new_user("ada@example.com")).await.unwrap();
    assert_eq!(created.created_at, created.updated_at);

    let fetched = db.get_user(&created.id).await.unwrap().expect("user exists");
    assert_eq!(fetched.email.as_str(), "ada@example.com");
    assert_eq!(fetched.first_name, "Ada");
    assert_eq!(fetched.date_of_birth, created.date_of_birth);
    assert_eq!(fetched.created_at, created.created_at);
    assert!(fetched.forgot_password.is_none());
}

#[tokio::test]
async fn test_get_missing_user_returns_none() {
    let test_db = TestDb::new().await;

    let missing = test_db.db.get_user(&UserId::new("nope")).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    db.create_user(new_user("ada@example.com")).await.unwrap();

    // Different spelling of the same address normalises to the same email
    let err = db
        .create_user(new_user("  ADA@Example.com "))
        .await
        .unwrap_err();
    assert!(matches!(err, PlanZenError::Duplicate(_)), "got {:?}", err);

    assert_eq!(db.get_all_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_user_by_email_is_case_insensitive() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    let created = db.create_user(new_user("grace@example.com")).await.unwrap();

    let found = db
        .find_user_by_email(&Email::parse("Grace@EXAMPLE.com").unwrap())
        .await
        .unwrap()
        .expect("user found");
    assert_eq!(found.id, created.id);

    let missing = db
        .find_user_by_email(&Email::parse("nobody@example.com").unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_save_user_bumps_updated_at() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    let mut user = db.create_user(new_user("ada@example.com")).await.unwrap();
    let created_at = user.created_at;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    user.first_name = "Augusta".to_string();
    let saved = db.save_user(user).await.unwrap();

    assert_eq!(saved.created_at, created_at);
    assert!(saved.updated_at > created_at);

    let fetched = db.get_user(&saved.id).await.unwrap().unwrap();
    assert_eq!(fetched.first_name, "Augusta");
    assert_eq!(fetched.updated_at, saved.updated_at);
}

#[tokio::test]
async fn test_save_unknown_user_is_not_found() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    let user = planzen_core::types::User::new(new_user("ghost@example.com"), Utc::now());
    let err = db.save_user(user).await.unwrap_err();
    assert!(matches!(err, PlanZenError::NotFound { .. }));
}

#[tokio::test]
async fn test_forgot_password_token_round_trip() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    let mut user = db.create_user(new_user("ada@example.com")).await.unwrap();
    let expires_at = Utc::now() + Duration::hours(1);
    user.forgot_password = Some(TokenGrant {
        token: "reset-me".to_string(),
        expires_at,
    });
    db.save_user(user.clone()).await.unwrap();

    let found = db
        .find_user_by_forgot_password_token("reset-me")
        .await
        .unwrap()
        .expect("token holder found");
    assert_eq!(found.id, user.id);

    let grant = found.forgot_password.expect("grant stored");
    assert_eq!(grant.expires_at, expires_at);
    assert!(grant.is_valid_at(Utc::now()));

    assert!(db
        .find_user_by_forgot_password_token("other")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_get_all_users_ordered_by_email() {
    let test_db = TestDb::new().await;
    let db = &test_db.db;

    db.create_user(new_user("zoe@example.com")).await.unwrap();
    db.create_user(new_user("amy@example.com")).await.unwrap();

    let emails: Vec<String> = db
        .get_all_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.email.to_string())
        .collect();
    assert_eq!(emails, vec!["amy@example.com", "zoe@example.com"]);
}
