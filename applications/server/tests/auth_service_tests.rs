/// Authentication service tests
/// Tests JWT generation, password hashing, token validation
mod common;

use chrono::{Duration, Utc};
use planzen_core::{Email, UserId};
use planzen_server::services::auth::{AuthService, SESSION_TTL_SECS};

fn create_test_auth_service() -> AuthService {
    AuthService::new("test-secret-key".to_string(), 4, false)
}

fn email() -> Email {
    Email::parse(common::fixtures::TEST_EMAIL).unwrap()
}

/// Test password hashing produces valid bcrypt hashes
#[tokio::test]
async fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let password = "Secret123!";
    let hash = auth_service.hash_password(password).unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert_eq!(hash.len(), 60);

    // Verify the hash is different each time (salt is random)
    let hash2 = auth_service.hash_password(password).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

/// Test the configured cost is used
#[tokio::test]
async fn test_password_hashing_uses_configured_cost() {
    let hash = AuthService::new("s".to_string(), 5, false)
        .hash_password("Secret123!")
        .unwrap();
    assert!(hash.starts_with("$2b$05$"), "got {}", hash);
}

/// Test password verification with correct and incorrect passwords
#[tokio::test]
async fn test_password_verification() {
    let auth_service = create_test_auth_service();
    let hash = auth_service.hash_password("Secret123!").unwrap();

    assert!(auth_service.verify_password("Secret123!", &hash).unwrap());
    for wrong in ["", "Secret123", "secret123!", "Secret123! ", "Secret123!!"] {
        assert!(
            !auth_service.verify_password(wrong, &hash).unwrap(),
            "{:?} should not verify",
            wrong
        );
    }
}

/// Test password verification with invalid hash format
#[tokio::test]
async fn test_password_verification_invalid_hash() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify_password("password", "not-a-valid-hash");
    assert!(result.is_err(), "Invalid hash should return error");
}

/// Test session token round trip
#[tokio::test]
async fn test_session_token_generation_and_validation() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::new("user-123");

    let token = auth_service
        .create_token_at(&user_id, &email(), Utc::now())
        .unwrap();
    let claims = auth_service.verify_token(&token).unwrap();

    assert_eq!(claims.id, "user-123");
    assert_eq!(claims.email, common::fixtures::TEST_EMAIL);
    assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
}

/// Test token validation with a different secret
#[tokio::test]
async fn test_token_validation_invalid_signature() {
    let token = create_test_auth_service()
        .create_token_at(&UserId::new("user-123"), &email(), Utc::now())
        .unwrap();

    let other = AuthService::new("different-secret".to_string(), 4, false);
    assert!(other.verify_token(&token).is_err());
}

/// Test malformed and empty tokens
#[tokio::test]
async fn test_token_validation_malformed() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.verify_token("not.a.valid.jwt").is_err());
    assert!(auth_service.verify_token("").is_err());
}

/// Test tokens issued more than a day ago are rejected
#[tokio::test]
async fn test_session_token_expiration() {
    let auth_service = create_test_auth_service();

    let issued = Utc::now() - Duration::days(2);
    let token = auth_service
        .create_token_at(&UserId::new("user-123"), &email(), issued)
        .unwrap();

    assert!(auth_service.verify_token(&token).is_err());
}

/// Test the recovery token is random
#[tokio::test]
async fn test_recovery_tokens_are_unique() {
    let auth_service = create_test_auth_service();

    let a = auth_service.recovery_token();
    let b = auth_service.recovery_token();
    assert_ne!(a, b);
    assert_eq!(a.len(), 32);
}
