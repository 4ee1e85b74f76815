//! Tests for the credential service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{ErrorCode, PasswordHash, Role, UserId};

fn stored_user() -> User {
    User::new(
        UserId::new(1),
        "doc",
        PasswordHash::new("$argon2id$stored"),
        Role::Doctor,
    )
}

#[fixture]
fn registration() -> Registration {
    Registration::try_from_parts("doc", "123", "doctor").expect("valid registration")
}

#[fixture]
fn credentials() -> LoginCredentials {
    LoginCredentials::try_from_parts("doc", "123").expect("valid credentials")
}

fn hasher_returning(hash: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .with(eq("123"))
        .times(1)
        .return_once(move |_| Ok(PasswordHash::new(hash)));
    hasher
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_password(registration: Registration) {
    let hasher = hasher_returning("$argon2id$stored");
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .withf(|new_user| {
            new_user.username == "doc"
                && new_user.role == Role::Doctor
                && new_user.password_hash.as_str() == "$argon2id$stored"
        })
        .times(1)
        .return_once(|_| Ok(stored_user()));

    let service = CredentialService::new(Arc::new(users), Arc::new(hasher));
    let user = service.register(&registration).await.expect("registered");

    assert_eq!(user, stored_user());
}

#[rstest]
#[tokio::test]
async fn register_maps_duplicate_username_to_invalid_request(registration: Registration) {
    let hasher = hasher_returning("$argon2id$stored");
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_username("doc")));

    let service = CredentialService::new(Arc::new(users), Arc::new(hasher));
    let error = service.register(&registration).await.expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn register_does_not_store_when_hashing_fails(registration: Registration) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hash("rng unavailable")));
    let mut users = MockUserRepository::new();
    users.expect_insert().times(0);

    let service = CredentialService::new(Arc::new(users), Arc::new(hasher));
    let error = service.register(&registration).await.expect_err("hash failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(None, false)]
#[case(Some(stored_user()), false)]
#[tokio::test]
async fn authenticate_hides_which_check_failed(
    credentials: LoginCredentials,
    #[case] found: Option<User>,
    #[case] password_matches: bool,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .with(eq("doc"))
        .return_once(move |_| Ok(found));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .returning(move |_, _| Ok(password_matches));

    let service = CredentialService::new(Arc::new(users), Arc::new(hasher));
    let error = service
        .authenticate(&credentials)
        .await
        .expect_err("authentication fails");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "invalid credentials");
}

#[rstest]
#[tokio::test]
async fn authenticate_returns_user_when_password_matches(credentials: LoginCredentials) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(stored_user())));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, hash| password == "123" && hash.as_str() == "$argon2id$stored")
        .return_once(|_, _| Ok(true));

    let service = CredentialService::new(Arc::new(users), Arc::new(hasher));
    let user = service.authenticate(&credentials).await.expect("authenticated");

    assert_eq!(user.role(), Role::Doctor);
}

#[rstest]
#[tokio::test]
async fn authenticate_maps_store_failure_to_internal(credentials: LoginCredentials) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Err(UserPersistenceError::connection("pool closed")));
    let hasher = MockPasswordHasher::new();

    let service = CredentialService::new(Arc::new(users), Arc::new(hasher));
    let error = service
        .authenticate(&credentials)
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
