//! End-to-end authentication flow tests.
//!
//! Exercises the full registration / login / logout / identity-lookup flow
//! against an in-memory database.

use stile::{
    AuthService, Database, LoginError, LoginRequest, RegisterError, RegisterRequest,
    UserRepository,
};

async fn setup() -> (Database, AuthService) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let service = AuthService::new(db.pool().clone());
    (db, service)
}

fn register_req(username: &str, password: &str, confirmation: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        password_confirmation: confirmation.to_string(),
    }
}

fn login_req(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn register_then_login_then_lookup() {
    let (_db, service) = setup().await;

    let registered = service
        .register(&register_req("alice1", "secret12", "secret12"))
        .await
        .unwrap();

    // Registration already binds a session
    let user = service
        .current_user(&registered.session.token)
        .await
        .unwrap();
    assert_eq!(user.username, "alice1");

    // A fresh login issues a second, independent session
    let logged_in = service
        .login(&login_req("alice1", "secret12"))
        .await
        .unwrap();
    assert_ne!(logged_in.session.token, registered.session.token);
    assert_eq!(logged_in.user.id, registered.user.id);

    let user = service
        .current_user(&logged_in.session.token)
        .await
        .unwrap();
    assert_eq!(user.id, registered.user.id);
}

#[tokio::test]
async fn stored_password_is_hashed_and_salted() {
    let (db, service) = setup().await;

    service
        .register(&register_req("alice1", "secret12", "secret12"))
        .await
        .unwrap();
    service
        .register(&register_req("bobby1", "secret12", "secret12"))
        .await
        .unwrap();

    let repo = UserRepository::new(db.pool());
    let alice = repo.get_by_username("alice1").await.unwrap().unwrap();
    let bobby = repo.get_by_username("bobby1").await.unwrap().unwrap();

    assert!(alice.password.starts_with("$argon2id$"));
    assert_ne!(alice.password, "secret12");
    // Same plaintext, different salts
    assert_ne!(alice.password, bobby.password);

    assert!(stile::verify_password("secret12", &alice.password));
    assert!(stile::verify_password("secret12", &bobby.password));
    assert!(!stile::verify_password("wrong pw", &alice.password));
}

#[tokio::test]
async fn duplicate_registration_leaves_single_record() {
    let (db, service) = setup().await;

    service
        .register(&register_req("alice1", "secret12", "secret12"))
        .await
        .unwrap();

    let result = service
        .register(&register_req("alice1", "other123", "other123"))
        .await;
    match result {
        Err(RegisterError::UsernameTaken) => {}
        other => panic!("expected UsernameTaken, got {other:?}"),
    }

    let repo = UserRepository::new(db.pool());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn mismatched_confirmation_creates_no_record_or_session() {
    let (db, service) = setup().await;

    let result = service
        .register(&register_req("alice1", "abcde", "abcdf"))
        .await;
    assert!(matches!(result, Err(RegisterError::PasswordMismatch)));

    let errors = result.unwrap_err().field_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field.as_str(), "password");
    assert_eq!(errors[0].code.as_str(), "mismatch");

    let repo = UserRepository::new(db.pool());
    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(service.sessions().session_count(), 0);

    // The username is still free
    assert!(service
        .register(&register_req("alice1", "abcde", "abcde"))
        .await
        .is_ok());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (_db, service) = setup().await;

    service
        .register(&register_req("alice1", "secret12", "secret12"))
        .await
        .unwrap();

    let absent = service
        .login(&login_req("nobody1", "secret12"))
        .await
        .unwrap_err();
    let wrong = service
        .login(&login_req("alice1", "wrongpw1"))
        .await
        .unwrap_err();

    assert!(matches!(absent, LoginError::InvalidCredentials));
    assert!(matches!(wrong, LoginError::InvalidCredentials));
    // Same field errors, same message: no username-enumeration oracle
    assert_eq!(absent.field_errors(), wrong.field_errors());
    assert_eq!(absent.to_string(), wrong.to_string());
}

#[tokio::test]
async fn logout_is_idempotent_and_kills_identity() {
    let (_db, service) = setup().await;

    let outcome = service
        .register(&register_req("alice1", "secret12", "secret12"))
        .await
        .unwrap();
    let token = outcome.session.token;

    assert!(service.current_user(&token).await.is_some());

    service.logout(&token);
    assert!(service.current_user(&token).await.is_none());

    // Second logout of the same token is still a success
    service.logout(&token);
    assert!(service.current_user(&token).await.is_none());
}

#[tokio::test]
async fn username_uniqueness_is_case_insensitive() {
    let (_db, service) = setup().await;

    service
        .register(&register_req("Alice1", "secret12", "secret12"))
        .await
        .unwrap();

    let result = service
        .register(&register_req("ALICE1", "secret12", "secret12"))
        .await;
    assert!(matches!(result, Err(RegisterError::UsernameTaken)));

    // And login finds the account regardless of case
    assert!(service.login(&login_req("alice1", "secret12")).await.is_ok());
}

#[tokio::test]
async fn concurrent_logins_get_independent_sessions() {
    let (_db, service) = setup().await;
    let service = std::sync::Arc::new(service);

    service
        .register(&register_req("alice1", "secret12", "secret12"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = std::sync::Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .login(&login_req("alice1", "secret12"))
                .await
                .unwrap()
                .session
                .token
        }));
    }

    let mut tokens = Vec::new();
    for handle in handles {
        tokens.push(handle.await.unwrap());
    }

    // All distinct, all resolvable
    for (i, token) in tokens.iter().enumerate() {
        assert!(service.current_user(token).await.is_some());
        for other in &tokens[i + 1..] {
            assert_ne!(token, other);
        }
    }
}
