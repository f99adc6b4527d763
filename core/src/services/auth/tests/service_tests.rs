//! Unit tests for authentication service

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use std::thread;

use crate::domain::entities::user::Role;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemoryUserRepository, UserRepository};
use crate::services::auth::{AuthService, Registration};
use crate::services::clock::{Clock, ManualClock};
use crate::services::password::BcryptPasswordHasher;
use crate::services::token::{TokenService, TokenServiceConfig};

use super::mocks::{PanickingHasher, RecordingHasher, UnavailableUserRepository};

struct Harness {
    service: AuthService<InMemoryUserRepository>,
    repository: Arc<InMemoryUserRepository>,
    clock: Arc<ManualClock>,
}

fn token_service() -> Arc<TokenService> {
    Arc::new(
        TokenService::new(TokenServiceConfig {
            jwt_secret: "auth-service-test-secret".to_string(),
            issuer: "auth-service".to_string(),
            ttl_minutes: 60,
        })
        .unwrap(),
    )
}

fn harness() -> Harness {
    let repository = Arc::new(InMemoryUserRepository::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
    ));
    let service = AuthService::new(
        Arc::clone(&repository),
        Arc::new(BcryptPasswordHasher::new(4)),
        token_service(),
    )
    .with_clock(clock.clone());

    Harness {
        service,
        repository,
        clock,
    }
}

fn registration(email: &str, role: Option<&str>) -> Registration {
    Registration {
        name: "Ann".to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
        role: role.map(str::to_string),
    }
}

fn auth_error(err: DomainError) -> AuthError {
    match err {
        DomainError::Auth(err) => err,
        other => panic!("expected auth error, got {:?}", other),
    }
}

fn token_error(err: DomainError) -> TokenError {
    match err {
        DomainError::Token(err) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let h = harness();

    let session = h
        .service
        .register(registration("a@x.com", None))
        .await
        .unwrap();
    assert_eq!(session.user.id, 1);
    assert_eq!(session.user.role, Role::User);
    let t1 = session.token;

    let claims = h.service.validate(&t1).await.unwrap();
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.principal_id().unwrap(), 1);

    h.service.logout(&t1).await.unwrap();
    let err = h.service.validate(&t1).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::Revoked);

    let login = h.service.login("a@x.com", "secret1").await.unwrap();
    let t2 = login.token;
    assert_ne!(t1, t2);
    assert!(h.service.validate(&t2).await.is_ok());
}

#[tokio::test]
async fn test_register_roles() {
    let h = harness();

    let admin = h
        .service
        .register(registration("admin@x.com", Some("admin")))
        .await
        .unwrap();
    assert_eq!(admin.user.role, Role::Admin);

    let empty = h
        .service
        .register(registration("empty@x.com", Some("")))
        .await
        .unwrap();
    assert_eq!(empty.user.role, Role::User);

    let err = h
        .service
        .register(registration("root@x.com", Some("root")))
        .await
        .unwrap_err();
    assert_eq!(
        auth_error(err),
        AuthError::InvalidRole {
            role: "root".to_string()
        }
    );
    assert!(h.repository.find_by_email("root@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_invalid_role_checked_before_hashing() {
    let hasher = Arc::new(RecordingHasher::default());
    let service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::clone(&hasher),
        token_service(),
    );

    let result = service.register(registration("a@x.com", Some("owner"))).await;

    assert!(result.is_err());
    assert_eq!(hasher.hash_calls(), 0);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let h = harness();
    h.service
        .register(registration("a@x.com", None))
        .await
        .unwrap();

    let err = h
        .service
        .register(registration("a@x.com", None))
        .await
        .unwrap_err();

    assert_eq!(auth_error(err), AuthError::DuplicateEmail);
}

#[tokio::test]
async fn test_register_stores_digest_not_password() {
    let h = harness();
    h.service
        .register(registration("a@x.com", None))
        .await
        .unwrap();

    let stored = h.repository.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "secret1");
    assert!(stored.password_hash.starts_with("$2"));
}

#[tokio::test]
async fn test_register_encoding_failure() {
    let service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(RecordingHasher::failing()),
        token_service(),
    );

    let err = service
        .register(registration("a@x.com", None))
        .await
        .unwrap_err();

    assert_eq!(auth_error(err), AuthError::EncodingError);
}

#[tokio::test]
async fn test_login_does_not_reveal_which_part_failed() {
    let h = harness();
    h.service
        .register(registration("realuser@x.com", None))
        .await
        .unwrap();

    let unknown = h.service.login("nouser@x.com", "pw").await.unwrap_err();
    let wrong = h
        .service
        .login("realuser@x.com", "wrongpw")
        .await
        .unwrap_err();

    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(auth_error(unknown), AuthError::InvalidCredentials);
    assert_eq!(auth_error(wrong), AuthError::InvalidCredentials);
}

#[tokio::test]
async fn test_login_expiry_follows_clock() {
    let h = harness();
    h.service
        .register(registration("a@x.com", None))
        .await
        .unwrap();
    let session = h.service.login("a@x.com", "secret1").await.unwrap();

    assert_eq!(session.expires_at, h.clock.now() + Duration::minutes(60));

    h.clock.advance(Duration::minutes(59));
    assert!(h.service.validate(&session.token).await.is_ok());

    h.clock.advance(Duration::minutes(1));
    let err = h.service.validate(&session.token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::Expired);
}

#[tokio::test]
async fn test_logout_twice_succeeds() {
    let h = harness();
    let session = h
        .service
        .register(registration("a@x.com", None))
        .await
        .unwrap();

    h.service.logout(&session.token).await.unwrap();
    h.service.logout(&session.token).await.unwrap();

    let err = h.service.validate(&session.token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::Revoked);
}

#[tokio::test]
async fn test_logout_rejects_invalid_tokens() {
    let h = harness();
    let session = h
        .service
        .register(registration("a@x.com", None))
        .await
        .unwrap();

    let err = h.service.logout("not-a-token").await.unwrap_err();
    assert_eq!(token_error(err), TokenError::MalformedToken);

    h.clock.advance(Duration::minutes(61));
    let err = h.service.logout(&session.token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::Expired);
}

#[tokio::test]
async fn test_logout_only_revokes_that_token() {
    let h = harness();
    let first = h
        .service
        .register(registration("a@x.com", None))
        .await
        .unwrap();
    let second = h.service.login("a@x.com", "secret1").await.unwrap();

    h.service.logout(&first.token).await.unwrap();

    assert!(h.service.validate(&second.token).await.is_ok());
}

#[tokio::test]
async fn test_revocations_are_swept_after_expiry() {
    let h = harness();
    let session = h
        .service
        .register(registration("a@x.com", None))
        .await
        .unwrap();
    h.service.logout(&session.token).await.unwrap();

    let registry = h.service.token_service().registry();
    assert_eq!(registry.len().await, 1);

    h.clock.advance(Duration::minutes(60));
    assert_eq!(registry.sweep(h.clock.now()).await, 1);
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_get_user_profile() {
    let h = harness();
    let session = h
        .service
        .register(registration("a@x.com", Some("admin")))
        .await
        .unwrap();

    let profile = h.service.get_user_profile(session.user.id).await.unwrap();
    assert_eq!(profile, session.user);

    let err = h.service.get_user_profile(42).await.unwrap_err();
    assert_eq!(auth_error(err), AuthError::NotFound);
}

#[tokio::test]
async fn test_repository_failures_propagate() {
    let service = AuthService::new(
        Arc::new(UnavailableUserRepository),
        Arc::new(RecordingHasher::default()),
        token_service(),
    );

    let err = service.login("a@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, DomainError::Database(_)));

    let err = service
        .register(registration("a@x.com", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Database(_)));
}

#[tokio::test]
async fn test_password_work_runs_off_the_runtime_thread() {
    let hasher = Arc::new(RecordingHasher::default());
    let service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::clone(&hasher),
        token_service(),
    );

    service
        .register(registration("a@x.com", None))
        .await
        .unwrap();
    service.login("a@x.com", "secret1").await.unwrap();

    let threads = hasher.threads();
    assert_eq!(threads.len(), 2);
    assert!(threads.iter().all(|id| *id != thread::current().id()));
}

#[tokio::test]
async fn test_crashed_hasher_fails_closed() {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = AuthService::new(
        Arc::clone(&repository),
        Arc::new(PanickingHasher),
        token_service(),
    );

    let err = service
        .register(registration("a@x.com", None))
        .await
        .unwrap_err();
    assert_eq!(auth_error(err), AuthError::EncodingError);
    assert!(repository.find_by_email("a@x.com").await.unwrap().is_none());

    let seeded = AuthService::new(
        Arc::clone(&repository),
        Arc::new(RecordingHasher::default()),
        token_service(),
    );
    seeded
        .register(registration("a@x.com", None))
        .await
        .unwrap();

    let err = service.login("a@x.com", "secret1").await.unwrap_err();
    assert_eq!(auth_error(err), AuthError::InvalidCredentials);
}

#[tokio::test]
async fn test_email_matching_ignores_case() {
    let h = harness();
    let session = h
        .service
        .register(registration("  Ann@Example.COM ", None))
        .await
        .unwrap();
    assert_eq!(session.user.email, "ann@example.com");

    let err = h
        .service
        .register(registration("ann@example.com", None))
        .await
        .unwrap_err();
    assert_eq!(auth_error(err), AuthError::DuplicateEmail);

    let login = h
        .service
        .login("ANN@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(login.user.id, session.user.id);
}
