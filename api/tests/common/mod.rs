//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header, test, web};
use chrono::{TimeZone, Utc};

use auth_api::routes::auth::AppState;
use auth_core::{
    AuthService, BcryptPasswordHasher, InMemoryUserRepository, ManualClock, TokenService,
    TokenServiceConfig,
};
use auth_shared::config::AppConfig;

pub const SECRET: &str = "integration-test-secret";
pub const ISSUER: &str = "auth-service";
pub const PASSWORD: &str = "secret123";

pub struct TestContext {
    pub state: web::Data<AppState<InMemoryUserRepository>>,
    pub config: AppConfig,
    pub clock: Arc<ManualClock>,
    pub repository: Arc<InMemoryUserRepository>,
}

/// App state over an in-memory repository, a cheap hasher and a manual clock
pub fn context() -> TestContext {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let repository = Arc::new(InMemoryUserRepository::new());

    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig {
            jwt_secret: SECRET.to_string(),
            issuer: ISSUER.to_string(),
            ttl_minutes: 60,
        })
        .unwrap(),
    );

    let auth_service = AuthService::new(
        Arc::clone(&repository),
        Arc::new(BcryptPasswordHasher::new(4)),
        token_service,
    )
    .with_clock(clock.clone());

    let config = AppConfig::default();
    let state = web::Data::new(AppState::new(
        Arc::new(auth_service),
        config.auth.cookie.clone(),
    ));

    TestContext {
        state,
        config,
        clock,
        repository,
    }
}

pub fn register_request(name: &str, email: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/register").set_json(serde_json::json!({
        "name": name,
        "email": email,
        "password": PASSWORD,
    }))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/login").set_json(serde_json::json!({
        "email": email,
        "password": password,
    }))
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
