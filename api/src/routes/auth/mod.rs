//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Registration and login, which open a cookie session
//! - Token validation
//! - Logout, which revokes the presented token

pub mod login;
pub mod logout;
pub mod register;
pub mod validate;

pub use login::login;
pub use logout::logout;
pub use register::register;
pub use validate::validate;

use std::sync::Arc;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use auth_core::{AuthService, UserRepository};
use auth_shared::config::CookieConfig;

/// Application state shared across all handlers
pub struct AppState<U>
where
    U: UserRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub cookie: CookieConfig,
}

impl<U> AppState<U>
where
    U: UserRepository,
{
    pub fn new(auth_service: Arc<AuthService<U>>, cookie: CookieConfig) -> Self {
        Self {
            auth_service,
            cookie,
        }
    }

    /// Session cookie carrying `token`, living as long as a token does
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        let max_age = self.auth_service.token_service().config().ttl().num_seconds();
        build_cookie(&self.cookie, token.to_string(), max_age)
    }

    /// Cookie that makes the browser drop the session cookie
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = build_cookie(&self.cookie, String::new(), 0);
        cookie.make_removal();
        cookie
    }
}

fn build_cookie(config: &CookieConfig, value: String, max_age_seconds: i64) -> Cookie<'static> {
    let mut builder = Cookie::build(config.name.clone(), value)
        .path(config.path.clone())
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_seconds));

    if let Some(domain) = &config.domain {
        builder = builder.domain(domain.clone());
    }

    builder.finish()
}
