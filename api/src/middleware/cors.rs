//! CORS middleware configuration for cross-origin requests.
//!
//! Credentials are allowed so browsers send the session cookie. With a `*`
//! entry the request origin is echoed back instead of a literal wildcard,
//! which browsers require when credentials are allowed.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use auth_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("Configuring CORS to accept any origin");
        cors = cors.allow_any_origin();
    } else {
        log::info!("Configuring CORS for origins: {:?}", config.allowed_origins);
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
