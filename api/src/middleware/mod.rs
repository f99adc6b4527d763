//! Middleware for the API server

pub mod auth;
pub mod cors;

pub use auth::{extract_token, AuthContext, JwtAuth, TokenExtractionError, TokenValidator};
pub use cors::create_cors;
