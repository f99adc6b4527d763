//! Request and response bodies

pub mod auth;

pub use auth::{
    AuthResponse, HealthResponse, LoginRequest, MessageResponse, RegisterRequest, ValidateResponse,
};
pub use auth_shared::ErrorResponse;
