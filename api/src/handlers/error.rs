//! Mapping from domain failures to HTTP responses
//!
//! Token failures collapse into one "invalid token" response and both
//! credential failures into one "invalid email or password" response, so a
//! client cannot tell which check rejected it. The precise kind is logged.

use actix_web::{error::InternalError, http::StatusCode, web, HttpResponse};
use auth_core::errors::{AuthError, DomainError, TokenError};
use auth_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

fn internal_error() -> HttpResponse {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    )
}

/// Response for a rejected token
pub fn token_error_response(error: &TokenError) -> HttpResponse {
    if !error.is_invalid_token() {
        log::error!("Token error: {}", error);
        return internal_error();
    }

    log::warn!("Token rejected: {}", error);
    error_response(
        StatusCode::UNAUTHORIZED,
        error_codes::TOKEN_INVALID,
        "invalid token",
    )
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => error_response(
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                "invalid email or password",
            ),
            AuthError::DuplicateEmail => error_response(
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                "email already registered",
            ),
            AuthError::InvalidRole { role } => error_response(
                StatusCode::BAD_REQUEST,
                error_codes::BAD_REQUEST,
                format!("invalid role: {}", role),
            ),
            AuthError::NotFound => error_response(
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                "user not found",
            ),
            AuthError::EncodingError => {
                log::error!("Password encoding failed");
                internal_error()
            }
        },
        DomainError::Token(token_error) => token_error_response(token_error),
        DomainError::Validation { message } => error_response(
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::NotFound { resource } => error_response(
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        DomainError::Database(message) => {
            log::error!("Database error: {}", message);
            internal_error()
        }
        DomainError::Config { .. } | DomainError::Internal { .. } => {
            log::error!("Domain error: {}", error);
            internal_error()
        }
    }
}

/// 400 response listing every failed field
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// JSON extractor configuration that answers unreadable bodies in the
/// standard error shape
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = error_response(
                StatusCode::BAD_REQUEST,
                error_codes::BAD_REQUEST,
                err.to_string(),
            );
            InternalError::from_response(err, response).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_are_unauthorized() {
        for kind in [
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::IssuerMismatch,
            TokenError::Revoked,
            TokenError::MalformedToken,
        ] {
            let response = handle_domain_error(&DomainError::Token(kind));
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_signing_error_is_internal() {
        let response = handle_domain_error(&TokenError::SigningError.into());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_error_statuses() {
        let cases = [
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::DuplicateEmail, StatusCode::CONFLICT),
            (
                AuthError::InvalidRole {
                    role: "root".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::NotFound, StatusCode::NOT_FOUND),
            (AuthError::EncodingError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(&error.into()).status(), status);
        }
    }

    #[test]
    fn test_general_error_statuses() {
        let validation = DomainError::Validation {
            message: "bad".to_string(),
        };
        assert_eq!(handle_domain_error(&validation).status(), StatusCode::BAD_REQUEST);

        let database = DomainError::Database("connection reset".to_string());
        assert_eq!(
            handle_domain_error(&database).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
