use actix_web::{web, HttpRequest, HttpResponse};

use auth_core::UserRepository;
use auth_shared::{error_codes, ErrorResponse};

use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::auth::{extract_token, TokenExtractionError};

use super::AppState;

/// Handler for POST /api/logout
///
/// Revokes the presented token until its natural expiry and clears the
/// session cookie. The token comes from the cookie or the bearer header.
/// Logging out an already revoked token succeeds again.
///
/// ## Errors
/// - 400 Bad Request: No token provided
/// - 401 Unauthorized: Malformed header, or a token that fails verification
pub async fn logout<U>(req: HttpRequest, state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let token = match extract_token(&req, &state.cookie.name) {
        Ok(token) => token,
        Err(TokenExtractionError::Missing) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::TOKEN_MISSING,
                TokenExtractionError::Missing.to_string(),
            ));
        }
        Err(error) => {
            return HttpResponse::Unauthorized()
                .json(ErrorResponse::new(error_codes::UNAUTHORIZED, error.to_string()));
        }
    };

    match state.auth_service.logout(&token).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(state.removal_cookie())
            .json(MessageResponse::new("Logged out successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
