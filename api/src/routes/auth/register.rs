use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::UserRepository;

use crate::dto::{AuthResponse, RegisterRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/register
///
/// Creates the account and opens a session for it.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada Lovelace",
///     "email": "ada@example.com",
///     "password": "secret1",
///     "role": "user"
/// }
/// ```
///
/// # Response
///
/// 201 Created with `{message, user, token, expires_at}` and the session
/// cookie set.
///
/// ## Errors
/// - 400 Bad Request: Field validation failed or unknown role
/// - 409 Conflict: Email already registered
pub async fn register<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.register(request.into()).await {
        Ok(session) => HttpResponse::Created()
            .cookie(state.session_cookie(&session.token))
            .json(AuthResponse::new("User registered successfully", session)),
        Err(error) => handle_domain_error(&error),
    }
}
