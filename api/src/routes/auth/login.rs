use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::UserRepository;

use crate::dto::{AuthResponse, LoginRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/login
///
/// Unknown email and wrong password produce the same 401 response.
pub async fn login<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(session) => HttpResponse::Ok()
            .cookie(state.session_cookie(&session.token))
            .json(AuthResponse::new("Login successful", session)),
        Err(error) => handle_domain_error(&error),
    }
}
