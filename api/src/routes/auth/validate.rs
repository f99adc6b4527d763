use actix_web::{web, HttpResponse};

use auth_core::UserRepository;

use crate::dto::ValidateResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/validate
///
/// Runs behind [`JwtAuth`](crate::middleware::JwtAuth), so the token has
/// already been accepted; this reports who it belongs to.
pub async fn validate<U>(state: web::Data<AppState<U>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.get_user_profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ValidateResponse {
            valid: true,
            user,
            issuer: auth.issuer,
            issued_at: auth.issued_at,
            expires_at: auth.expires_at,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
