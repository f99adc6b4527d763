//! JWT authentication middleware for protecting API endpoints.
//!
//! The token is read from the session cookie first and from the
//! `Authorization: Bearer` header second. Accepted tokens inject an
//! [`AuthContext`] into the request extensions; every rejection is a 401.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorForbidden, ErrorUnauthorized},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use async_trait::async_trait;
use auth_core::{
    errors::{DomainError, DomainResult, TokenError},
    AuthService, Claims, PasswordHasher, Role, UserRepository,
};
use auth_shared::{error_codes, ErrorResponse};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use thiserror::Error;

use crate::handlers::handle_domain_error;

/// Authenticated principal injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Token identifier, the revocation key
    pub jti: String,
    pub issuer: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthContext {
    /// Creates a new authentication context from verified claims
    pub fn from_claims(claims: &Claims) -> Result<Self, TokenError> {
        let principal = claims.principal()?;
        Ok(Self {
            user_id: principal.id,
            email: principal.email,
            name: principal.name,
            role: principal.role,
            jti: claims.jti.clone(),
            issuer: claims.iss.clone(),
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        })
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// 403 unless the principal holds one of `roles`
    pub fn require_any_role(&self, roles: &[Role]) -> Result<(), Error> {
        if self.has_any_role(roles) {
            Ok(())
        } else {
            log::warn!("User {} with role {} denied", self.user_id, self.role);
            Err(ErrorForbidden("insufficient permissions"))
        }
    }
}

/// Full token acceptance check, object safe so the middleware does not need
/// the repository and hasher type parameters
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate_token(&self, token: &str) -> DomainResult<Claims>;
}

#[async_trait]
impl<U, H> TokenValidator for AuthService<U, H>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn validate_token(&self, token: &str) -> DomainResult<Claims> {
        self.validate(token).await
    }
}

/// Why no token could be taken from a request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenExtractionError {
    #[error("No token provided")]
    Missing,

    #[error("Authorization header format must be Bearer {{token}}")]
    InvalidHeader,
}

/// Takes the token from the named cookie, falling back to the bearer header
pub fn extract_token(req: &HttpRequest, cookie_name: &str) -> Result<String, TokenExtractionError> {
    if let Some(cookie) = req.cookie(cookie_name) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_string());
        }
    }

    let header = match req.headers().get(AUTHORIZATION) {
        Some(header) => header,
        None => return Err(TokenExtractionError::Missing),
    };

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(TokenExtractionError::InvalidHeader)
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    validator: Arc<dyn TokenValidator>,
    cookie_name: String,
}

impl JwtAuth {
    pub fn new(validator: Arc<dyn TokenValidator>, cookie_name: impl Into<String>) -> Self {
        Self {
            validator,
            cookie_name: cookie_name.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            validator: Arc::clone(&self.validator),
            cookie_name: Rc::from(self.cookie_name.as_str()),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    validator: Arc<dyn TokenValidator>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = Arc::clone(&self.validator);
        let cookie_name = Rc::clone(&self.cookie_name);

        Box::pin(async move {
            let token = match extract_token(req.request(), &cookie_name) {
                Ok(token) => token,
                Err(e) => {
                    let response = HttpResponse::Unauthorized()
                        .json(ErrorResponse::new(error_codes::TOKEN_MISSING, e.to_string()));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let context = match validator.validate_token(&token).await {
                Ok(claims) => AuthContext::from_claims(&claims).map_err(DomainError::from),
                Err(e) => Err(e),
            };

            match context {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    let response = handle_domain_error(&e);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test as actix_test};
    use auth_core::Principal;
    use chrono::{Duration, TimeZone};

    fn context(role: Role) -> AuthContext {
        let principal = Principal {
            id: 9,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role,
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let claims = Claims::build(&principal, "auth-service", now, Duration::minutes(60));
        AuthContext::from_claims(&claims).unwrap()
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        let req = actix_test::TestRequest::default()
            .cookie(Cookie::new("jwt", "cookie_token"))
            .insert_header((AUTHORIZATION, "Bearer header_token"))
            .to_http_request();

        assert_eq!(extract_token(&req, "jwt"), Ok("cookie_token".to_string()));
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_token(&req, "jwt"), Ok("test_token_123".to_string()));

        let req_no_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(
            extract_token(&req_no_bearer, "jwt"),
            Err(TokenExtractionError::InvalidHeader)
        );

        let req_empty_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(
            extract_token(&req_empty_bearer, "jwt"),
            Err(TokenExtractionError::InvalidHeader)
        );

        let req_no_header = actix_test::TestRequest::default().to_http_request();
        assert_eq!(
            extract_token(&req_no_header, "jwt"),
            Err(TokenExtractionError::Missing)
        );
    }

    #[test]
    fn test_context_from_claims() {
        let ctx = context(Role::User);
        assert_eq!(ctx.user_id, 9);
        assert_eq!(ctx.email, "ada@example.com");
        assert_eq!(ctx.issuer, "auth-service");
        assert_eq!(ctx.expires_at - ctx.issued_at, Duration::minutes(60));
    }

    #[test]
    fn test_role_checks() {
        let user = context(Role::User);
        assert!(user.has_any_role(&[Role::User, Role::Admin]));
        assert!(!user.has_any_role(&[Role::Admin]));
        assert!(user.require_any_role(&[Role::Admin]).is_err());

        let admin = context(Role::Admin);
        assert!(admin.require_any_role(&[Role::Admin]).is_ok());
    }
}
