//! Application state and factory
//!
//! Builds the actix-web application around an [`AuthService`]. Used by the
//! binary and by the integration tests with an in-memory repository.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, HttpResponse,
};
use auth_core::UserRepository;
use auth_shared::{config::AppConfig, error_codes, ErrorResponse};

use crate::dto::HealthResponse;
use crate::handlers::json_config;
use crate::middleware::{create_cors, JwtAuth, TokenValidator};
use crate::routes::auth::{login, logout, register, validate, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let validator: Arc<dyn TokenValidator> = app_state.auth_service.clone();
    let jwt_auth = JwtAuth::new(validator, app_state.cookie.name.clone());

    App::new()
        .app_data(app_state)
        .app_data(json_config(config.server.max_payload_size))
        .wrap(Logger::default())
        .wrap(create_cors(&config.cors))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/register", web::post().to(register::<U>))
                .route("/login", web::post().to(login::<U>))
                .route("/logout", web::post().to(logout::<U>))
                .service(
                    web::resource("/validate")
                        .wrap(jwt_auth)
                        .route(web::get().to(validate::<U>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
