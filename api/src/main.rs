use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use auth_api::{app::create_app, routes::auth::AppState};
use auth_core::{
    AuthService, BcryptPasswordHasher, RevocationSweeper, SweeperConfig, SystemClock,
    TokenService, TokenServiceConfig,
};
use auth_infra::database::{DatabasePool, MySqlUserRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = auth_api::config::load().context("invalid configuration")?;
    info!("Starting auth service ({})", config.environment);

    // Token settings are checked before anything binds
    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::from(&config.auth.jwt))
            .context("invalid token configuration")?,
    );

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to database")?;
    pool.ping().await.context("database health check failed")?;
    info!("Database pool ready: {}", pool.get_statistics());

    let user_repository = MySqlUserRepository::new(pool.get_pool().clone());
    user_repository
        .migrate()
        .await
        .context("failed to migrate database")?;

    let auth_service = Arc::new(AuthService::new(
        Arc::new(user_repository),
        Arc::new(BcryptPasswordHasher::new(config.auth.password.bcrypt_cost)),
        Arc::clone(&token_service),
    ));

    let sweeper = Arc::new(RevocationSweeper::new(
        token_service.registry(),
        Arc::new(SystemClock),
        SweeperConfig {
            interval_seconds: config.auth.jwt.sweep_interval_seconds,
            enabled: true,
        },
    ));
    let sweeper_handle = sweeper.start_background_task();

    let app_state = web::Data::new(AppState::new(auth_service, config.auth.cookie.clone()));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }
    pool.close().await;
    info!("Auth service stopped");

    Ok(())
}
