use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use pr_api::app::create_app;
use pr_api::config::Config;
use pr_api::routes::auth::AppState;
use pr_core::services::auth::{AuthService, AuthServiceConfig};
use pr_core::services::password::BcryptPasswordHasher;
use pr_core::services::token::TokenService;
use pr_core::services::user::UserService;
use pr_infra::database::{DatabasePool, SqliteUserRepository};
use pr_shared::config::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    let default_filter = Environment::from_env().default_log_filter();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    info!("Starting PetReunite API Server");

    let config = Config::from_env()?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("Using the default JWT secret; set JWT_SECRET_KEY before deploying");
    }

    // Persistence
    let pool = DatabasePool::new(&config.database).await?;
    pool.ensure_schema().await?;
    let user_repository = Arc::new(SqliteUserRepository::new(pool.get_pool().clone()));

    // Services
    let token_service = Arc::new(TokenService::new(config.token_service_config()));
    let password_hasher = Arc::new(BcryptPasswordHasher::default());
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        password_hasher.clone(),
        token_service,
        AuthServiceConfig::default(),
    ));
    let user_service = Arc::new(UserService::new(user_repository, password_hasher));

    let app_state = web::Data::new(AppState::new(
        auth_service,
        user_service,
        config.cookie_policy(),
        config.environment,
    ));

    let bind_address = config.bind_address();
    info!(
        "Server will bind to: {} ({})",
        bind_address, config.environment
    );

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
