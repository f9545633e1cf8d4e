//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use foodgram_cache::{RedisPool, RefreshTokenStore};
use foodgram_common::{AppConfig, JwtService};
use foodgram_core::SnowflakeGenerator;
use foodgram_db::{
    create_pool, run_migrations, PgFavoriteRepository, PgFollowRepository,
    PgIngredientRepository, PgRecipeRepository, PgShoppingCartRepository, PgTagRepository,
    PgUserRepository, PoolConfig,
};
use foodgram_service::ServiceContextBuilder;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::middleware::{apply_middleware, apply_request_tracing, MiddlewareConfig};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Startup and serving failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to connect to PostgreSQL: {0}")]
    Database(String),

    #[error("Failed to run migrations: {0}")]
    Migration(String),

    #[error("Failed to create Redis pool: {0}")]
    Cache(String),

    #[error("Failed to build service context: {0}")]
    Context(String),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let middleware_config = MiddlewareConfig {
        rate_limit: &config.rate_limit,
        cors: &config.cors,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        is_production: config.app.env.is_production(),
        max_body_bytes: config.media.max_request_body_bytes(),
    };

    let api = apply_middleware(create_router(), &middleware_config);
    let health = apply_request_tracing(health_routes());

    let media_url = format!("/{}", config.media.url.trim_matches('/'));
    let media = ServeDir::new(&config.media.root);

    api.merge(health)
        .nest_service(&media_url, media)
        .with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, ServerError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| ServerError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| ServerError::Migration(e.to_string()))?;
    info!("PostgreSQL connection established");

    info!("Connecting to Redis...");
    let redis_pool = RedisPool::from_config(&config.redis)
        .map_err(|e| ServerError::Cache(e.to_string()))?;
    let refresh_ttl = config.jwt.refresh_token_expiry.max(1) as u64;
    let refresh_token_store = RefreshTokenStore::new(redis_pool, refresh_ttl);
    info!("Redis pool created");

    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.node_id));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .tag_repo(Arc::new(PgTagRepository::new(pool.clone())))
        .ingredient_repo(Arc::new(PgIngredientRepository::new(pool.clone())))
        .recipe_repo(Arc::new(PgRecipeRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .favorite_repo(Arc::new(PgFavoriteRepository::new(pool.clone())))
        .shopping_cart_repo(Arc::new(PgShoppingCartRepository::new(pool)))
        .refresh_token_store(refresh_token_store)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .media(config.media.clone())
        .export(config.export.clone())
        .pagination(config.pagination.clone())
        .build()
        .map_err(|e| ServerError::Context(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    let addr = config.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, listener).await
}
