//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::PgAuthRepository;
use auth::domain::repository::TokenStoreRepository;
use auth::presentation::middleware::AuthMiddlewareState;
use catalog::PgCatalogRepository;
use orders::{PgOrderRepository, Sweeper};
use platform::token::TokenService;

/// Default token lifetime when JWT_EXPIRATION_MS is unset (24 hours)
const DEFAULT_TOKEN_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,orders=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token service. A weak or missing secret refuses startup rather
    // than signing with insufficient entropy.
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let ttl_ms = env::var("JWT_EXPIRATION_MS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_MS);

    let tokens = Arc::new(
        TokenService::from_secret(&jwt_secret, ttl_ms)
            .map_err(|e| anyhow::anyhow!("JWT_SECRET rejected: {e}"))?,
    );

    // Startup cleanup: drop expired rows from the active-token store.
    // Errors here should not prevent server startup.
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired().await {
        Ok(deleted) => {
            tracing::info!(tokens_deleted = deleted, "Token store cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Token store cleanup failed, continuing anyway");
        }
    }

    // Background sweeper: PENDING orders advance to PROCESSING on a
    // fixed interval, independent of request handling.
    let order_repo = PgOrderRepository::new(pool.clone());
    Sweeper::new(Arc::new(order_repo.clone())).spawn();

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let auth_state = AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        tokens: tokens.clone(),
    };

    let app = Router::new()
        .nest("/api/auth", auth::auth_router(auth_repo, tokens))
        .nest(
            "/api/products",
            catalog::catalog_router(PgCatalogRepository::new(pool.clone())),
        )
        .nest(
            "/api/orders",
            orders::orders_router(order_repo, auth_state),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
