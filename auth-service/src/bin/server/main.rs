use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use auth_service::cache::RedisRefreshTokenCache;
use auth_service::config::Config;
use auth_service::domain::auth::models::AuthSettings;
use auth_service::domain::auth::ports::AuthServicePort;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::http::cookies::CookieSettings;
use auth_service::inbound::http::router::create_router;
use auth_service::inbound::sweeper::spawn_expiry_sweeper;
use auth_service::repositories::PostgresPasswordResetRepository;
use auth_service::repositories::PostgresSessionRepository;
use auth_service::repositories::PostgresUserRepository;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        secure_cookies = config.server.secure_cookies,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_hours = config.jwt.refresh_token_ttl_hours,
        operation_timeout_ms = config.storage.operation_timeout_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_connection = ConnectionManager::new(redis_client).await?;
    tracing::info!(cache = "redis", "Cache connection established");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_token_lifetime(),
        config.jwt.refresh_token_lifetime(),
    ));

    let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
        Arc::new(PostgresUserRepository::new(pg_pool.clone())),
        Arc::new(PostgresSessionRepository::new(pg_pool.clone())),
        Arc::new(PostgresPasswordResetRepository::new(pg_pool)),
        Arc::new(RedisRefreshTokenCache::new(redis_connection)),
        token_issuer,
        AuthSettings {
            store_timeout: config.storage.operation_timeout(),
        },
    ));

    if config.maintenance.sweep_interval_seconds > 0 {
        spawn_expiry_sweeper(
            Arc::clone(&auth_service),
            Duration::from_secs(config.maintenance.sweep_interval_seconds),
        );
        tracing::info!(
            interval_seconds = config.maintenance.sweep_interval_seconds,
            "Expiry sweeper started"
        );
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        CookieSettings {
            secure: config.server.secure_cookies,
        },
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
