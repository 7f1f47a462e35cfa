use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::CredentialSecret;
use auth::PasswordHasher;
use blog_service::config::Config;
use blog_service::config::StorageBackend;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use blog_service::outbound::repositories::InMemoryCategoryRepository;
use blog_service::outbound::repositories::InMemoryPostRepository;
use blog_service::outbound::repositories::InMemoryUserRepository;
use blog_service::outbound::repositories::PostgresCategoryRepository;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_lifetime_days = config.jwt.expiration_days,
        "Configuration loaded"
    );

    let secret = CredentialSecret::new(config.jwt.secret.as_bytes())
        .context("jwt.secret must be set")?;
    let password_hasher = PasswordHasher::with_cost(config.password.into())?;
    let authenticator = Arc::new(
        Authenticator::new(&secret)
            .with_password_hasher(password_hasher)
            .with_token_lifetime(Duration::days(config.jwt.expiration_days)),
    );

    let state = match config.database.backend {
        StorageBackend::Postgres => {
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

            AppState::new(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresCategoryRepository::new(pg_pool.clone())),
                Arc::new(PostgresPostRepository::new(pg_pool)),
                authenticator,
            )
        }
        StorageBackend::InMemory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            AppState::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryCategoryRepository::new()),
                Arc::new(InMemoryPostRepository::new()),
                authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
