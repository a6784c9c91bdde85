//! Fantasia ticketing HTTP server.

use std::sync::Arc;

use axum::{middleware, Router};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fantasia::adapters::auth::{JwtConfig, JwtSessionValidator};
use fantasia::adapters::email::{ResendConfig, ResendSender};
use fantasia::adapters::http::middleware::{auth_middleware, AuthState};
use fantasia::adapters::http::ticketing::{tickets_router, TicketsAppState};
use fantasia::adapters::postgres::{
    PostgresEventRepository, PostgresTicketStore, PostgresUserDirectory,
};
use fantasia::adapters::rate_limiter::InMemoryRateLimiter;
use fantasia::config::AppConfig;
use fantasia::ports::SessionValidator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fantasia ticketing server");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Database pool connected");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let notifications = ResendSender::new(ResendConfig::new(
        config.email.resend_api_key.clone(),
        config.email.from_header(),
    ))?;

    let state = TicketsAppState {
        events: Arc::new(PostgresEventRepository::new(pool.clone())),
        tickets: Arc::new(PostgresTicketStore::new(pool.clone())),
        users: Arc::new(PostgresUserDirectory::new(pool.clone())),
        notifications: Arc::new(notifications),
        rate_limiter: Arc::new(InMemoryRateLimiter::new(
            config.rate_limit.requests_per_window,
            config.rate_limit.window_secs,
        )),
    };

    let validator: AuthState = Arc::new(JwtSessionValidator::new(JwtConfig::new(
        config.auth.session_secret.clone(),
        config.auth.issuer.clone(),
    ))) as Arc<dyn SessionValidator>;

    let app = Router::new()
        .nest("/api", tickets_router())
        .with_state(state)
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
