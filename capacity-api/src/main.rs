use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app_state;
mod config;
mod domain;
mod factory;
mod repositories;
mod router;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "capacity_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTime::rfc_3339()))
        .init();

    let config = config::read_config().expect("Failed to read configuration");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(config.database.with_db())
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let app = router::create(pool, &config);

    let addr: SocketAddr = format!("{}:{}", config.application.host, config.application.port)
        .parse()
        .expect("Invalid application host or port");
    tracing::info!(
        window_months = config.allocation.window_months,
        "Starting server on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
