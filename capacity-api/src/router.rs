use axum::{
    http::{header, Method},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, factory, routes};

pub fn create(connection_pool: PgPool, config: &Settings) -> Router<()> {
    let app_state = AppState::new(
        factory::allocation_service(connection_pool),
        config.allocation.window_months,
    );

    app(app_state, &config.application.app_url)
}

/// Routes, state and middleware, independent of where the service comes from.
pub fn app(app_state: AppState, app_url: &str) -> Router<()> {
    let app_url = app_url.to_string();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.as_bytes() == app_url.as_bytes()
        }));

    Router::new()
        .merge(routes::health::router())
        .nest(
            "/resources",
            routes::resources::router().merge(routes::assignments::router()),
        )
        .nest("/projects", routes::projects::router())
        .nest("/overview", routes::overview::router())
        .nest("/hour-entries", routes::hour_entries::router())
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
