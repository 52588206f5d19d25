use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{MonthQuery, OverviewResponse},
    app_state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_overview))
}

#[instrument(name = "GET /overview", skip(app_state))]
async fn get_overview(
    State(app_state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let period = query.month_year()?;
    let rows = app_state
        .allocation_service
        .get_month_overview(period)
        .await?;

    Ok(Json(OverviewResponse::new(period, rows)))
}
