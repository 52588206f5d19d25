use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use capacity::HourEntryWrite;
use tracing::instrument;

use super::ApiError;
use crate::{adapters::inbound::http::HourEntryBody, app_state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_hour_entry))
}

/// Plain insert kept for older clients; a repeated key is a 409.
#[instrument(name = "POST /hour-entries", skip(app_state))]
async fn create_hour_entry(
    State(app_state): State<AppState>,
    Json(body): Json<HourEntryBody>,
) -> Result<StatusCode, ApiError> {
    let write = HourEntryWrite::try_from(body)?;
    app_state.allocation_service.record_hour_entry(&write).await?;

    Ok(StatusCode::CREATED)
}
