use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use capacity::{ProjectId, ResourceId};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{
        AssignmentsResponse, DeletedAssignmentResponse, SaveAssignmentBody,
        SavedAssignmentResponse, WindowQuery,
    },
    app_state::AppState,
    domain::models::SaveAssignmentRequest,
};

/// Mounted under `/resources`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/assignments",
            get(get_assignments).put(save_assignment),
        )
        .route(
            "/:id/assignments/:project_id",
            delete(delete_assignment),
        )
}

#[instrument(name = "GET /resources/:id/assignments", skip(app_state))]
async fn get_assignments(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<AssignmentsResponse>, ApiError> {
    let window = query.window(app_state.window_months)?;
    let rows = app_state
        .allocation_service
        .get_assignments(ResourceId::new(id), &window)
        .await?;

    Ok(Json(AssignmentsResponse::new(window, rows)))
}

#[instrument(name = "PUT /resources/:id/assignments", skip(app_state))]
async fn save_assignment(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<WindowQuery>,
    Json(body): Json<SaveAssignmentBody>,
) -> Result<Json<SavedAssignmentResponse>, ApiError> {
    let window = query.window(app_state.window_months)?;
    let request = SaveAssignmentRequest::from(body);
    let saved = app_state
        .allocation_service
        .save_assignment(ResourceId::new(id), &request, &window)
        .await?;

    Ok(Json(saved.into()))
}

#[instrument(name = "DELETE /resources/:id/assignments/:project_id", skip(app_state))]
async fn delete_assignment(
    State(app_state): State<AppState>,
    Path((id, project_id)): Path<(i32, i32)>,
) -> Result<Json<DeletedAssignmentResponse>, ApiError> {
    let removed = app_state
        .allocation_service
        .delete_assignment(ResourceId::new(id), ProjectId::new(project_id))
        .await?;

    Ok(Json(DeletedAssignmentResponse { removed }))
}
