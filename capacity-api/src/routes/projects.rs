use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use capacity::{NewProject, ProjectId};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{ProjectRequest, ProjectResponse},
    app_state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", put(update_project).delete(delete_project))
}

#[instrument(name = "GET /projects", skip(app_state))]
async fn list_projects(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = app_state.allocation_service.list_projects().await?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

#[instrument(name = "POST /projects", skip(app_state))]
async fn create_project(
    State(app_state): State<AppState>,
    Json(body): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let input = NewProject::try_from(body)?;
    let project = app_state.allocation_service.create_project(input).await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

#[instrument(name = "PUT /projects/:id", skip(app_state))]
async fn update_project(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let input = NewProject::try_from(body)?;
    let project = app_state
        .allocation_service
        .update_project(ProjectId::new(id), input)
        .await?;

    Ok(Json(project.into()))
}

#[instrument(name = "DELETE /projects/:id", skip(app_state))]
async fn delete_project(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app_state
        .allocation_service
        .delete_project(ProjectId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
