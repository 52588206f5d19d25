use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use capacity::{NewResource, ResourceId};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{ResourceRequest, ResourceResponse, SummaryResponse, WindowQuery},
    app_state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        .route(
            "/:id",
            get(get_resource)
                .put(update_resource)
                .delete(delete_resource),
        )
        .route("/:id/summary", get(get_summary))
}

#[instrument(name = "GET /resources", skip(app_state))]
async fn list_resources(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ResourceResponse>>, ApiError> {
    let resources = app_state.allocation_service.list_resources().await?;

    Ok(Json(
        resources.into_iter().map(ResourceResponse::from).collect(),
    ))
}

#[instrument(name = "GET /resources/:id", skip(app_state))]
async fn get_resource(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let resource = app_state
        .allocation_service
        .get_resource(ResourceId::new(id))
        .await?;

    Ok(Json(resource.into()))
}

#[instrument(name = "POST /resources", skip(app_state))]
async fn create_resource(
    State(app_state): State<AppState>,
    Json(body): Json<ResourceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    let input = NewResource::try_from(body)?;
    let resource = app_state.allocation_service.create_resource(input).await?;

    Ok((StatusCode::CREATED, Json(resource.into())))
}

#[instrument(name = "PUT /resources/:id", skip(app_state))]
async fn update_resource(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ResourceRequest>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let input = NewResource::try_from(body)?;
    let resource = app_state
        .allocation_service
        .update_resource(ResourceId::new(id), input)
        .await?;

    Ok(Json(resource.into()))
}

#[instrument(name = "DELETE /resources/:id", skip(app_state))]
async fn delete_resource(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app_state
        .allocation_service
        .delete_resource(ResourceId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "GET /resources/:id/summary", skip(app_state))]
async fn get_summary(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let window = query.window(app_state.window_months)?;
    let (resource, months) = app_state
        .allocation_service
        .get_summary(ResourceId::new(id), &window)
        .await?;

    Ok(Json(SummaryResponse::new(resource, months)))
}
