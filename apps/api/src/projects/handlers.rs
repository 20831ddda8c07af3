use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::{NewProject, Project, ProjectStatus, ProjectType, ProjectUpdate};
use crate::models::settings::ProjectSettings;
use crate::models::suggestion::Suggestion;
use crate::models::DuplicateRequest;
use crate::projects::service;
use crate::state::AppState;
use crate::store::ProjectFilter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsQuery {
    pub component_id: Option<Uuid>,
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(
        service::list_projects(state.store.as_ref(), ProjectFilter::All).await?,
    ))
}

/// GET /api/v1/projects/type/:type
pub async fn handle_list_by_type(
    State(state): State<AppState>,
    Path(project_type): Path<ProjectType>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects =
        service::list_projects(state.store.as_ref(), ProjectFilter::ByType(project_type)).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/status/:status
pub async fn handle_list_by_status(
    State(state): State<AppState>,
    Path(status): Path<ProjectStatus>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects =
        service::list_projects(state.store.as_ref(), ProjectFilter::ByStatus(status)).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(service::get_project(state.store.as_ref(), id).await?))
}

/// POST /api/v1/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    Json(body): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = service::create_project(state.store.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ProjectUpdate>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(service::update_project(state.store.as_ref(), id, body).await?))
}

/// DELETE /api/v1/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service::delete_project(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/:id/duplicate
pub async fn handle_duplicate_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DuplicateRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    body.validate().into_result()?;
    let copy = service::duplicate_project(state.store.as_ref(), id, &body.new_name).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// PUT /api/v1/projects/:id/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(settings): Json<ProjectSettings>,
) -> Result<Json<ProjectSettings>, AppError> {
    Ok(Json(
        service::update_settings(state.store.as_ref(), id, settings).await?,
    ))
}

/// POST /api/v1/projects/:id/suggestions?componentId=
pub async fn handle_generate_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    let suggestions = service::generate_suggestions(
        state.store.as_ref(),
        &state.assistant,
        id,
        query.component_id,
    )
    .await?;
    Ok(Json(suggestions))
}
