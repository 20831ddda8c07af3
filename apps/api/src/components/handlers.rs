use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::ScoreCard;
use crate::components::service::{self, GenerateRequest, ImportRequest};
use crate::errors::AppError;
use crate::models::component::{
    Component, ComponentType, ComponentUpdate, ComponentVariant, NewComponent,
};
use crate::models::suggestion::SuggestionType;
use crate::models::DuplicateRequest;
use crate::state::AppState;
use crate::store::ComponentFilter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub project_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub component_type: Option<ComponentType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "React".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ResponsiveQuery {
    #[serde(default = "default_framework")]
    pub framework: String,
}

fn default_framework() -> String {
    "CSS".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ImprovementsQuery {
    #[serde(rename = "type", default)]
    pub improvement_type: SuggestionType,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub format: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityResponse {
    pub improved_html: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveResponse {
    pub framework: String,
    pub responsive_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub component_id: Uuid,
    pub scores: ScoreCard,
}

#[derive(Debug, Serialize)]
pub struct DocumentationResponse {
    pub documentation: String,
}

#[derive(Debug, Serialize)]
pub struct ImprovementsResponse {
    #[serde(rename = "type")]
    pub improvement_type: SuggestionType,
    pub improvements: Vec<String>,
}

/// GET /api/v1/components?projectId=|type=
///
/// `projectId` wins when both are given.
pub async fn handle_list_components(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Component>>, AppError> {
    let filter = match (query.project_id, query.component_type) {
        (Some(project_id), _) => ComponentFilter::ByProject(project_id),
        (None, Some(component_type)) => ComponentFilter::ByType(component_type),
        (None, None) => {
            return Err(AppError::Validation(
                "Either projectId or type must be provided".to_string(),
            ))
        }
    };
    Ok(Json(service::list_components(state.store.as_ref(), filter).await?))
}

/// GET /api/v1/components/search?searchTerm=
pub async fn handle_search_components(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Component>>, AppError> {
    let components = service::search_components(state.store.as_ref(), &query.search_term).await?;
    Ok(Json(components))
}

/// GET /api/v1/components/:id
pub async fn handle_get_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Component>, AppError> {
    Ok(Json(service::get_component(state.store.as_ref(), id).await?))
}

/// POST /api/v1/components
pub async fn handle_create_component(
    State(state): State<AppState>,
    Json(body): Json<NewComponent>,
) -> Result<(StatusCode, Json<Component>), AppError> {
    let component = service::create_component(state.store.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(component)))
}

/// POST /api/v1/components/generate
pub async fn handle_generate_component(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<Component>), AppError> {
    let component =
        service::generate_component(state.store.as_ref(), &state.assistant, body).await?;
    Ok((StatusCode::CREATED, Json(component)))
}

/// PUT /api/v1/components/:id
pub async fn handle_update_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ComponentUpdate>,
) -> Result<Json<Component>, AppError> {
    Ok(Json(service::update_component(state.store.as_ref(), id, body).await?))
}

/// DELETE /api/v1/components/:id
pub async fn handle_delete_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service::delete_component(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/components/:id/duplicate
pub async fn handle_duplicate_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DuplicateRequest>,
) -> Result<(StatusCode, Json<Component>), AppError> {
    body.validate().into_result()?;
    let copy = service::duplicate_component(state.store.as_ref(), id, &body.new_name).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// POST /api/v1/components/:id/variants
pub async fn handle_generate_variants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ComponentVariant>>, AppError> {
    Ok(Json(service::generate_variants(state.store.as_ref(), id).await?))
}

/// POST /api/v1/components/:id/export?format=React
pub async fn handle_export_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportResponse>, AppError> {
    let code = service::export_component(state.store.as_ref(), id, &query.format).await?;
    Ok(Json(ExportResponse {
        format: query.format,
        code,
    }))
}

/// POST /api/v1/components/import
pub async fn handle_import_component(
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> Result<(StatusCode, Json<Component>), AppError> {
    let component = service::import_component(state.store.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(component)))
}

/// POST /api/v1/components/:id/optimize
pub async fn handle_optimize_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Component>, AppError> {
    Ok(Json(service::optimize_component(state.store.as_ref(), id).await?))
}

/// POST /api/v1/components/:id/accessibility
pub async fn handle_accessibility_improvements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccessibilityResponse>, AppError> {
    let component = service::get_component(state.store.as_ref(), id).await?;
    let improved_html = state
        .assistant
        .generate_accessibility_improvements(&component)
        .await;
    Ok(Json(AccessibilityResponse { improved_html }))
}

/// POST /api/v1/components/:id/responsive?framework=CSS
pub async fn handle_responsive_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ResponsiveQuery>,
) -> Result<Json<ResponsiveResponse>, AppError> {
    let component = service::get_component(state.store.as_ref(), id).await?;
    let responsive_code = state
        .assistant
        .generate_responsive_code(&component.html_code, &query.framework)
        .await;
    Ok(Json(ResponsiveResponse {
        framework: query.framework,
        responsive_code,
    }))
}

/// POST /api/v1/components/:id/analyze
pub async fn handle_analyze_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let component = service::get_component(state.store.as_ref(), id).await?;
    let scores = state.assistant.analyze_component(&component).await;
    Ok(Json(AnalysisResponse {
        component_id: id,
        scores,
    }))
}

/// POST /api/v1/components/:id/documentation
pub async fn handle_generate_documentation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentationResponse>, AppError> {
    let component = service::get_component(state.store.as_ref(), id).await?;
    let documentation = state.assistant.generate_documentation(&component).await;
    Ok(Json(DocumentationResponse { documentation }))
}

/// POST /api/v1/components/:id/improvements?type=Accessibility
pub async fn handle_suggest_improvements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ImprovementsQuery>,
) -> Result<Json<ImprovementsResponse>, AppError> {
    let component = service::get_component(state.store.as_ref(), id).await?;
    let improvements = state
        .assistant
        .suggest_improvements(&component, query.improvement_type)
        .await;
    Ok(Json(ImprovementsResponse {
        improvement_type: query.improvement_type,
        improvements,
    }))
}
