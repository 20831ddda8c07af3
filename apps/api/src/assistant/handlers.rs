//! Axum route handlers for the standalone AI utilities.
//!
//! These operate on caller-supplied text rather than stored components and
//! never fail on AI errors: the fallback value is returned instead.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::component::ComponentStyle;
use crate::models::validation::FieldErrors;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeCodeRequest {
    pub code: String,
    pub language: String,
    #[serde(default = "default_optimization_type")]
    pub optimization_type: String,
}

fn default_optimization_type() -> String {
    "performance".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeCodeResponse {
    pub optimized_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSchemeRequest {
    pub description: String,
    #[serde(default)]
    pub brand_guidelines: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub design_description: String,
    #[serde(default = "default_target_framework")]
    pub target_framework: String,
}

fn default_target_framework() -> String {
    "React".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub framework: String,
    pub code: String,
}

/// POST /api/v1/ai/optimize-code
pub async fn handle_optimize_code(
    State(state): State<AppState>,
    Json(req): Json<OptimizeCodeRequest>,
) -> Result<Json<OptimizeCodeResponse>, AppError> {
    let mut errors = FieldErrors::new();
    errors
        .required("code", &req.code)
        .required("language", &req.language);
    errors.into_result()?;

    let optimized_code = state
        .assistant
        .optimize_code(&req.code, &req.language, &req.optimization_type)
        .await;
    Ok(Json(OptimizeCodeResponse { optimized_code }))
}

/// POST /api/v1/ai/color-scheme
pub async fn handle_color_scheme(
    State(state): State<AppState>,
    Json(req): Json<ColorSchemeRequest>,
) -> Result<Json<ComponentStyle>, AppError> {
    let mut errors = FieldErrors::new();
    errors.required("description", &req.description);
    errors.into_result()?;

    let style = state
        .assistant
        .suggest_color_scheme(&req.description, &req.brand_guidelines)
        .await;
    Ok(Json(style))
}

/// POST /api/v1/ai/translate
pub async fn handle_translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    let mut errors = FieldErrors::new();
    errors.required("designDescription", &req.design_description);
    errors.into_result()?;

    let code = state
        .assistant
        .translate_design_to_code(&req.design_description, &req.target_framework)
        .await;
    Ok(Json(TranslateResponse {
        framework: req.target_framework,
        code,
    }))
}
