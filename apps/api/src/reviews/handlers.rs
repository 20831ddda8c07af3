use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::review::{NewComment, NewReview, Review, ReviewScore};
use crate::reviews::service;
use crate::state::AppState;

/// GET /api/v1/projects/:id/reviews
pub async fn handle_list_reviews(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(service::list_reviews(state.store.as_ref(), project_id).await?))
}

/// POST /api/v1/projects/:id/reviews
pub async fn handle_create_review(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = service::create_review(state.store.as_ref(), project_id, body).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// POST /api/v1/reviews/:id/comments
pub async fn handle_add_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<NewComment>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = service::add_comment(state.store.as_ref(), id, body).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// POST /api/v1/reviews/:id/complete
pub async fn handle_complete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(score): Json<ReviewScore>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(service::complete_review(state.store.as_ref(), id, score).await?))
}

/// DELETE /api/v1/reviews/:id
pub async fn handle_delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service::delete_review(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
