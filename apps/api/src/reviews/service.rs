use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::review::{
    NewComment, NewReview, Review, ReviewComment, ReviewScore, ReviewStatus, DESCRIPTION_MAX,
};
use crate::models::validation::FieldErrors;
use crate::store::DesignStore;

const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

async fn require_project(store: &dyn DesignStore, project_id: Uuid) -> Result<(), AppError> {
    match store.get_project(project_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("project {project_id}"))),
    }
}

pub async fn get_review(store: &dyn DesignStore, id: Uuid) -> Result<Review, AppError> {
    store
        .get_review(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("review {id}")))
}

async fn save(store: &dyn DesignStore, review: &Review) -> Result<(), AppError> {
    if store.update_review(review).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("review {}", review.id)))
    }
}

pub async fn create_review(
    store: &dyn DesignStore,
    project_id: Uuid,
    input: NewReview,
) -> Result<Review, AppError> {
    input.validate().into_result()?;
    require_project(store, project_id).await?;

    if let Some(component_id) = input.component_id {
        let belongs = store
            .get_component(component_id)
            .await?
            .is_some_and(|c| c.project_id == project_id);
        if !belongs {
            let mut errors = FieldErrors::new();
            errors.push(
                "componentId",
                format!("component {component_id} is not part of project {project_id}"),
            );
            errors.into_result()?;
        }
    }

    let review = Review::from_new(input, project_id, Utc::now());
    store.insert_review(&review).await?;
    info!("Opened review {} on project {project_id}", review.id);
    Ok(review)
}

pub async fn list_reviews(store: &dyn DesignStore, project_id: Uuid) -> Result<Vec<Review>, AppError> {
    require_project(store, project_id).await?;
    store.list_reviews(project_id).await
}

pub async fn add_comment(
    store: &dyn DesignStore,
    review_id: Uuid,
    input: NewComment,
) -> Result<Review, AppError> {
    input.validate().into_result()?;
    let mut review = get_review(store, review_id).await?;
    review.comments.push(ReviewComment::from_new(input, Utc::now()));
    if review.status == ReviewStatus::Pending {
        review.status = ReviewStatus::InProgress;
    }
    save(store, &review).await?;
    Ok(review)
}

/// Records the final score. `overallScore` is always recomputed as the mean
/// of the five dimension scores.
pub async fn complete_review(
    store: &dyn DesignStore,
    review_id: Uuid,
    mut score: ReviewScore,
) -> Result<Review, AppError> {
    let mut errors = FieldErrors::new();
    for (field, value) in [
        ("usabilityScore", score.usability_score),
        ("accessibilityScore", score.accessibility_score),
        ("performanceScore", score.performance_score),
        ("aestheticsScore", score.aesthetics_score),
        ("codeQualityScore", score.code_quality_score),
    ] {
        if !SCORE_RANGE.contains(&value) {
            errors.push(field, format!("{field} must be between 0 and 10"));
        }
    }
    errors.max_len("summary", &score.summary, DESCRIPTION_MAX);
    errors.into_result()?;

    let mut review = get_review(store, review_id).await?;
    score.overall_score = score.dimension_mean();
    review.score = score;
    review.status = ReviewStatus::Completed;
    review.completed_at = Some(Utc::now());

    save(store, &review).await?;
    info!("Completed review {review_id} (overall {:.1})", review.score.overall_score);
    Ok(review)
}

pub async fn delete_review(store: &dyn DesignStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_review(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("review {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::{Component, ComponentType};
    use crate::models::project::{NewProject, Project, ProjectType};
    use crate::models::review::{CommentType, ReviewCriteria, ReviewType};
    use crate::models::settings::ProjectSettings;
    use crate::store::MemoryStore;

    async fn seeded() -> (MemoryStore, Project) {
        let store = MemoryStore::new();
        let project = Project::from_new(
            NewProject {
                name: "Demo".to_string(),
                description: None,
                project_type: ProjectType::Dashboard,
                created_by: String::new(),
                settings: ProjectSettings::default(),
            },
            Utc::now(),
        );
        store.insert_project(&project).await.unwrap();
        (store, project)
    }

    fn new_review(component_id: Option<Uuid>) -> NewReview {
        NewReview {
            title: "Sprint 3 pass".to_string(),
            description: String::new(),
            review_type: ReviewType::UXReview,
            reviewer_name: "Kim".to_string(),
            reviewer_email: "kim@example.com".to_string(),
            criteria: ReviewCriteria::default(),
            component_id,
        }
    }

    #[tokio::test]
    async fn test_review_lifecycle() {
        let (store, project) = seeded().await;
        let review = create_review(&store, project.id, new_review(None)).await.unwrap();
        assert_eq!(review.status, ReviewStatus::Pending);

        let commented = add_comment(
            &store,
            review.id,
            NewComment {
                content: "Contrast is low on the footer".to_string(),
                comment_type: CommentType::Issue,
                author: "Kim".to_string(),
                attachments: Vec::new(),
            },
        )
        .await
        .unwrap();
        assert_eq!(commented.comments.len(), 1);
        assert_eq!(commented.status, ReviewStatus::InProgress);
        assert!(!commented.comments[0].is_resolved);

        let completed = complete_review(
            &store,
            review.id,
            ReviewScore {
                overall_score: 1.0,
                usability_score: 8.0,
                accessibility_score: 6.0,
                performance_score: 9.0,
                aesthetics_score: 7.0,
                code_quality_score: 5.0,
                ..ReviewScore::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(completed.status, ReviewStatus::Completed);
        assert!(completed.completed_at.is_some());
        assert!((completed.score.overall_score - 7.0).abs() < 1e-9);

        let listed = list_reviews(&store, project.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].comments.len(), 1);

        delete_review(&store, review.id).await.unwrap();
        assert!(matches!(
            get_review(&store, review.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_review_component_must_belong_to_project() {
        let (store, project) = seeded().await;
        let stray = Component::blank("Stray", ComponentType::Card, Uuid::new_v4(), Utc::now());
        store.insert_component(&stray).await.unwrap();

        let result = create_review(&store, project.id, new_review(Some(stray.id))).await;
        assert!(matches!(result, Err(AppError::InvalidFields(_))));
    }

    #[tokio::test]
    async fn test_complete_rejects_out_of_range_scores() {
        let (store, project) = seeded().await;
        let review = create_review(&store, project.id, new_review(None)).await.unwrap();
        let result = complete_review(
            &store,
            review.id,
            ReviewScore {
                usability_score: 11.0,
                ..ReviewScore::default()
            },
        )
        .await;
        match result {
            Err(AppError::InvalidFields(fields)) => assert_eq!(fields[0].field, "usabilityScore"),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reviews_of_unknown_project_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            list_reviews(&store, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
