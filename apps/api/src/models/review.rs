use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::validation::FieldErrors;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 2000;
pub const REVIEWER_MAX: usize = 200;
pub const COMMENT_MAX: usize = 2000;
pub const AUTHOR_MAX: usize = 200;
pub const RESOLUTION_MAX: usize = 1000;

text_enum! {
    pub enum ReviewStatus default Pending {
        Pending,
        InProgress,
        Completed,
        Approved,
        Rejected,
        NeedsRevision,
    }
}

text_enum! {
    pub enum ReviewType default DesignReview {
        DesignReview,
        AccessibilityReview,
        CodeReview,
        UXReview,
        PerformanceReview,
        SecurityReview,
    }
}

text_enum! {
    pub enum CommentType default General {
        Suggestion,
        Issue,
        Question,
        Praise,
        General,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewCriteria {
    pub usability: bool,
    pub accessibility: bool,
    pub performance: bool,
    pub aesthetics: bool,
    pub brand_consistency: bool,
    pub code_quality: bool,
    pub responsive_design: bool,
    pub cross_browser_compatibility: bool,
}

impl Default for ReviewCriteria {
    fn default() -> Self {
        Self {
            usability: true,
            accessibility: true,
            performance: true,
            aesthetics: true,
            brand_consistency: true,
            code_quality: true,
            responsive_design: true,
            cross_browser_compatibility: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewScore {
    pub overall_score: f64,
    pub usability_score: f64,
    pub accessibility_score: f64,
    pub performance_score: f64,
    pub aesthetics_score: f64,
    pub code_quality_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

impl ReviewScore {
    /// Mean of the five dimension scores.
    pub fn dimension_mean(&self) -> f64 {
        (self.usability_score
            + self.accessibility_score
            + self.performance_score
            + self.aesthetics_score
            + self.code_quality_score)
            / 5.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewComment {
    pub id: Uuid,
    pub content: String,
    #[serde(rename = "type")]
    pub comment_type: CommentType,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub is_resolved: bool,
    pub resolution: Option<String>,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ReviewStatus,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub criteria: ReviewCriteria,
    pub comments: Vec<ReviewComment>,
    pub score: ReviewScore,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub project_id: Uuid,
    pub component_id: Option<Uuid>,
}

/// Request body for opening a review on a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub review_type: ReviewType,
    pub reviewer_name: String,
    pub reviewer_email: String,
    #[serde(default)]
    pub criteria: ReviewCriteria,
    #[serde(default)]
    pub component_id: Option<Uuid>,
}

/// Request body for adding a comment to a review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    #[serde(rename = "type", default)]
    pub comment_type: CommentType,
    pub author: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl NewReview {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors
            .required("title", &self.title)
            .max_len("title", &self.title, TITLE_MAX)
            .max_len("description", &self.description, DESCRIPTION_MAX)
            .required("reviewerName", &self.reviewer_name)
            .max_len("reviewerName", &self.reviewer_name, REVIEWER_MAX)
            .required("reviewerEmail", &self.reviewer_email)
            .max_len("reviewerEmail", &self.reviewer_email, REVIEWER_MAX);
        errors
    }
}

impl NewComment {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors
            .required("content", &self.content)
            .max_len("content", &self.content, COMMENT_MAX)
            .required("author", &self.author)
            .max_len("author", &self.author, AUTHOR_MAX);
        errors
    }
}

impl Review {
    pub fn from_new(input: NewReview, project_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: ReviewStatus::Pending,
            review_type: input.review_type,
            reviewer_name: input.reviewer_name,
            reviewer_email: input.reviewer_email,
            criteria: input.criteria,
            comments: Vec::new(),
            score: ReviewScore::default(),
            created_at: now,
            completed_at: None,
            project_id,
            component_id: input.component_id,
        }
    }
}

impl ReviewComment {
    pub fn from_new(input: NewComment, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: input.content,
            comment_type: input.comment_type,
            author: input.author,
            created_at: now,
            is_resolved: false,
            resolution: None,
            attachments: input.attachments,
        }
    }
}
