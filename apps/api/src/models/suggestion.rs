use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::validation::FieldErrors;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 2000;
pub const CODE_LANGUAGE_MAX: usize = 50;

text_enum! {
    pub enum SuggestionType default LayoutImprovement {
        LayoutImprovement,
        ColorScheme,
        Typography,
        Accessibility,
        Performance,
        ResponsiveDesign,
        Animation,
        Interaction,
        Content,
        Branding,
        UserExperience,
        CodeOptimization,
    }
}

text_enum! {
    pub enum SuggestionPriority default Medium {
        Low,
        Medium,
        High,
        Critical,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionMetrics {
    pub usability_score: f64,
    pub accessibility_score: f64,
    pub performance_score: f64,
    pub aesthetics_score: f64,
    /// Minutes.
    pub estimated_implementation_time: u32,
    pub impact_level: String,
    pub benefits: Vec<String>,
    pub risks: Vec<String>,
}

impl Default for SuggestionMetrics {
    fn default() -> Self {
        Self {
            usability_score: 0.0,
            accessibility_score: 0.0,
            performance_score: 0.0,
            aesthetics_score: 0.0,
            estimated_implementation_time: 0,
            impact_level: "Medium".to_string(),
            benefits: Vec::new(),
            risks: Vec::new(),
        }
    }
}

/// An AI-produced design suggestion attached to a project and optionally one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub priority: SuggestionPriority,
    pub generated_code: String,
    pub code_language: Option<String>,
    pub tags: Vec<String>,
    pub metrics: SuggestionMetrics,
    pub is_applied: bool,
    pub created_at: DateTime<Utc>,
    pub applied_at: Option<DateTime<Utc>>,
    pub project_id: Uuid,
    pub component_id: Option<Uuid>,
}

impl Suggestion {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors
            .required("title", &self.title)
            .max_len("title", &self.title, TITLE_MAX)
            .max_len("description", &self.description, DESCRIPTION_MAX)
            .max_len_opt("codeLanguage", self.code_language.as_deref(), CODE_LANGUAGE_MAX);
        errors
    }
}
