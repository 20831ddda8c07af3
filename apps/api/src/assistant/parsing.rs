//! Turns raw chat replies into typed values.
//!
//! Scores are bare numbers, code and prose pass through unchanged, and the
//! structured replies (suggestions, generated components, color schemes) are
//! JSON, possibly wrapped in markdown fences.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::llm_client::{strip_json_fences, LlmError};
use crate::models::component::{AccessibilityInfo, ComponentProperty, ComponentStyle};
use crate::models::suggestion::{SuggestionMetrics, SuggestionPriority, SuggestionType};

pub const DEFAULT_SCORE: f64 = 7.0;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// A suggestion as the model describes it, before ids and ownership are attached.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub suggestion_type: SuggestionType,
    #[serde(default)]
    pub priority: SuggestionPriority,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metrics: SuggestionMetrics,
}

/// A generated component body. Type, style and project come from the request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentDraft {
    pub name: String,
    pub html_code: String,
    pub css_code: String,
    pub js_code: Option<String>,
    pub properties: Vec<ComponentProperty>,
    pub accessibility: AccessibilityInfo,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DraftList {
    Bare(Vec<Value>),
    Wrapped { suggestions: Vec<Value> },
}

/// A finite number clamped to [1, 10]; anything else is the default score.
pub fn parse_score(reply: &str) -> f64 {
    match reply.trim().parse::<f64>() {
        Ok(score) if score.is_finite() => score.clamp(MIN_SCORE, MAX_SCORE),
        _ => DEFAULT_SCORE,
    }
}

/// Non-blank lines, trimmed.
pub fn parse_improvements(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts a bare array or `{"suggestions": [...]}`. Elements that do not
/// deserialize are dropped individually.
pub fn parse_suggestion_drafts(reply: &str) -> Result<Vec<SuggestionDraft>, LlmError> {
    let values = match serde_json::from_str::<DraftList>(strip_json_fences(reply))? {
        DraftList::Bare(values) => values,
        DraftList::Wrapped { suggestions } => suggestions,
    };

    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<SuggestionDraft>(value) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Dropping suggestion {i} from AI reply: {e}");
                None
            }
        })
        .collect())
}

pub fn parse_component_draft(reply: &str) -> Result<ComponentDraft, LlmError> {
    Ok(serde_json::from_str(strip_json_fences(reply))?)
}

/// Missing keys keep the default style's values.
pub fn parse_color_scheme(reply: &str) -> Result<ComponentStyle, LlmError> {
    Ok(serde_json::from_str(strip_json_fences(reply))?)
}
