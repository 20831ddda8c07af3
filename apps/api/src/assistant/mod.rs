//! Design assistant: every AI-backed design operation.
//!
//! Each operation builds a prompt, makes one chat call through `ChatBackend`
//! and parses the reply. Operations that transform or score an existing input
//! never fail: on any call or parse error they log and return a typed
//! fallback (default score, the unmodified input, an empty list, the default
//! style). `generate_component` has nothing to fall back to and returns the
//! error instead.

pub mod handlers;
pub mod parsing;
pub mod prompts;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::{DESIGNER_SYSTEM, JSON_ONLY_INSTRUCTION, SCORE_ONLY_INSTRUCTION};
use crate::llm_client::{ChatBackend, LlmError};
use crate::models::component::{Component, ComponentStyle, ComponentType};
use crate::models::project::Project;
use crate::models::suggestion::{Suggestion, SuggestionType};

use self::parsing::{
    parse_color_scheme, parse_component_draft, parse_improvements, parse_score,
    parse_suggestion_drafts, SuggestionDraft, DEFAULT_SCORE,
};
use self::prompts::*;

/// The three analysis scores and their arithmetic mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCard {
    pub usability: f64,
    pub accessibility: f64,
    pub performance: f64,
    pub overall: f64,
}

impl ScoreCard {
    pub fn new(usability: f64, accessibility: f64, performance: f64) -> Self {
        Self {
            usability,
            accessibility,
            performance,
            overall: (usability + accessibility + performance) / 3.0,
        }
    }
}

#[derive(Clone)]
pub struct DesignAssistant {
    chat: Arc<dyn ChatBackend>,
}

/// Logs the failure and substitutes the fallback value.
fn or_fallback<T>(operation: &str, result: Result<T, LlmError>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("AI {operation} failed, using fallback: {e}");
            fallback()
        }
    }
}

fn fill_component_code(template: &str, component: &Component) -> String {
    template
        .replace("{component_name}", &component.name)
        .replace("{component_type}", component.component_type.as_str())
        .replace("{js_code}", component.js_code.as_deref().unwrap_or(""))
        .replace("{css_code}", &component.css_code)
        .replace("{html_code}", &component.html_code)
}

impl DesignAssistant {
    pub fn new(chat: Arc<dyn ChatBackend>) -> Self {
        Self { chat }
    }

    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        self.chat.complete(DESIGNER_SYSTEM, prompt).await
    }

    /// Suggestions for a project, optionally focused on one of its components.
    /// Drafts that fail suggestion validation are dropped.
    pub async fn generate_design_suggestions(
        &self,
        project: &Project,
        component: Option<&Component>,
    ) -> Vec<Suggestion> {
        let focus = match component {
            Some(c) => fill_component_code(SUGGESTIONS_COMPONENT_FOCUS, c),
            None => String::new(),
        };
        let prompt = SUGGESTIONS_PROMPT_TEMPLATE
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
            .replace("{project_type}", project.project_type.as_str())
            .replace("{project_name}", &project.name)
            .replace("{component_focus}", &focus);

        let result = self
            .ask(&prompt)
            .await
            .and_then(|reply| parse_suggestion_drafts(&reply));
        let drafts = or_fallback("design suggestions", result, Vec::new);

        let now = Utc::now();
        drafts
            .into_iter()
            .map(|draft| suggestion_from_draft(draft, project.id, component.map(|c| c.id), now))
            .filter(|suggestion| {
                let valid = suggestion.validate().is_empty();
                if !valid {
                    warn!("Dropping invalid AI suggestion '{}'", suggestion.title);
                }
                valid
            })
            .collect()
    }

    /// Generates a new component. Errors propagate; a blank generated name
    /// becomes "Generated {type}".
    pub async fn generate_component(
        &self,
        description: &str,
        component_type: ComponentType,
        style: &ComponentStyle,
        project_id: Uuid,
    ) -> Result<Component, AppError> {
        let prompt = COMPONENT_PROMPT_TEMPLATE
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
            .replace("{component_type}", component_type.as_str())
            .replace("{primary_color}", &style.primary_color)
            .replace("{secondary_color}", &style.secondary_color)
            .replace("{background_color}", &style.background_color)
            .replace("{text_color}", &style.text_color)
            .replace("{border_radius}", &style.border_radius)
            .replace("{font_family}", &style.font_family)
            .replace("{font_size}", &style.font_size)
            .replace("{spacing}", &style.spacing)
            .replace("{description}", description);

        let reply = self
            .ask(&prompt)
            .await
            .map_err(|e| AppError::Llm(format!("component generation failed: {e}")))?;
        let draft = parse_component_draft(&reply)
            .map_err(|e| AppError::Llm(format!("component generation reply unusable: {e}")))?;

        let name = if draft.name.trim().is_empty() {
            format!("Generated {component_type}")
        } else {
            draft.name
        };

        let mut component = Component::blank(&name, component_type, project_id, Utc::now());
        component.description = Some(description.to_string());
        component.html_code = draft.html_code;
        component.css_code = draft.css_code;
        component.js_code = draft.js_code;
        component.style = style.clone();
        component.properties = draft.properties;
        component.accessibility = draft.accessibility;
        Ok(component)
    }

    pub async fn optimize_code(&self, code: &str, language: &str, optimization_type: &str) -> String {
        let prompt = OPTIMIZE_CODE_PROMPT_TEMPLATE
            .replace("{language}", language)
            .replace("{optimization_type}", optimization_type)
            .replace("{code}", code);
        or_fallback("code optimization", self.ask(&prompt).await, || code.to_string())
    }

    pub async fn suggest_color_scheme(&self, description: &str, brand_guidelines: &str) -> ComponentStyle {
        let prompt = COLOR_SCHEME_PROMPT_TEMPLATE
            .replace("{json_only}", JSON_ONLY_INSTRUCTION)
            .replace("{brand_guidelines}", brand_guidelines)
            .replace("{description}", description);
        let result = self
            .ask(&prompt)
            .await
            .and_then(|reply| parse_color_scheme(&reply));
        or_fallback("color scheme", result, ComponentStyle::default)
    }

    /// Improved HTML; the stored HTML on failure.
    pub async fn generate_accessibility_improvements(&self, component: &Component) -> String {
        let prompt = fill_component_code(ACCESSIBILITY_PROMPT_TEMPLATE, component);
        or_fallback("accessibility improvements", self.ask(&prompt).await, || {
            component.html_code.clone()
        })
    }

    pub async fn generate_responsive_code(&self, code: &str, framework: &str) -> String {
        let prompt = RESPONSIVE_PROMPT_TEMPLATE
            .replace("{framework}", framework)
            .replace("{code}", code);
        or_fallback("responsive code", self.ask(&prompt).await, || code.to_string())
    }

    async fn score(&self, operation: &str, template: &str, component: &Component) -> f64 {
        let prompt = fill_component_code(
            &template.replace("{score_only}", SCORE_ONLY_INSTRUCTION),
            component,
        );
        let result = self.ask(&prompt).await.map(|reply| parse_score(&reply));
        or_fallback(operation, result, || DEFAULT_SCORE)
    }

    pub async fn analyze_usability_score(&self, component: &Component) -> f64 {
        self.score("usability analysis", USABILITY_PROMPT_TEMPLATE, component)
            .await
    }

    pub async fn analyze_accessibility_score(&self, component: &Component) -> f64 {
        self.score(
            "accessibility analysis",
            ACCESSIBILITY_SCORE_PROMPT_TEMPLATE,
            component,
        )
        .await
    }

    pub async fn analyze_performance_score(&self, component: &Component) -> f64 {
        self.score("performance analysis", PERFORMANCE_PROMPT_TEMPLATE, component)
            .await
    }

    /// Runs the three analyses one after another.
    pub async fn analyze_component(&self, component: &Component) -> ScoreCard {
        let usability = self.analyze_usability_score(component).await;
        let accessibility = self.analyze_accessibility_score(component).await;
        let performance = self.analyze_performance_score(component).await;
        ScoreCard::new(usability, accessibility, performance)
    }

    pub async fn generate_documentation(&self, component: &Component) -> String {
        let prompt = fill_component_code(DOCUMENTATION_PROMPT_TEMPLATE, component);
        or_fallback("documentation", self.ask(&prompt).await, String::new)
    }

    pub async fn suggest_improvements(
        &self,
        component: &Component,
        improvement_type: SuggestionType,
    ) -> Vec<String> {
        let prompt = fill_component_code(
            &IMPROVEMENTS_PROMPT_TEMPLATE.replace("{improvement_type}", improvement_type.as_str()),
            component,
        );
        let result = self.ask(&prompt).await.map(|reply| parse_improvements(&reply));
        or_fallback("improvements", result, Vec::new)
    }

    pub async fn translate_design_to_code(&self, description: &str, framework: &str) -> String {
        let prompt = TRANSLATION_PROMPT_TEMPLATE
            .replace("{framework}", framework)
            .replace("{description}", description);
        or_fallback("design translation", self.ask(&prompt).await, String::new)
    }
}

fn suggestion_from_draft(
    draft: SuggestionDraft,
    project_id: Uuid,
    component_id: Option<Uuid>,
    now: chrono::DateTime<Utc>,
) -> Suggestion {
    Suggestion {
        id: Uuid::new_v4(),
        title: draft.title,
        description: draft.description,
        suggestion_type: draft.suggestion_type,
        priority: draft.priority,
        generated_code: draft.code,
        code_language: draft.language.filter(|l| !l.trim().is_empty()),
        tags: draft.tags,
        metrics: draft.metrics,
        is_applied: false,
        created_at: now,
        applied_at: None,
        project_id,
        component_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::{NewProject, ProjectType};
    use crate::models::settings::ProjectSettings;
    use crate::test_support::{failing_assistant, StubChat};

    fn button() -> Component {
        let mut component =
            Component::blank("Btn", ComponentType::Button, Uuid::new_v4(), Utc::now());
        component.html_code = "<button>Hi</button>".to_string();
        component.css_code = "button{border-radius:8px;color:#3B82F6}".to_string();
        component
    }

    fn project() -> Project {
        Project::from_new(
            NewProject {
                name: "Demo".to_string(),
                description: None,
                project_type: ProjectType::WebApplication,
                created_by: String::new(),
                settings: ProjectSettings::default(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_analysis_falls_back_to_default_on_network_error() {
        let assistant = failing_assistant();
        let scores = assistant.analyze_component(&button()).await;
        assert_eq!(scores.usability, 7.0);
        assert_eq!(scores.accessibility, 7.0);
        assert_eq!(scores.performance, 7.0);
        assert_eq!(scores.overall, 7.0);
    }

    #[tokio::test]
    async fn test_analysis_parses_and_clamps() {
        let stub = StubChat::replying(["9", "12", "not a number"]);
        let assistant = DesignAssistant::new(stub.clone());
        let scores = assistant.analyze_component(&button()).await;
        assert_eq!(scores, ScoreCard::new(9.0, 10.0, 7.0));
        assert!((scores.overall - 26.0 / 3.0).abs() < 1e-9);

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("usability"));
        assert!(prompts[2].contains("JS: \n"));
        assert!(prompts.iter().all(|p| p.contains("<button>Hi</button>")));
    }

    #[tokio::test]
    async fn test_code_operations_fall_back_to_input() {
        let assistant = failing_assistant();
        let component = button();
        assert_eq!(
            assistant.generate_accessibility_improvements(&component).await,
            component.html_code
        );
        assert_eq!(
            assistant.generate_responsive_code("<div></div>", "CSS").await,
            "<div></div>"
        );
        assert_eq!(
            assistant.optimize_code("a  b", "css", "size").await,
            "a  b"
        );
        assert_eq!(assistant.generate_documentation(&component).await, "");
        assert_eq!(assistant.translate_design_to_code("hero", "React").await, "");
        assert!(assistant
            .suggest_improvements(&component, SuggestionType::Accessibility)
            .await
            .is_empty());
        assert_eq!(
            assistant.suggest_color_scheme("calm", "blue").await,
            ComponentStyle::default()
        );
    }

    #[tokio::test]
    async fn test_code_operations_pass_reply_through() {
        let stub = StubChat::replying(["```html\n<nav aria-label=\"main\"></nav>\n```"]);
        let assistant = DesignAssistant::new(stub.clone());
        let improved = assistant.generate_accessibility_improvements(&button()).await;
        assert_eq!(improved, "```html\n<nav aria-label=\"main\"></nav>\n```");
        assert!(stub.prompts()[0].contains("Improve the accessibility"));
    }

    #[tokio::test]
    async fn test_improvements_split_lines() {
        let stub = StubChat::replying(["1. Add focus ring\n\n2. Use rem units\n"]);
        let assistant = DesignAssistant::new(stub.clone());
        let improvements = assistant
            .suggest_improvements(&button(), SuggestionType::Typography)
            .await;
        assert_eq!(improvements, vec!["1. Add focus ring", "2. Use rem units"]);
        assert!(stub.prompts()[0].starts_with("Suggest Typography improvements"));
    }

    #[tokio::test]
    async fn test_color_scheme_unparseable_reply_is_default() {
        let stub = StubChat::replying(["Try a calm blue palette."]);
        let assistant = DesignAssistant::new(stub);
        assert_eq!(
            assistant.suggest_color_scheme("calm", "").await,
            ComponentStyle::default()
        );
    }

    #[tokio::test]
    async fn test_color_scheme_prompt_carries_hex_example_and_json_instruction() {
        let stub = StubChat::replying([r##"{"primaryColor": "#0F766E"}"##]);
        let assistant = DesignAssistant::new(stub.clone());

        let style = assistant.suggest_color_scheme("calm clinic", "teal only").await;
        assert_eq!(style.primary_color, "#0F766E");

        let prompt = &stub.prompts()[0];
        assert!(prompt.starts_with("Suggest a color scheme for: calm clinic"));
        assert!(prompt.contains("Brand guidelines: teal only"));
        assert!(prompt.contains(r##""primaryColor": "#3B82F6""##));
        assert!(prompt.contains(r##""textColor": "#1F2937""##));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_suggestions_attach_ownership_and_drop_invalid() {
        let reply = r#"[
            {"title": "Tighten spacing", "type": "LayoutImprovement", "priority": "Low"},
            {"title": "", "description": "untitled"}
        ]"#;
        let stub = StubChat::replying([reply]);
        let assistant = DesignAssistant::new(stub.clone());
        let project = project();
        let component = button();

        let suggestions = assistant
            .generate_design_suggestions(&project, Some(&component))
            .await;

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].title, "Tighten spacing");
        assert_eq!(suggestions[0].project_id, project.id);
        assert_eq!(suggestions[0].component_id, Some(component.id));
        assert!(!suggestions[0].is_applied);

        let prompt = &stub.prompts()[0];
        assert!(prompt.contains("WebApplication project named 'Demo'"));
        assert!(prompt.contains("Focus on the Button component: Btn"));
    }

    #[tokio::test]
    async fn test_suggestions_fall_back_to_empty() {
        let assistant = failing_assistant();
        assert!(assistant
            .generate_design_suggestions(&project(), None)
            .await
            .is_empty());

        let prose = DesignAssistant::new(StubChat::replying(["Use more whitespace."]));
        assert!(prose
            .generate_design_suggestions(&project(), None)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_generate_component_builds_from_reply() {
        let reply = r#"{"name": "", "htmlCode": "<div class=\"card\"></div>", "cssCode": ".card{}"}"#;
        let assistant = DesignAssistant::new(StubChat::replying([reply]));
        let style = ComponentStyle {
            primary_color: "#000000".to_string(),
            ..ComponentStyle::default()
        };
        let project_id = Uuid::new_v4();

        let component = assistant
            .generate_component("a pricing card", ComponentType::Card, &style, project_id)
            .await
            .unwrap();

        assert_eq!(component.name, "Generated Card");
        assert_eq!(component.description.as_deref(), Some("a pricing card"));
        assert_eq!(component.component_type, ComponentType::Card);
        assert_eq!(component.style.primary_color, "#000000");
        assert_eq!(component.html_code, "<div class=\"card\"></div>");
        assert_eq!(component.project_id, project_id);
    }

    #[tokio::test]
    async fn test_generate_component_propagates_failure() {
        let assistant = failing_assistant();
        let result = assistant
            .generate_component("x", ComponentType::Button, &ComponentStyle::default(), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
