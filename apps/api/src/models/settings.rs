//! Project settings, stored as one opaque JSON blob on the project row.
//!
//! Every field carries a default so partial request bodies deserialize.

use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    pub design_system: DesignSystem,
    pub ai: AiSettings,
    pub collaboration: CollaborationSettings,
    pub export: ExportSettings,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignSystem {
    pub name: String,
    pub version: String,
    pub colors: ColorPalette,
    pub typography: TypographySettings,
    pub spacing: SpacingSettings,
    pub supported_frameworks: Vec<String>,
    pub enable_dark_mode: bool,
    pub enable_responsive_design: bool,
}

impl Default for DesignSystem {
    fn default() -> Self {
        Self {
            name: "Default Design System".to_string(),
            version: "1.0.0".to_string(),
            colors: ColorPalette::default(),
            typography: TypographySettings::default(),
            spacing: SpacingSettings::default(),
            supported_frameworks: strings(&["React", "Vue", "Angular", "HTML/CSS"]),
            enable_dark_mode: true,
            enable_responsive_design: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: "#3B82F6".to_string(),
            secondary: "#6B7280".to_string(),
            success: "#10B981".to_string(),
            warning: "#F59E0B".to_string(),
            error: "#EF4444".to_string(),
            info: "#06B6D4".to_string(),
            background: "#FFFFFF".to_string(),
            surface: "#F9FAFB".to_string(),
            text: "#1F2937".to_string(),
            text_secondary: "#6B7280".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographySettings {
    pub font_family: String,
    pub font_size_base: String,
    pub line_height: String,
    pub font_weight_normal: String,
    pub font_weight_medium: String,
    pub font_weight_bold: String,
}

impl Default for TypographySettings {
    fn default() -> Self {
        Self {
            font_family: "Inter, sans-serif".to_string(),
            font_size_base: "16px".to_string(),
            line_height: "1.5".to_string(),
            font_weight_normal: "400".to_string(),
            font_weight_medium: "500".to_string(),
            font_weight_bold: "700".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingSettings {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
    pub xxl: String,
}

impl Default for SpacingSettings {
    fn default() -> Self {
        Self {
            xs: "4px".to_string(),
            sm: "8px".to_string(),
            md: "16px".to_string(),
            lg: "24px".to_string(),
            xl: "32px".to_string(),
            xxl: "48px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    pub enable_ai_suggestions: bool,
    pub enable_auto_code_generation: bool,
    pub enable_accessibility_analysis: bool,
    pub enable_performance_optimization: bool,
    pub preferred_ai_model: String,
    pub enabled_features: Vec<String>,
    pub max_suggestions_per_component: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enable_ai_suggestions: true,
            enable_auto_code_generation: true,
            enable_accessibility_analysis: true,
            enable_performance_optimization: true,
            preferred_ai_model: "GPT-4".to_string(),
            enabled_features: strings(&[
                "ComponentGeneration",
                "LayoutOptimization",
                "ColorSchemeSuggestions",
                "AccessibilityImprovements",
            ]),
            max_suggestions_per_component: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollaborationSettings {
    pub enable_real_time_collaboration: bool,
    pub enable_comments: bool,
    pub enable_version_control: bool,
    pub enable_approval_workflow: bool,
    pub allowed_roles: Vec<String>,
    pub require_approval_for_changes: bool,
}

impl Default for CollaborationSettings {
    fn default() -> Self {
        Self {
            enable_real_time_collaboration: true,
            enable_comments: true,
            enable_version_control: true,
            enable_approval_workflow: true,
            allowed_roles: strings(&["Designer", "Developer", "Reviewer", "Stakeholder"]),
            require_approval_for_changes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub export_formats: Vec<String>,
    pub include_documentation: bool,
    pub include_accessibility_info: bool,
    pub include_responsive_code: bool,
    pub default_export_format: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            export_formats: strings(&["HTML", "CSS", "React", "Vue", "Angular", "Figma"]),
            include_documentation: true,
            include_accessibility_info: true,
            include_responsive_code: true,
            default_export_format: "React".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub in_app_notifications: bool,
    pub slack_notifications: bool,
    pub notification_events: Vec<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            in_app_notifications: true,
            slack_notifications: false,
            notification_events: strings(&[
                "ProjectCreated",
                "ComponentUpdated",
                "ReviewRequested",
                "SuggestionGenerated",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let json = r#"{"ai": {"maxSuggestionsPerComponent": 2}}"#;
        let settings: ProjectSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.ai.max_suggestions_per_component, 2);
        assert_eq!(settings.ai.preferred_ai_model, "GPT-4");
        assert_eq!(settings.design_system.colors.primary, "#3B82F6");
        assert_eq!(settings.export.default_export_format, "React");
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let value = serde_json::to_value(ProjectSettings::default()).unwrap();
        assert!(value["designSystem"]["supportedFrameworks"].is_array());
        assert_eq!(value["notifications"]["slackNotifications"], false);
    }
}
