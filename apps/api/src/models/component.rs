use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::validation::FieldErrors;

pub const NAME_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 1000;
pub const PROPERTY_TYPE_MAX: usize = 100;
pub const PROPERTY_DEFAULT_MAX: usize = 500;
pub const PROPERTY_DESCRIPTION_MAX: usize = 500;

text_enum! {
    pub enum ComponentType default Button {
        Button,
        Input,
        Card,
        Modal,
        Navigation,
        Form,
        Table,
        Chart,
        Avatar,
        Badge,
        Alert,
        Progress,
        Tabs,
        Accordion,
        Dropdown,
        Tooltip,
        Custom,
    }
}

/// Visual tokens for a component or variant. Embedded blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentStyle {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub border_radius: String,
    pub font_family: String,
    pub font_size: String,
    pub spacing: String,
    pub is_dark_mode: bool,
}

impl Default for ComponentStyle {
    fn default() -> Self {
        Self {
            primary_color: "#3B82F6".to_string(),
            secondary_color: "#6B7280".to_string(),
            background_color: "#FFFFFF".to_string(),
            text_color: "#1F2937".to_string(),
            border_radius: "8px".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            font_size: "14px".to_string(),
            spacing: "16px".to_string(),
            is_dark_mode: false,
        }
    }
}

/// Embedded blob describing a11y affordances of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityInfo {
    pub aria_label: String,
    pub aria_described_by: String,
    pub is_keyboard_accessible: bool,
    pub has_focus_indicator: bool,
    pub color_contrast: String,
    pub screen_reader_text: Vec<String>,
}

impl Default for AccessibilityInfo {
    fn default() -> Self {
        Self {
            aria_label: String::new(),
            aria_described_by: String::new(),
            is_keyboard_accessible: true,
            has_focus_indicator: true,
            color_contrast: "4.5:1".to_string(),
            screen_reader_text: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVariant {
    /// Assigned server-side when the client omits it.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub style: ComponentStyle,
    #[serde(default)]
    pub html_code: String,
    #[serde(default)]
    pub css_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProperty {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub html_code: String,
    pub css_code: String,
    pub js_code: Option<String>,
    pub style: ComponentStyle,
    pub variants: Vec<ComponentVariant>,
    pub properties: Vec<ComponentProperty>,
    pub accessibility: AccessibilityInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub project_id: Uuid,
}

/// Editable component fields, shared by create and update bodies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFields {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub component_type: ComponentType,
    #[serde(default)]
    pub html_code: String,
    #[serde(default)]
    pub css_code: String,
    #[serde(default)]
    pub js_code: Option<String>,
    #[serde(default)]
    pub style: ComponentStyle,
    #[serde(default)]
    pub variants: Vec<ComponentVariant>,
    #[serde(default)]
    pub properties: Vec<ComponentProperty>,
    #[serde(default)]
    pub accessibility: AccessibilityInfo,
}

/// Request body for creating a component under a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    pub project_id: Uuid,
    #[serde(flatten)]
    pub fields: ComponentFields,
}

/// Request body for `PUT /components/:id`. `id` must match the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentUpdate {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: ComponentFields,
}

impl ComponentProperty {
    fn check(&self, errors: &mut FieldErrors, at: &str) {
        errors
            .max_len(&format!("{at}.name"), &self.name, NAME_MAX)
            .max_len(&format!("{at}.type"), &self.property_type, PROPERTY_TYPE_MAX)
            .max_len(
                &format!("{at}.defaultValue"),
                &self.default_value,
                PROPERTY_DEFAULT_MAX,
            )
            .max_len_opt(
                &format!("{at}.description"),
                self.description.as_deref(),
                PROPERTY_DESCRIPTION_MAX,
            );
    }

    /// True when every field fits its column.
    pub fn is_valid(&self) -> bool {
        let mut errors = FieldErrors::new();
        self.check(&mut errors, "property");
        errors.is_empty()
    }
}

fn check_parts(
    name: &str,
    description: Option<&str>,
    variants: &[ComponentVariant],
    properties: &[ComponentProperty],
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors
        .required("name", name)
        .max_len("name", name, NAME_MAX)
        .max_len_opt("description", description, DESCRIPTION_MAX);

    for (i, variant) in variants.iter().enumerate() {
        errors
            .max_len(&format!("variants[{i}].name"), &variant.name, NAME_MAX)
            .max_len(
                &format!("variants[{i}].description"),
                &variant.description,
                DESCRIPTION_MAX,
            );
    }
    for (i, property) in properties.iter().enumerate() {
        property.check(&mut errors, &format!("properties[{i}]"));
    }
    errors
}

impl ComponentFields {
    pub fn validate(&self) -> FieldErrors {
        check_parts(
            &self.name,
            self.description.as_deref(),
            &self.variants,
            &self.properties,
        )
    }
}

impl Component {
    /// Same limits as `ComponentFields::validate`, for components built server-side.
    pub fn validate(&self) -> FieldErrors {
        check_parts(
            &self.name,
            self.description.as_deref(),
            &self.variants,
            &self.properties,
        )
    }

    /// Empty component with default style and accessibility.
    pub fn blank(
        name: &str,
        component_type: ComponentType,
        project_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            component_type,
            html_code: String::new(),
            css_code: String::new(),
            js_code: None,
            style: ComponentStyle::default(),
            variants: Vec::new(),
            properties: Vec::new(),
            accessibility: AccessibilityInfo::default(),
            created_at: now,
            updated_at: None,
            project_id,
        }
    }

    pub fn from_fields(
        fields: ComponentFields,
        project_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            component_type: fields.component_type,
            html_code: fields.html_code,
            css_code: fields.css_code,
            js_code: fields.js_code,
            style: fields.style,
            variants: fields.variants,
            properties: fields.properties,
            accessibility: fields.accessibility,
            created_at: now,
            updated_at: None,
            project_id,
        }
    }

    /// Overwrites the editable fields; id, project and createdAt are kept.
    pub fn apply(&mut self, fields: ComponentFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.component_type = fields.component_type;
        self.html_code = fields.html_code;
        self.css_code = fields.css_code;
        self.js_code = fields.js_code;
        self.style = fields.style;
        self.variants = fields.variants;
        self.properties = fields.properties;
        self.accessibility = fields.accessibility;
        self.updated_at = Some(now);
    }

    /// Deep copy under a fresh id; every variant and property also gets a fresh id.
    pub fn duplicate(&self, new_name: &str, project_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new_name.to_string(),
            description: self.description.clone(),
            component_type: self.component_type,
            html_code: self.html_code.clone(),
            css_code: self.css_code.clone(),
            js_code: self.js_code.clone(),
            style: self.style.clone(),
            variants: self
                .variants
                .iter()
                .map(|v| ComponentVariant {
                    id: Uuid::new_v4(),
                    ..v.clone()
                })
                .collect(),
            properties: self
                .properties
                .iter()
                .map(|p| ComponentProperty {
                    id: Uuid::new_v4(),
                    ..p.clone()
                })
                .collect(),
            accessibility: self.accessibility.clone(),
            created_at: now,
            updated_at: None,
            project_id,
        }
    }
}
