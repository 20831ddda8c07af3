use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::component::Component;
use crate::models::review::Review;
use crate::models::settings::ProjectSettings;
use crate::models::suggestion::Suggestion;
use crate::models::validation::FieldErrors;

pub const NAME_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 1000;

text_enum! {
    pub enum ProjectType default WebApplication {
        WebApplication,
        MobileApp,
        Dashboard,
        LandingPage,
        ECommerce,
        Portfolio,
        Blog,
        AdminPanel,
        Custom,
    }
}

text_enum! {
    pub enum ProjectStatus default Draft {
        Draft,
        InProgress,
        Review,
        Approved,
        Completed,
        Archived,
    }
}

/// Aggregate root. Deleting a project removes its components, suggestions and reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub settings: ProjectSettings,
}

/// Request body for creating a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub settings: ProjectSettings,
}

/// Request body for `PUT /projects/:id`. `id` must match the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_by: Option<String>,
    /// Omitted settings keep the stored blob.
    #[serde(default)]
    pub settings: Option<ProjectSettings>,
}

fn check_fields(name: &str, description: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors
        .required("name", name)
        .max_len("name", name, NAME_MAX)
        .max_len_opt("description", description, DESCRIPTION_MAX);
    errors
}

impl NewProject {
    pub fn validate(&self) -> FieldErrors {
        check_fields(&self.name, self.description.as_deref())
    }
}

impl ProjectUpdate {
    pub fn validate(&self) -> FieldErrors {
        check_fields(&self.name, self.description.as_deref())
    }
}

impl Project {
    /// Builds a fresh Draft project from a create request.
    pub fn from_new(input: NewProject, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            project_type: input.project_type,
            status: ProjectStatus::Draft,
            created_at: now,
            updated_at: None,
            created_by: input.created_by,
            components: Vec::new(),
            suggestions: Vec::new(),
            reviews: Vec::new(),
            settings: input.settings,
        }
    }

    /// Deep copy under a new id: components (with their variants and properties)
    /// are copied with fresh ids, status resets to Draft, suggestions and
    /// reviews stay behind.
    pub fn duplicate(&self, new_name: &str, now: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4();
        let components = self
            .components
            .iter()
            .map(|c| c.duplicate(&c.name, id, now))
            .collect();

        Self {
            id,
            name: new_name.to_string(),
            description: self.description.clone(),
            project_type: self.project_type,
            status: ProjectStatus::Draft,
            created_at: now,
            updated_at: None,
            created_by: self.created_by.clone(),
            components,
            suggestions: Vec::new(),
            reviews: Vec::new(),
            settings: self.settings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::{Component, ComponentType};

    fn sample_project() -> Project {
        let now = Utc::now();
        let mut project = Project::from_new(
            NewProject {
                name: "Demo".to_string(),
                description: Some("A demo".to_string()),
                project_type: ProjectType::Dashboard,
                created_by: "ana".to_string(),
                settings: ProjectSettings::default(),
            },
            now,
        );
        project.status = ProjectStatus::Approved;
        let mut component = Component::blank("Btn", ComponentType::Button, project.id, now);
        component.html_code = "<button>Hi</button>".to_string();
        project.components.push(component);
        project
    }

    #[test]
    fn test_new_project_starts_as_draft() {
        let project = sample_project();
        let fresh = Project::from_new(
            NewProject {
                name: "X".to_string(),
                description: None,
                project_type: ProjectType::Blog,
                created_by: String::new(),
                settings: ProjectSettings::default(),
            },
            Utc::now(),
        );
        assert_eq!(fresh.status, ProjectStatus::Draft);
        assert_ne!(fresh.id, project.id);
        assert!(fresh.updated_at.is_none());
    }

    #[test]
    fn test_duplicate_resets_status_and_reassigns_ids() {
        let project = sample_project();
        let copy = project.duplicate("Demo copy", Utc::now());

        assert_ne!(copy.id, project.id);
        assert_eq!(copy.name, "Demo copy");
        assert_eq!(copy.status, ProjectStatus::Draft);
        assert_eq!(copy.components.len(), 1);
        assert_ne!(copy.components[0].id, project.components[0].id);
        assert_eq!(copy.components[0].project_id, copy.id);
        assert_eq!(copy.components[0].html_code, "<button>Hi</button>");
    }

    #[test]
    fn test_validate_name_length() {
        let input = NewProject {
            name: "n".repeat(NAME_MAX + 1),
            description: None,
            project_type: ProjectType::Custom,
            created_by: String::new(),
            settings: ProjectSettings::default(),
        };
        assert!(!input.validate().is_empty());
    }

    #[test]
    fn test_project_json_uses_type_key() {
        let value = serde_json::to_value(sample_project()).unwrap();
        assert_eq!(value["type"], "Dashboard");
        assert_eq!(value["createdBy"], "ana");
        assert!(value["settings"]["designSystem"].is_object());
    }
}
