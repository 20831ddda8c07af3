use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::assistant::DesignAssistant;
use crate::errors::AppError;
use crate::models::project::{NewProject, Project, ProjectUpdate};
use crate::models::settings::ProjectSettings;
use crate::models::suggestion::Suggestion;
use crate::store::{DesignStore, ProjectFilter};

pub async fn create_project(store: &dyn DesignStore, input: NewProject) -> Result<Project, AppError> {
    input.validate().into_result()?;
    let project = Project::from_new(input, Utc::now());
    store.insert_project(&project).await?;
    info!("Created project {} ({})", project.id, project.name);
    Ok(project)
}

pub async fn get_project(store: &dyn DesignStore, id: Uuid) -> Result<Project, AppError> {
    store
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))
}

pub async fn list_projects(
    store: &dyn DesignStore,
    filter: ProjectFilter,
) -> Result<Vec<Project>, AppError> {
    store.list_projects(filter).await
}

/// Overwrites the editable fields. `createdBy` and `settings` keep their
/// stored values when the body omits them; `createdAt` is never touched.
pub async fn update_project(
    store: &dyn DesignStore,
    id: Uuid,
    input: ProjectUpdate,
) -> Result<Project, AppError> {
    if input.id != id {
        return Err(AppError::Validation("ID mismatch".to_string()));
    }
    input.validate().into_result()?;

    let mut project = get_project(store, id).await?;
    project.name = input.name;
    project.description = input.description;
    project.project_type = input.project_type;
    project.status = input.status;
    if let Some(created_by) = input.created_by {
        project.created_by = created_by;
    }
    if let Some(settings) = input.settings {
        project.settings = settings;
    }
    project.updated_at = Some(Utc::now());

    if !store.update_project(&project).await? {
        return Err(AppError::NotFound(format!("project {id}")));
    }
    Ok(project)
}

pub async fn delete_project(store: &dyn DesignStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_project(id).await? {
        info!("Deleted project {id}");
        Ok(())
    } else {
        Err(AppError::NotFound(format!("project {id}")))
    }
}

pub async fn duplicate_project(
    store: &dyn DesignStore,
    id: Uuid,
    new_name: &str,
) -> Result<Project, AppError> {
    let original = get_project(store, id).await?;
    let copy = original.duplicate(new_name, Utc::now());
    store.insert_project(&copy).await?;
    info!(
        "Duplicated project {id} as {} with {} components",
        copy.id,
        copy.components.len()
    );
    Ok(copy)
}

pub async fn update_settings(
    store: &dyn DesignStore,
    id: Uuid,
    settings: ProjectSettings,
) -> Result<ProjectSettings, AppError> {
    let mut project = get_project(store, id).await?;
    project.settings = settings;
    project.updated_at = Some(Utc::now());

    if !store.update_project(&project).await? {
        return Err(AppError::NotFound(format!("project {id}")));
    }
    Ok(project.settings)
}

/// Generates and stores suggestions. A `component_id` that is not one of the
/// project's components is ignored and the suggestions cover the whole project.
pub async fn generate_suggestions(
    store: &dyn DesignStore,
    assistant: &DesignAssistant,
    id: Uuid,
    component_id: Option<Uuid>,
) -> Result<Vec<Suggestion>, AppError> {
    let project = get_project(store, id).await?;
    let component = component_id.and_then(|cid| project.components.iter().find(|c| c.id == cid));

    let suggestions = assistant
        .generate_design_suggestions(&project, component)
        .await;

    if !suggestions.is_empty() {
        store.insert_suggestions(&suggestions).await?;
        info!("Stored {} suggestions for project {id}", suggestions.len());
    }
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::{Component, ComponentType};
    use crate::models::project::{ProjectStatus, ProjectType};
    use crate::store::MemoryStore;
    use crate::test_support::StubChat;

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: None,
            project_type: ProjectType::WebApplication,
            created_by: "ana".to_string(),
            settings: ProjectSettings::default(),
        }
    }

    #[tokio::test]
    async fn test_create_project_starts_as_draft() {
        let store = MemoryStore::new();
        let a = create_project(&store, new_project("Demo")).await.unwrap();
        let b = create_project(&store, new_project("Demo")).await.unwrap();
        assert_eq!(a.status, ProjectStatus::Draft);
        assert_ne!(a.id, b.id);
        assert_eq!(get_project(&store, a.id).await.unwrap().name, "Demo");
    }

    #[tokio::test]
    async fn test_create_project_rejects_blank_name() {
        let store = MemoryStore::new();
        let result = create_project(&store, new_project("  ")).await;
        assert!(matches!(result, Err(AppError::InvalidFields(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_settings_and_creator() {
        let store = MemoryStore::new();
        let mut input = new_project("Demo");
        input.settings.ai.max_suggestions_per_component = 9;
        let created = create_project(&store, input).await.unwrap();

        let updated = update_project(
            &store,
            created.id,
            ProjectUpdate {
                id: created.id,
                name: "Renamed".to_string(),
                description: Some("now described".to_string()),
                project_type: ProjectType::Dashboard,
                status: ProjectStatus::InProgress,
                created_by: None,
                settings: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.created_by, "ana");
        assert_eq!(updated.settings.ai.max_suggestions_per_component, 9);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.status, ProjectStatus::InProgress);
    }

    #[tokio::test]
    async fn test_duplicate_copies_components_not_feedback() {
        let store = MemoryStore::new();
        let project = create_project(&store, new_project("Demo")).await.unwrap();
        let component = Component::blank("Btn", ComponentType::Button, project.id, Utc::now());
        store.insert_component(&component).await.unwrap();

        let assistant = DesignAssistant::new(StubChat::replying([r#"[{"title": "Add spacing"}]"#]));
        generate_suggestions(&store, &assistant, project.id, None)
            .await
            .unwrap();

        let copy = duplicate_project(&store, project.id, "Demo copy").await.unwrap();
        let stored = get_project(&store, copy.id).await.unwrap();
        assert_eq!(stored.name, "Demo copy");
        assert_eq!(stored.status, ProjectStatus::Draft);
        assert_eq!(stored.components.len(), 1);
        assert_ne!(stored.components[0].id, component.id);
        assert_eq!(stored.components[0].project_id, copy.id);
        assert!(stored.suggestions.is_empty());

        let original = get_project(&store, project.id).await.unwrap();
        assert_eq!(original.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_update_settings_persists() {
        let store = MemoryStore::new();
        let project = create_project(&store, new_project("Demo")).await.unwrap();
        let mut settings = ProjectSettings::default();
        settings.export.default_export_format = "Vue".to_string();

        let saved = update_settings(&store, project.id, settings).await.unwrap();
        assert_eq!(saved.export.default_export_format, "Vue");
        let stored = get_project(&store, project.id).await.unwrap();
        assert_eq!(stored.settings.export.default_export_format, "Vue");
    }

    #[tokio::test]
    async fn test_suggestions_for_unknown_project_is_not_found() {
        let store = MemoryStore::new();
        let assistant = DesignAssistant::new(StubChat::failing());
        let result = generate_suggestions(&store, &assistant, Uuid::new_v4(), None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_suggestions_focus_on_project_component() {
        let store = MemoryStore::new();
        let project = create_project(&store, new_project("Demo")).await.unwrap();
        let component = Component::blank("Btn", ComponentType::Button, project.id, Utc::now());
        store.insert_component(&component).await.unwrap();

        let stub = StubChat::replying([r#"[{"title": "Round corners", "type": "Branding"}]"#]);
        let assistant = DesignAssistant::new(stub.clone());
        let suggestions = generate_suggestions(&store, &assistant, project.id, Some(component.id))
            .await
            .unwrap();

        assert_eq!(suggestions[0].component_id, Some(component.id));
        assert!(stub.prompts()[0].contains("Focus on the Button component: Btn"));
    }
}
