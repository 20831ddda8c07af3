//! Component operations over the store. Pure transformations live in
//! `variants`, `export` and `minify`; this module fetches, applies and persists.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assistant::DesignAssistant;
use crate::components::{export, minify, variants};
use crate::errors::AppError;
use crate::models::component::{
    Component, ComponentStyle, ComponentType, ComponentUpdate, ComponentVariant, NewComponent,
    DESCRIPTION_MAX, NAME_MAX,
};
use crate::models::validation::FieldErrors;
use crate::store::{ComponentFilter, DesignStore};

/// Longest accepted import format label.
pub const IMPORT_FORMAT_MAX: usize = 50;

/// Body of `POST /components/import`. The code is stored verbatim as HTML.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub format: String,
    pub project_id: Uuid,
}

/// Body of `POST /components/generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub description: String,
    #[serde(rename = "type", default)]
    pub component_type: ComponentType,
    #[serde(default)]
    pub style: ComponentStyle,
    pub project_id: Uuid,
}

/// A component must reference an existing project.
async fn require_project(store: &dyn DesignStore, project_id: Uuid) -> Result<(), AppError> {
    if store.get_project(project_id).await?.is_none() {
        let mut errors = FieldErrors::new();
        errors.push("projectId", format!("project {project_id} does not exist"));
        return errors.into_result();
    }
    Ok(())
}

pub async fn get_component(store: &dyn DesignStore, id: Uuid) -> Result<Component, AppError> {
    store
        .get_component(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("component {id}")))
}

pub async fn list_components(
    store: &dyn DesignStore,
    filter: ComponentFilter,
) -> Result<Vec<Component>, AppError> {
    store.list_components(filter).await
}

pub async fn search_components(
    store: &dyn DesignStore,
    term: &str,
) -> Result<Vec<Component>, AppError> {
    if term.trim().is_empty() {
        return Err(AppError::Validation("searchTerm is required".to_string()));
    }
    store
        .list_components(ComponentFilter::Search(term.to_string()))
        .await
}

pub async fn create_component(
    store: &dyn DesignStore,
    input: NewComponent,
) -> Result<Component, AppError> {
    input.fields.validate().into_result()?;
    require_project(store, input.project_id).await?;

    let component = Component::from_fields(input.fields, input.project_id, Utc::now());
    store.insert_component(&component).await?;
    info!("Created component {} ({})", component.id, component.name);
    Ok(component)
}

pub async fn update_component(
    store: &dyn DesignStore,
    id: Uuid,
    input: ComponentUpdate,
) -> Result<Component, AppError> {
    if input.id != id {
        return Err(AppError::Validation("ID mismatch".to_string()));
    }
    input.fields.validate().into_result()?;

    let mut component = get_component(store, id).await?;
    component.apply(input.fields, Utc::now());

    if !store.update_component(&component).await? {
        return Err(AppError::NotFound(format!("component {id}")));
    }
    Ok(component)
}

pub async fn delete_component(store: &dyn DesignStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_component(id).await? {
        info!("Deleted component {id}");
        Ok(())
    } else {
        Err(AppError::NotFound(format!("component {id}")))
    }
}

pub async fn duplicate_component(
    store: &dyn DesignStore,
    id: Uuid,
    new_name: &str,
) -> Result<Component, AppError> {
    let original = get_component(store, id).await?;
    let copy = original.duplicate(new_name, original.project_id, Utc::now());
    store.insert_component(&copy).await?;
    Ok(copy)
}

/// Computed on request; the variants are not persisted.
pub async fn generate_variants(
    store: &dyn DesignStore,
    id: Uuid,
) -> Result<Vec<ComponentVariant>, AppError> {
    let component = get_component(store, id).await?;
    Ok(variants::generate_variants(&component))
}

pub async fn export_component(
    store: &dyn DesignStore,
    id: Uuid,
    format: &str,
) -> Result<String, AppError> {
    let component = get_component(store, id).await?;
    Ok(export::export_component(&component, format))
}

pub async fn import_component(
    store: &dyn DesignStore,
    input: ImportRequest,
) -> Result<Component, AppError> {
    let mut errors = FieldErrors::new();
    errors.max_len("format", &input.format, IMPORT_FORMAT_MAX);
    errors.into_result()?;
    require_project(store, input.project_id).await?;

    let now = Utc::now();
    let name = format!("Imported Component - {}", now.format("%Y%m%d-%H%M%S"));
    let mut component = Component::blank(&name, ComponentType::Custom, input.project_id, now);
    component.description = Some(format!("Component imported from {} format", input.format));
    component.html_code = input.code;
    component.validate().into_result()?;

    store.insert_component(&component).await?;
    Ok(component)
}

pub async fn optimize_component(store: &dyn DesignStore, id: Uuid) -> Result<Component, AppError> {
    let mut component = get_component(store, id).await?;
    component.html_code = minify::optimize_html(&component.html_code);
    component.css_code = minify::optimize_css(&component.css_code);
    component.updated_at = Some(Utc::now());

    if !store.update_component(&component).await? {
        return Err(AppError::NotFound(format!("component {id}")));
    }
    Ok(component)
}

/// Asks the assistant for a new component and stores it under the project.
pub async fn generate_component(
    store: &dyn DesignStore,
    assistant: &DesignAssistant,
    input: GenerateRequest,
) -> Result<Component, AppError> {
    let mut errors = FieldErrors::new();
    errors
        .required("description", &input.description)
        .max_len("description", &input.description, DESCRIPTION_MAX);
    errors.into_result()?;
    require_project(store, input.project_id).await?;

    let mut component = assistant
        .generate_component(
            &input.description,
            input.component_type,
            &input.style,
            input.project_id,
        )
        .await?;

    if component.name.chars().count() > NAME_MAX {
        component.name = component.name.chars().take(NAME_MAX).collect();
    }
    component.properties.retain(|property| {
        let valid = property.is_valid();
        if !valid {
            warn!("Dropping generated property '{}': exceeds field limits", property.name);
        }
        valid
    });
    component.validate().into_result()?;

    store.insert_component(&component).await?;
    info!("Generated component {} ({})", component.id, component.name);
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::ComponentFields;
    use crate::models::project::{NewProject, Project, ProjectType};
    use crate::models::settings::ProjectSettings;
    use crate::store::MemoryStore;
    use crate::test_support::StubChat;

    async fn store_with_project() -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let project = Project::from_new(
            NewProject {
                name: "Demo".to_string(),
                description: None,
                project_type: ProjectType::WebApplication,
                created_by: String::new(),
                settings: ProjectSettings::default(),
            },
            Utc::now(),
        );
        store.insert_project(&project).await.unwrap();
        (store, project.id)
    }

    fn fields(name: &str) -> ComponentFields {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "type": "Button",
            "htmlCode": "<button>Hi</button>",
            "cssCode": "button{border-radius:8px;color:#3B82F6;}"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_existing_project() {
        let store = MemoryStore::new();
        let result = create_component(
            &store,
            NewComponent {
                project_id: Uuid::new_v4(),
                fields: fields("Btn"),
            },
        )
        .await;
        match result {
            Err(AppError::InvalidFields(errors)) => assert_eq!(errors[0].field, "projectId"),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_keeps_created_at_and_sets_updated_at() {
        let (store, project_id) = store_with_project().await;
        let created = create_component(&store, NewComponent { project_id, fields: fields("Btn") })
            .await
            .unwrap();

        let updated = update_component(
            &store,
            created.id,
            ComponentUpdate {
                id: created.id,
                fields: fields("Renamed"),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(get_component(&store, created.id).await.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_rejects_id_mismatch() {
        let (store, project_id) = store_with_project().await;
        let created = create_component(&store, NewComponent { project_id, fields: fields("Btn") })
            .await
            .unwrap();
        let result = update_component(
            &store,
            created.id,
            ComponentUpdate {
                id: Uuid::new_v4(),
                fields: fields("Other"),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_optimize_persists_cleaned_code() {
        let (store, project_id) = store_with_project().await;
        let created = create_component(&store, NewComponent { project_id, fields: fields("Btn") })
            .await
            .unwrap();

        let optimized = optimize_component(&store, created.id).await.unwrap();
        assert_eq!(optimized.css_code, "button{border-radius:8px;color:#3B82F6}");
        assert!(optimized.updated_at.is_some());

        let stored = get_component(&store, created.id).await.unwrap();
        assert_eq!(stored.css_code, optimized.css_code);
    }

    #[tokio::test]
    async fn test_import_stores_code_verbatim() {
        let (store, project_id) = store_with_project().await;
        let imported = import_component(
            &store,
            ImportRequest {
                code: "<Card title=\"x\" />".to_string(),
                format: "React".to_string(),
                project_id,
            },
        )
        .await
        .unwrap();

        assert!(imported.name.starts_with("Imported Component - "));
        assert_eq!(imported.name.len(), "Imported Component - 20250101-120000".len());
        assert_eq!(imported.component_type, ComponentType::Custom);
        assert_eq!(imported.html_code, "<Card title=\"x\" />");
        assert_eq!(imported.css_code, "");
        assert_eq!(
            imported.description.as_deref(),
            Some("Component imported from React format")
        );
    }

    #[tokio::test]
    async fn test_duplicate_unknown_component_is_not_found() {
        let store = MemoryStore::new();
        let result = duplicate_component(&store, Uuid::new_v4(), "Copy").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_term() {
        let store = MemoryStore::new();
        assert!(matches!(
            search_components(&store, "  ").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_component_persists_result() {
        let (store, project_id) = store_with_project().await;
        let assistant = DesignAssistant::new(StubChat::replying([
            r#"{"name": "Hero", "htmlCode": "<section></section>", "cssCode": ""}"#,
        ]));

        let generated = generate_component(
            &store,
            &assistant,
            GenerateRequest {
                description: "landing hero".to_string(),
                component_type: ComponentType::Custom,
                style: ComponentStyle::default(),
                project_id,
            },
        )
        .await
        .unwrap();

        let stored = get_component(&store, generated.id).await.unwrap();
        assert_eq!(stored.name, "Hero");
        assert_eq!(stored.project_id, project_id);
    }

    #[tokio::test]
    async fn test_import_rejects_overlong_format() {
        let (store, project_id) = store_with_project().await;
        let result = import_component(
            &store,
            ImportRequest {
                code: "<div></div>".to_string(),
                format: "f".repeat(1500),
                project_id,
            },
        )
        .await;

        match result {
            Err(AppError::InvalidFields(errors)) => assert_eq!(errors[0].field, "format"),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
        let stored = list_components(&store, ComponentFilter::ByProject(project_id))
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_generate_rejects_overlong_description_before_calling_ai() {
        let (store, project_id) = store_with_project().await;
        let chat = StubChat::failing();
        let assistant = DesignAssistant::new(chat.clone());

        let result = generate_component(
            &store,
            &assistant,
            GenerateRequest {
                description: "d".repeat(DESCRIPTION_MAX + 500),
                component_type: ComponentType::Custom,
                style: ComponentStyle::default(),
                project_id,
            },
        )
        .await;

        match result {
            Err(AppError::InvalidFields(errors)) => assert_eq!(errors[0].field, "description"),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
        assert!(chat.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_generate_drops_properties_exceeding_limits() {
        let (store, project_id) = store_with_project().await;
        let reply = serde_json::json!({
            "name": "Field",
            "htmlCode": "<input>",
            "cssCode": "",
            "properties": [
                {"name": "value", "type": "t".repeat(108), "defaultValue": ""},
                {"name": "label", "type": "string", "defaultValue": "Email"}
            ]
        })
        .to_string();
        let assistant = DesignAssistant::new(StubChat::replying([reply]));

        let generated = generate_component(
            &store,
            &assistant,
            GenerateRequest {
                description: "email field".to_string(),
                component_type: ComponentType::Input,
                style: ComponentStyle::default(),
                project_id,
            },
        )
        .await
        .unwrap();

        let stored = get_component(&store, generated.id).await.unwrap();
        assert_eq!(stored.properties.len(), 1);
        assert_eq!(stored.properties[0].name, "label");
        assert!(stored.validate().is_empty());
    }
}
