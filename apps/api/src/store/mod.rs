//! Persistence gateway.
//!
//! `AppState` holds an `Arc<dyn DesignStore>`: `PgStore` when a database is
//! configured, `MemoryStore` otherwise (and in tests).
//!
//! Ordering: project-scoped component listing is ascending by `created_at`,
//! every other list is descending. Child collections are always loaded with
//! their parent.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::component::{Component, ComponentType};
use crate::models::project::{Project, ProjectStatus, ProjectType};
use crate::models::review::Review;
use crate::models::suggestion::Suggestion;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone)]
pub enum ProjectFilter {
    /// Components, suggestions and reviews are loaded.
    All,
    /// Only components are loaded.
    ByType(ProjectType),
    /// Only components are loaded.
    ByStatus(ProjectStatus),
}

#[derive(Debug, Clone)]
pub enum ComponentFilter {
    ByProject(Uuid),
    ByType(ComponentType),
    /// Case-sensitive substring over name, description and the code fields.
    Search(String),
}

impl ProjectFilter {
    pub fn loads_feedback(&self) -> bool {
        matches!(self, ProjectFilter::All)
    }
}

impl ComponentFilter {
    pub fn ascending(&self) -> bool {
        matches!(self, ComponentFilter::ByProject(_))
    }
}

/// Case-sensitive substring match used by `ComponentFilter::Search`.
pub fn component_matches(component: &Component, term: &str) -> bool {
    component.name.contains(term)
        || component
            .description
            .as_deref()
            .is_some_and(|d| d.contains(term))
        || component.html_code.contains(term)
        || component.css_code.contains(term)
        || component
            .js_code
            .as_deref()
            .is_some_and(|js| js.contains(term))
}

#[async_trait]
pub trait DesignStore: Send + Sync {
    /// Inserts the project row plus any components it carries.
    async fn insert_project(&self, project: &Project) -> Result<(), AppError>;
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, AppError>;
    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError>;
    /// Writes scalar fields and settings. Returns false when the id is unknown.
    async fn update_project(&self, project: &Project) -> Result<bool, AppError>;
    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError>;

    async fn insert_component(&self, component: &Component) -> Result<(), AppError>;
    async fn get_component(&self, id: Uuid) -> Result<Option<Component>, AppError>;
    async fn list_components(&self, filter: ComponentFilter)
        -> Result<Vec<Component>, AppError>;
    /// Replaces the component row and its variant/property collections.
    async fn update_component(&self, component: &Component) -> Result<bool, AppError>;
    /// Cascades to variants and properties; suggestions and reviews keep
    /// their row with `component_id` cleared.
    async fn delete_component(&self, id: Uuid) -> Result<bool, AppError>;

    async fn insert_suggestions(&self, suggestions: &[Suggestion]) -> Result<(), AppError>;

    async fn insert_review(&self, review: &Review) -> Result<(), AppError>;
    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, AppError>;
    async fn list_reviews(&self, project_id: Uuid) -> Result<Vec<Review>, AppError>;
    async fn update_review(&self, review: &Review) -> Result<bool, AppError>;
    async fn delete_review(&self, id: Uuid) -> Result<bool, AppError>;
}
