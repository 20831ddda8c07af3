//! In-process store backed by vectors behind a `tokio::sync::RwLock`.
//!
//! Rows keep insertion order so ties on `created_at` sort stably.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::component::Component;
use crate::models::project::Project;
use crate::models::review::Review;
use crate::models::suggestion::Suggestion;
use crate::store::{component_matches, ComponentFilter, DesignStore, ProjectFilter};

#[derive(Default)]
struct Tables {
    /// Project rows without their child collections.
    projects: Vec<Project>,
    components: Vec<Component>,
    suggestions: Vec<Suggestion>,
    reviews: Vec<Review>,
}

impl Tables {
    fn assemble(&self, row: &Project, with_feedback: bool) -> Project {
        let mut project = row.clone();
        project.components = self.components_of(row.id);
        if with_feedback {
            project.suggestions = newest_first(
                self.suggestions
                    .iter()
                    .filter(|s| s.project_id == row.id)
                    .cloned()
                    .collect(),
                |s| s.created_at,
            );
            project.reviews = self.reviews_of(row.id);
        }
        project
    }

    fn components_of(&self, project_id: Uuid) -> Vec<Component> {
        let mut components: Vec<_> = self
            .components
            .iter()
            .filter(|c| c.project_id == project_id)
            .cloned()
            .collect();
        components.sort_by_key(|c| c.created_at);
        components
    }

    fn reviews_of(&self, project_id: Uuid) -> Vec<Review> {
        newest_first(
            self.reviews
                .iter()
                .filter(|r| r.project_id == project_id)
                .cloned()
                .collect(),
            |r| r.created_at,
        )
    }
}

fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

fn strip_children(project: &Project) -> Project {
    Project {
        components: Vec::new(),
        suggestions: Vec::new(),
        reviews: Vec::new(),
        ..project.clone()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DesignStore for MemoryStore {
    async fn insert_project(&self, project: &Project) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.projects.push(strip_children(project));
        tables.components.extend(project.components.iter().cloned());
        Ok(())
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .find(|p| p.id == id)
            .map(|row| tables.assemble(row, true)))
    }

    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError> {
        let tables = self.tables.read().await;
        let with_feedback = filter.loads_feedback();
        let rows = tables
            .projects
            .iter()
            .filter(|p| match &filter {
                ProjectFilter::All => true,
                ProjectFilter::ByType(t) => p.project_type == *t,
                ProjectFilter::ByStatus(s) => p.status == *s,
            })
            .map(|row| tables.assemble(row, with_feedback))
            .collect();
        Ok(newest_first(rows, |p| p.created_at))
    }

    async fn update_project(&self, project: &Project) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.projects.iter_mut().find(|p| p.id == project.id) {
            Some(row) => {
                *row = strip_children(project);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        if tables.projects.len() == before {
            return Ok(false);
        }
        tables.components.retain(|c| c.project_id != id);
        tables.suggestions.retain(|s| s.project_id != id);
        tables.reviews.retain(|r| r.project_id != id);
        Ok(true)
    }

    async fn insert_component(&self, component: &Component) -> Result<(), AppError> {
        self.tables.write().await.components.push(component.clone());
        Ok(())
    }

    async fn get_component(&self, id: Uuid) -> Result<Option<Component>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.components.iter().find(|c| c.id == id).cloned())
    }

    async fn list_components(
        &self,
        filter: ComponentFilter,
    ) -> Result<Vec<Component>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Component> = tables
            .components
            .iter()
            .filter(|c| match &filter {
                ComponentFilter::ByProject(project_id) => c.project_id == *project_id,
                ComponentFilter::ByType(t) => c.component_type == *t,
                ComponentFilter::Search(term) => component_matches(c, term),
            })
            .cloned()
            .collect();

        if filter.ascending() {
            rows.sort_by_key(|c| c.created_at);
            Ok(rows)
        } else {
            Ok(newest_first(rows, |c| c.created_at))
        }
    }

    async fn update_component(&self, component: &Component) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.components.iter_mut().find(|c| c.id == component.id) {
            Some(row) => {
                *row = component.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_component(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.components.len();
        tables.components.retain(|c| c.id != id);
        if tables.components.len() == before {
            return Ok(false);
        }
        for suggestion in tables.suggestions.iter_mut() {
            if suggestion.component_id == Some(id) {
                suggestion.component_id = None;
            }
        }
        for review in tables.reviews.iter_mut() {
            if review.component_id == Some(id) {
                review.component_id = None;
            }
        }
        Ok(true)
    }

    async fn insert_suggestions(&self, suggestions: &[Suggestion]) -> Result<(), AppError> {
        self.tables
            .write()
            .await
            .suggestions
            .extend(suggestions.iter().cloned());
        Ok(())
    }

    async fn insert_review(&self, review: &Review) -> Result<(), AppError> {
        self.tables.write().await.reviews.push(review.clone());
        Ok(())
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn list_reviews(&self, project_id: Uuid) -> Result<Vec<Review>, AppError> {
        Ok(self.tables.read().await.reviews_of(project_id))
    }

    async fn update_review(&self, review: &Review) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.reviews.iter_mut().find(|r| r.id == review.id) {
            Some(row) => {
                *row = review.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_review(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.reviews.len();
        tables.reviews.retain(|r| r.id != id);
        Ok(tables.reviews.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::models::component::ComponentType;
    use crate::models::project::{NewProject, ProjectStatus, ProjectType};
    use crate::models::review::NewReview;
    use crate::models::settings::ProjectSettings;
    use crate::models::suggestion::{SuggestionMetrics, SuggestionPriority, SuggestionType};

    fn project(name: &str, project_type: ProjectType, offset_secs: i64) -> Project {
        Project::from_new(
            NewProject {
                name: name.to_string(),
                description: None,
                project_type,
                created_by: String::new(),
                settings: ProjectSettings::default(),
            },
            Utc::now() + Duration::seconds(offset_secs),
        )
    }

    fn component(name: &str, project_id: Uuid, offset_secs: i64) -> Component {
        Component::blank(
            name,
            ComponentType::Card,
            project_id,
            Utc::now() + Duration::seconds(offset_secs),
        )
    }

    fn suggestion(project_id: Uuid, component_id: Option<Uuid>) -> Suggestion {
        Suggestion {
            id: Uuid::new_v4(),
            title: "Increase contrast".to_string(),
            description: String::new(),
            suggestion_type: SuggestionType::Accessibility,
            priority: SuggestionPriority::High,
            generated_code: String::new(),
            code_language: None,
            tags: vec![],
            metrics: SuggestionMetrics::default(),
            is_applied: false,
            created_at: Utc::now(),
            applied_at: None,
            project_id,
            component_id,
        }
    }

    #[tokio::test]
    async fn test_component_listing_ascending_for_project_descending_for_type() {
        let store = MemoryStore::new();
        let p = project("P", ProjectType::Blog, 0);
        store.insert_project(&p).await.unwrap();
        let older = component("Older", p.id, 0);
        let newer = component("Newer", p.id, 10);
        store.insert_component(&newer).await.unwrap();
        store.insert_component(&older).await.unwrap();

        let by_project = store
            .list_components(ComponentFilter::ByProject(p.id))
            .await
            .unwrap();
        assert_eq!(by_project[0].name, "Older");
        assert_eq!(by_project[1].name, "Newer");

        let by_type = store
            .list_components(ComponentFilter::ByType(ComponentType::Card))
            .await
            .unwrap();
        assert_eq!(by_type[0].name, "Newer");
        assert_eq!(by_type[1].name, "Older");
    }

    #[tokio::test]
    async fn test_project_filters_and_descending_order() {
        let store = MemoryStore::new();
        let blog = project("Blog", ProjectType::Blog, 0);
        let mut shop = project("Shop", ProjectType::ECommerce, 5);
        shop.status = ProjectStatus::Archived;
        store.insert_project(&blog).await.unwrap();
        store.insert_project(&shop).await.unwrap();

        let all = store.list_projects(ProjectFilter::All).await.unwrap();
        assert_eq!(all[0].name, "Shop");

        let blogs = store
            .list_projects(ProjectFilter::ByType(ProjectType::Blog))
            .await
            .unwrap();
        assert_eq!(blogs.len(), 1);

        let archived = store
            .list_projects(ProjectFilter::ByStatus(ProjectStatus::Archived))
            .await
            .unwrap();
        assert_eq!(archived[0].id, shop.id);
    }

    #[tokio::test]
    async fn test_delete_project_cascades() {
        let store = MemoryStore::new();
        let p = project("P", ProjectType::Custom, 0);
        store.insert_project(&p).await.unwrap();
        let c = component("C", p.id, 0);
        store.insert_component(&c).await.unwrap();
        store
            .insert_suggestions(&[suggestion(p.id, Some(c.id))])
            .await
            .unwrap();

        assert!(store.delete_project(p.id).await.unwrap());
        assert!(store.get_component(c.id).await.unwrap().is_none());
        assert!(!store.delete_project(p.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_component_clears_references() {
        let store = MemoryStore::new();
        let p = project("P", ProjectType::Custom, 0);
        store.insert_project(&p).await.unwrap();
        let c = component("C", p.id, 0);
        store.insert_component(&c).await.unwrap();
        store
            .insert_suggestions(&[suggestion(p.id, Some(c.id))])
            .await
            .unwrap();
        let review = crate::models::review::Review::from_new(
            NewReview {
                title: "Review".to_string(),
                description: String::new(),
                review_type: Default::default(),
                reviewer_name: "Kim".to_string(),
                reviewer_email: "kim@example.com".to_string(),
                criteria: Default::default(),
                component_id: Some(c.id),
            },
            p.id,
            Utc::now(),
        );
        store.insert_review(&review).await.unwrap();

        assert!(store.delete_component(c.id).await.unwrap());

        let loaded = store.get_project(p.id).await.unwrap().unwrap();
        assert!(loaded.components.is_empty());
        assert_eq!(loaded.suggestions.len(), 1);
        assert_eq!(loaded.suggestions[0].component_id, None);
        assert_eq!(loaded.reviews[0].component_id, None);
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive_and_covers_html() {
        let store = MemoryStore::new();
        let p = project("P", ProjectType::Custom, 0);
        store.insert_project(&p).await.unwrap();
        let mut c = component("Plain", p.id, 0);
        c.html_code = "<nav class=\"megaMenu\"></nav>".to_string();
        store.insert_component(&c).await.unwrap();

        let hits = store
            .list_components(ComponentFilter::Search("megaMenu".to_string()))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let misses = store
            .list_components(ComponentFilter::Search("MEGAMENU".to_string()))
            .await
            .unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_rows_returns_false() {
        let store = MemoryStore::new();
        let p = project("Ghost", ProjectType::Custom, 0);
        assert!(!store.update_project(&p).await.unwrap());
        let c = component("Ghost", p.id, 0);
        assert!(!store.update_component(&c).await.unwrap());
    }
}
