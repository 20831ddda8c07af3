//! PostgreSQL store. Embedded blobs (style, settings, metrics, ...) are JSONB;
//! variants and properties are child rows with a `position` column.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::component::{
    AccessibilityInfo, Component, ComponentProperty, ComponentStyle, ComponentVariant,
};
use crate::models::project::Project;
use crate::models::review::{Review, ReviewComment, ReviewCriteria, ReviewScore};
use crate::models::settings::ProjectSettings;
use crate::models::suggestion::{Suggestion, SuggestionMetrics};
use crate::store::{ComponentFilter, DesignStore, ProjectFilter};

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    project_type: String,
    status: String,
    created_by: String,
    settings: Json<ProjectSettings>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct ComponentRow {
    id: Uuid,
    project_id: Uuid,
    name: String,
    description: Option<String>,
    component_type: String,
    html_code: String,
    css_code: String,
    js_code: Option<String>,
    style: Json<ComponentStyle>,
    accessibility: Json<AccessibilityInfo>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct VariantRow {
    id: Uuid,
    component_id: Uuid,
    name: String,
    description: String,
    style: Json<ComponentStyle>,
    html_code: String,
    css_code: String,
}

#[derive(Debug, FromRow)]
struct PropertyRow {
    id: Uuid,
    component_id: Uuid,
    name: String,
    property_type: String,
    default_value: String,
    is_required: bool,
    description: Option<String>,
}

#[derive(Debug, FromRow)]
struct SuggestionRow {
    id: Uuid,
    project_id: Uuid,
    component_id: Option<Uuid>,
    title: String,
    description: String,
    suggestion_type: String,
    priority: String,
    generated_code: String,
    code_language: Option<String>,
    tags: Vec<String>,
    metrics: Json<SuggestionMetrics>,
    is_applied: bool,
    created_at: DateTime<Utc>,
    applied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: Uuid,
    project_id: Uuid,
    component_id: Option<Uuid>,
    title: String,
    description: String,
    status: String,
    review_type: String,
    reviewer_name: String,
    reviewer_email: String,
    criteria: Json<ReviewCriteria>,
    comments: Json<Vec<ReviewComment>>,
    score: Json<ReviewScore>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parses a TEXT enum column; a bad value means the row was written by something else.
fn parse_column<T>(value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr<Err = crate::models::UnknownVariant>,
{
    value
        .parse::<T>()
        .map_err(|e| AppError::Internal(anyhow!("corrupt row: {e}")))
}

impl ProjectRow {
    fn into_project(self) -> Result<Project, AppError> {
        Ok(Project {
            id: self.id,
            name: self.name,
            description: self.description,
            project_type: parse_column(&self.project_type)?,
            status: parse_column(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            created_by: self.created_by,
            components: Vec::new(),
            suggestions: Vec::new(),
            reviews: Vec::new(),
            settings: self.settings.0,
        })
    }
}

impl ComponentRow {
    fn into_component(self) -> Result<Component, AppError> {
        Ok(Component {
            id: self.id,
            name: self.name,
            description: self.description,
            component_type: parse_column(&self.component_type)?,
            html_code: self.html_code,
            css_code: self.css_code,
            js_code: self.js_code,
            style: self.style.0,
            variants: Vec::new(),
            properties: Vec::new(),
            accessibility: self.accessibility.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
            project_id: self.project_id,
        })
    }
}

impl SuggestionRow {
    fn into_suggestion(self) -> Result<Suggestion, AppError> {
        Ok(Suggestion {
            id: self.id,
            title: self.title,
            description: self.description,
            suggestion_type: parse_column(&self.suggestion_type)?,
            priority: parse_column(&self.priority)?,
            generated_code: self.generated_code,
            code_language: self.code_language,
            tags: self.tags,
            metrics: self.metrics.0,
            is_applied: self.is_applied,
            created_at: self.created_at,
            applied_at: self.applied_at,
            project_id: self.project_id,
            component_id: self.component_id,
        })
    }
}

impl ReviewRow {
    fn into_review(self) -> Result<Review, AppError> {
        Ok(Review {
            id: self.id,
            title: self.title,
            description: self.description,
            status: parse_column(&self.status)?,
            review_type: parse_column(&self.review_type)?,
            reviewer_name: self.reviewer_name,
            reviewer_email: self.reviewer_email,
            criteria: self.criteria.0,
            comments: self.comments.0,
            score: self.score.0,
            created_at: self.created_at,
            completed_at: self.completed_at,
            project_id: self.project_id,
            component_id: self.component_id,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads variants and properties for the given component rows in two queries.
    async fn hydrate_components(&self, rows: Vec<ComponentRow>) -> Result<Vec<Component>, AppError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let variant_rows = sqlx::query_as::<_, VariantRow>(
            "SELECT id, component_id, name, description, style, html_code, css_code
             FROM component_variants WHERE component_id = ANY($1) ORDER BY position",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let property_rows = sqlx::query_as::<_, PropertyRow>(
            "SELECT id, component_id, name, property_type, default_value, is_required, description
             FROM component_properties WHERE component_id = ANY($1) ORDER BY position",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut variants: HashMap<Uuid, Vec<ComponentVariant>> = HashMap::new();
        for row in variant_rows {
            variants.entry(row.component_id).or_default().push(ComponentVariant {
                id: row.id,
                name: row.name,
                description: row.description,
                style: row.style.0,
                html_code: row.html_code,
                css_code: row.css_code,
            });
        }

        let mut properties: HashMap<Uuid, Vec<ComponentProperty>> = HashMap::new();
        for row in property_rows {
            properties
                .entry(row.component_id)
                .or_default()
                .push(ComponentProperty {
                    id: row.id,
                    name: row.name,
                    property_type: row.property_type,
                    default_value: row.default_value,
                    is_required: row.is_required,
                    description: row.description,
                });
        }

        rows.into_iter()
            .map(|row| {
                let mut component = row.into_component()?;
                component.variants = variants.remove(&component.id).unwrap_or_default();
                component.properties = properties.remove(&component.id).unwrap_or_default();
                Ok(component)
            })
            .collect()
    }

    async fn components_for_projects(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Component>>, AppError> {
        let rows = sqlx::query_as::<_, ComponentRow>(
            "SELECT * FROM components WHERE project_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Component>> = HashMap::new();
        for component in self.hydrate_components(rows).await? {
            grouped.entry(component.project_id).or_default().push(component);
        }
        Ok(grouped)
    }

    async fn suggestions_for_projects(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Suggestion>>, AppError> {
        let rows = sqlx::query_as::<_, SuggestionRow>(
            "SELECT * FROM suggestions WHERE project_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Suggestion>> = HashMap::new();
        for row in rows {
            let suggestion = row.into_suggestion()?;
            grouped.entry(suggestion.project_id).or_default().push(suggestion);
        }
        Ok(grouped)
    }

    async fn reviews_for_projects(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Review>>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT * FROM reviews WHERE project_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Review>> = HashMap::new();
        for row in rows {
            let review = row.into_review()?;
            grouped.entry(review.project_id).or_default().push(review);
        }
        Ok(grouped)
    }

    /// Attaches child collections to a batch of project rows.
    async fn assemble(
        &self,
        rows: Vec<ProjectRow>,
        with_feedback: bool,
    ) -> Result<Vec<Project>, AppError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut components = self.components_for_projects(&ids).await?;
        let (mut suggestions, mut reviews) = if with_feedback {
            (
                self.suggestions_for_projects(&ids).await?,
                self.reviews_for_projects(&ids).await?,
            )
        } else {
            (HashMap::new(), HashMap::new())
        };

        rows.into_iter()
            .map(|row| {
                let mut project = row.into_project()?;
                project.components = components.remove(&project.id).unwrap_or_default();
                project.suggestions = suggestions.remove(&project.id).unwrap_or_default();
                project.reviews = reviews.remove(&project.id).unwrap_or_default();
                Ok(project)
            })
            .collect()
    }
}

async fn insert_component_tx(
    tx: &mut Transaction<'_, Postgres>,
    component: &Component,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO components
            (id, project_id, name, description, component_type, html_code, css_code,
             js_code, style, accessibility, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(component.id)
    .bind(component.project_id)
    .bind(&component.name)
    .bind(&component.description)
    .bind(component.component_type.as_str())
    .bind(&component.html_code)
    .bind(&component.css_code)
    .bind(&component.js_code)
    .bind(Json(&component.style))
    .bind(Json(&component.accessibility))
    .bind(component.created_at)
    .bind(component.updated_at)
    .execute(&mut **tx)
    .await?;

    insert_children_tx(tx, component).await
}

async fn insert_children_tx(
    tx: &mut Transaction<'_, Postgres>,
    component: &Component,
) -> Result<(), AppError> {
    for (position, variant) in component.variants.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO component_variants
                (id, component_id, position, name, description, style, html_code, css_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(variant.id)
        .bind(component.id)
        .bind(position as i32)
        .bind(&variant.name)
        .bind(&variant.description)
        .bind(Json(&variant.style))
        .bind(&variant.html_code)
        .bind(&variant.css_code)
        .execute(&mut **tx)
        .await?;
    }

    for (position, property) in component.properties.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO component_properties
                (id, component_id, position, name, property_type, default_value,
                 is_required, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(property.id)
        .bind(component.id)
        .bind(position as i32)
        .bind(&property.name)
        .bind(&property.property_type)
        .bind(&property.default_value)
        .bind(property.is_required)
        .bind(&property.description)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl DesignStore for PgStore {
    async fn insert_project(&self, project: &Project) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO projects
                (id, name, description, project_type, status, created_by, settings,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.project_type.as_str())
        .bind(project.status.as_str())
        .bind(&project.created_by)
        .bind(Json(&project.settings))
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&mut *tx)
        .await?;

        for component in &project.components {
            insert_component_tx(&mut tx, component).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row], true).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>, AppError> {
        let rows = match &filter {
            ProjectFilter::All => {
                sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
            ProjectFilter::ByType(project_type) => {
                sqlx::query_as::<_, ProjectRow>(
                    "SELECT * FROM projects WHERE project_type = $1 ORDER BY created_at DESC",
                )
                .bind(project_type.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            ProjectFilter::ByStatus(status) => {
                sqlx::query_as::<_, ProjectRow>(
                    "SELECT * FROM projects WHERE status = $1 ORDER BY created_at DESC",
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
        };

        self.assemble(rows, filter.loads_feedback()).await
    }

    async fn update_project(&self, project: &Project) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, description = $3, project_type = $4, status = $5,
                created_by = $6, settings = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.project_type.as_str())
        .bind(project.status.as_str())
        .bind(&project.created_by)
        .bind(Json(&project.settings))
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_component(&self, component: &Component) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        insert_component_tx(&mut tx, component).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_component(&self, id: Uuid) -> Result<Option<Component>, AppError> {
        let row = sqlx::query_as::<_, ComponentRow>("SELECT * FROM components WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate_components(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_components(
        &self,
        filter: ComponentFilter,
    ) -> Result<Vec<Component>, AppError> {
        let rows = match &filter {
            ComponentFilter::ByProject(project_id) => {
                sqlx::query_as::<_, ComponentRow>(
                    "SELECT * FROM components WHERE project_id = $1 ORDER BY created_at ASC",
                )
                .bind(project_id)
                .fetch_all(&self.pool)
                .await?
            }
            ComponentFilter::ByType(component_type) => {
                sqlx::query_as::<_, ComponentRow>(
                    "SELECT * FROM components WHERE component_type = $1 ORDER BY created_at DESC",
                )
                .bind(component_type.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            ComponentFilter::Search(term) => {
                // strpos keeps the match case-sensitive and needs no LIKE escaping
                sqlx::query_as::<_, ComponentRow>(
                    r#"
                    SELECT * FROM components
                    WHERE strpos(name, $1) > 0
                       OR strpos(coalesce(description, ''), $1) > 0
                       OR strpos(html_code, $1) > 0
                       OR strpos(css_code, $1) > 0
                       OR strpos(coalesce(js_code, ''), $1) > 0
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(term)
                .fetch_all(&self.pool)
                .await?
            }
        };

        self.hydrate_components(rows).await
    }

    async fn update_component(&self, component: &Component) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE components
            SET name = $2, description = $3, component_type = $4, html_code = $5,
                css_code = $6, js_code = $7, style = $8, accessibility = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(component.id)
        .bind(&component.name)
        .bind(&component.description)
        .bind(component.component_type.as_str())
        .bind(&component.html_code)
        .bind(&component.css_code)
        .bind(&component.js_code)
        .bind(Json(&component.style))
        .bind(Json(&component.accessibility))
        .bind(component.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM component_variants WHERE component_id = $1")
            .bind(component.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM component_properties WHERE component_id = $1")
            .bind(component.id)
            .execute(&mut *tx)
            .await?;
        insert_children_tx(&mut tx, component).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_component(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_suggestions(&self, suggestions: &[Suggestion]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for s in suggestions {
            sqlx::query(
                r#"
                INSERT INTO suggestions
                    (id, project_id, component_id, title, description, suggestion_type,
                     priority, generated_code, code_language, tags, metrics, is_applied,
                     created_at, applied_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(s.id)
            .bind(s.project_id)
            .bind(s.component_id)
            .bind(&s.title)
            .bind(&s.description)
            .bind(s.suggestion_type.as_str())
            .bind(s.priority.as_str())
            .bind(&s.generated_code)
            .bind(&s.code_language)
            .bind(&s.tags)
            .bind(Json(&s.metrics))
            .bind(s.is_applied)
            .bind(s.created_at)
            .bind(s.applied_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn insert_review(&self, review: &Review) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO reviews
                (id, project_id, component_id, title, description, status, review_type,
                 reviewer_name, reviewer_email, criteria, comments, score, created_at,
                 completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(review.id)
        .bind(review.project_id)
        .bind(review.component_id)
        .bind(&review.title)
        .bind(&review.description)
        .bind(review.status.as_str())
        .bind(review.review_type.as_str())
        .bind(&review.reviewer_name)
        .bind(&review.reviewer_email)
        .bind(Json(&review.criteria))
        .bind(Json(&review.comments))
        .bind(Json(&review.score))
        .bind(review.created_at)
        .bind(review.completed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, ReviewRow>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(ReviewRow::into_review)
            .transpose()
    }

    async fn list_reviews(&self, project_id: Uuid) -> Result<Vec<Review>, AppError> {
        Ok(self
            .reviews_for_projects(&[project_id])
            .await?
            .remove(&project_id)
            .unwrap_or_default())
    }

    async fn update_review(&self, review: &Review) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET title = $2, description = $3, status = $4, review_type = $5,
                reviewer_name = $6, reviewer_email = $7, criteria = $8, comments = $9,
                score = $10, completed_at = $11, component_id = $12
            WHERE id = $1
            "#,
        )
        .bind(review.id)
        .bind(&review.title)
        .bind(&review.description)
        .bind(review.status.as_str())
        .bind(review.review_type.as_str())
        .bind(&review.reviewer_name)
        .bind(&review.reviewer_email)
        .bind(Json(&review.criteria))
        .bind(Json(&review.comments))
        .bind(Json(&review.score))
        .bind(review.completed_at)
        .bind(review.component_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_review(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
