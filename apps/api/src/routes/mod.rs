pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::assistant::handlers as ai;
use crate::components::handlers as components;
use crate::projects::handlers as projects;
use crate::reviews::handlers as reviews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Projects
        .route(
            "/api/v1/projects",
            get(projects::handle_list_projects).post(projects::handle_create_project),
        )
        .route(
            "/api/v1/projects/type/:type",
            get(projects::handle_list_by_type),
        )
        .route(
            "/api/v1/projects/status/:status",
            get(projects::handle_list_by_status),
        )
        .route(
            "/api/v1/projects/:id",
            get(projects::handle_get_project)
                .put(projects::handle_update_project)
                .delete(projects::handle_delete_project),
        )
        .route(
            "/api/v1/projects/:id/duplicate",
            post(projects::handle_duplicate_project),
        )
        .route(
            "/api/v1/projects/:id/settings",
            put(projects::handle_update_settings),
        )
        .route(
            "/api/v1/projects/:id/suggestions",
            post(projects::handle_generate_suggestions),
        )
        .route(
            "/api/v1/projects/:id/reviews",
            get(reviews::handle_list_reviews).post(reviews::handle_create_review),
        )
        // Components
        .route(
            "/api/v1/components",
            get(components::handle_list_components).post(components::handle_create_component),
        )
        .route(
            "/api/v1/components/search",
            get(components::handle_search_components),
        )
        .route(
            "/api/v1/components/generate",
            post(components::handle_generate_component),
        )
        .route(
            "/api/v1/components/import",
            post(components::handle_import_component),
        )
        .route(
            "/api/v1/components/:id",
            get(components::handle_get_component)
                .put(components::handle_update_component)
                .delete(components::handle_delete_component),
        )
        .route(
            "/api/v1/components/:id/duplicate",
            post(components::handle_duplicate_component),
        )
        .route(
            "/api/v1/components/:id/variants",
            post(components::handle_generate_variants),
        )
        .route(
            "/api/v1/components/:id/export",
            post(components::handle_export_component),
        )
        .route(
            "/api/v1/components/:id/optimize",
            post(components::handle_optimize_component),
        )
        .route(
            "/api/v1/components/:id/accessibility",
            post(components::handle_accessibility_improvements),
        )
        .route(
            "/api/v1/components/:id/responsive",
            post(components::handle_responsive_code),
        )
        .route(
            "/api/v1/components/:id/analyze",
            post(components::handle_analyze_component),
        )
        .route(
            "/api/v1/components/:id/documentation",
            post(components::handle_generate_documentation),
        )
        .route(
            "/api/v1/components/:id/improvements",
            post(components::handle_suggest_improvements),
        )
        // Reviews
        .route(
            "/api/v1/reviews/:id/comments",
            post(reviews::handle_add_comment),
        )
        .route(
            "/api/v1/reviews/:id/complete",
            post(reviews::handle_complete_review),
        )
        .route("/api/v1/reviews/:id", delete(reviews::handle_delete_review))
        // Standalone AI utilities
        .route("/api/v1/ai/optimize-code", post(ai::handle_optimize_code))
        .route("/api/v1/ai/color-scheme", post(ai::handle_color_scheme))
        .route("/api/v1/ai/translate", post(ai::handle_translate))
        .with_state(state)
}
