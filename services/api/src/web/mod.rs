pub mod middleware;
pub mod profile;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use middleware::require_session;
use rest::ApiDoc;
use state::AppState;

/// Builds the full HTTP router: public routes, session-protected routes and
/// the Swagger UI. Cross-cutting layers such as CORS are added by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/sessions", post(profile::create_session_handler))
        .route("/catalog/facets", get(rest::facets_handler));

    // Protected routes (x-session-id required)
    let protected_routes = Router::new()
        .route("/sessions", delete(profile::end_session_handler))
        .route("/ingredients", get(rest::list_ingredients_handler))
        .route("/ingredients/{id}", get(rest::get_ingredient_handler))
        .route("/products", get(rest::list_products_handler))
        .route("/products/{id}", get(rest::get_product_handler))
        .route("/search", get(rest::search_handler))
        .route(
            "/profile",
            get(profile::get_profile_handler).patch(profile::update_profile_handler),
        )
        .route("/profile/skin-type", put(profile::set_skin_type_handler))
        .route("/profile/concerns", post(profile::add_concern_handler))
        .route(
            "/profile/concerns/{concern}",
            delete(profile::remove_concern_handler),
        )
        .route("/profile/allergies", post(profile::add_allergy_handler))
        .route(
            "/profile/allergies/{allergy}",
            delete(profile::remove_allergy_handler),
        )
        .route("/profile/favorites", get(profile::list_favorites_handler))
        .route(
            "/profile/favorites/{product_id}",
            put(profile::add_favorite_handler).delete(profile::remove_favorite_handler),
        )
        .route(
            "/profile/search-history",
            post(profile::add_search_history_handler)
                .delete(profile::clear_search_history_handler),
        )
        .route(
            "/profile/recommendations",
            get(profile::recommendations_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
