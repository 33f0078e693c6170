//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the catalog endpoints (browse, detail,
//! search) and the master definition for the OpenAPI specification.

use crate::web::profile;
use crate::web::protocol::{
    CreateSessionResponse, FacetsResponse, IngredientDetail, IngredientListParams,
    IngredientSummary, ProductAssessmentDto, ProductDetail, ProductListParams, ProductSummary,
    ProfileDto, SafetyBreakdownDto, SafetyRating, SearchParams, SearchResponse, SkinTypeRequest,
    UpdateProfileRequest, ValueRequest,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use skincare_core::query::{self, filter_by_category, filter_by_safety_band, filter_by_suitability};
use skincare_core::suitability::safety_breakdown;
use skincare_core::ProfileSession;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_ingredients_handler,
        get_ingredient_handler,
        list_products_handler,
        get_product_handler,
        facets_handler,
        search_handler,
        profile::create_session_handler,
        profile::end_session_handler,
        profile::get_profile_handler,
        profile::update_profile_handler,
        profile::set_skin_type_handler,
        profile::add_concern_handler,
        profile::remove_concern_handler,
        profile::add_allergy_handler,
        profile::remove_allergy_handler,
        profile::list_favorites_handler,
        profile::add_favorite_handler,
        profile::remove_favorite_handler,
        profile::add_search_history_handler,
        profile::clear_search_history_handler,
        profile::recommendations_handler,
    ),
    components(
        schemas(
            SafetyRating,
            IngredientSummary,
            IngredientDetail,
            ProductAssessmentDto,
            ProductSummary,
            SafetyBreakdownDto,
            ProductDetail,
            SearchResponse,
            FacetsResponse,
            ProfileDto,
            CreateSessionResponse,
            UpdateProfileRequest,
            SkinTypeRequest,
            ValueRequest,
        )
    ),
    tags(
        (name = "Skincare Catalog API", description = "Ingredient and product lookup with profile-aware suitability.")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document as pretty-printed JSON.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}

type HandlerResult<T> = Result<Json<T>, (StatusCode, String)>;

fn bad_request(e: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn truncated<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

//=========================================================================================
// Ingredient Handlers
//=========================================================================================

/// List ingredients, filtered and sorted.
///
/// Each result is annotated with its safety level and its suitability for the
/// session profile's skin type.
#[utoipa::path(
    get,
    path = "/ingredients",
    params(
        IngredientListParams,
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses(
        (status = 200, description = "Matching ingredients", body = [IngredientSummary]),
        (status = 400, description = "Invalid filter value"),
        (status = 401, description = "Unknown or expired session")
    )
)]
pub async fn list_ingredients_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Query(params): Query<IngredientListParams>,
) -> HandlerResult<Vec<IngredientSummary>> {
    let profile = session.profile;
    let query = params.to_query(&profile).map_err(bad_request)?;

    let results = query.apply(&state.catalog);
    debug!("Ingredient listing matched {} of {}", results.len(), state.catalog.ingredients().len());

    let summaries = results
        .into_iter()
        .map(|i| IngredientSummary::new(i, profile.skin_type))
        .collect();
    Ok(Json(truncated(summaries, params.limit)))
}

/// Fetch one ingredient with the products that contain it.
#[utoipa::path(
    get,
    path = "/ingredients/{id}",
    params(
        ("id" = String, Path, description = "Ingredient id"),
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses(
        (status = 200, description = "The ingredient", body = IngredientDetail),
        (status = 404, description = "No such ingredient")
    )
)]
pub async fn get_ingredient_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Path(id): Path<String>,
) -> HandlerResult<IngredientDetail> {
    let profile = session.profile;
    let catalog = &state.catalog;

    let ingredient = catalog
        .ingredient(&id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Ingredient {} not found", id)))?;

    let related_products = catalog
        .products_containing(&ingredient.id)
        .into_iter()
        .map(|p| ProductSummary::new(catalog, p, &profile))
        .collect();

    Ok(Json(IngredientDetail {
        ingredient: IngredientSummary::new(ingredient, profile.skin_type),
        common_in: ingredient.common_in.clone(),
        benefits: ingredient.benefits.clone(),
        warnings: ingredient.warnings.clone(),
        related_products,
    }))
}

//=========================================================================================
// Product Handlers
//=========================================================================================

/// List products, filtered and sorted, each with a suitability assessment.
#[utoipa::path(
    get,
    path = "/products",
    params(
        ProductListParams,
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses(
        (status = 200, description = "Matching products", body = [ProductSummary]),
        (status = 400, description = "Invalid filter value or price range"),
        (status = 401, description = "Unknown or expired session")
    )
)]
pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Query(params): Query<ProductListParams>,
) -> HandlerResult<Vec<ProductSummary>> {
    let profile = session.profile;
    let catalog = &state.catalog;
    let query = params.to_query(catalog, &profile).map_err(bad_request)?;

    let results = query.apply(catalog);
    debug!("Product listing matched {} of {}", results.len(), catalog.products().len());

    let summaries = results
        .into_iter()
        .map(|p| ProductSummary::new(catalog, p, &profile))
        .collect();
    Ok(Json(truncated(summaries, params.limit)))
}

/// Fetch one product with its resolved ingredients and safety breakdown.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id"),
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses(
        (status = 200, description = "The product", body = ProductDetail),
        (status = 404, description = "No such product")
    )
)]
pub async fn get_product_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Path(id): Path<String>,
) -> HandlerResult<ProductDetail> {
    let profile = session.profile;
    let catalog = &state.catalog;

    let product = catalog
        .product(&id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Product {} not found", id)))?;

    let ingredients = catalog.resolve_ingredients(product);
    let ingredient_summaries = ingredients
        .iter()
        .map(|i| IngredientSummary::new(i, profile.skin_type))
        .collect();

    Ok(Json(ProductDetail {
        product: ProductSummary::new(catalog, product, &profile),
        ingredients: ingredient_summaries,
        safety_breakdown: safety_breakdown(&ingredients).into(),
    }))
}

/// Distinct categories, brands and the price span of the catalog.
#[utoipa::path(
    get,
    path = "/catalog/facets",
    responses(
        (status = 200, description = "Catalog facets", body = FacetsResponse)
    )
)]
pub async fn facets_handler(State(state): State<Arc<AppState>>) -> Json<FacetsResponse> {
    let catalog = &state.catalog;
    let bounds = catalog.price_bounds();
    Json(FacetsResponse {
        categories: catalog.categories().into_iter().map(str::to_string).collect(),
        brands: catalog.brands().into_iter().map(str::to_string).collect(),
        min_price: bounds.map(|(lo, _)| lo),
        max_price: bounds.map(|(_, hi)| hi),
    })
}

//=========================================================================================
// Search
//=========================================================================================

/// Search ingredients and products at once.
///
/// A blank query returns no results. A non-blank query is recorded at the
/// front of the session's search history.
#[utoipa::path(
    get,
    path = "/search",
    params(
        SearchParams,
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses(
        (status = 200, description = "Search hits", body = SearchResponse),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Query(params): Query<SearchParams>,
) -> HandlerResult<SearchResponse> {
    let safety = params.safety_band().map_err(bad_request)?;
    let categories = params.category_list();
    let raw_query = params.q.clone().unwrap_or_default();

    let profile = state
        .update_profile(session.id, |p| p.record_search(&raw_query))
        .await?;

    let catalog = &state.catalog;
    let hits = query::search(catalog, &raw_query);

    let mut ingredients = hits.ingredients;
    let mut products = hits.products;
    if let Some(band) = safety {
        ingredients = filter_by_safety_band(ingredients, band);
    }
    if params.suitable_only.unwrap_or(false) {
        ingredients = filter_by_suitability(ingredients, &profile);
        products = filter_by_suitability(products, &profile);
    }
    products = filter_by_category(products, &categories);

    info!(
        "Search '{}' returned {} ingredients and {} products",
        raw_query.trim(),
        ingredients.len(),
        products.len()
    );

    Ok(Json(SearchResponse {
        query: raw_query.trim().to_string(),
        ingredients: ingredients
            .into_iter()
            .map(|i| IngredientSummary::new(i, profile.skin_type))
            .collect(),
        products: products
            .into_iter()
            .map(|p| ProductSummary::new(catalog, p, &profile))
            .collect(),
    }))
}
