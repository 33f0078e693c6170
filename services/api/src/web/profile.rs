//! services/api/src/web/profile.rs
//!
//! Session lifecycle and profile endpoints. A session is created with the
//! guest profile and every later call identifies it with the `x-session-id`
//! header; the profile lives only as long as the session.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use skincare_core::suitability::recommend_products;
use skincare_core::{Profile, ProfileSession, SkinType};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::web::protocol::{
    CreateSessionResponse, LimitParams, ProductSummary, ProfileDto, SkinTypeRequest,
    UpdateProfileRequest, ValueRequest,
};
use crate::web::state::{port_error_response, AppState};

const DEFAULT_RECOMMENDATION_LIMIT: usize = 6;

type ProfileResult = Result<Json<ProfileDto>, (StatusCode, String)>;

fn profile_json(profile: &Profile) -> Json<ProfileDto> {
    Json(ProfileDto::from(profile))
}

//=========================================================================================
// Session Handlers
//=========================================================================================

/// POST /sessions - Start a session with the default guest profile
#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = state
        .profiles
        .create_session(Profile::guest())
        .await
        .map_err(|e| {
            error!("Failed to create session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create session".to_string(),
            )
        })?;

    info!("Started session {}", session.id);

    let response = CreateSessionResponse {
        session_id: session.id,
        profile: ProfileDto::from(&session.profile),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /sessions - End the current session and discard its profile
#[utoipa::path(
    delete,
    path = "/sessions",
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unknown or expired session")
    )
)]
pub async fn end_session_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .profiles
        .delete_session(session.id)
        .await
        .map_err(port_error_response)?;
    info!("Ended session {}", session.id);
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Profile Handlers
//=========================================================================================

/// GET /profile - The session's profile
#[utoipa::path(
    get,
    path = "/profile",
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses((status = 200, description = "Current profile", body = ProfileDto))
)]
pub async fn get_profile_handler(Extension(session): Extension<ProfileSession>) -> Json<ProfileDto> {
    profile_json(&session.profile)
}

/// PATCH /profile - Update name and/or email
#[utoipa::path(
    patch,
    path = "/profile",
    request_body = UpdateProfileRequest,
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Json(req): Json<UpdateProfileRequest>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, move |p| p.update_details(req.name, req.email))
        .await?;
    Ok(profile_json(&profile))
}

/// PUT /profile/skin-type - Change the active skin type
#[utoipa::path(
    put,
    path = "/profile/skin-type",
    request_body = SkinTypeRequest,
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 400, description = "Unknown skin type")
    )
)]
pub async fn set_skin_type_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Json(req): Json<SkinTypeRequest>,
) -> ProfileResult {
    let skin_type = req
        .skin_type
        .parse::<SkinType>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let profile = state
        .update_profile(session.id, |p| p.set_skin_type(skin_type))
        .await?;
    Ok(profile_json(&profile))
}

/// POST /profile/concerns - Add a skin concern
#[utoipa::path(
    post,
    path = "/profile/concerns",
    request_body = ValueRequest,
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn add_concern_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Json(req): Json<ValueRequest>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, |p| p.add_concern(&req.value))
        .await?;
    Ok(profile_json(&profile))
}

/// DELETE /profile/concerns/{concern} - Remove a skin concern
#[utoipa::path(
    delete,
    path = "/profile/concerns/{concern}",
    params(
        ("concern" = String, Path, description = "Concern to remove"),
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn remove_concern_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Path(concern): Path<String>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, |p| p.remove_concern(&concern))
        .await?;
    Ok(profile_json(&profile))
}

/// POST /profile/allergies - Add an allergy (stored lower-cased)
#[utoipa::path(
    post,
    path = "/profile/allergies",
    request_body = ValueRequest,
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn add_allergy_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Json(req): Json<ValueRequest>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, |p| p.add_allergy(&req.value))
        .await?;
    Ok(profile_json(&profile))
}

/// DELETE /profile/allergies/{allergy} - Remove an allergy
#[utoipa::path(
    delete,
    path = "/profile/allergies/{allergy}",
    params(
        ("allergy" = String, Path, description = "Allergy to remove"),
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn remove_allergy_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Path(allergy): Path<String>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, |p| p.remove_allergy(&allergy))
        .await?;
    Ok(profile_json(&profile))
}

//=========================================================================================
// Favorites
//=========================================================================================

/// GET /profile/favorites - Favorite products with their assessments
#[utoipa::path(
    get,
    path = "/profile/favorites",
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses((status = 200, description = "Favorite products", body = [ProductSummary]))
)]
pub async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
) -> Result<Json<Vec<ProductSummary>>, (StatusCode, String)> {
    let profile = session.profile;
    let catalog = &state.catalog;
    let favorites = catalog
        .favorite_products(&profile)
        .into_iter()
        .map(|p| ProductSummary::new(catalog, p, &profile))
        .collect();
    Ok(Json(favorites))
}

/// PUT /profile/favorites/{product_id} - Mark a product as favorite
#[utoipa::path(
    put,
    path = "/profile/favorites/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product id"),
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 404, description = "No such product")
    )
)]
pub async fn add_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Path(product_id): Path<String>,
) -> ProfileResult {
    if state.catalog.product(&product_id).is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("Product {} not found", product_id),
        ));
    }
    let profile = state
        .update_profile(session.id, |p| p.add_favorite(&product_id))
        .await?;
    Ok(profile_json(&profile))
}

/// DELETE /profile/favorites/{product_id} - Unmark a favorite product
#[utoipa::path(
    delete,
    path = "/profile/favorites/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product id"),
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn remove_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Path(product_id): Path<String>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, |p| p.remove_favorite(&product_id))
        .await?;
    Ok(profile_json(&profile))
}

//=========================================================================================
// Search History and Recommendations
//=========================================================================================

/// POST /profile/search-history - Record a search query
#[utoipa::path(
    post,
    path = "/profile/search-history",
    request_body = ValueRequest,
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn add_search_history_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Json(req): Json<ValueRequest>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, |p| p.record_search(&req.value))
        .await?;
    Ok(profile_json(&profile))
}

/// DELETE /profile/search-history - Forget all recorded searches
#[utoipa::path(
    delete,
    path = "/profile/search-history",
    params(("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")),
    responses((status = 200, description = "Updated profile", body = ProfileDto))
)]
pub async fn clear_search_history_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
) -> ProfileResult {
    let profile = state
        .update_profile(session.id, Profile::clear_search_history)
        .await?;
    Ok(profile_json(&profile))
}

/// GET /profile/recommendations - Best-rated products suitable for this profile
#[utoipa::path(
    get,
    path = "/profile/recommendations",
    params(
        LimitParams,
        ("x-session-id" = Uuid, Header, description = "Session id from POST /sessions.")
    ),
    responses((status = 200, description = "Recommended products", body = [ProductSummary]))
)]
pub async fn recommendations_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ProfileSession>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<ProductSummary>>, (StatusCode, String)> {
    let profile = session.profile;
    let catalog = &state.catalog;
    let limit = params.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    let products = recommend_products(catalog, &profile, limit)
        .into_iter()
        .map(|p| ProductSummary::new(catalog, p, &profile))
        .collect();
    Ok(Json(products))
}
