//! services/api/src/web/protocol.rs
//!
//! Defines the JSON wire types exchanged between the browser client and the
//! API server, plus the query-string parameter structs and their conversion
//! into core filter criteria.

use serde::{Deserialize, Serialize};
use skincare_core::domain::{Ingredient, Product, Profile, SkinType};
use skincare_core::query::{
    IngredientQuery, IngredientSort, PriceRange, ProductQuery, ProductSort, SafetyBand,
};
use skincare_core::suitability::{assess_ingredient, assess_product, SafetyBreakdown};
use skincare_core::Catalog;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

//=========================================================================================
// Query-String Helpers
//=========================================================================================
// Filter values arrive as strings. Absent, blank or "all" means the dimension
// is inactive; anything else must parse into the closed core enums.
//=========================================================================================

/// An error in a request's query string or body, reported as 400.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BadRequest(pub String);

impl BadRequest {
    fn from_err(e: impl std::fmt::Display) -> Self {
        BadRequest(e.to_string())
    }
}

fn active(raw: &Option<String>) -> Option<&str> {
    raw.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn list(raw: &Option<String>) -> Vec<String> {
    active(raw)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_skin_types(raw: &Option<String>) -> Result<Vec<SkinType>, BadRequest> {
    list(raw)
        .iter()
        .map(|s| s.parse::<SkinType>().map_err(BadRequest::from_err))
        .collect()
}

fn parse_safety(raw: &Option<String>) -> Result<Option<SafetyBand>, BadRequest> {
    active(raw)
        .map(|v| v.parse::<SafetyBand>().map_err(BadRequest::from_err))
        .transpose()
}

/// Parameters of `GET /ingredients`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientListParams {
    /// Free-text filter on name and description.
    pub q: Option<String>,
    /// Comma-separated skin types; an ingredient matches if suitable for any.
    pub skin_types: Option<String>,
    /// `high`, `medium`, `low` (or `safe`, `moderate`, `caution`).
    pub safety: Option<String>,
    /// Only ingredients listed as suitable for the session's skin type.
    pub suitable_only: Option<bool>,
    /// `name`, `safety-high` or `safety-low`.
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

impl IngredientListParams {
    pub fn to_query(&self, profile: &Profile) -> Result<IngredientQuery, BadRequest> {
        Ok(IngredientQuery {
            text: self.q.clone(),
            skin_types: parse_skin_types(&self.skin_types)?,
            safety: parse_safety(&self.safety)?,
            suitable_for: self.suitable_only.unwrap_or(false).then_some(profile.skin_type),
            sort: active(&self.sort)
                .map(str::parse::<IngredientSort>)
                .transpose()
                .map_err(BadRequest::from_err)?
                .unwrap_or_default(),
        })
    }
}

/// Parameters of `GET /products`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// Free-text filter on name, brand and description.
    pub q: Option<String>,
    /// Comma-separated categories (exact match).
    pub categories: Option<String>,
    /// Comma-separated brands (exact match).
    pub brands: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Only products listed as suitable for the session's skin type.
    pub suitable_only: Option<bool>,
    /// `name`, `price-low`, `price-high` or `rating`.
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

impl ProductListParams {
    pub fn to_query(&self, catalog: &Catalog, profile: &Profile) -> Result<ProductQuery, BadRequest> {
        let price = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => {
                // A missing upper bound falls back to the catalog's highest price.
                let highest = catalog.price_bounds().map(|(_, hi)| hi).unwrap_or(0.0);
                let min = min.unwrap_or(0.0);
                let max = max.unwrap_or(highest.max(min));
                Some(PriceRange::new(min, max).map_err(BadRequest::from_err)?)
            }
        };
        Ok(ProductQuery {
            text: self.q.clone(),
            categories: list(&self.categories),
            brands: list(&self.brands),
            price,
            suitable_for: self.suitable_only.unwrap_or(false).then_some(profile.skin_type),
            sort: active(&self.sort)
                .map(str::parse::<ProductSort>)
                .transpose()
                .map_err(BadRequest::from_err)?
                .unwrap_or_default(),
        })
    }
}

/// Parameters of `GET /search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    pub q: Option<String>,
    /// Safety band applied to the ingredient hits.
    pub safety: Option<String>,
    /// Restrict both hit lists to the session's skin type.
    pub suitable_only: Option<bool>,
    /// Comma-separated categories applied to the product hits.
    pub categories: Option<String>,
}

impl SearchParams {
    pub fn safety_band(&self) -> Result<Option<SafetyBand>, BadRequest> {
        parse_safety(&self.safety)
    }

    pub fn category_list(&self) -> Vec<String> {
        list(&self.categories)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

//=========================================================================================
// Catalog Responses
//=========================================================================================

fn skin_names(set: &std::collections::BTreeSet<SkinType>) -> Vec<String> {
    set.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SafetyRating {
    pub score: u8,
    /// "Safe", "Moderate" or "Caution".
    pub level: String,
    /// Colour tier: "green", "yellow" or "red".
    pub tier: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub safety: SafetyRating,
    pub suitable_for: Vec<String>,
    pub not_suitable_for: Vec<String>,
    /// Suitability for the session profile's skin type.
    pub suitable_for_me: bool,
}

impl IngredientSummary {
    pub fn new(ingredient: &Ingredient, skin_type: SkinType) -> Self {
        let assessment = assess_ingredient(ingredient, skin_type);
        Self {
            id: ingredient.id.clone(),
            name: ingredient.name.clone(),
            description: ingredient.description.clone(),
            safety: SafetyRating {
                score: ingredient.safety_score,
                level: assessment.safety.label().to_string(),
                tier: assessment.safety.tier().to_string(),
            },
            suitable_for: skin_names(&ingredient.suitable_for),
            not_suitable_for: skin_names(&ingredient.not_suitable_for),
            suitable_for_me: assessment.suitable,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientDetail {
    pub ingredient: IngredientSummary,
    pub common_in: Vec<String>,
    pub benefits: Option<String>,
    pub warnings: Option<String>,
    /// Products containing this ingredient.
    pub related_products: Vec<ProductSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductAssessmentDto {
    pub suitable_for_skin: bool,
    pub suitable_for_user: bool,
    /// Names of ingredients matching one of the profile's allergies.
    pub allergens: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub review_count: u32,
    pub suitable_for: Vec<String>,
    pub assessment: ProductAssessmentDto,
    pub is_favorite: bool,
}

impl ProductSummary {
    pub fn new(catalog: &Catalog, product: &Product, profile: &Profile) -> Self {
        let assessment = assess_product(catalog, product, profile);
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            price: product.price,
            rating: product.rating,
            review_count: product.review_count,
            suitable_for: skin_names(&product.suitable_for),
            assessment: ProductAssessmentDto {
                suitable_for_skin: assessment.suitable_for_skin,
                suitable_for_user: assessment.suitable_for_user,
                allergens: assessment.allergens.iter().map(|i| i.name.clone()).collect(),
            },
            is_favorite: profile.is_favorite(&product.id),
        }
    }
}

/// Ingredient ids grouped by safety level.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SafetyBreakdownDto {
    pub safe: Vec<String>,
    pub moderate: Vec<String>,
    pub caution: Vec<String>,
}

impl From<SafetyBreakdown<'_>> for SafetyBreakdownDto {
    fn from(breakdown: SafetyBreakdown<'_>) -> Self {
        let ids = |v: Vec<&Ingredient>| v.into_iter().map(|i| i.id.clone()).collect();
        Self {
            safe: ids(breakdown.safe),
            moderate: ids(breakdown.moderate),
            caution: ids(breakdown.caution),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub product: ProductSummary,
    /// Resolved ingredients in label order; unknown references are omitted.
    pub ingredients: Vec<IngredientSummary>,
    pub safety_breakdown: SafetyBreakdownDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub ingredients: Vec<IngredientSummary>,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FacetsResponse {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

//=========================================================================================
// Profile Payloads
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skin_type: String,
    pub concerns: Vec<String>,
    pub allergies: Vec<String>,
    pub favorite_products: Vec<String>,
    pub search_history: Vec<String>,
}

impl From<&Profile> for ProfileDto {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            skin_type: profile.skin_type.to_string(),
            concerns: profile.concerns.clone(),
            allergies: profile.allergies.clone(),
            favorite_products: profile.favorite_products.clone(),
            search_history: profile.search_history.clone(),
        }
    }
}

/// The response payload sent after successfully creating a session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub profile: ProfileDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SkinTypeRequest {
    /// One of `normal`, `dry`, `oily`, `combination`, `sensitive`.
    pub skin_type: String,
}

/// A single free-text value: a concern, an allergy or a search query.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValueRequest {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_blank_mean_inactive() {
        assert_eq!(active(&Some("all".to_string())), None);
        assert_eq!(active(&Some("  ".to_string())), None);
        assert_eq!(active(&None), None);
        assert_eq!(active(&Some(" high ".to_string())), Some("high"));
        assert_eq!(list(&Some("Serum, Toner,,".to_string())), vec!["Serum", "Toner"]);
    }

    #[test]
    fn ingredient_params_convert_to_query() {
        let profile = Profile::guest();
        let params = IngredientListParams {
            skin_types: Some("dry,oily".to_string()),
            safety: Some("safe".to_string()),
            suitable_only: Some(true),
            sort: Some("safety-low".to_string()),
            ..Default::default()
        };
        let query = params.to_query(&profile).unwrap();
        assert_eq!(query.skin_types, vec![SkinType::Dry, SkinType::Oily]);
        assert_eq!(query.safety, Some(SafetyBand::High));
        assert_eq!(query.suitable_for, Some(SkinType::Normal));

        let bad = IngredientListParams {
            sort: Some("alphabetical".to_string()),
            ..Default::default()
        };
        assert!(bad.to_query(&profile).is_err());
    }

    #[test]
    fn product_params_fill_missing_price_bound() {
        let catalog = Catalog::sample();
        let profile = Profile::guest();
        let params = ProductListParams {
            min_price: Some(40.0),
            ..Default::default()
        };
        let query = params.to_query(&catalog, &profile).unwrap();
        let range = query.price.unwrap();
        assert_eq!(range.min(), 40.0);
        assert_eq!(range.max(), 56.99);

        let inverted = ProductListParams {
            min_price: Some(50.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        assert!(inverted.to_query(&catalog, &profile).is_err());
    }
}
