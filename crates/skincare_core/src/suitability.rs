//! crates/skincare_core/src/suitability.rs
//!
//! The Suitability Evaluator. Decides whether an ingredient or product fits a
//! skin type or a whole profile, and classifies safety scores. The profile is
//! always passed in explicitly.

use crate::catalog::Catalog;
use crate::domain::{Ingredient, Product, Profile, SafetyLevel, SkinType};
use crate::query::{sort_products, ProductSort};

/// True iff the skin type is listed as suitable AND not listed as unsuitable.
/// The two sets are not assumed to partition the skin types.
pub fn is_ingredient_suitable(ingredient: &Ingredient, skin_type: SkinType) -> bool {
    ingredient.suitable_for.contains(&skin_type) && !ingredient.not_suitable_for.contains(&skin_type)
}

pub fn is_product_suitable_for_skin(product: &Product, skin_type: SkinType) -> bool {
    product.suitable_for.contains(&skin_type)
}

/// Skin-type check first; only products that pass it get the allergy scan.
pub fn is_product_suitable_for_user(catalog: &Catalog, product: &Product, profile: &Profile) -> bool {
    if !is_product_suitable_for_skin(product, profile.skin_type) {
        return false;
    }
    !catalog
        .resolve_ingredients(product)
        .into_iter()
        .any(|ingredient| matches_any_allergy(ingredient, &profile.allergies))
}

/// The product's ingredients that match one of the profile's allergies.
pub fn allergens_in<'a>(catalog: &'a Catalog, product: &Product, profile: &Profile) -> Vec<&'a Ingredient> {
    catalog
        .resolve_ingredients(product)
        .into_iter()
        .filter(|ingredient| matches_any_allergy(ingredient, &profile.allergies))
        .collect()
}

/// Total over `i32`; scores outside 1-10 fall into the nearest band.
pub fn safety_level(score: i32) -> SafetyLevel {
    if score >= 8 {
        SafetyLevel::Safe
    } else if score >= 5 {
        SafetyLevel::Moderate
    } else {
        SafetyLevel::Caution
    }
}

//=========================================================================================
// Allergy Matching
//=========================================================================================

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// An allergy matches when its words appear as a contiguous run of whole words
/// in the ingredient name, so "fragrance" hits "Fragrance (Parfum)".
pub fn allergy_matches(ingredient_name: &str, allergy: &str) -> bool {
    let needle = words(allergy);
    if needle.is_empty() {
        return false;
    }
    let haystack = words(ingredient_name);
    haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}

fn matches_any_allergy(ingredient: &Ingredient, allergies: &[String]) -> bool {
    allergies
        .iter()
        .any(|allergy| allergy_matches(&ingredient.name, allergy))
}

//=========================================================================================
// Annotations
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAssessment {
    pub safety: SafetyLevel,
    pub suitable: bool,
}

pub fn assess_ingredient(ingredient: &Ingredient, skin_type: SkinType) -> IngredientAssessment {
    IngredientAssessment {
        safety: safety_level(i32::from(ingredient.safety_score)),
        suitable: is_ingredient_suitable(ingredient, skin_type),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductAssessment<'a> {
    pub suitable_for_skin: bool,
    pub suitable_for_user: bool,
    pub allergens: Vec<&'a Ingredient>,
}

/// Full annotation for one product. Allergens are reported even when the
/// skin check already fails, so clients can show both reasons.
pub fn assess_product<'a>(catalog: &'a Catalog, product: &Product, profile: &Profile) -> ProductAssessment<'a> {
    let suitable_for_skin = is_product_suitable_for_skin(product, profile.skin_type);
    let allergens = allergens_in(catalog, product, profile);
    ProductAssessment {
        suitable_for_skin,
        suitable_for_user: suitable_for_skin && allergens.is_empty(),
        allergens,
    }
}

/// A product's ingredients grouped by safety level, each group in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafetyBreakdown<'a> {
    pub safe: Vec<&'a Ingredient>,
    pub moderate: Vec<&'a Ingredient>,
    pub caution: Vec<&'a Ingredient>,
}

pub fn safety_breakdown<'a>(ingredients: &[&'a Ingredient]) -> SafetyBreakdown<'a> {
    let mut breakdown = SafetyBreakdown::default();
    for &ingredient in ingredients {
        match safety_level(i32::from(ingredient.safety_score)) {
            SafetyLevel::Safe => breakdown.safe.push(ingredient),
            SafetyLevel::Moderate => breakdown.moderate.push(ingredient),
            SafetyLevel::Caution => breakdown.caution.push(ingredient),
        }
    }
    breakdown
}

/// Products suitable for the user, best rated first.
pub fn recommend_products<'a>(catalog: &'a Catalog, profile: &Profile, limit: usize) -> Vec<&'a Product> {
    let suitable = catalog
        .products()
        .iter()
        .filter(|p| is_product_suitable_for_user(catalog, p, profile))
        .collect();
    let mut ranked = sort_products(suitable, ProductSort::RatingDesc);
    ranked.truncate(limit);
    ranked
}
