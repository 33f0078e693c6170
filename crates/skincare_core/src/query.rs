//! crates/skincare_core/src/query.rs
//!
//! The Query Engine: pure search, filter and sort functions over catalog
//! records. Every function takes its input explicitly and returns a new
//! vector of borrowed records; none of them hold state.

use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::Catalog;
use crate::domain::{Ingredient, Product, Profile, SkinType, SkinTyped};

//=========================================================================================
// Errors
//=========================================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("Unknown {dimension} value: '{value}'")]
    UnknownFilterValue { dimension: &'static str, value: String },
    #[error("Invalid price range {min}..{max}")]
    InvalidPriceRange { min: f64, max: f64 },
}

//=========================================================================================
// Filter Criteria
//=========================================================================================

/// Inclusive safety-score bands used to filter ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyBand {
    High,
    Medium,
    Low,
}

impl SafetyBand {
    pub fn range(&self) -> RangeInclusive<u8> {
        match self {
            SafetyBand::High => 8..=10,
            SafetyBand::Medium => 5..=7,
            SafetyBand::Low => 1..=4,
        }
    }

    pub fn contains(&self, score: u8) -> bool {
        self.range().contains(&score)
    }
}

impl FromStr for SafetyBand {
    type Err = QueryError;

    /// Accepts both the listing names (`high`/`medium`/`low`) and the
    /// search-page names (`safe`/`moderate`/`caution`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "safe" => Ok(SafetyBand::High),
            "medium" | "moderate" => Ok(SafetyBand::Medium),
            "low" | "caution" => Ok(SafetyBand::Low),
            _ => Err(QueryError::UnknownFilterValue {
                dimension: "safety",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngredientSort {
    #[default]
    Name,
    SafetyDesc,
    SafetyAsc,
}

impl FromStr for IngredientSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(IngredientSort::Name),
            "safety-high" => Ok(IngredientSort::SafetyDesc),
            "safety-low" => Ok(IngredientSort::SafetyAsc),
            _ => Err(QueryError::UnknownFilterValue {
                dimension: "ingredient sort",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl FromStr for ProductSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(ProductSort::Name),
            "price-low" => Ok(ProductSort::PriceAsc),
            "price-high" => Ok(ProductSort::PriceDesc),
            "rating" => Ok(ProductSort::RatingDesc),
            _ => Err(QueryError::UnknownFilterValue {
                dimension: "product sort",
                value: s.to_string(),
            }),
        }
    }
}

/// An inclusive, non-negative price interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, QueryError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(QueryError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}..={:.2}", self.min, self.max)
    }
}

//=========================================================================================
// Text Search
//=========================================================================================

/// Lower-cased, trimmed query, or `None` when there is nothing to search for.
fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn ingredient_matches(ingredient: &Ingredient, needle: &str) -> bool {
    ingredient.name.to_lowercase().contains(needle)
        || ingredient.description.to_lowercase().contains(needle)
}

fn product_matches(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.brand.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Case-insensitive match on name or description. A blank query matches nothing.
pub fn search_ingredients<'a>(items: &'a [Ingredient], query: &str) -> Vec<&'a Ingredient> {
    match normalize_query(query) {
        Some(needle) => items.iter().filter(|i| ingredient_matches(i, &needle)).collect(),
        None => Vec::new(),
    }
}

/// Case-insensitive match on name, brand or description. A blank query matches nothing.
pub fn search_products<'a>(items: &'a [Product], query: &str) -> Vec<&'a Product> {
    match normalize_query(query) {
        Some(needle) => items.iter().filter(|p| product_matches(p, &needle)).collect(),
        None => Vec::new(),
    }
}

/// Combined ingredient and product hits for a single query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults<'a> {
    pub ingredients: Vec<&'a Ingredient>,
    pub products: Vec<&'a Product>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.products.is_empty()
    }
}

pub fn search<'a>(catalog: &'a Catalog, query: &str) -> SearchResults<'a> {
    SearchResults {
        ingredients: search_ingredients(catalog.ingredients(), query),
        products: search_products(catalog.products(), query),
    }
}

//=========================================================================================
// Filters
//=========================================================================================

/// Keeps items suitable for at least one of the selected skin types.
/// An empty selection leaves the items untouched.
pub fn filter_by_skin_types<'a, T: SkinTyped>(
    items: Vec<&'a T>,
    skin_types: &[SkinType],
) -> Vec<&'a T> {
    if skin_types.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| skin_types.iter().any(|s| item.suitable_for().contains(s)))
        .collect()
}

pub fn filter_by_safety_band(items: Vec<&Ingredient>, band: SafetyBand) -> Vec<&Ingredient> {
    items
        .into_iter()
        .filter(|i| band.contains(i.safety_score))
        .collect()
}

/// Keeps items listing the profile's current skin type as suitable.
pub fn filter_by_suitability<'a, T: SkinTyped>(items: Vec<&'a T>, profile: &Profile) -> Vec<&'a T> {
    filter_by_skin_types(items, &[profile.skin_type])
}

/// Exact category match against any of the selected categories.
pub fn filter_by_category<'a>(items: Vec<&'a Product>, categories: &[String]) -> Vec<&'a Product> {
    if categories.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|p| categories.iter().any(|c| *c == p.category))
        .collect()
}

/// Exact brand match against any of the selected brands.
pub fn filter_by_brand<'a>(items: Vec<&'a Product>, brands: &[String]) -> Vec<&'a Product> {
    if brands.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|p| brands.iter().any(|b| *b == p.brand))
        .collect()
}

pub fn filter_by_price_range(items: Vec<&Product>, range: PriceRange) -> Vec<&Product> {
    items.into_iter().filter(|p| range.contains(p.price)).collect()
}

//=========================================================================================
// Sorting
//=========================================================================================

/// Locale-style name ordering in three passes: base letters with accents and
/// case ignored, then accents, then case with lowercase first. The composed
/// form breaks any remaining tie, so canonically equal names compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a, false)
        .cmp(&collation_key(b, false))
        .then_with(|| collation_key(a, true).cmp(&collation_key(b, true)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.nfc().cmp(b.nfc()))
}

fn collation_key(name: &str, keep_accents: bool) -> String {
    name.nfd()
        .filter(|c| keep_accents || !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn case_pattern(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

/// Stable sort; equal keys keep their input order.
pub fn sort_ingredients(mut items: Vec<&Ingredient>, key: IngredientSort) -> Vec<&Ingredient> {
    match key {
        IngredientSort::Name => items.sort_by(|a, b| compare_names(&a.name, &b.name)),
        IngredientSort::SafetyDesc => items.sort_by(|a, b| b.safety_score.cmp(&a.safety_score)),
        IngredientSort::SafetyAsc => items.sort_by(|a, b| a.safety_score.cmp(&b.safety_score)),
    }
    items
}

/// Stable sort; equal keys keep their input order.
pub fn sort_products(mut items: Vec<&Product>, key: ProductSort) -> Vec<&Product> {
    match key {
        ProductSort::Name => items.sort_by(|a, b| compare_names(&a.name, &b.name)),
        ProductSort::PriceAsc => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        ProductSort::PriceDesc => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
        ProductSort::RatingDesc => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    items
}

//=========================================================================================
// Composed Queries
//=========================================================================================

/// Criteria for the ingredient listing. Inactive dimensions are `None` or empty.
///
/// Unlike [`search_ingredients`], a blank `text` here means "no text filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientQuery {
    pub text: Option<String>,
    pub skin_types: Vec<SkinType>,
    pub safety: Option<SafetyBand>,
    /// Set to the profile's skin type for "suitable for me only".
    pub suitable_for: Option<SkinType>,
    pub sort: IngredientSort,
}

impl IngredientQuery {
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Ingredient> {
        let mut items: Vec<&Ingredient> = catalog.ingredients().iter().collect();

        if let Some(needle) = self.text.as_deref().and_then(normalize_query) {
            items.retain(|i| ingredient_matches(i, &needle));
        }
        items = filter_by_skin_types(items, &self.skin_types);
        if let Some(band) = self.safety {
            items = filter_by_safety_band(items, band);
        }
        if let Some(skin) = self.suitable_for {
            items = filter_by_skin_types(items, &[skin]);
        }
        sort_ingredients(items, self.sort)
    }
}

/// Criteria for the product listing. Inactive dimensions are `None` or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub text: Option<String>,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub price: Option<PriceRange>,
    pub suitable_for: Option<SkinType>,
    pub sort: ProductSort,
}

impl ProductQuery {
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let mut items: Vec<&Product> = catalog.products().iter().collect();

        if let Some(needle) = self.text.as_deref().and_then(normalize_query) {
            items.retain(|p| product_matches(p, &needle));
        }
        items = filter_by_category(items, &self.categories);
        items = filter_by_brand(items, &self.brands);
        if let Some(range) = self.price {
            items = filter_by_price_range(items, range);
        }
        if let Some(skin) = self.suitable_for {
            items = filter_by_skin_types(items, &[skin]);
        }
        sort_products(items, self.sort)
    }
}
