//! services/api/src/adapters/catalog_file.rs
//!
//! Loads a catalog from a JSON file. The file layout mirrors the browser
//! client's mock data (camelCase keys, skin types as lowercase strings); the
//! records are converted into core domain types and validated by
//! `Catalog::new`.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use skincare_core::domain::{Ingredient, Product, SkinType, UnknownSkinType};
use skincare_core::{Catalog, CatalogError};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogFileError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    SkinType(#[from] UnknownSkinType),
    #[error("catalog failed validation: {0}")]
    Invalid(#[from] CatalogError),
}

//=========================================================================================
// "Impure" Catalog Record Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRecord {
    ingredients: Vec<IngredientRecord>,
    products: Vec<ProductRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngredientRecord {
    id: String,
    name: String,
    description: String,
    safety_score: u8,
    #[serde(default)]
    suitable_for: Vec<String>,
    #[serde(default)]
    not_suitable_for: Vec<String>,
    #[serde(default)]
    common_in: Vec<String>,
    benefits_description: Option<String>,
    warnings_description: Option<String>,
}

impl IngredientRecord {
    fn to_domain(self) -> Result<Ingredient, CatalogFileError> {
        Ok(Ingredient {
            id: self.id,
            name: self.name,
            description: self.description,
            safety_score: self.safety_score,
            suitable_for: parse_skin_types(&self.suitable_for)?,
            not_suitable_for: parse_skin_types(&self.not_suitable_for)?,
            common_in: self.common_in,
            benefits: self.benefits_description,
            warnings: self.warnings_description,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: String,
    name: String,
    brand: String,
    category: String,
    description: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    ingredient_ids: Vec<String>,
    price: f64,
    rating: f64,
    #[serde(default)]
    review_count: u32,
    #[serde(default)]
    suitable_for: Vec<String>,
}

impl ProductRecord {
    fn to_domain(self) -> Result<Product, CatalogFileError> {
        Ok(Product {
            id: self.id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            ingredient_ids: self.ingredient_ids,
            price: self.price,
            rating: self.rating,
            review_count: self.review_count,
            suitable_for: parse_skin_types(&self.suitable_for)?,
        })
    }
}

fn parse_skin_types(values: &[String]) -> Result<BTreeSet<SkinType>, UnknownSkinType> {
    values.iter().map(|v| v.parse()).collect()
}

//=========================================================================================
// Loading
//=========================================================================================

/// Parses and validates a catalog from its JSON text.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogFileError> {
    let record: CatalogRecord = serde_json::from_str(json)?;
    let ingredients = record
        .ingredients
        .into_iter()
        .map(IngredientRecord::to_domain)
        .collect::<Result<Vec<_>, _>>()?;
    let products = record
        .products
        .into_iter()
        .map(ProductRecord::to_domain)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(ingredients, products)?)
}

/// Reads the catalog file at `path`.
pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogFileError> {
    let json = tokio::fs::read_to_string(path).await?;
    let catalog = parse_catalog(&json)?;
    info!(
        path = %path.display(),
        ingredients = catalog.ingredients().len(),
        products = catalog.products().len(),
        "Catalog loaded from file"
    );
    Ok(catalog)
}
