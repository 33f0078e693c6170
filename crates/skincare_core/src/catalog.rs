//! crates/skincare_core/src/catalog.rs
//!
//! The read-only Catalog Store. Ingredients and products are validated and
//! indexed once at construction and never mutated afterwards, so a `Catalog`
//! can be shared across threads behind an `Arc` without locking.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{Ingredient, Product, Profile};

//=========================================================================================
// Errors
//=========================================================================================

/// Reasons a catalog is rejected at load time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate ingredient id: {0}")]
    DuplicateIngredient(String),
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),
    #[error("Ingredient {id} has safety score {score}, expected 1-10")]
    SafetyScoreOutOfRange { id: String, score: u8 },
    #[error("Product {id} has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
    #[error("Product {id} has rating {rating}, expected 0-5")]
    RatingOutOfRange { id: String, rating: f64 },
}

/// An ingredient id referenced by a product that does not exist in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Product {product_id} references missing ingredient {ingredient_id}")]
pub struct MissingReference {
    pub product_id: String,
    pub ingredient_id: String,
}

//=========================================================================================
// The Catalog
//=========================================================================================

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    products: Vec<Product>,
    ingredient_index: HashMap<String, usize>,
    product_index: HashMap<String, usize>,
}

impl Catalog {
    /// Validates and indexes the given records.
    ///
    /// Dangling ingredient references inside products are tolerated: they are
    /// logged here and dropped whenever the product is resolved.
    pub fn new(ingredients: Vec<Ingredient>, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ingredient_index = HashMap::with_capacity(ingredients.len());
        for (idx, ingredient) in ingredients.iter().enumerate() {
            if !(1..=10).contains(&ingredient.safety_score) {
                return Err(CatalogError::SafetyScoreOutOfRange {
                    id: ingredient.id.clone(),
                    score: ingredient.safety_score,
                });
            }
            if ingredient_index.insert(ingredient.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateIngredient(ingredient.id.clone()));
            }
        }

        let mut product_index = HashMap::with_capacity(products.len());
        for (idx, product) in products.iter().enumerate() {
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: product.id.clone(),
                    price: product.price,
                });
            }
            if !product.rating.is_finite() || !(0.0..=5.0).contains(&product.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: product.id.clone(),
                    rating: product.rating,
                });
            }
            if product_index.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            for ingredient_id in &product.ingredient_ids {
                if !ingredient_index.contains_key(ingredient_id) {
                    warn!(
                        product_id = %product.id,
                        ingredient_id = %ingredient_id,
                        "Product references an unknown ingredient; it will be skipped"
                    );
                }
            }
        }

        Ok(Self {
            ingredients,
            products,
            ingredient_index,
            product_index,
        })
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredient_index.get(id).map(|&idx| &self.ingredients[idx])
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.product_index.get(id).map(|&idx| &self.products[idx])
    }

    /// Resolves a product's ingredients in `ingredient_ids` order.
    /// Unknown products yield an empty list; unknown ingredient ids are dropped.
    pub fn product_ingredients(&self, product_id: &str) -> Vec<&Ingredient> {
        self.product(product_id)
            .map(|product| self.resolve_ingredients(product))
            .unwrap_or_default()
    }

    pub fn resolve_ingredients(&self, product: &Product) -> Vec<&Ingredient> {
        product
            .ingredient_ids
            .iter()
            .filter_map(|id| self.ingredient(id))
            .collect()
    }

    /// Like [`Catalog::resolve_ingredients`], but reports every dangling id instead of dropping it.
    pub fn resolve_ingredients_strict(
        &self,
        product: &Product,
    ) -> Result<Vec<&Ingredient>, Vec<MissingReference>> {
        let mut resolved = Vec::with_capacity(product.ingredient_ids.len());
        let mut missing = Vec::new();
        for id in &product.ingredient_ids {
            match self.ingredient(id) {
                Some(ingredient) => resolved.push(ingredient),
                None => missing.push(MissingReference {
                    product_id: product.id.clone(),
                    ingredient_id: id.clone(),
                }),
            }
        }
        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(missing)
        }
    }

    /// Products whose ingredient list contains the given ingredient.
    pub fn products_containing(&self, ingredient_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.ingredient_ids.iter().any(|id| id == ingredient_id))
            .collect()
    }

    /// The profile's favourite products, in favourite order. Unknown ids are skipped.
    pub fn favorite_products(&self, profile: &Profile) -> Vec<&Product> {
        profile
            .favorite_products
            .iter()
            .filter_map(|id| self.product(id))
            .collect()
    }

    /// Distinct product categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct brands in first-seen order.
    pub fn brands(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.brand.as_str()))
    }

    /// Lowest and highest product price, or `None` for an empty catalog.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.products.iter().fold(None, |acc, p| match acc {
            None => Some((p.price, p.price)),
            Some((lo, hi)) => Some((lo.min(p.price), hi.max(p.price))),
        })
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
