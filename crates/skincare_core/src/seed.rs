//! crates/skincare_core/src/seed.rs
//!
//! The built-in mock catalog and default guest profile.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::domain::{Ingredient, Product, Profile, SkinType};

use SkinType::{Combination, Dry, Normal, Oily, Sensitive};

impl Catalog {
    /// The sample catalog served when no catalog file is configured.
    pub fn sample() -> Self {
        Catalog::new(sample_ingredients(), sample_products())
            .expect("built-in sample catalog satisfies catalog invariants")
    }
}

impl Profile {
    /// The profile every new session starts with.
    pub fn guest() -> Self {
        Self {
            id: "user1".to_string(),
            name: "Guest User".to_string(),
            email: "guest@example.com".to_string(),
            skin_type: Normal,
            concerns: strings(&["hydration", "anti-aging"]),
            allergies: strings(&["fragrance"]),
            favorite_products: strings(&["prod1", "prod5"]),
            search_history: strings(&["hyaluronic acid", "vitamin c", "moisturizer"]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn skins(values: &[SkinType]) -> BTreeSet<SkinType> {
    values.iter().copied().collect()
}

#[allow(clippy::too_many_arguments)]
fn ingredient(
    id: &str,
    name: &str,
    description: &str,
    safety_score: u8,
    suitable_for: &[SkinType],
    not_suitable_for: &[SkinType],
    common_in: &[&str],
    benefits: &str,
    warnings: &str,
) -> Ingredient {
    Ingredient {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        safety_score,
        suitable_for: skins(suitable_for),
        not_suitable_for: skins(not_suitable_for),
        common_in: strings(common_in),
        benefits: Some(benefits.to_string()),
        warnings: Some(warnings.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    brand: &str,
    category: &str,
    description: &str,
    ingredient_ids: &[&str],
    price: f64,
    rating: f64,
    review_count: u32,
    suitable_for: &[SkinType],
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        image_url: "/placeholder.svg".to_string(),
        ingredient_ids: strings(ingredient_ids),
        price,
        rating,
        review_count,
        suitable_for: skins(suitable_for),
    }
}

fn sample_ingredients() -> Vec<Ingredient> {
    vec![
        ingredient(
            "ing1",
            "Hyaluronic Acid",
            "A powerful humectant that helps retain moisture in the skin.",
            9,
            &[Normal, Dry, Oily, Combination, Sensitive],
            &[],
            &["serums", "moisturizers", "masks"],
            "Provides deep hydration, helps plump the skin, and reduces the appearance of fine lines.",
            "Generally well-tolerated, but in very dry environments, it might draw moisture from the skin instead of the air.",
        ),
        ingredient(
            "ing2",
            "Salicylic Acid",
            "A beta hydroxy acid (BHA) that exfoliates the skin and clears pores.",
            7,
            &[Oily, Combination],
            &[Dry, Sensitive],
            &["cleansers", "toners", "spot treatments"],
            "Helps clear acne, reduces inflammation, and prevents future breakouts.",
            "Can cause dryness, irritation, and increased sun sensitivity. Use with sunscreen.",
        ),
        ingredient(
            "ing3",
            "Niacinamide",
            "A form of vitamin B3 that brightens skin and reduces inflammation.",
            9,
            &[Normal, Dry, Oily, Combination, Sensitive],
            &[],
            &["serums", "moisturizers", "toners"],
            "Regulates oil production, minimizes pores, and improves uneven skin tone.",
            "High concentrations may cause flushing in some individuals.",
        ),
        ingredient(
            "ing4",
            "Retinol",
            "A vitamin A derivative that promotes cell turnover and collagen production.",
            6,
            &[Normal, Oily, Combination],
            &[Sensitive, Dry],
            &["serums", "night creams", "anti-aging products"],
            "Reduces fine lines, improves skin texture, and helps with acne.",
            "Can cause irritation, dryness, and peeling. Increases sun sensitivity. Not safe during pregnancy.",
        ),
        ingredient(
            "ing5",
            "Vitamin C",
            "An antioxidant that brightens skin and protects against environmental damage.",
            8,
            &[Normal, Oily, Combination],
            &[Sensitive],
            &["serums", "moisturizers", "masks"],
            "Brightens dark spots, stimulates collagen production, and provides antioxidant protection.",
            "Can oxidize quickly. Some forms may cause irritation in sensitive skin.",
        ),
        ingredient(
            "ing6",
            "Fragrance (Parfum)",
            "A blend of chemicals that give products a distinct scent.",
            3,
            &[Normal],
            &[Sensitive, Dry, Combination, Oily],
            &["moisturizers", "cleansers", "masks"],
            "Provides a pleasant scent experience.",
            "Common allergen that can cause irritation, redness, and sensitization.",
        ),
        ingredient(
            "ing7",
            "Glycerin",
            "A humectant that attracts moisture to the skin.",
            10,
            &[Normal, Dry, Oily, Combination, Sensitive],
            &[],
            &["moisturizers", "cleansers", "serums"],
            "Hydrates, strengthens skin barrier, and improves skin texture.",
            "Generally well-tolerated by all skin types.",
        ),
        ingredient(
            "ing8",
            "Parabens",
            "Preservatives used to prevent bacterial growth in cosmetic products.",
            4,
            &[Normal],
            &[Sensitive, Dry, Combination, Oily],
            &["moisturizers", "makeup", "hair products"],
            "Extends product shelf life.",
            "Potential hormone disruption. May cause allergic reactions.",
        ),
        ingredient(
            "ing9",
            "Sodium Lauryl Sulfate",
            "A cleansing agent that creates foam and removes oil and dirt.",
            4,
            &[Oily],
            &[Sensitive, Dry, Combination, Normal],
            &["cleansers", "shampoos", "body washes"],
            "Creates rich lather and thoroughly cleanses.",
            "Can strip natural oils, causing dryness and irritation.",
        ),
        ingredient(
            "ing10",
            "Ceramides",
            "Lipids that help form the skin's barrier and retain moisture.",
            10,
            &[Normal, Dry, Oily, Combination, Sensitive],
            &[],
            &["moisturizers", "serums", "creams"],
            "Strengthens skin barrier, prevents moisture loss, and protects against environmental damage.",
            "Generally well-tolerated by all skin types.",
        ),
    ]
}

fn sample_products() -> Vec<Product> {
    vec![
        product(
            "prod1",
            "Hydration Boost Serum",
            "DermaCare",
            "Serum",
            "A lightweight serum that deeply hydrates and plumps the skin.",
            &["ing1", "ing3", "ing7", "ing10"],
            48.99,
            4.7,
            256,
            &[Normal, Dry, Combination, Sensitive],
        ),
        product(
            "prod2",
            "Clear Skin Cleanser",
            "AcneCare",
            "Cleanser",
            "A gentle foaming cleanser that removes impurities without stripping the skin.",
            &["ing2", "ing9", "ing7"],
            24.99,
            4.2,
            189,
            &[Oily, Combination],
        ),
        product(
            "prod3",
            "Advanced Repair Night Cream",
            "AgeLess",
            "Moisturizer",
            "A rich night cream that repairs and rejuvenates skin while you sleep.",
            &["ing4", "ing7", "ing10", "ing6"],
            56.99,
            4.9,
            310,
            &[Normal, Combination],
        ),
        product(
            "prod4",
            "Vitamin C Brightening Serum",
            "GlowUp",
            "Serum",
            "A potent vitamin C serum that brightens skin and reduces dark spots.",
            &["ing5", "ing3", "ing7"],
            42.99,
            4.6,
            275,
            &[Normal, Oily, Combination],
        ),
        product(
            "prod5",
            "Sensitive Skin Moisturizer",
            "GentelCare",
            "Moisturizer",
            "A fragrance-free moisturizer designed for sensitive skin.",
            &["ing1", "ing7", "ing10"],
            32.99,
            4.8,
            203,
            &[Sensitive, Dry, Normal],
        ),
        product(
            "prod6",
            "Oil Control Toner",
            "MattePerfect",
            "Toner",
            "A balancing toner that controls oil and minimizes pores.",
            &["ing2", "ing3", "ing9"],
            28.99,
            4.4,
            167,
            &[Oily, Combination],
        ),
        product(
            "prod7",
            "Rejuvenating Eye Cream",
            "AgeLess",
            "Eye Care",
            "A targeted eye cream that reduces fine lines and puffiness.",
            &["ing1", "ing5", "ing6", "ing8"],
            38.99,
            4.5,
            198,
            &[Normal, Dry],
        ),
        product(
            "prod8",
            "Daily Defense Sunscreen SPF 50",
            "SunShield",
            "Sun Protection",
            "A lightweight, broad-spectrum sunscreen that protects against UVA and UVB rays.",
            &["ing7", "ing6", "ing8"],
            26.99,
            4.3,
            231,
            &[Normal, Combination, Oily],
        ),
    ]
}
