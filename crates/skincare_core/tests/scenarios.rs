//! Behavioural scenarios against the sample catalog.

use skincare_core::query::{search, search_ingredients, search_products};
use skincare_core::suitability::{
    is_ingredient_suitable, is_product_suitable_for_skin, is_product_suitable_for_user, safety_level,
};
use skincare_core::{Catalog, Profile, SafetyLevel, SkinType};

#[test]
fn fragrance_is_caution_and_unsuitable_for_sensitive_skin() {
    let catalog = Catalog::sample();
    let fragrance = catalog
        .ingredients()
        .iter()
        .find(|i| i.name == "Fragrance (Parfum)")
        .unwrap();

    assert_eq!(fragrance.safety_score, 3);
    assert_eq!(safety_level(i32::from(fragrance.safety_score)), SafetyLevel::Caution);
    assert!(!is_ingredient_suitable(fragrance, SkinType::Sensitive));
    assert!(is_ingredient_suitable(fragrance, SkinType::Normal));
}

#[test]
fn fragrance_allergy_vetoes_eye_cream() {
    let catalog = Catalog::sample();
    let mut profile = Profile::guest();
    profile.allergies = vec!["fragrance".to_string()];
    profile.skin_type = SkinType::Dry;

    let eye_cream = catalog
        .products()
        .iter()
        .find(|p| p.name == "Rejuvenating Eye Cream")
        .unwrap();

    assert!(is_product_suitable_for_skin(eye_cream, profile.skin_type));
    assert!(!is_product_suitable_for_user(&catalog, eye_cream, &profile));

    profile.allergies.clear();
    assert!(is_product_suitable_for_user(&catalog, eye_cream, &profile));
}

#[test]
fn vitamin_c_query_finds_ingredient_and_serum() {
    let catalog = Catalog::sample();
    let results = search(&catalog, "vitamin c");

    assert!(results.ingredients.iter().any(|i| i.name == "Vitamin C"));
    assert!(results.products.iter().any(|p| p.name == "Vitamin C Brightening Serum"));
}

#[test]
fn whitespace_queries_match_nothing() {
    let catalog = Catalog::sample();
    for q in ["", "   ", "\t"] {
        assert!(search_ingredients(catalog.ingredients(), q).is_empty());
        assert!(search_products(catalog.products(), q).is_empty());
    }
}

#[test]
fn resolved_ingredients_are_a_subset_of_references() {
    let catalog = Catalog::sample();
    for product in catalog.products() {
        let resolved = catalog.product_ingredients(&product.id);
        assert!(resolved.len() <= product.ingredient_ids.len());
        for ingredient in resolved {
            assert!(product.ingredient_ids.contains(&ingredient.id));
        }
    }
}

#[test]
fn search_history_scenario() {
    let mut profile = Profile::guest();
    profile.clear_search_history();
    for q in ["a", "b", "a"] {
        profile.record_search(q);
    }
    assert_eq!(profile.search_history, vec!["a", "b"]);
}

#[test]
fn guest_favorites_resolve() {
    let catalog = Catalog::sample();
    let mut profile = Profile::guest();
    profile.add_favorite("does-not-exist");
    let names: Vec<_> = catalog
        .favorite_products(&profile)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Hydration Boost Serum", "Sensitive Skin Moisturizer"]);
}
