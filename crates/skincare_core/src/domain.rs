//! crates/skincare_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One of the five skin categories used to match ingredients and products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkinType {
    Normal,
    Dry,
    Oily,
    Combination,
    Sensitive,
}

impl SkinType {
    pub const ALL: [SkinType; 5] = [
        SkinType::Normal,
        SkinType::Dry,
        SkinType::Oily,
        SkinType::Combination,
        SkinType::Sensitive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinType::Normal => "normal",
            SkinType::Dry => "dry",
            SkinType::Oily => "oily",
            SkinType::Combination => "combination",
            SkinType::Sensitive => "sensitive",
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known skin type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown skin type: '{0}'")]
pub struct UnknownSkinType(pub String);

impl FromStr for SkinType {
    type Err = UnknownSkinType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(SkinType::Normal),
            "dry" => Ok(SkinType::Dry),
            "oily" => Ok(SkinType::Oily),
            "combination" => Ok(SkinType::Combination),
            "sensitive" => Ok(SkinType::Sensitive),
            _ => Err(UnknownSkinType(s.to_string())),
        }
    }
}

/// A single cosmetic ingredient with its safety rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 1-10, higher is safer.
    pub safety_score: u8,
    pub suitable_for: BTreeSet<SkinType>,
    /// Checked independently of `suitable_for`; the two sets may overlap or leave gaps.
    pub not_suitable_for: BTreeSet<SkinType>,
    pub common_in: Vec<String>,
    pub benefits: Option<String>,
    pub warnings: Option<String>,
}

/// A product in the catalog. Ingredients are referenced by id, not owned.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    pub ingredient_ids: Vec<String>,
    pub price: f64,
    pub rating: f64,
    pub review_count: u32,
    pub suitable_for: BTreeSet<SkinType>,
}

/// The user's session profile. Mutators live in `profile.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skin_type: SkinType,
    pub concerns: Vec<String>,
    /// Lower-cased.
    pub allergies: Vec<String>,
    pub favorite_products: Vec<String>,
    /// Most recent first.
    pub search_history: Vec<String>,
}

/// Three-tier classification of a safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    Safe,
    Moderate,
    Caution,
}

impl SafetyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SafetyLevel::Safe => "Safe",
            SafetyLevel::Moderate => "Moderate",
            SafetyLevel::Caution => "Caution",
        }
    }

    /// Colour tier used by clients to badge the level.
    pub fn tier(&self) -> &'static str {
        match self {
            SafetyLevel::Safe => "green",
            SafetyLevel::Moderate => "yellow",
            SafetyLevel::Caution => "red",
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Anything carrying a set of skin types it is suitable for.
pub trait SkinTyped {
    fn suitable_for(&self) -> &BTreeSet<SkinType>;
}

impl SkinTyped for Ingredient {
    fn suitable_for(&self) -> &BTreeSet<SkinType> {
        &self.suitable_for
    }
}

impl SkinTyped for Product {
    fn suitable_for(&self) -> &BTreeSet<SkinType> {
        &self.suitable_for
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skin_type_parses_case_insensitively() {
        assert_eq!("Sensitive".parse::<SkinType>(), Ok(SkinType::Sensitive));
        assert_eq!(" oily ".parse::<SkinType>(), Ok(SkinType::Oily));
        assert!("greasy".parse::<SkinType>().is_err());
    }

    #[test]
    fn skin_type_display_matches_parse() {
        for skin in SkinType::ALL {
            assert_eq!(skin.to_string().parse::<SkinType>(), Ok(skin));
        }
    }
}
