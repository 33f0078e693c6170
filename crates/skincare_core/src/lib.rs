pub mod catalog;
pub mod domain;
pub mod ports;
pub mod profile;
pub mod query;
mod seed;
pub mod suitability;

pub use catalog::{Catalog, CatalogError, MissingReference};
pub use domain::{Ingredient, Product, Profile, SafetyLevel, SkinType, SkinTyped, UnknownSkinType};
pub use ports::{PortError, PortResult, ProfileEdit, ProfileRepository, ProfileSession};
pub use query::{
    IngredientQuery, IngredientSort, PriceRange, ProductQuery, ProductSort, QueryError, SafetyBand,
    SearchResults,
};
