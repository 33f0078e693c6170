pub mod catalog_file;
pub mod profile_store;

pub use catalog_file::{load_catalog, parse_catalog, CatalogFileError};
pub use profile_store::InMemoryProfileStore;
