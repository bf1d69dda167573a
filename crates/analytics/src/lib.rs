pub mod overview;

pub use overview::{catalog_overview, CatalogOverview};
