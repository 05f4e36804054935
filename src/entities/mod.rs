// Entity Models
//
// - Brand: a chain whose name maps straight to its own category
// - Category: the catalog of spending buckets fuzzy lookups land on

pub mod brand;
pub mod category;

pub use brand::{normalize_brand_text, Brand, BrandRegistry};
pub use category::CategoryCatalog;
