//! Catalog store and seed loading.
//!
//! - [`store`]: [`CatalogStore`], the single owner of all rental items
//! - [`seed`]: built-in demo catalog and TOML seed files

pub mod seed;
pub mod store;

pub use seed::{available_item, SeedCatalog, SeedItem};
pub use store::CatalogStore;
