//! # Crave Catalog
//!
//! Static content behind a craving search: records for each animal product, their
//! plant-based alternatives and recipes, and the synonym groups used to reach them.
//!
//! ## Architecture
//!
//! ```text
//! catalog.json / catalog.toml
//!     │
//!     ├──> parse (JSON first, TOML fallback)
//!     │      └─ reject unknown fields, check schema_version
//!     │
//!     ├──> CatalogStore
//!     │      ├─ records in declared order
//!     │      ├─ key -> record
//!     │      └─ alternative id -> (record, alternative)
//!     │
//!     └──> SynonymIndex
//!            └─ alias groups, every target checked against the store
//! ```
//!
//! Everything is validated once at load time and never mutated afterwards, so a
//! [`Catalog`] can be shared freely between threads.

mod error;
mod favorites;
mod loader;
mod model;
mod store;
mod synonyms;

pub use error::{CatalogError, Result};
pub use favorites::FavoriteSet;
pub use loader::{Catalog, CATALOG_SCHEMA_VERSION};
pub use model::{AlternativeProduct, CatalogRecord, Nutrition, Recipe, Supplement};
pub use store::{CatalogStore, FavoriteItem};
pub use synonyms::{SynonymEntry, SynonymIndex};

/// Canonical form of user text and catalog keys: trimmed and lowercased.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
