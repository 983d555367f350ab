use std::path::Path;

use crave_protocol::document::{each_object, parse_document, UnknownFields};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::model::{CatalogRecord, Supplement};
use crate::store::CatalogStore;
use crate::synonyms::{SynonymEntry, SynonymIndex};

pub const CATALOG_SCHEMA_VERSION: u32 = 1;

const BUILTIN_CATALOG: &str = include_str!("../../../data/catalog.json");

const ROOT_FIELDS: &[&str] = &[
    "schema_version",
    "records",
    "synonyms",
    "quick_searches",
    "supplements",
];
const RECORD_FIELDS: &[&str] = &[
    "key",
    "display_name",
    "deficiency_summary",
    "deficiency_explanation",
    "side_effects",
    "alternatives",
    "recipes",
];
const ALTERNATIVE_FIELDS: &[&str] = &[
    "id",
    "name",
    "brand",
    "type",
    "nutrition",
    "benefits",
    "availability",
];
const NUTRITION_FIELDS: &[&str] = &["protein", "iron", "calories", "fat", "fiber", "b12"];
const RECIPE_FIELDS: &[&str] = &[
    "id",
    "title",
    "time",
    "difficulty",
    "ingredients",
    "instructions",
];
const SYNONYM_FIELDS: &[&str] = &["aliases", "targets"];
const SUPPLEMENT_FIELDS: &[&str] = &["nutrient", "supplement", "dosage", "source"];

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    schema_version: Option<u32>,
    records: Vec<CatalogRecord>,
    #[serde(default)]
    synonyms: Vec<SynonymEntry>,
    #[serde(default)]
    quick_searches: Vec<String>,
    #[serde(default)]
    supplements: Vec<Supplement>,
}

/// Validated, immutable catalog: records, synonym groups and the extras shown
/// around a search result.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: CatalogStore,
    synonyms: SynonymIndex,
    quick_searches: Vec<String>,
    supplements: Vec<Supplement>,
}

impl Catalog {
    /// Catalog bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_bytes(BUILTIN_CATALOG.as_bytes())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_bytes(&bytes)?;
        log::debug!(
            "Loaded catalog from {} ({} records, {} synonym groups)",
            path.display(),
            catalog.store.len(),
            catalog.synonyms.len()
        );
        Ok(catalog)
    }

    /// Parses a JSON or TOML catalog document and validates it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        Self::from_raw(raw)
    }

    #[must_use]
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    #[must_use]
    pub const fn synonyms(&self) -> &SynonymIndex {
        &self.synonyms
    }

    #[must_use]
    pub fn quick_searches(&self) -> &[String] {
        &self.quick_searches
    }

    #[must_use]
    pub fn supplements(&self) -> &[Supplement] {
        &self.supplements
    }

    fn from_raw(raw: RawCatalog) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != CATALOG_SCHEMA_VERSION {
                return Err(CatalogError::UnsupportedSchema(schema_version));
            }
        }

        let store = CatalogStore::new(raw.records)?;
        let synonyms = SynonymIndex::new(raw.synonyms, &store)?;

        for (idx, term) in raw.quick_searches.iter().enumerate() {
            if term.trim().is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "quick_searches[{idx}] must not be empty"
                )));
            }
        }

        Ok(Self {
            store,
            synonyms,
            quick_searches: raw.quick_searches,
            supplements: raw.supplements,
        })
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawCatalog> {
    let value = parse_document(bytes, "catalog config")
        .map_err(|err| CatalogError::Parse(err.to_string()))?;
    validate_catalog_value(&value)?;
    serde_json::from_value(value).map_err(|err| CatalogError::Parse(err.to_string()))
}

fn validate_catalog_value(value: &Value) -> Result<()> {
    let Some(root) = value.as_object() else {
        return Ok(());
    };

    let mut unknown = UnknownFields::new();
    unknown.check(root, "", ROOT_FIELDS);

    for (rec_idx, record) in each_object(root, "records") {
        let base = format!("records[{rec_idx}]");
        unknown.check(record, &base, RECORD_FIELDS);

        for (alt_idx, alt) in each_object(record, "alternatives") {
            let alt_base = format!("{base}.alternatives[{alt_idx}]");
            unknown.check(alt, &alt_base, ALTERNATIVE_FIELDS);
            unknown.check_nested(alt, &alt_base, "nutrition", NUTRITION_FIELDS);
        }
        for (recipe_idx, recipe) in each_object(record, "recipes") {
            unknown.check(recipe, &format!("{base}.recipes[{recipe_idx}]"), RECIPE_FIELDS);
        }
    }

    unknown.check_list(root, "synonyms", SYNONYM_FIELDS);
    unknown.check_list(root, "supplements", SUPPLEMENT_FIELDS);

    unknown.into_result().map_err(CatalogError::UnknownFields)
}
