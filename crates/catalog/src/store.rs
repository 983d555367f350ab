use std::collections::HashMap;

use serde::Serialize;

use crate::error::{CatalogError, Result};
use crate::favorites::FavoriteSet;
use crate::model::{AlternativeProduct, CatalogRecord};
use crate::normalize;

/// A favorited alternative together with the record it substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FavoriteItem<'a> {
    pub record_key: &'a str,
    pub record_name: &'a str,
    pub alternative: &'a AlternativeProduct,
}

/// Immutable record store keyed by canonical key.
///
/// Records keep their declared order; that order is the fallback scan order of
/// the resolver and the listing order of favorites.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<CatalogRecord>,
    by_key: HashMap<String, usize>,
    by_alternative: HashMap<u32, (usize, usize)>,
}

impl CatalogStore {
    pub fn new(records: Vec<CatalogRecord>) -> Result<Self> {
        let mut by_key = HashMap::with_capacity(records.len());
        let mut by_alternative = HashMap::new();

        for (rec_idx, record) in records.iter().enumerate() {
            if record.key.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "records[{rec_idx}].key must not be empty"
                )));
            }
            if normalize(&record.key) != record.key {
                return Err(CatalogError::Invalid(format!(
                    "records[{rec_idx}].key '{}' must be lowercase without surrounding whitespace",
                    record.key
                )));
            }
            if by_key.insert(record.key.clone(), rec_idx).is_some() {
                return Err(CatalogError::Invalid(format!(
                    "duplicate record key '{}'",
                    record.key
                )));
            }
            for (alt_idx, alt) in record.alternatives.iter().enumerate() {
                if by_alternative.insert(alt.id, (rec_idx, alt_idx)).is_some() {
                    return Err(CatalogError::Invalid(format!(
                        "duplicate alternative id {} (records[{rec_idx}].alternatives[{alt_idx}])",
                        alt.id
                    )));
                }
            }
        }

        Ok(Self {
            records,
            by_key,
            by_alternative,
        })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogRecord> {
        self.by_key.get(key).map(|idx| &self.records[*idx])
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Record keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.key.as_str())
    }

    #[must_use]
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn alternative(&self, id: u32) -> Option<(&CatalogRecord, &AlternativeProduct)> {
        let (rec_idx, alt_idx) = *self.by_alternative.get(&id)?;
        let record = &self.records[rec_idx];
        Some((record, &record.alternatives[alt_idx]))
    }

    /// Favorited alternatives in catalog order; ids the catalog does not know are skipped.
    #[must_use]
    pub fn favorite_items(&self, favorites: &FavoriteSet) -> Vec<FavoriteItem<'_>> {
        self.records
            .iter()
            .flat_map(|record| {
                record
                    .alternatives
                    .iter()
                    .filter(|alt| favorites.contains(alt.id))
                    .map(move |alt| FavoriteItem {
                        record_key: &record.key,
                        record_name: &record.display_name,
                        alternative: alt,
                    })
            })
            .collect()
    }
}
