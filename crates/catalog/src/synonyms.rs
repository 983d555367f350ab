use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::normalize;
use crate::store::CatalogStore;

/// Alias group widening a lookup beyond exact record keys.
///
/// Any alias in `aliases` selects the first entry of `targets` that exists in the
/// store. Both lists keep their declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub aliases: Vec<String>,
    pub targets: Vec<String>,
}

impl SynonymEntry {
    /// First declared target that names a record in `store`.
    #[must_use]
    pub fn first_existing_target<'a>(&'a self, store: &CatalogStore) -> Option<&'a str> {
        self.targets
            .iter()
            .map(String::as_str)
            .find(|target| store.contains(target))
    }
}

/// Synonym groups in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymIndex {
    entries: Vec<SynonymEntry>,
}

impl SynonymIndex {
    /// Builds the index and checks every group against `store`.
    pub fn new(entries: Vec<SynonymEntry>, store: &CatalogStore) -> Result<Self> {
        for (idx, entry) in entries.iter().enumerate() {
            validate_entry(idx, entry, store)?;
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, group: usize) -> Option<&SynonymEntry> {
        self.entries.get(group)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `(alias, group index)` pair, groups in order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().enumerate().flat_map(|(group, entry)| {
            entry.aliases.iter().map(move |alias| (alias.as_str(), group))
        })
    }
}

fn validate_entry(idx: usize, entry: &SynonymEntry, store: &CatalogStore) -> Result<()> {
    if entry.aliases.is_empty() {
        return Err(CatalogError::Invalid(format!(
            "synonyms[{idx}].aliases must not be empty"
        )));
    }
    if entry.targets.is_empty() {
        return Err(CatalogError::Invalid(format!(
            "synonyms[{idx}].targets must not be empty"
        )));
    }
    for alias in &entry.aliases {
        if alias.is_empty() {
            return Err(CatalogError::Invalid(format!(
                "synonyms[{idx}] contains an empty alias"
            )));
        }
        if normalize(alias) != *alias {
            return Err(CatalogError::Invalid(format!(
                "synonyms[{idx}] alias '{alias}' must be lowercase without surrounding whitespace"
            )));
        }
    }
    for target in &entry.targets {
        if !store.contains(target) {
            return Err(CatalogError::Invalid(format!(
                "synonyms[{idx}] targets unknown record '{target}'"
            )));
        }
    }
    Ok(())
}
