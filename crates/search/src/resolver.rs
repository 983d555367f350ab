use crave_catalog::{normalize, Catalog, CatalogRecord, CatalogStore, SynonymIndex};
use serde::Serialize;

/// Trims and lowercases raw user input. No stemming or tokenization.
#[must_use]
pub fn normalize_query(input: &str) -> String {
    normalize(input)
}

/// How a query reached its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchSource<'a> {
    Synonym { group: usize, alias: &'a str },
    DirectKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryMatch<'a> {
    pub key: &'a str,
    pub record: &'a CatalogRecord,
    pub source: MatchSource<'a>,
}

/// Outcome of resolving a query. `NoMatch` is an ordinary result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Match(QueryMatch<'a>),
    NoMatch,
}

impl<'a> Resolution<'a> {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match(_))
    }

    #[must_use]
    pub const fn key(&self) -> Option<&'a str> {
        match self {
            Self::Match(hit) => Some(hit.key),
            Self::NoMatch => None,
        }
    }

    #[must_use]
    pub const fn as_match(&self) -> Option<&QueryMatch<'a>> {
        match self {
            Self::Match(hit) => Some(hit),
            Self::NoMatch => None,
        }
    }
}

/// Maps free text to at most one catalog record.
///
/// Resolution order, first hit wins:
/// 1. synonym groups in declared order; a group hits when one of its aliases
///    contains the query or is contained in it, and yields its first existing target;
/// 2. record keys in declared order, with the same two-way containment test;
/// 3. no match.
///
/// There is no scoring. Overlaps such as "ham" inside "hamburger" are settled
/// purely by declaration order.
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'a> {
    store: &'a CatalogStore,
    synonyms: &'a SynonymIndex,
}

impl<'a> QueryResolver<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self::from_parts(catalog.store(), catalog.synonyms())
    }

    #[must_use]
    pub const fn from_parts(store: &'a CatalogStore, synonyms: &'a SynonymIndex) -> Self {
        Self { store, synonyms }
    }

    /// Empty input is not special-cased here: it is contained in every alias,
    /// so it resolves through the first synonym group.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Resolution<'a> {
        let query = normalize_query(input);

        if let Some(hit) = self.resolve_synonym(&query) {
            log::debug!("'{query}' resolved to '{}' via synonym group", hit.key);
            return Resolution::Match(hit);
        }
        if let Some(hit) = self.resolve_direct(&query) {
            log::debug!("'{query}' resolved to '{}' via record key", hit.key);
            return Resolution::Match(hit);
        }

        log::debug!("'{query}' did not match any record");
        Resolution::NoMatch
    }

    fn resolve_synonym(&self, query: &str) -> Option<QueryMatch<'a>> {
        let store = self.store;
        let synonyms = self.synonyms;
        synonyms
            .entries()
            .iter()
            .enumerate()
            .find_map(|(group, entry)| {
                let alias = entry
                    .aliases
                    .iter()
                    .find(|alias| overlaps(alias, query))?;
                let key = entry.first_existing_target(store)?;
                let record = store.get(key)?;
                Some(QueryMatch {
                    key: &record.key,
                    record,
                    source: MatchSource::Synonym {
                        group,
                        alias: alias.as_str(),
                    },
                })
            })
    }

    fn resolve_direct(&self, query: &str) -> Option<QueryMatch<'a>> {
        self.store
            .records()
            .iter()
            .find(|record| overlaps(&record.key, query))
            .map(|record| QueryMatch {
                key: &record.key,
                record,
                source: MatchSource::DirectKey,
            })
    }
}

fn overlaps(candidate: &str, query: &str) -> bool {
    candidate.contains(query) || query.contains(candidate)
}
