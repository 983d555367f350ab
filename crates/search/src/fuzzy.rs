use std::collections::HashMap;

use crave_catalog::Catalog;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};
use serde::Serialize;

/// A "did you mean" candidate for a query that may be misspelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Canonical record key the suggestion leads to.
    pub key: String,
    /// Record key or alias text that scored best.
    pub matched: String,
    /// Score normalized to 0-1 against the best candidate.
    pub score: f32,
}

/// Fuzzy suggestions over record keys and synonym aliases using nucleo-matcher.
///
/// Advisory only: it never changes what the resolver returns.
pub struct Suggester {
    matcher: Matcher,
}

impl Suggester {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Returns up to `limit` suggestions, one per canonical key, best first.
    /// Ties keep catalog order.
    pub fn suggest(&mut self, query: &str, catalog: &Catalog, limit: usize) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        // Cravings are plain text: `!`, `^`, `$` and `'` are matched literally.
        let pattern = Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let store = catalog.store();

        let keys = store.keys().map(|key| (key, key));
        let aliases = catalog.synonyms().aliases().filter_map(|(alias, group)| {
            let target = catalog
                .synonyms()
                .get(group)?
                .first_existing_target(store)?;
            Some((alias, target))
        });

        // key -> (score, matched text)
        let mut best: HashMap<&str, (u32, &str)> = HashMap::new();
        for (text, key) in keys.chain(aliases) {
            let haystack = Utf32String::from(text);
            let Some(score) = pattern
                .score(haystack.slice(..), &mut self.matcher)
                .filter(|score| *score > 0)
            else {
                continue;
            };
            let entry = best.entry(key).or_insert((score, text));
            if score > entry.0 {
                *entry = (score, text);
            }
        }

        let order: HashMap<&str, usize> = store.keys().enumerate().map(|(i, k)| (k, i)).collect();
        let mut scored: Vec<(&str, u32, &str)> = best
            .into_iter()
            .map(|(key, (score, text))| (key, score, text))
            .collect();
        scored.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| order.get(a.0).cmp(&order.get(b.0)))
        });
        scored.truncate(limit);

        // Normalize scores to 0-1 range (nucleo scores are u32)
        let max_score = scored.first().map_or(1.0, |(_, s, _)| *s as f32);

        scored
            .into_iter()
            .map(|(key, score, text)| Suggestion {
                key: key.to_string(),
                matched: text.to_string(),
                score: if max_score > 0.0 {
                    score as f32 / max_score
                } else {
                    0.0
                },
            })
            .collect()
    }
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misspelled_query_suggests_record() {
        let catalog = Catalog::builtin().unwrap();
        let mut suggester = Suggester::new();

        let results = suggester.suggest("bacn", &catalog, 3);

        assert!(!results.is_empty());
        assert_eq!(results[0].key, "bacon");
        assert!((results[0].score - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn alias_hits_are_reported_under_canonical_key() {
        let catalog = Catalog::builtin().unwrap();
        let mut suggester = Suggester::new();

        let results = suggester.suggest("prawns", &catalog, 5);

        assert!(results.iter().any(|s| s.key == "shrimp"));
        let unique: std::collections::HashSet<_> = results.iter().map(|s| &s.key).collect();
        assert_eq!(unique.len(), results.len());
    }

    #[test]
    fn respects_limit() {
        let catalog = Catalog::builtin().unwrap();
        let mut suggester = Suggester::new();
        assert!(suggester.suggest("e", &catalog, 2).len() <= 2);
        assert!(suggester.suggest("e", &catalog, 0).is_empty());
    }

    #[test]
    fn search_operators_are_plain_characters() {
        let catalog = Catalog::builtin().unwrap();
        let mut suggester = Suggester::new();

        for query in ["!", "^$", "'", "a !"] {
            let results = suggester.suggest(query, &catalog, 5);
            assert!(results.is_empty(), "{query:?} -> {results:?}");
        }
    }

    #[test]
    fn every_suggestion_has_a_positive_score() {
        let catalog = Catalog::builtin().unwrap();
        let mut suggester = Suggester::new();

        let results = suggester.suggest("chkn", &catalog, 5);

        assert!(!results.is_empty());
        assert!(results.iter().all(|s| s.score > 0.0));
    }

    #[test]
    fn blank_query_has_no_suggestions() {
        let catalog = Catalog::builtin().unwrap();
        let mut suggester = Suggester::new();
        assert!(suggester.suggest("   ", &catalog, 5).is_empty());
    }
}
