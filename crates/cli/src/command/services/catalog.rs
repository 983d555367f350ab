use crate::command::domain::{
    parse_payload, CatalogPayload, CatalogSummary, CommandAction, CommandOutcome,
    FavoritesOutput, FavoritesPayload, Hint, HintKind, RecordSummary,
};
use crate::config::AppData;
use anyhow::Result;
use crave_catalog::{normalize, FavoriteSet};
use serde_json::Value;

pub(crate) struct CatalogService;

impl CatalogService {
    pub fn catalog(&self, payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let payload: CatalogPayload = parse_payload(CommandAction::Catalog, payload)?;
        let catalog = &data.catalog;

        if let Some(raw) = payload.key.as_deref() {
            let key = normalize(raw);
            if key.is_empty() {
                anyhow::bail!("Record key must not be empty");
            }
            let record = catalog
                .store()
                .get(&key)
                .ok_or_else(|| anyhow::anyhow!("Unknown record key '{key}'"))?;
            return CommandOutcome::from_value(record);
        }

        let records = catalog
            .store()
            .records()
            .iter()
            .map(|record| RecordSummary {
                key: &record.key,
                display_name: &record.display_name,
                alternatives: record.alternatives.len(),
                recipes: record.recipes.len(),
            })
            .collect();

        CommandOutcome::from_value(CatalogSummary {
            records,
            synonym_groups: catalog.synonyms().len(),
            quick_searches: catalog.quick_searches(),
            supplements: catalog.supplements(),
        })
    }

    pub fn favorites(&self, payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let payload: FavoritesPayload = parse_payload(CommandAction::Favorites, payload)?;
        let store = data.catalog.store();

        let mut favorites: FavoriteSet = payload.ids.into_iter().collect();
        for id in payload.toggle {
            favorites.toggle(id);
        }

        let unknown_ids: Vec<u32> = favorites
            .ids()
            .iter()
            .copied()
            .filter(|id| store.alternative(*id).is_none())
            .collect();
        let items = store.favorite_items(&favorites);

        let mut hints = Vec::new();
        if items.is_empty() {
            hints.push(Hint::new(
                HintKind::Info,
                "No favorites yet. Search for a craving and save an alternative.",
            ));
        }
        if !unknown_ids.is_empty() {
            hints.push(Hint::new(
                HintKind::Warn,
                format!("Ignored ids not present in the catalog: {unknown_ids:?}"),
            ));
        }

        let mut outcome = CommandOutcome::from_value(FavoritesOutput {
            ids: favorites.ids().to_vec(),
            items,
            unknown_ids,
        })?;
        outcome.hints = hints;
        Ok(outcome)
    }
}
