use anyhow::{Context as AnyhowContext, Result};
use crave_catalog::Catalog;
use crave_progress::Gamification;
use serde::Serialize;
use std::path::PathBuf;

/// Where the two datasets come from. `None` means the built-in copy.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    pub catalog: Option<PathBuf>,
    pub gamification: Option<PathBuf>,
}

/// Validated datasets shared read-only by every command.
#[derive(Debug)]
pub struct AppData {
    pub catalog: Catalog,
    pub gamification: Gamification,
    pub catalog_path: Option<PathBuf>,
    pub gamification_path: Option<PathBuf>,
}

impl DataConfig {
    pub fn load(&self) -> Result<AppData> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::from_file(path)
                .with_context(|| format!("Failed to load catalog config {}", path.display()))?,
            None => Catalog::builtin().context("Built-in catalog config is invalid")?,
        };
        let gamification = match &self.gamification {
            Some(path) => Gamification::from_file(path).with_context(|| {
                format!("Failed to load gamification config {}", path.display())
            })?,
            None => Gamification::builtin().context("Built-in gamification config is invalid")?,
        };

        log::debug!(
            "Datasets ready: {} records, {} synonym groups, {} tiers",
            catalog.store().len(),
            catalog.synonyms().len(),
            gamification.ladder().len()
        );

        Ok(AppData {
            catalog,
            gamification,
            catalog_path: self.catalog.clone(),
            gamification_path: self.gamification.clone(),
        })
    }
}

impl AppData {
    pub fn builtin() -> Result<Self> {
        DataConfig::default().load()
    }

    pub fn summary(&self) -> ValidationReport {
        ValidationReport {
            catalog: CatalogCounts {
                source: source_label(self.catalog_path.as_ref()),
                records: self.catalog.store().len(),
                synonym_groups: self.catalog.synonyms().len(),
                quick_searches: self.catalog.quick_searches().len(),
                supplements: self.catalog.supplements().len(),
            },
            gamification: GamificationCounts {
                source: source_label(self.gamification_path.as_ref()),
                tiers: self.gamification.ladder().len(),
                animal_facts: self.gamification.animal_facts().len(),
                environmental_facts: self.gamification.environmental_facts().len(),
                daily_tips: self.gamification.daily_tips().len(),
            },
        }
    }
}

fn source_label(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "builtin".to_string(), |path| path.display().to_string())
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub catalog: CatalogCounts,
    pub gamification: GamificationCounts,
}

#[derive(Debug, Serialize)]
pub struct CatalogCounts {
    pub source: String,
    pub records: usize,
    pub synonym_groups: usize,
    pub quick_searches: usize,
    pub supplements: usize,
}

#[derive(Debug, Serialize)]
pub struct GamificationCounts {
    pub source: String,
    pub tiers: usize,
    pub animal_facts: usize,
    pub environmental_facts: usize,
    pub daily_tips: usize,
}
