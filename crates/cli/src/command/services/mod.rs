mod capabilities;
mod catalog;
mod progress;
mod search;

use crate::command::domain::{CommandAction, CommandOutcome};
use crate::config::AppData;
use anyhow::Result;
use serde_json::Value;

pub struct Services {
    capabilities: capabilities::CapabilitiesService,
    catalog: catalog::CatalogService,
    progress: progress::ProgressService,
    search: search::SearchService,
}

impl Services {
    pub fn new() -> Self {
        Self {
            capabilities: capabilities::CapabilitiesService,
            catalog: catalog::CatalogService,
            progress: progress::ProgressService,
            search: search::SearchService,
        }
    }

    pub fn route(
        &self,
        action: CommandAction,
        payload: Value,
        data: &AppData,
    ) -> Result<CommandOutcome> {
        match action {
            CommandAction::Capabilities => self.capabilities.run(payload, data),
            CommandAction::Search => self.search.search(payload, data),
            CommandAction::Suggest => self.search.suggest(payload, data),
            CommandAction::Record => self.progress.record(payload, data),
            CommandAction::Progress => self.progress.progress(payload, data),
            CommandAction::Impact => self.progress.impact(payload, data),
            CommandAction::Tip => self.progress.tip(payload, data),
            CommandAction::Favorites => self.catalog.favorites(payload, data),
            CommandAction::Catalog => self.catalog.catalog(payload, data),
        }
    }
}
