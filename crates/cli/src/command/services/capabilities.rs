use crate::command::domain::{CommandAction, CommandOutcome};
use crate::config::AppData;
use anyhow::Result;
use crave_catalog::CATALOG_SCHEMA_VERSION;
use crave_progress::GAMIFICATION_SCHEMA_VERSION;
use crave_protocol::{
    Capabilities, CapabilitiesServer, CapabilitiesVersions, NextAction,
    CAPABILITIES_SCHEMA_VERSION, COMMAND_API_VERSION,
};
use serde_json::Value;

pub(crate) struct CapabilitiesService;

impl CapabilitiesService {
    pub fn run(&self, _payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let start_query = data
            .catalog
            .quick_searches()
            .first()
            .cloned()
            .unwrap_or_else(|| "beef".to_string());

        let output = Capabilities {
            schema_version: CAPABILITIES_SCHEMA_VERSION,
            server: CapabilitiesServer {
                name: "crave-cli".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            versions: CapabilitiesVersions {
                command_api: COMMAND_API_VERSION.to_string(),
                catalog_schema: CATALOG_SCHEMA_VERSION,
                gamification_schema: GAMIFICATION_SCHEMA_VERSION,
            },
            actions: CommandAction::ALL
                .iter()
                .map(|action| action.as_str().to_string())
                .collect(),
            start_route: NextAction {
                action: CommandAction::Search.as_str().to_string(),
                payload: serde_json::json!({ "query": start_query }),
                reason: "Search for a craving to see plant-based alternatives.".to_string(),
            },
        };

        CommandOutcome::from_value(output)
    }
}
