pub mod domain;
mod services;

#[allow(unused_imports)]
pub use domain::{
    classify_error, CommandAction, CommandRequest, CommandResponse, CommandStatus, Hint,
    HintKind, ResponseMeta,
};

use crate::config::AppData;
use crave_protocol::ErrorEnvelope;
use domain::CommandOutcome;
use services::Services;
use std::time::Instant;

pub struct CommandHandler {
    services: Services,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            services: Services::new(),
        }
    }

    pub fn execute(&self, request: CommandRequest, data: &AppData) -> CommandResponse {
        let started = Instant::now();
        let CommandRequest { action, payload } = request;
        let payload_for_meta = payload.clone();
        log::debug!("Command action={}", action.as_str());

        let outcome: std::result::Result<CommandOutcome, anyhow::Error> =
            self.services.route(action, payload, data);

        match outcome {
            Ok(outcome) => {
                let mut meta = outcome.meta;
                fill_meta(&mut meta, data);
                meta.duration_ms = meta
                    .duration_ms
                    .or_else(|| Some(started.elapsed().as_millis() as u64));

                CommandResponse {
                    status: CommandStatus::Ok,
                    message: None,
                    error: None,
                    hints: outcome.hints,
                    next_actions: outcome.next_actions,
                    data: outcome.data,
                    meta,
                }
            }
            Err(err) => {
                let message = format!("{err:#}");
                let classification =
                    classify_error(&message, Some(action), Some(&payload_for_meta));
                log::debug!(
                    "Command action={} failed ({}): {message}",
                    action.as_str(),
                    classification.code
                );
                let hints = classification.hints;
                let hint = classification
                    .hint
                    .or_else(|| hints.first().map(|h| h.text.clone()));
                let error = ErrorEnvelope {
                    code: classification.code,
                    message: message.clone(),
                    details: None,
                    hint,
                    next_actions: classification.next_actions.clone(),
                };
                let mut meta = ResponseMeta {
                    duration_ms: Some(started.elapsed().as_millis() as u64),
                    ..Default::default()
                };
                fill_meta(&mut meta, data);

                CommandResponse {
                    status: CommandStatus::Error,
                    message: Some(message),
                    error: Some(error),
                    hints,
                    next_actions: classification.next_actions,
                    data: serde_json::Value::Null,
                    meta,
                }
            }
        }
    }
}

fn fill_meta(meta: &mut ResponseMeta, data: &AppData) {
    if meta.catalog_path.is_none() {
        meta.catalog_path = data
            .catalog_path
            .as_ref()
            .map(|path| path.display().to_string());
    }
    if meta.gamification_path.is_none() {
        meta.gamification_path = data
            .gamification_path
            .as_ref()
            .map(|path| path.display().to_string());
    }
}

pub fn execute(request: CommandRequest, data: &AppData) -> CommandResponse {
    CommandHandler::new().execute(request, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn run(action: CommandAction, payload: Value) -> CommandResponse {
        let data = AppData::builtin().unwrap();
        execute(CommandRequest::new(action, payload), &data)
    }

    #[test]
    fn search_hit_carries_record_and_supplements() {
        let response = run(CommandAction::Search, json!({ "query": "  Steak " }));
        assert!(!response.is_error());
        assert_eq!(response.data["match"]["key"], "beef steak");
        assert_eq!(response.data["match"]["source"]["kind"], "synonym");
        assert_eq!(response.data["match"]["source"]["alias"], "beef steak");
        assert_eq!(response.data["normalized"], "steak");
        assert_eq!(response.data["supplements"].as_array().unwrap().len(), 4);
        assert_eq!(response.next_actions[0].action, "record");
    }

    #[test]
    fn search_miss_is_ok_with_quick_searches() {
        let response = run(CommandAction::Search, json!({ "query": "xyznotfound" }));
        assert!(!response.is_error());
        assert_eq!(response.data["match"], Value::Null);
        assert_eq!(response.data["quick_searches"][0], "beef");
        assert!(response
            .hints
            .iter()
            .any(|hint| hint.text.contains("quick search")));
    }

    #[test]
    fn misspelled_search_offers_suggestions() {
        let response = run(CommandAction::Search, json!({ "query": "bacn" }));
        assert_eq!(response.data["match"], Value::Null);
        assert_eq!(response.data["suggestions"][0]["key"], "bacon");
        assert_eq!(response.next_actions[0].payload, json!({ "query": "bacon" }));
    }

    #[test]
    fn blank_query_is_invalid_request() {
        let response = run(CommandAction::Search, json!({ "query": "   " }));
        assert!(response.is_error());
        let error = response.error.unwrap();
        assert_eq!(error.code, "invalid_request");
        assert!(error.hint.unwrap().contains("payload.query"));
    }

    #[test]
    fn unknown_payload_field_is_invalid_request() {
        let response = run(CommandAction::Progress, json!({ "searches": 3 }));
        assert_eq!(response.error.unwrap().code, "invalid_request");
    }

    #[test]
    fn record_reports_level_up_with_animal_friend() {
        let response = run(
            CommandAction::Record,
            json!({
                "counters": { "searches": 5, "favorites": 2 },
                "increments": { "favorites": 1 }
            }),
        );
        assert!(!response.is_error());
        assert_eq!(response.data["current"]["name"], "Kind Explorer");
        assert_eq!(response.data["level_up"]["name"], "Kind Explorer");
        assert_eq!(response.data["counters"]["favorites"], 3);
        assert!(response
            .hints
            .iter()
            .any(|hint| hint.kind == HintKind::Celebrate && hint.text.contains("Luna")));
    }

    #[test]
    fn progress_names_missing_counters() {
        let response = run(CommandAction::Progress, json!({ "counters": { "searches": 5 } }));
        assert_eq!(response.data["current"]["name"], "Plant Curious");
        assert!(response
            .hints
            .iter()
            .any(|hint| hint.text.contains("favorites 0/3")));
    }

    #[test]
    fn impact_matches_formulas() {
        let response = run(
            CommandAction::Impact,
            json!({ "counters": { "searches": 10, "favorites": 2 } }),
        );
        assert_eq!(
            response.data,
            json!({
                "meals_replaced": 7,
                "co2_saved_kg": 18,
                "water_saved_liters": 12600,
                "land_saved_sq_meters": 35,
                "animals_spared": 2
            })
        );
    }

    #[test]
    fn catalog_lookup_by_key_and_not_found() {
        let response = run(CommandAction::Catalog, json!({ "key": "Bacon" }));
        assert_eq!(response.data["display_name"], "Bacon");

        let response = run(CommandAction::Catalog, json!({ "key": "tofu" }));
        let error = response.error.unwrap();
        assert_eq!(error.code, "not_found");
        assert_eq!(error.next_actions[0].action, "catalog");
    }

    #[test]
    fn favorites_toggle_and_skip_unknown_ids() {
        let response = run(
            CommandAction::Favorites,
            json!({ "ids": [101, 150, 9999], "toggle": [150] }),
        );
        assert_eq!(response.data["ids"], json!([101, 9999]));
        assert_eq!(response.data["unknown_ids"], json!([9999]));
        assert_eq!(response.data["items"][0]["record_name"], "Chicken Breast");
        assert!(response.hints.iter().any(|hint| hint.kind == HintKind::Warn));
    }

    #[test]
    fn tip_rotates_by_day() {
        let day0 = run(CommandAction::Tip, json!({ "day": 0 }));
        let day5 = run(CommandAction::Tip, json!({ "day": 5 }));
        assert_eq!(day0.data["tip"], day5.data["tip"]);
        assert_eq!(day0.data["day"], 0);
    }

    #[test]
    fn capabilities_list_every_action() {
        let response = run(CommandAction::Capabilities, json!({}));
        assert_eq!(response.data["actions"].as_array().unwrap().len(), 9);
        assert_eq!(response.data["start_route"]["action"], "search");
        assert_eq!(response.data["versions"]["command_api"], "v1");
    }
}
