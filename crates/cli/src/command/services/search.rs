use crate::command::domain::{
    parse_payload, CommandAction, CommandOutcome, Hint, HintKind, SearchHit, SearchOutput,
    SearchPayload, SuggestOutput, SuggestPayload,
};
use crate::config::AppData;
use anyhow::Result;
use crave_protocol::NextAction;
use crave_search::{normalize_query, MatchSource, QueryMatch, QueryResolver, Resolution, Suggester};
use serde_json::{json, Value};

pub(crate) struct SearchService;

impl SearchService {
    pub fn search(&self, payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let payload: SearchPayload = parse_payload(CommandAction::Search, payload)?;
        let normalized = normalize_query(&payload.query);
        if normalized.is_empty() {
            anyhow::bail!("Query must not be empty");
        }

        let catalog = &data.catalog;
        match QueryResolver::new(catalog).resolve(&payload.query) {
            Resolution::Match(hit) => {
                let output = SearchOutput {
                    query: payload.query.clone(),
                    normalized,
                    hit: Some(SearchHit {
                        key: hit.key,
                        source: hit.source,
                        record: hit.record,
                    }),
                    supplements: catalog.supplements(),
                    suggestions: Vec::new(),
                    quick_searches: &[],
                };
                let mut outcome = CommandOutcome::from_value(output)?;
                outcome
                    .hints
                    .push(Hint::new(HintKind::Info, describe_match(&payload.query, &hit)));
                outcome.next_actions.push(NextAction {
                    action: CommandAction::Record.as_str().to_string(),
                    payload: json!({ "increments": { "searches": 1 } }),
                    reason: "Count this search toward achievement progress.".to_string(),
                });
                Ok(outcome)
            }
            Resolution::NoMatch => {
                let suggestions =
                    Suggester::new().suggest(&payload.query, catalog, payload.suggestion_limit);
                log::debug!(
                    "No match for {:?}; {} suggestion(s)",
                    normalized,
                    suggestions.len()
                );

                let next_actions = suggestions
                    .iter()
                    .map(|suggestion| NextAction {
                        action: CommandAction::Search.as_str().to_string(),
                        payload: json!({ "query": suggestion.key }),
                        reason: format!("Did you mean '{}'?", suggestion.key),
                    })
                    .collect();
                let quick = catalog.quick_searches();

                let mut hints = vec![Hint::new(
                    HintKind::Info,
                    format!("No catalog record matches '{}'.", payload.query.trim()),
                )];
                if !quick.is_empty() {
                    hints.push(Hint::new(
                        HintKind::Action,
                        format!("Try a quick search: {}", quick.join(", ")),
                    ));
                }

                let output = SearchOutput {
                    query: payload.query.clone(),
                    normalized,
                    hit: None,
                    supplements: catalog.supplements(),
                    suggestions,
                    quick_searches: quick,
                };
                let mut outcome = CommandOutcome::from_value(output)?;
                outcome.hints = hints;
                outcome.next_actions = next_actions;
                Ok(outcome)
            }
        }
    }

    pub fn suggest(&self, payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let payload: SuggestPayload = parse_payload(CommandAction::Suggest, payload)?;
        let suggestions = Suggester::new().suggest(&payload.query, &data.catalog, payload.limit);
        CommandOutcome::from_value(SuggestOutput {
            query: payload.query,
            suggestions,
        })
    }
}

fn describe_match(query: &str, hit: &QueryMatch<'_>) -> String {
    let query = query.trim();
    match hit.source {
        MatchSource::Synonym { alias, .. } => {
            format!("'{query}' matched '{}' via synonym '{alias}'.", hit.key)
        }
        MatchSource::DirectKey => format!("'{query}' matched record key '{}'.", hit.key),
    }
}
