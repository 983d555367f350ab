use anyhow::{Context as AnyhowContext, Result};
use crave_catalog::{CatalogRecord, FavoriteItem, Supplement};
use crave_progress::{AchievementTier, AnimalFact, Counter, EnvironmentalFact, UserActivityCounters};
use crave_protocol::{ErrorEnvelope, NextAction};
use crave_search::{MatchSource, Suggestion};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

impl CommandRequest {
    pub fn new(action: CommandAction, payload: Value) -> Self {
        Self { action, payload }
    }
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Search,
    Suggest,
    Record,
    Progress,
    Impact,
    Favorites,
    Catalog,
    Tip,
    Capabilities,
}

impl CommandAction {
    pub const ALL: [Self; 9] = [
        Self::Search,
        Self::Suggest,
        Self::Record,
        Self::Progress,
        Self::Impact,
        Self::Favorites,
        Self::Catalog,
        Self::Tip,
        Self::Capabilities,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Search => "search",
            CommandAction::Suggest => "suggest",
            CommandAction::Record => "record",
            CommandAction::Progress => "progress",
            CommandAction::Impact => "impact",
            CommandAction::Favorites => "favorites",
            CommandAction::Catalog => "catalog",
            CommandAction::Tip => "tip",
            CommandAction::Capabilities => "capabilities",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<NextAction>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Clone)]
pub struct Hint {
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub text: String,
}

impl Hint {
    pub fn new(kind: HintKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Info,
    Action,
    Warn,
    Celebrate,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub code: String,
    pub hint: Option<String>,
    pub hints: Vec<Hint>,
    pub next_actions: Vec<NextAction>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamification_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

pub struct CommandOutcome {
    pub data: Value,
    pub hints: Vec<Hint>,
    pub meta: ResponseMeta,
    pub next_actions: Vec<NextAction>,
}

impl CommandOutcome {
    pub fn from_value<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(value)?,
            hints: Vec::new(),
            meta: ResponseMeta::default(),
            next_actions: Vec::new(),
        })
    }
}

pub fn parse_payload<T: DeserializeOwned>(action: CommandAction, payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .with_context(|| format!("Invalid payload for action={}", action.as_str()))
}

// ---- payloads ----

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPayload {
    pub query: String,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestPayload {
    pub query: String,
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CountersPayload {
    #[serde(default)]
    pub counters: UserActivityCounters,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordPayload {
    #[serde(default)]
    pub counters: UserActivityCounters,
    pub increments: BTreeMap<Counter, u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FavoritesPayload {
    #[serde(default)]
    pub ids: Vec<u32>,
    #[serde(default)]
    pub toggle: Vec<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogPayload {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TipPayload {
    #[serde(default)]
    pub day: Option<u64>,
}

// ---- outputs ----

#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub query: String,
    pub normalized: String,
    #[serde(rename = "match")]
    pub hit: Option<SearchHit<'a>>,
    pub supplements: &'a [Supplement],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    pub quick_searches: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    pub key: &'a str,
    pub source: MatchSource<'a>,
    pub record: &'a CatalogRecord,
}

#[derive(Debug, Serialize)]
pub struct SuggestOutput {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
pub struct ProgressOutput<'a> {
    pub counters: UserActivityCounters,
    pub current: &'a AchievementTier,
    pub next: Option<&'a AchievementTier>,
    pub progress_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct RecordOutput<'a> {
    #[serde(flatten)]
    pub progress: ProgressOutput<'a>,
    pub level_up: Option<&'a AchievementTier>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesOutput<'a> {
    pub ids: Vec<u32>,
    pub items: Vec<FavoriteItem<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_ids: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct CatalogSummary<'a> {
    pub records: Vec<RecordSummary<'a>>,
    pub synonym_groups: usize,
    pub quick_searches: &'a [String],
    pub supplements: &'a [Supplement],
}

#[derive(Debug, Serialize)]
pub struct RecordSummary<'a> {
    pub key: &'a str,
    pub display_name: &'a str,
    pub alternatives: usize,
    pub recipes: usize,
}

#[derive(Debug, Serialize)]
pub struct TipOutput<'a> {
    pub day: u64,
    pub tip: Option<&'a str>,
    pub animal_fact: Option<&'a AnimalFact>,
    pub environmental_fact: Option<&'a EnvironmentalFact>,
}

pub fn classify_error(
    message: &str,
    action: Option<CommandAction>,
    payload: Option<&Value>,
) -> ErrorClassification {
    let mut hints = Vec::new();
    let mut next_actions = Vec::new();
    let mut code = "internal".to_string();
    let mut hint = None;

    if message.contains("Invalid payload") || message.contains("must not be empty") {
        code = "invalid_request".to_string();
        let action_name = action.map_or("<action>", CommandAction::as_str);
        hints.push(Hint::new(
            HintKind::Action,
            format!("Check payload fields for action={action_name}; unknown fields are rejected."),
        ));
    }

    if message.contains("Query must not be empty") {
        hint = Some("Pass a non-blank payload.query, e.g. \"beef\".".to_string());
        next_actions.push(NextAction {
            action: CommandAction::Search.as_str().to_string(),
            payload: json!({ "query": "beef" }),
            reason: "Retry with a quick search term.".to_string(),
        });
    }

    if message.contains("Unknown record key") {
        code = "not_found".to_string();
        hints.push(Hint::new(
            HintKind::Action,
            "List catalog keys with action=catalog, or resolve free text with action=search.",
        ));
        next_actions.push(NextAction {
            action: CommandAction::Catalog.as_str().to_string(),
            payload: json!({}),
            reason: "List every record key.".to_string(),
        });
        if let Some(key) = extract_key(payload) {
            next_actions.push(NextAction {
                action: CommandAction::Search.as_str().to_string(),
                payload: json!({ "query": key }),
                reason: "Resolve the text through synonyms instead of an exact key.".to_string(),
            });
        }
    }

    if hint.is_none() {
        hint = hints.first().map(|h| h.text.clone());
    }

    ErrorClassification {
        code,
        hint,
        hints,
        next_actions,
    }
}

fn extract_key(payload: Option<&Value>) -> Option<String> {
    payload?
        .get("key")
        .and_then(Value::as_str)
        .map(|value| value.to_string())
}
