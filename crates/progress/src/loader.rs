use std::path::Path;

use crave_protocol::document::{each_object, parse_document, UnknownFields};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ProgressError, Result};
use crate::facts::{rotate_by_day, AnimalFact, EnvironmentalFact};
use crate::tier::{AchievementTier, TierLadder};

pub const GAMIFICATION_SCHEMA_VERSION: u32 = 1;

const BUILTIN_GAMIFICATION: &str = include_str!("../../../data/gamification.json");

const ROOT_FIELDS: &[&str] = &[
    "schema_version",
    "tiers",
    "animal_facts",
    "environmental_facts",
    "daily_tips",
];
const TIER_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "icon",
    "requirements",
    "impact_display",
    "animal_friend",
    "rewards",
];
const IMPACT_DISPLAY_FIELDS: &[&str] = &["co2_saved", "water_saved", "land_saved"];
const ANIMAL_FRIEND_FIELDS: &[&str] = &["name", "image", "message", "video"];
const ANIMAL_FACT_FIELDS: &[&str] = &["animal", "fact", "impact"];
const ENVIRONMENTAL_FACT_FIELDS: &[&str] = &["category", "fact", "plant_based"];

#[derive(Debug, Deserialize)]
struct RawGamification {
    #[serde(default)]
    schema_version: Option<u32>,
    tiers: Vec<AchievementTier>,
    #[serde(default)]
    animal_facts: Vec<AnimalFact>,
    #[serde(default)]
    environmental_facts: Vec<EnvironmentalFact>,
    #[serde(default)]
    daily_tips: Vec<String>,
}

/// Tier ladder plus the encouragement content shown around it.
#[derive(Debug, Clone)]
pub struct Gamification {
    ladder: TierLadder,
    animal_facts: Vec<AnimalFact>,
    environmental_facts: Vec<EnvironmentalFact>,
    daily_tips: Vec<String>,
}

impl Gamification {
    pub fn builtin() -> Result<Self> {
        Self::from_bytes(BUILTIN_GAMIFICATION.as_bytes())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ProgressError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let gamification = Self::from_bytes(&bytes)?;
        log::debug!(
            "Loaded gamification from {} ({} tiers)",
            path.display(),
            gamification.ladder.len()
        );
        Ok(gamification)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        if let Some(schema_version) = raw.schema_version {
            if schema_version != GAMIFICATION_SCHEMA_VERSION {
                return Err(ProgressError::UnsupportedSchema(schema_version));
            }
        }

        Ok(Self {
            ladder: TierLadder::new(raw.tiers)?,
            animal_facts: raw.animal_facts,
            environmental_facts: raw.environmental_facts,
            daily_tips: raw.daily_tips,
        })
    }

    #[must_use]
    pub const fn ladder(&self) -> &TierLadder {
        &self.ladder
    }

    #[must_use]
    pub fn animal_facts(&self) -> &[AnimalFact] {
        &self.animal_facts
    }

    #[must_use]
    pub fn environmental_facts(&self) -> &[EnvironmentalFact] {
        &self.environmental_facts
    }

    #[must_use]
    pub fn daily_tips(&self) -> &[String] {
        &self.daily_tips
    }

    #[must_use]
    pub fn tip_for_day(&self, day: u64) -> Option<&str> {
        rotate_by_day(&self.daily_tips, day).map(String::as_str)
    }

    #[must_use]
    pub fn animal_fact_for_day(&self, day: u64) -> Option<&AnimalFact> {
        rotate_by_day(&self.animal_facts, day)
    }

    #[must_use]
    pub fn environmental_fact_for_day(&self, day: u64) -> Option<&EnvironmentalFact> {
        rotate_by_day(&self.environmental_facts, day)
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawGamification> {
    let value = parse_document(bytes, "gamification config")
        .map_err(|err| ProgressError::Parse(err.to_string()))?;
    validate_gamification_value(&value)?;
    serde_json::from_value(value).map_err(|err| ProgressError::Parse(err.to_string()))
}

fn validate_gamification_value(value: &Value) -> Result<()> {
    let Some(root) = value.as_object() else {
        return Ok(());
    };

    let mut unknown = UnknownFields::new();
    unknown.check(root, "", ROOT_FIELDS);
    unknown.check_list(root, "tiers", TIER_FIELDS);
    unknown.check_list(root, "animal_facts", ANIMAL_FACT_FIELDS);
    unknown.check_list(root, "environmental_facts", ENVIRONMENTAL_FACT_FIELDS);

    // requirement names are checked by the Counter enum itself
    for (idx, tier) in each_object(root, "tiers") {
        let base = format!("tiers[{idx}]");
        unknown.check_nested(tier, &base, "impact_display", IMPACT_DISPLAY_FIELDS);
        unknown.check_nested(tier, &base, "animal_friend", ANIMAL_FRIEND_FIELDS);
    }

    unknown.into_result().map_err(ProgressError::UnknownFields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_builtin_gamification() {
        let gamification = Gamification::builtin().unwrap();
        assert_eq!(gamification.ladder().len(), 6);
        assert_eq!(gamification.ladder().floor().name, "Plant Curious");
        assert_eq!(gamification.animal_facts().len(), 5);
        assert_eq!(gamification.environmental_facts().len(), 4);
        assert_eq!(gamification.daily_tips().len(), 5);
    }

    #[test]
    fn accepts_toml_documents() {
        let bytes = br#"
schema_version = 1
daily_tips = ["Eat beans."]

[[tiers]]
id = 1
name = "Sprout"
icon = "S"
impact_display = { co2_saved = "1 kg", water_saved = "1 liter", land_saved = "1 sq meter" }

[tiers.requirements]
searches = 1
"#;
        let gamification = Gamification::from_bytes(bytes).unwrap();
        assert_eq!(gamification.ladder().floor().name, "Sprout");
        assert_eq!(gamification.tip_for_day(9), Some("Eat beans."));
    }

    #[test]
    fn rejects_unknown_fields_with_paths() {
        let bytes = br#"{
          "tiers": [{
            "id": 1, "name": "A", "icon": "a",
            "impact_display": {"co2_saved": "", "water_saved": "", "land_saved": "", "trees": ""},
            "badge": "gold"
          }],
          "extra": true
        }"#;
        let msg = Gamification::from_bytes(bytes).unwrap_err().to_string();
        assert!(msg.contains("tiers[0].impact_display.trees"), "{msg}");
        assert!(msg.contains("tiers[0].badge"), "{msg}");
        assert!(msg.contains("extra"), "{msg}");
    }

    #[test]
    fn rejects_unknown_counter_names() {
        let bytes = br#"{
          "tiers": [{
            "id": 1, "name": "A", "icon": "a",
            "requirements": {"logins": 3},
            "impact_display": {"co2_saved": "", "water_saved": "", "land_saved": ""}
          }]
        }"#;
        let err = Gamification::from_bytes(bytes).unwrap_err();
        assert!(matches!(err, ProgressError::Parse(_)), "{err}");
    }

    #[test]
    fn rejects_unsupported_schema_version() {
        let err = Gamification::from_bytes(br#"{"schema_version": 2, "tiers": []}"#).unwrap_err();
        assert!(err.to_string().contains("gamification.schema_version"), "{err}");
    }

    #[test]
    fn loads_from_file_and_reports_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gamification.json");
        std::fs::write(&path, BUILTIN_GAMIFICATION).unwrap();
        assert_eq!(Gamification::from_file(&path).unwrap().ladder().len(), 6);

        let missing = dir.path().join("absent.json");
        let err = Gamification::from_file(&missing).unwrap_err();
        assert!(matches!(err, ProgressError::Io { .. }), "{err}");
    }
}
