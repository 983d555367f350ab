use serde::{Deserialize, Serialize};

/// Pre-formatted nutrient amounts for one serving ("15g", "2.4mcg").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub protein: String,
    pub iron: String,
    pub calories: String,
    pub fat: String,
    pub fiber: String,
    pub b12: String,
}

/// One plant-based substitute product or home preparation.
///
/// `id` is unique across the whole catalog and doubles as the favorite key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeProduct {
    pub id: u32,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub nutrition: Nutrition,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub title: String,
    pub time: String,
    pub difficulty: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// A cravable animal product together with everything shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub key: String,
    pub display_name: String,
    pub deficiency_summary: String,
    pub deficiency_explanation: String,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<AlternativeProduct>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl CatalogRecord {
    #[must_use]
    pub fn alternative(&self, id: u32) -> Option<&AlternativeProduct> {
        self.alternatives.iter().find(|alt| alt.id == id)
    }
}

/// Supplement suggestion shown next to every search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplement {
    pub nutrient: String,
    pub supplement: String,
    pub dosage: String,
    pub source: String,
}
