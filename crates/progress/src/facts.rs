use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalFact {
    pub animal: String,
    pub fact: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentalFact {
    pub category: String,
    pub fact: String,
    pub plant_based: String,
}

/// Picks the item for a day number, cycling through `items` in order.
/// `None` only when `items` is empty.
#[must_use]
pub fn rotate_by_day<T>(items: &[T], day: u64) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let index = day % items.len() as u64;
    items.get(index as usize)
}
