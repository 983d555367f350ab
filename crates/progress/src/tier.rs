use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::counters::{Counter, UserActivityCounters};
use crate::error::{ProgressError, Result};

/// Character thanking the user when a tier is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalFriend {
    pub name: String,
    pub image: String,
    pub message: String,
    pub video: String,
}

/// Fixed display strings for a tier; not derived from counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactDisplay {
    pub co2_saved: String,
    pub water_saved: String,
    pub land_saved: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementTier {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
    /// Minimum value per counter. A counter that is absent imposes nothing.
    #[serde(default)]
    pub requirements: BTreeMap<Counter, u32>,
    pub impact_display: ImpactDisplay,
    #[serde(default)]
    pub animal_friend: Option<AnimalFriend>,
    #[serde(default)]
    pub rewards: Vec<String>,
}

impl AchievementTier {
    #[must_use]
    pub fn requirement(&self, counter: Counter) -> Option<u32> {
        self.requirements.get(&counter).copied()
    }

    #[must_use]
    pub fn is_met_by(&self, counters: &UserActivityCounters) -> bool {
        self.requirements
            .iter()
            .all(|(counter, threshold)| counters.get(*counter) >= *threshold)
    }
}

/// Tiers sorted by strictly increasing id, with thresholds that never decrease
/// from one tier to a later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierLadder {
    tiers: Vec<AchievementTier>,
}

impl TierLadder {
    pub fn new(tiers: Vec<AchievementTier>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(ProgressError::InvalidLadder(
                "tier list must not be empty".to_string(),
            ));
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.id <= lower.id {
                return Err(ProgressError::InvalidLadder(format!(
                    "tier ids must be strictly increasing ({} follows {})",
                    upper.id, lower.id
                )));
            }
        }

        for counter in Counter::ALL {
            let mut previous: Option<(u32, u32)> = None;
            for tier in &tiers {
                let Some(threshold) = tier.requirement(counter) else {
                    continue;
                };
                if let Some((prev_id, prev_threshold)) = previous {
                    if threshold < prev_threshold {
                        return Err(ProgressError::InvalidLadder(format!(
                            "{counter} threshold drops from {prev_threshold} (tier {prev_id}) to {threshold} (tier {})",
                            tier.id
                        )));
                    }
                }
                previous = Some((tier.id, threshold));
            }
        }

        Ok(Self { tiers })
    }

    #[must_use]
    pub fn tiers(&self) -> &[AchievementTier] {
        &self.tiers
    }

    /// Lowest tier, returned when nothing else qualifies.
    #[must_use]
    pub fn floor(&self) -> &AchievementTier {
        &self.tiers[0]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AchievementTier> {
        self.tiers.get(index)
    }

    #[must_use]
    pub fn by_id(&self, id: u32) -> Option<&AchievementTier> {
        self.tiers.iter().find(|tier| tier.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always `false`; an empty ladder cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
