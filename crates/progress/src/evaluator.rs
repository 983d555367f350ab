use serde::Serialize;

use crate::counters::UserActivityCounters;
use crate::tier::{AchievementTier, TierLadder};

/// Where a user stands on the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressReport<'a> {
    pub current: &'a AchievementTier,
    pub next: Option<&'a AchievementTier>,
    /// Bottleneck progress toward `next`, in `[0, 100]`. Always 100 on the top tier.
    pub progress_percent: f64,
}

/// Tier qualification and progress over a validated ladder.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvaluator<'a> {
    ladder: &'a TierLadder,
}

impl<'a> ProgressEvaluator<'a> {
    #[must_use]
    pub const fn new(ladder: &'a TierLadder) -> Self {
        Self { ladder }
    }

    /// Highest tier whose requirements are all met, scanning from the top.
    /// Falls back to the lowest tier even when its own requirements are unmet.
    #[must_use]
    pub fn current_tier(&self, counters: &UserActivityCounters) -> &'a AchievementTier {
        let ladder = self.ladder;
        &ladder.tiers()[self.current_index(counters)]
    }

    #[must_use]
    pub fn evaluate(&self, counters: &UserActivityCounters) -> ProgressReport<'a> {
        let ladder = self.ladder;
        let index = self.current_index(counters);
        let current = &ladder.tiers()[index];
        let next = ladder.get(index + 1);

        let progress_percent = next.map_or(100.0, |next| progress_toward(next, counters));

        ProgressReport {
            current,
            next,
            progress_percent,
        }
    }

    /// Tier newly reached when counters move from `before` to `after`.
    /// `None` when the tier stays the same or goes down.
    #[must_use]
    pub fn level_up(
        &self,
        before: &UserActivityCounters,
        after: &UserActivityCounters,
    ) -> Option<&'a AchievementTier> {
        let from = self.current_index(before);
        let to = self.current_index(after);
        if to > from {
            let tier = &self.ladder.tiers()[to];
            log::debug!("Level up: tier {} -> tier {}", self.ladder.tiers()[from].id, tier.id);
            Some(tier)
        } else {
            None
        }
    }

    fn current_index(&self, counters: &UserActivityCounters) -> usize {
        self.ladder
            .tiers()
            .iter()
            .rposition(|tier| tier.is_met_by(counters))
            .unwrap_or(0)
    }
}

/// Minimum over the named counters of `value / threshold * 100`, capped at 100.
/// Zero thresholds are skipped; with nothing left to measure the result is 100.
fn progress_toward(next: &AchievementTier, counters: &UserActivityCounters) -> f64 {
    next.requirements
        .iter()
        .filter(|(_, threshold)| **threshold > 0)
        .map(|(counter, threshold)| {
            f64::from(counters.get(*counter)) / f64::from(*threshold) * 100.0
        })
        .reduce(f64::min)
        .map_or(100.0, |bottleneck| bottleneck.min(100.0))
}
