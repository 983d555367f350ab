use crate::command::domain::{
    parse_payload, CommandAction, CommandOutcome, CountersPayload, Hint, HintKind,
    ProgressOutput, RecordOutput, RecordPayload, TipOutput, TipPayload,
};
use crate::config::AppData;
use anyhow::Result;
use crave_progress::{AchievementTier, ImpactEstimator, ProgressEvaluator, UserActivityCounters};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

pub(crate) struct ProgressService;

impl ProgressService {
    pub fn progress(&self, payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let payload: CountersPayload = parse_payload(CommandAction::Progress, payload)?;
        let output = evaluate(data, payload.counters);
        let hints = progress_hints(&output);
        let mut outcome = CommandOutcome::from_value(output)?;
        outcome.hints = hints;
        Ok(outcome)
    }

    pub fn record(&self, payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let payload: RecordPayload = parse_payload(CommandAction::Record, payload)?;
        let before = payload.counters;
        let mut after = before;
        for (counter, amount) in &payload.increments {
            after.record(*counter, *amount);
        }

        let evaluator = ProgressEvaluator::new(data.gamification.ladder());
        let level_up = evaluator.level_up(&before, &after);
        let progress = evaluate(data, after);

        let mut hints = Vec::new();
        if let Some(tier) = level_up {
            hints.extend(level_up_hints(tier));
        }
        hints.extend(progress_hints(&progress));

        let mut outcome = CommandOutcome::from_value(RecordOutput { progress, level_up })?;
        outcome.hints = hints;
        Ok(outcome)
    }

    pub fn impact(&self, payload: Value, _data: &AppData) -> Result<CommandOutcome> {
        let payload: CountersPayload = parse_payload(CommandAction::Impact, payload)?;
        let estimate = ImpactEstimator::new().estimate(&payload.counters);
        let mut outcome = CommandOutcome::from_value(estimate)?;
        outcome.hints.push(Hint::new(
            HintKind::Info,
            "Figures are illustrative averages, not measurements.",
        ));
        Ok(outcome)
    }

    pub fn tip(&self, payload: Value, data: &AppData) -> Result<CommandOutcome> {
        let payload: TipPayload = parse_payload(CommandAction::Tip, payload)?;
        let day = payload.day.unwrap_or_else(today);
        let gamification = &data.gamification;

        CommandOutcome::from_value(TipOutput {
            day,
            tip: gamification.tip_for_day(day),
            animal_fact: gamification.animal_fact_for_day(day),
            environmental_fact: gamification.environmental_fact_for_day(day),
        })
    }
}

fn evaluate(data: &AppData, counters: UserActivityCounters) -> ProgressOutput<'_> {
    let report = ProgressEvaluator::new(data.gamification.ladder()).evaluate(&counters);
    ProgressOutput {
        counters,
        current: report.current,
        next: report.next,
        progress_percent: report.progress_percent,
    }
}

fn progress_hints(output: &ProgressOutput<'_>) -> Vec<Hint> {
    let Some(next) = output.next else {
        return vec![Hint::new(
            HintKind::Info,
            format!("{} is the highest tier.", output.current.name),
        )];
    };

    let mut hints = vec![Hint::new(
        HintKind::Info,
        format!(
            "{:.0}% of the way to {}.",
            output.progress_percent, next.name
        ),
    )];
    let missing: Vec<String> = next
        .requirements
        .iter()
        .filter(|(counter, threshold)| output.counters.get(**counter) < **threshold)
        .map(|(counter, threshold)| {
            format!("{counter} {}/{threshold}", output.counters.get(*counter))
        })
        .collect();
    if !missing.is_empty() {
        hints.push(Hint::new(
            HintKind::Action,
            format!("Still needed: {}", missing.join(", ")),
        ));
    }
    hints
}

fn level_up_hints(tier: &AchievementTier) -> Vec<Hint> {
    let mut hints = vec![Hint::new(
        HintKind::Celebrate,
        format!("Level up! You are now {} {}.", tier.icon, tier.name),
    )];
    if let Some(friend) = &tier.animal_friend {
        hints.push(Hint::new(
            HintKind::Celebrate,
            format!("{}: {}", friend.name, friend.message),
        ));
    }
    hints
}

fn today() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() / SECONDS_PER_DAY)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_counts_days_since_epoch() {
        // 2024-01-01 is day 19723
        assert!(today() > 19_723);
    }
}
