use crave_progress::{Gamification, ImpactEstimator, ProgressEvaluator, UserActivityCounters};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn counters(values: [u32; 5]) -> UserActivityCounters {
    UserActivityCounters {
        searches: values[0],
        favorites: values[1],
        recipes_viewed: values[2],
        reviews_written: values[3],
        days_active: values[4],
    }
}

#[test]
fn five_searches_three_favorites_is_kind_explorer() {
    let gamification = Gamification::builtin().unwrap();
    let evaluator = ProgressEvaluator::new(gamification.ladder());

    let report = evaluator.evaluate(&counters([5, 3, 0, 0, 0]));

    assert_eq!(report.current.name, "Kind Explorer");
    assert_eq!(report.next.map(|t| t.name.as_str()), Some("Compassionate Foodie"));
    // recipes_viewed 0/5 is the bottleneck
    assert_eq!(report.progress_percent, 0.0);
}

#[test]
fn fresh_user_sits_on_plant_curious() {
    let gamification = Gamification::builtin().unwrap();
    let evaluator = ProgressEvaluator::new(gamification.ladder());

    let report = evaluator.evaluate(&UserActivityCounters::default());

    assert_eq!(report.current.name, "Plant Curious");
    assert_eq!(report.next.map(|t| t.id), Some(2));
    assert_eq!(report.progress_percent, 0.0);
}

#[test]
fn planet_protector_is_the_top() {
    let gamification = Gamification::builtin().unwrap();
    let evaluator = ProgressEvaluator::new(gamification.ladder());

    let report = evaluator.evaluate(&counters([100, 50, 40, 10, 90]));

    assert_eq!(report.current.name, "Planet Protector");
    assert!(report.next.is_none());
    assert_eq!(report.progress_percent, 100.0);
}

#[test]
fn level_up_carries_animal_friend() {
    let gamification = Gamification::builtin().unwrap();
    let evaluator = ProgressEvaluator::new(gamification.ladder());

    let reached = evaluator
        .level_up(&counters([4, 3, 0, 0, 0]), &counters([5, 3, 0, 0, 0]))
        .unwrap();

    assert_eq!(reached.name, "Kind Explorer");
    assert_eq!(
        reached.animal_friend.as_ref().map(|friend| friend.name.as_str()),
        Some("Luna the Lamb")
    );
    assert_eq!(reached.impact_display.co2_saved, "12.5 kg");
}

#[test]
fn impact_example() {
    let estimate = ImpactEstimator::new().estimate(&counters([10, 2, 0, 0, 0]));
    assert_eq!(estimate.meals_replaced, 7);
    assert_eq!(estimate.co2_saved_kg, 18);
    assert_eq!(estimate.water_saved_liters, 12_600);
    assert_eq!(estimate.land_saved_sq_meters, 35);
    assert_eq!(estimate.animals_spared, 2);
}

#[test]
fn daily_tip_rotates() {
    let gamification = Gamification::builtin().unwrap();
    assert_eq!(gamification.tip_for_day(0), gamification.tip_for_day(5));
    assert_ne!(gamification.tip_for_day(0), gamification.tip_for_day(1));
}

#[test]
fn facts_cycle_on_their_own_lengths() {
    let gamification = Gamification::builtin().unwrap();
    assert_eq!(
        gamification.animal_fact_for_day(5),
        gamification.animal_fact_for_day(0)
    );
    assert_eq!(
        gamification.environmental_fact_for_day(4),
        gamification.environmental_fact_for_day(0)
    );
    assert_ne!(
        gamification.environmental_fact_for_day(1),
        gamification.environmental_fact_for_day(0)
    );
}

proptest! {
    #[test]
    fn builtin_tier_is_monotonic(
        base in proptest::array::uniform5(0u32..120),
        delta in proptest::array::uniform5(0u32..60),
    ) {
        let gamification = Gamification::builtin().unwrap();
        let evaluator = ProgressEvaluator::new(gamification.ladder());
        let mut high = base;
        for (slot, extra) in high.iter_mut().zip(delta) {
            *slot += extra;
        }
        let low_tier = evaluator.current_tier(&counters(base)).id;
        let high_tier = evaluator.current_tier(&counters(high)).id;
        prop_assert!(low_tier <= high_tier);
    }
}
