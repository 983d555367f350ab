use serde::Serialize;

use crate::counters::UserActivityCounters;

/// Illustrative environmental figures derived from activity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImpactEstimate {
    pub meals_replaced: u64,
    pub co2_saved_kg: u64,
    pub water_saved_liters: u64,
    pub land_saved_sq_meters: u64,
    pub animals_spared: u64,
}

/// Linear, display-only impact formulas.
///
/// `meals = floor(searches * 0.3 + favorites * 2 + recipes_viewed * 0.5)`, and each
/// figure is `round(meals * per_meal)`. Other counters are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactEstimator {
    meals_per_search: f64,
    meals_per_favorite: f64,
    meals_per_recipe_view: f64,
    co2_kg_per_meal: f64,
    water_liters_per_meal: f64,
    land_sq_meters_per_meal: f64,
    animals_per_meal: f64,
}

impl ImpactEstimator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            meals_per_search: 0.3,
            meals_per_favorite: 2.0,
            meals_per_recipe_view: 0.5,
            co2_kg_per_meal: 2.5,
            water_liters_per_meal: 1800.0,
            land_sq_meters_per_meal: 5.0,
            animals_per_meal: 0.3,
        }
    }

    #[must_use]
    pub fn meals_replaced(&self, counters: &UserActivityCounters) -> u64 {
        let meals = f64::from(counters.searches) * self.meals_per_search
            + f64::from(counters.favorites) * self.meals_per_favorite
            + f64::from(counters.recipes_viewed) * self.meals_per_recipe_view;
        meals.floor() as u64
    }

    #[must_use]
    pub fn estimate(&self, counters: &UserActivityCounters) -> ImpactEstimate {
        let meals_replaced = self.meals_replaced(counters);
        let meals = meals_replaced as f64;
        let per_meal = |factor: f64| (meals * factor).round() as u64;

        ImpactEstimate {
            meals_replaced,
            co2_saved_kg: per_meal(self.co2_kg_per_meal),
            water_saved_liters: per_meal(self.water_liters_per_meal),
            land_saved_sq_meters: per_meal(self.land_sq_meters_per_meal),
            animals_spared: per_meal(self.animals_per_meal),
        }
    }
}

impl Default for ImpactEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn ten_searches_two_favorites() {
        let counters = UserActivityCounters {
            searches: 10,
            favorites: 2,
            ..UserActivityCounters::default()
        };
        assert_eq!(
            ImpactEstimator::new().estimate(&counters),
            ImpactEstimate {
                meals_replaced: 7,
                co2_saved_kg: 18,
                water_saved_liters: 12_600,
                land_saved_sq_meters: 35,
                animals_spared: 2,
            }
        );
    }

    #[test]
    fn fractional_meals_are_floored() {
        let counters = UserActivityCounters {
            searches: 3,
            recipes_viewed: 1,
            ..UserActivityCounters::default()
        };
        // 0.9 + 0.5 = 1.4
        assert_eq!(ImpactEstimator::new().meals_replaced(&counters), 1);
    }

    #[test]
    fn unused_counters_do_not_contribute() {
        let counters = UserActivityCounters {
            reviews_written: 50,
            days_active: 365,
            ..UserActivityCounters::default()
        };
        assert_eq!(
            ImpactEstimator::new().estimate(&counters),
            ImpactEstimate {
                meals_replaced: 0,
                co2_saved_kg: 0,
                water_saved_liters: 0,
                land_saved_sq_meters: 0,
                animals_spared: 0,
            }
        );
    }

    proptest! {
        #[test]
        fn estimate_is_idempotent(searches in 0u32..10_000, favorites in 0u32..10_000, recipes in 0u32..10_000) {
            let counters = UserActivityCounters {
                searches,
                favorites,
                recipes_viewed: recipes,
                ..UserActivityCounters::default()
            };
            let estimator = ImpactEstimator::new();
            prop_assert_eq!(estimator.estimate(&counters), estimator.estimate(&counters));
        }

        #[test]
        fn more_activity_never_lowers_meals(searches in 0u32..1000, extra in 0u32..1000) {
            let estimator = ImpactEstimator::new();
            let low = UserActivityCounters { searches, ..UserActivityCounters::default() };
            let high = UserActivityCounters { searches: searches + extra, ..UserActivityCounters::default() };
            prop_assert!(estimator.meals_replaced(&low) <= estimator.meals_replaced(&high));
        }
    }
}
