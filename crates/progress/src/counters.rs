use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of one activity counter, as used in tier requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    Searches,
    Favorites,
    RecipesViewed,
    ReviewsWritten,
    DaysActive,
}

impl Counter {
    pub const ALL: [Self; 5] = [
        Self::Searches,
        Self::Favorites,
        Self::RecipesViewed,
        Self::ReviewsWritten,
        Self::DaysActive,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Searches => "searches",
            Self::Favorites => "favorites",
            Self::RecipesViewed => "recipes_viewed",
            Self::ReviewsWritten => "reviews_written",
            Self::DaysActive => "days_active",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running activity totals for one user. Missing fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserActivityCounters {
    pub searches: u32,
    pub favorites: u32,
    pub recipes_viewed: u32,
    pub reviews_written: u32,
    pub days_active: u32,
}

impl UserActivityCounters {
    #[must_use]
    pub const fn get(&self, counter: Counter) -> u32 {
        match counter {
            Counter::Searches => self.searches,
            Counter::Favorites => self.favorites,
            Counter::RecipesViewed => self.recipes_viewed,
            Counter::ReviewsWritten => self.reviews_written,
            Counter::DaysActive => self.days_active,
        }
    }

    /// Adds `amount` to one counter, saturating at `u32::MAX`.
    pub fn record(&mut self, counter: Counter, amount: u32) {
        let slot = match counter {
            Counter::Searches => &mut self.searches,
            Counter::Favorites => &mut self.favorites,
            Counter::RecipesViewed => &mut self.recipes_viewed,
            Counter::ReviewsWritten => &mut self.reviews_written,
            Counter::DaysActive => &mut self.days_active,
        };
        *slot = slot.saturating_add(amount);
    }
}
