//! # Crave Progress
//!
//! Gamification over a user's activity counters.
//!
//! ## Architecture
//!
//! ```text
//! UserActivityCounters
//!     │
//!     ├──> ProgressEvaluator (over a validated TierLadder)
//!     │      ├─ current tier: highest tier whose thresholds are all met
//!     │      ├─ progress: bottleneck counter toward the next tier
//!     │      └─ level up: tier newly reached between two snapshots
//!     │
//!     └──> ImpactEstimator
//!            └─ meals replaced -> CO2, water, land, animals
//! ```
//!
//! Both components are pure functions of their inputs.

mod counters;
mod error;
mod evaluator;
mod facts;
mod impact;
mod loader;
mod tier;

pub use counters::{Counter, UserActivityCounters};
pub use error::{ProgressError, Result};
pub use evaluator::{ProgressEvaluator, ProgressReport};
pub use facts::{rotate_by_day, AnimalFact, EnvironmentalFact};
pub use impact::{ImpactEstimate, ImpactEstimator};
pub use loader::{Gamification, GAMIFICATION_SCHEMA_VERSION};
pub use tier::{AchievementTier, AnimalFriend, ImpactDisplay, TierLadder};
