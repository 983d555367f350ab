//! # Crave Search
//!
//! Turns free text into a catalog record.
//!
//! - [`QueryResolver`] is the deterministic, first-match-wins lookup used for results.
//! - [`Suggester`] ranks "did you mean" candidates when the resolver finds nothing.

mod fuzzy;
mod resolver;

pub use fuzzy::{Suggestion, Suggester};
pub use resolver::{normalize_query, MatchSource, QueryMatch, QueryResolver, Resolution};
