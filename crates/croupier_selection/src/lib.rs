//! Recency-weighted image selection.
//!
//! Candidates are filtered by the search tokens, weighted by how long ago
//! they were last shown, and drawn at random in proportion to that weight.
//! Images that have never been shown carry the largest weight, so the bot
//! favors fresh material without ever excluding recent picks entirely.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod draw;
mod engine;
mod filter;
mod weight;

pub use draw::{cumulative_weights, draw_index, weighted_pick};
pub use engine::SelectionEngine;
pub use filter::{DEFAULT_WILDCARDS, filter_items, is_wildcard};
pub use weight::{DECAY_DIVISOR, MAX_DAYS, NEVER_SHOWN_WEIGHT, recency_weight};
