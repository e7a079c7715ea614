//! Query helpers for matchup evaluation
//!
//! Type-level questions the scorer asks about a unit and the elements it
//! faces: resistance points, immunities and the distinct attacking elements
//! of a move list.

mod matchup;

pub use matchup::{attack_types, is_immune_to, resistance_points};
