//! Battle domain types for the counterplay decision engine.
//!
//! This crate provides the shared vocabulary the policy reasons with: types
//! and the effectiveness chart, stats and stages, statuses, hazards, units,
//! moves and the per-turn [`BattleView`] snapshot.
//!
//! # Overview
//!
//! ```text
//! battle-state tracker (external)
//!        │  BattleView
//!        ▼
//! counterplay-battle (domain types + queries) ← THIS CRATE
//!        │
//!        ▼
//! counterplay-policy (estimators, scorer, state machine)
//! ```
//!
//! # Main Types
//!
//! - [`Type`] - Elemental types with the effectiveness chart; [`effectiveness`]
//!   adds the Ground-into-airborne override
//! - [`StatStages`], [`BaseStats`] - Stat profile and stage multipliers
//! - [`Status`] - Non-volatile status conditions
//! - [`Hazard`], [`SideState`] - Entry hazards and their layer caps
//! - [`Move`], [`MoveTag`] - Moves with category, power, accuracy and tags
//! - [`Unit`] - A unit as observed at a decision point
//! - [`BattleView`] - Everything the engine reads for one decision
//!
//! The [`dex`] module resolves move ids to [`Move`]s and [`query`] answers
//! type-matchup questions.
//!
//! # Example Usage
//!
//! ```
//! use counterplay_battle::{effectiveness, Type, Unit};
//!
//! let gira = Unit::new("Giratina-Origin", &[Type::Ghost, Type::Dragon]).with_ability("Levitate");
//! assert_eq!(effectiveness(Some(Type::Ground), &gira.types, gira.is_grounded()), 0.0);
//! assert_eq!(effectiveness(Some(Type::Dragon), &gira.types, gira.is_grounded()), 2.0);
//! ```

pub mod dex;
pub mod query;
pub mod types;
mod view;

// Re-export main types at crate root for convenience
pub use types::{
    effectiveness, BaseStats, Hazard, HealKind, Move, MoveCategory, MoveTag, SideState, Stat,
    StatStages, Status, Type, Unit, TYPE_CHART,
};
pub use view::BattleView;
