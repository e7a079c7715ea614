//! Matchup-driven turn decisions for singles battles.
//!
//! Given a [`BattleView`](counterplay_battle::BattleView), the [`Policy`]
//! picks exactly one action: use a move or switch to a bench unit. It is a
//! pure function of the view plus a little per-battle memory (the turn of the
//! last switch), so the same view always produces the same action.
//!
//! # Overview
//!
//! ```text
//! BattleView ──► estimate (damage, hazards)
//!                    │
//!                    ▼
//!                Scorer (counter score, switch gain)
//!                    │
//!                    ▼
//!                Policy (priority state machine) ──► Action ──► ActionSink
//! ```
//!
//! # Main Types
//!
//! - [`Policy`] - Runs the state machine and keeps per-battle memory
//! - [`PolicyConfig`], [`ScoreWeights`] - Thresholds and scoring weights
//! - [`ThreatTable`] - Known threats, their answers and likely moves
//! - [`MoveKits`] - Assumed moves for our own units
//! - [`Scorer`], [`Matchup`] - Counter scoring
//! - [`Action`], [`ActionSink`] - The chosen action and where it is sent
//!
//! # Example Usage
//!
//! ```
//! use counterplay_battle::{BattleView, Move, MoveCategory, Type, Unit};
//! use counterplay_policy::{Policy, PolicyConfig, MoveKits, ThreatTable};
//!
//! let threats = ThreatTable::builtin().unwrap();
//! let mut policy = Policy::new(PolicyConfig::default(), threats, MoveKits::default());
//!
//! let mut view = BattleView::new("battle-gen9ubers-1", 3);
//! view.active = Some(Unit::new("Ho-Oh", &[Type::Fire, Type::Flying]));
//! view.opponent = Some(Unit::new("Ferrothorn", &[Type::Grass, Type::Steel]));
//! view.legal_moves = vec![
//!     Move::new("sacredfire", Type::Fire, MoveCategory::Physical, 100),
//!     Move::new("bravebird", Type::Flying, MoveCategory::Physical, 120),
//! ];
//!
//! let action = policy.choose(&view).unwrap();
//! assert_eq!(action.to_choice(), "move sacredfire");
//! ```

mod action;
mod config;
mod error;
pub mod estimate;
mod kits;
mod matchup;
mod policy;
mod threats;

pub use action::{Action, ActionSink};
pub use config::{PolicyConfig, ScoreWeights};
pub use error::{ConfigError, PolicyError};
pub use kits::{Kit, MoveKits};
pub use matchup::{Matchup, Scorer, FAINT_ON_ENTRY_SCORE};
pub use policy::{Decision, Policy, State};
pub use threats::{ThreatEntry, ThreatTable, BUILTIN_THREATS};
