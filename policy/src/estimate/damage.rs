//! Heuristic damage and threat estimates
//!
//! The numbers rank actions; they do not predict literal HP loss. A 90 base
//! power neutral move between equal stats lands at 0.45, or 0.675 with STAB.

use counterplay_battle::{effectiveness, Move, MoveCategory, Stat, Unit};

use crate::kits::MoveKits;
use crate::threats::ThreatTable;

/// Base power the formula is normalized against
pub const REFERENCE_POWER: f32 = 90.0;
pub const DAMAGE_SCALE: f32 = 0.45;
pub const STAB: f32 = 1.5;
pub const MIN_STAT_RATIO: f32 = 0.1;

/// Same-type attack bonus for `attacker` using `mv`
pub fn stab(attacker: &Unit, mv: &Move) -> f32 {
    match mv.move_type {
        Some(t) if attacker.has_type(t) => STAB,
        _ => 1.0,
    }
}

/// Effectiveness of `mv` against `defender`, airborne-aware
pub fn move_effectiveness(mv: &Move, defender: &Unit) -> f32 {
    effectiveness(mv.move_type, &defender.types, defender.is_grounded())
}

/// Expected fraction of `defender`'s HP that `mv` removes, in [0, 1]
///
/// Status moves and moves the defender is immune to score 0.
pub fn expected_damage_fraction(attacker: &Unit, defender: &Unit, mv: &Move) -> f32 {
    if !mv.is_damaging() {
        return 0.0;
    }
    let eff = move_effectiveness(mv, defender);
    if eff == 0.0 {
        return 0.0;
    }

    let (attack, defense) = match mv.category {
        MoveCategory::Special => (Stat::Spa, Stat::Spd),
        _ => (Stat::Atk, Stat::Def),
    };
    let ratio = (attacker.stat(attack) / defender.stat(defense).max(1.0)).max(MIN_STAT_RATIO);

    let raw = f32::from(mv.base_power) / REFERENCE_POWER
        * DAMAGE_SCALE
        * stab(attacker, mv)
        * eff
        * ratio
        * mv.hit_chance();
    raw.clamp(0.0, 1.0)
}

/// Where an arsenal's attacks came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Revealed moves
    Known,
    /// A kit on file (threat table or teammate kit)
    Kit,
    /// One 90 base power move per own type
    Generic,
    Empty,
}

/// The attacks a unit is assumed to have, plus any other moves on record
#[derive(Debug, Clone, PartialEq)]
pub struct Arsenal {
    pub tier: Tier,
    pub attacks: Vec<Move>,
    /// Every move on record, damaging or not
    pub moves: Vec<Move>,
}

impl Arsenal {
    /// Resolve attacks as: known -> kit -> generic same-type -> nothing
    pub fn resolve(unit: &Unit, kit: Vec<Move>) -> Self {
        let mut moves = unit.moves.clone();
        for m in kit.iter() {
            if !moves.iter().any(|known| known.id == m.id) {
                moves.push(m.clone());
            }
        }

        let known: Vec<Move> = unit.moves.iter().filter(|m| m.is_damaging()).cloned().collect();
        if !known.is_empty() {
            return Self { tier: Tier::Known, attacks: known, moves };
        }

        let kit: Vec<Move> = kit.into_iter().filter(|m| m.is_damaging()).collect();
        if !kit.is_empty() {
            return Self { tier: Tier::Kit, attacks: kit, moves };
        }

        let generic = generic_attacks(unit);
        let tier = if generic.is_empty() { Tier::Empty } else { Tier::Generic };
        Self { tier, attacks: generic, moves }
    }

    /// Opponent attacks: revealed moves, then the threat table's likely kit
    pub fn of_opponent(unit: &Unit, threats: &ThreatTable) -> Self {
        Self::resolve(unit, threats.likely_moves(unit))
    }

    /// Teammate attacks: revealed moves, then the teammate kit table
    pub fn of_teammate(unit: &Unit, kits: &MoveKits) -> Self {
        Self::resolve(unit, kits.kit_for(unit))
    }

    /// Whether any move on record satisfies `pred`
    pub fn has(&self, pred: impl Fn(&Move) -> bool) -> bool {
        self.moves.iter().chain(self.attacks.iter()).any(pred)
    }
}

/// One generic attack per type, in the unit's stronger category
pub fn generic_attacks(unit: &Unit) -> Vec<Move> {
    let category = if unit.base_stats.leans_physical() {
        MoveCategory::Physical
    } else {
        MoveCategory::Special
    };
    unit.types.iter().map(|t| Move::generic(*t, category)).collect()
}

/// Largest expected hit `attacker` can land on `defender` with `attacks`
pub fn worst_expected_hit(defender: &Unit, attacker: &Unit, attacks: &[Move]) -> f32 {
    attacks
        .iter()
        .map(|m| expected_damage_fraction(attacker, defender, m))
        .fold(0.0, f32::max)
}

/// Largest expected hit `unit` can land on `opponent` with `attacks`
pub fn best_offense(unit: &Unit, opponent: &Unit, attacks: &[Move]) -> f32 {
    worst_expected_hit(opponent, unit, attacks)
}
