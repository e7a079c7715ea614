//! Pure estimators over a single snapshot: damage, threat and hazard cost

mod damage;
mod hazards;

pub use damage::{
    best_offense, expected_damage_fraction, generic_attacks, move_effectiveness, stab,
    worst_expected_hit, Arsenal, Tier, REFERENCE_POWER,
};
pub use hazards::{entry_cost, hazard_penalty, status_risk, would_faint_on_entry, EntryStatus};
