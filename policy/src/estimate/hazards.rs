//! Entry hazard chip and status on switch-in

use counterplay_battle::{effectiveness, Hazard, SideState, Type, Unit};

pub const ROCK_BASE: f32 = 0.125;

/// Spike chip by layer count (index 0 = no layers)
pub const SPIKES_BY_LAYER: [f32; 4] = [0.0, 1.0 / 8.0, 1.0 / 6.0, 1.0 / 4.0];

const POISON_PENALTY: f32 = 0.05;
const BAD_POISON_PENALTY: f32 = 0.10;
const ABSORB_CREDIT: f32 = 0.05;

/// Status consequences of switching in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryStatus {
    pub poisoned: bool,
    pub badly_poisoned: bool,
    /// The candidate clears Toxic Spikes on entry
    pub absorbed: bool,
}

/// HP fraction lost to hazards when `candidate` switches in, in [0, 1]
pub fn entry_cost(side: &SideState, candidate: &Unit) -> f32 {
    if candidate.holds_boots() {
        return 0.0;
    }

    let mut cost = 0.0;
    if side.has(Hazard::StealthRock) {
        cost += ROCK_BASE * effectiveness(Some(Type::Rock), &candidate.types, true);
    }
    if candidate.is_grounded() {
        let layers = usize::from(side.layers(Hazard::Spikes)).min(SPIKES_BY_LAYER.len() - 1);
        cost += SPIKES_BY_LAYER[layers];
    }
    cost.clamp(0.0, 1.0)
}

/// Toxic Spikes outcome for `candidate`
pub fn status_risk(side: &SideState, candidate: &Unit) -> EntryStatus {
    let layers = side.layers(Hazard::ToxicSpikes);
    if layers == 0
        || !candidate.is_grounded()
        || candidate.holds_boots()
        || candidate.has_type(Type::Steel)
    {
        return EntryStatus::default();
    }
    if candidate.has_type(Type::Poison) {
        return EntryStatus {
            absorbed: true,
            ..Default::default()
        };
    }
    // Already statused units cannot be poisoned
    if candidate.status.is_some() {
        return EntryStatus::default();
    }
    EntryStatus {
        poisoned: layers == 1,
        badly_poisoned: layers >= 2,
        absorbed: false,
    }
}

/// Entry cost plus a small charge for entry poison, minus a credit for absorbing
pub fn hazard_penalty(side: &SideState, candidate: &Unit) -> f32 {
    let risk = status_risk(side, candidate);
    let mut penalty = entry_cost(side, candidate);
    if risk.badly_poisoned {
        penalty += BAD_POISON_PENALTY;
    } else if risk.poisoned {
        penalty += POISON_PENALTY;
    }
    if risk.absorbed {
        penalty -= ABSORB_CREDIT;
    }
    penalty
}

/// Whether hazards alone would knock `candidate` out on entry
pub fn would_faint_on_entry(side: &SideState, candidate: &Unit) -> bool {
    candidate.hp_fraction() <= entry_cost(side, candidate)
}
