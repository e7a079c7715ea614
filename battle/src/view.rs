//! BattleView - the read-only snapshot handed to the decision engine

use crate::types::{Move, SideState, Unit};

/// One decision point of a singles battle, from our side's perspective
///
/// Produced fresh each turn by whatever tracks the live battle. The engine
/// only reads it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleView {
    /// Battle identifier (room id); keys any per-battle memory
    pub battle_id: String,

    /// Current turn number (0 = team preview / lead selection)
    pub turn: u32,

    /// Our active unit, if one is on the field
    pub active: Option<Unit>,

    /// The opposing active unit, if revealed
    pub opponent: Option<Unit>,

    /// Moves the active unit may use this turn
    pub legal_moves: Vec<Move>,

    /// Bench units that may be switched in
    pub switches: Vec<Unit>,

    /// Hazards on our side
    pub own_side: SideState,

    /// Hazards on the opposing side
    pub opponent_side: SideState,

    /// We must pick a replacement (lead selection or a fainted active)
    pub force_switch: bool,

    /// The active unit cannot switch out voluntarily
    pub trapped: bool,

    /// Opposing species revealed at team preview
    pub opponent_preview: Vec<String>,
}

impl BattleView {
    /// Create an empty view for a battle at the given turn
    pub fn new(battle_id: impl Into<String>, turn: u32) -> Self {
        Self {
            battle_id: battle_id.into(),
            turn,
            ..Default::default()
        }
    }

    /// Moves that may be chosen now (none during a forced replacement)
    pub fn usable_moves(&self) -> &[Move] {
        if self.force_switch {
            &[]
        } else {
            &self.legal_moves
        }
    }

    /// Whether switching is allowed at all this decision
    pub fn can_switch(&self) -> bool {
        self.force_switch || !self.trapped
    }

    /// Living bench units that may be switched in now
    pub fn available_switches(&self) -> impl Iterator<Item = &Unit> + '_ {
        let allowed = self.can_switch();
        let active = self.active.as_ref().map(|a| a.id());
        self.switches
            .iter()
            .filter(move |u| allowed && u.is_alive() && active.as_deref() != Some(u.id().as_str()))
    }

    pub fn usable_move(&self, id: &str) -> Option<&Move> {
        self.usable_moves().iter().find(|m| m.id == id)
    }

    pub fn available_switch(&self, species: &str) -> Option<&Unit> {
        self.available_switches().find(|u| u.species == species)
    }

    /// Whether at least one move or switch is legal
    pub fn has_legal_action(&self) -> bool {
        !self.usable_moves().is_empty() || self.available_switches().next().is_some()
    }

    /// The opposing active unit, when it is on the field and identified
    pub fn opponent_revealed(&self) -> Option<&Unit> {
        self.opponent.as_ref().filter(|o| !o.species.is_empty())
    }
}
