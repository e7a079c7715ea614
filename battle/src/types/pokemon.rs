//! Unit (Pokemon) state as seen at a decision point

use super::moves::Move;
use super::pokemon_type::Type;
use super::stats::{BaseStats, Stat, StatStages};
use super::status::Status;
use crate::dex::to_id;

/// A combat-capable unit
///
/// Everything but the species may be unknown. Missing stats read as 0, missing
/// types as an empty slice and unrevealed moves as an empty list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Unit {
    /// Species name including forme ("Giratina-Origin")
    pub species: String,

    /// One or two elemental types
    pub types: Vec<Type>,

    pub base_stats: BaseStats,

    /// Stat stage modifiers
    pub boosts: StatStages,

    /// Current HP as a fraction of max, in [0, 1]
    pub hp: f32,

    pub status: Option<Status>,

    /// Held item, if revealed ("heavydutyboots")
    pub item: Option<String>,

    /// Ability, if revealed ("levitate")
    pub ability: Option<String>,

    /// Revealed moves
    pub moves: Vec<Move>,
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            species: String::new(),
            types: Vec::new(),
            base_stats: BaseStats::default(),
            boosts: StatStages::new(),
            hp: 1.0,
            status: None,
            item: None,
            ability: None,
            moves: Vec::new(),
        }
    }
}

impl Unit {
    /// Create a unit at full HP with the given typing
    pub fn new(species: impl Into<String>, types: &[Type]) -> Self {
        Self {
            species: species.into(),
            types: types.to_vec(),
            ..Default::default()
        }
    }

    pub fn with_stats(mut self, base_stats: BaseStats) -> Self {
        self.base_stats = base_stats;
        self
    }

    pub fn with_hp(mut self, hp: f32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_boosts(mut self, boosts: StatStages) -> Self {
        self.boosts = boosts;
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn with_moves(mut self, moves: impl IntoIterator<Item = Move>) -> Self {
        self.moves = moves.into_iter().collect();
        self
    }

    /// Normalized species id ("Ho-Oh" -> "hooh")
    pub fn id(&self) -> String {
        to_id(&self.species)
    }

    /// Whether this unit's species matches `identity` exactly or contains it
    /// as a fragment, ignoring case and punctuation
    pub fn matches(&self, identity: &str) -> bool {
        let needle = to_id(identity);
        !needle.is_empty() && self.id().contains(&needle)
    }

    /// HP fraction clamped to [0, 1]; NaN reads as fainted
    pub fn hp_fraction(&self) -> f32 {
        if self.hp.is_nan() {
            0.0
        } else {
            self.hp.clamp(0.0, 1.0)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp_fraction() > 0.0
    }

    pub fn has_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.ability.as_deref().is_some_and(|a| to_id(a) == to_id(ability))
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.item.as_deref().is_some_and(|i| to_id(i) == to_id(item))
    }

    /// Whether the unit takes Ground moves and ground-laid hazards
    pub fn is_grounded(&self) -> bool {
        !(self.has_type(Type::Flying) || self.has_ability("levitate") || self.has_item("airballoon"))
    }

    /// Whether the held item blocks entry hazards
    pub fn holds_boots(&self) -> bool {
        self.has_item("heavydutyboots")
    }

    pub fn is_asleep(&self) -> bool {
        self.status == Some(Status::Sleep)
    }

    /// Boost-adjusted value of a stat
    pub fn stat(&self, stat: Stat) -> f32 {
        self.base_stats.boosted(stat, &self.boosts)
    }

    /// Whether the unit has any positive stat stage
    pub fn is_boosted(&self) -> bool {
        self.boosts.has_positive()
    }
}
