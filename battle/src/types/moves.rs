//! Move descriptions as the decision engine sees them

use super::hazard::Hazard;
use super::pokemon_type::Type;
use super::status::Status;

/// Damage category of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MoveCategory {
    Physical,
    Special,
    #[default]
    Status,
}

/// How much a healing move restores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HealKind {
    /// Restores to full (Rest)
    Full,
    /// Restores roughly half
    Partial,
}

impl HealKind {
    /// HP fraction after using the heal from `hp`
    pub fn restored_from(&self, hp: f32) -> f32 {
        match self {
            HealKind::Full => 1.0,
            HealKind::Partial => (hp + 0.5).min(1.0),
        }
    }
}

/// Special handling attached to a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MoveTag {
    Heal(HealKind),
    /// Phazes the target out (Whirlwind, Dragon Tail)
    ForcesSwitch,
    /// Resets every stat stage on the field (Haze, Clear Smog)
    ClearsBoosts,
    BoostsSelf,
    SetsHazard(Hazard),
    RemovesHazards,
    InflictsStatus(Status),
    /// Usable while asleep (Sleep Talk)
    UsableAsleep,
}

/// A move: identity, element, category, power, accuracy, priority and tags
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Move {
    /// Normalized move id ("dragontail")
    pub id: String,

    /// Element, `None` when untyped or unknown
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub move_type: Option<Type>,

    pub category: MoveCategory,

    /// 0 for status moves
    pub base_power: u16,

    /// Hit chance in (0, 1]
    pub accuracy: f32,

    pub priority: i8,

    /// Average number of strikes (1 for single-hit moves)
    pub expected_hits: f32,

    pub tags: Vec<MoveTag>,
}

impl Default for Move {
    fn default() -> Self {
        Self {
            id: String::new(),
            move_type: None,
            category: MoveCategory::Status,
            base_power: 0,
            accuracy: 1.0,
            priority: 0,
            expected_hits: 1.0,
            tags: Vec::new(),
        }
    }
}

impl Move {
    /// Create a damaging move
    pub fn new(id: impl Into<String>, move_type: Type, category: MoveCategory, base_power: u16) -> Self {
        Self {
            id: id.into(),
            move_type: Some(move_type),
            category,
            base_power,
            ..Default::default()
        }
    }

    /// Create a status move
    pub fn status(id: impl Into<String>, move_type: Type) -> Self {
        Self {
            id: id.into(),
            move_type: Some(move_type),
            ..Default::default()
        }
    }

    /// Stand-in for an unrevealed attack: 90 base power of the given element
    pub fn generic(move_type: Type, category: MoveCategory) -> Self {
        Self::new(
            format!("generic{}", move_type.as_str().to_lowercase()),
            move_type,
            category,
            90,
        )
    }

    pub fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_hits(mut self, expected_hits: f32) -> Self {
        self.expected_hits = expected_hits;
        self
    }

    pub fn with_tag(mut self, tag: MoveTag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Whether the move deals direct damage
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.base_power > 0
    }

    /// Accuracy as a probability; missing or out-of-range values read as a sure hit
    pub fn hit_chance(&self) -> f32 {
        if self.accuracy > 0.0 && self.accuracy <= 1.0 {
            self.accuracy
        } else {
            1.0
        }
    }

    /// Strikes per use, never below one
    pub fn hits(&self) -> f32 {
        if self.expected_hits >= 1.0 {
            self.expected_hits
        } else {
            1.0
        }
    }

    pub fn has_tag(&self, tag: MoveTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn heal_kind(&self) -> Option<HealKind> {
        self.tags.iter().find_map(|t| match t {
            MoveTag::Heal(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn hazard(&self) -> Option<Hazard> {
        self.tags.iter().find_map(|t| match t {
            MoveTag::SetsHazard(h) => Some(*h),
            _ => None,
        })
    }

    pub fn inflicted_status(&self) -> Option<Status> {
        self.tags.iter().find_map(|t| match t {
            MoveTag::InflictsStatus(s) => Some(*s),
            _ => None,
        })
    }

    /// Whether the move resets boosts, either by clearing them or by phazing
    pub fn resets_boosts(&self) -> bool {
        self.has_tag(MoveTag::ClearsBoosts) || self.has_tag(MoveTag::ForcesSwitch)
    }
}
