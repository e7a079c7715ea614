//! Known movesets of our own team, used before a teammate reveals its moves

use counterplay_battle::dex::{self, to_id};
use counterplay_battle::{Move, Unit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kit {
    /// Identity fragment ("Giratina" covers "Giratina-Origin")
    pub identity: String,
    /// Move ids, optionally `id:type`
    pub moves: Vec<String>,
}

/// Identity -> move ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveKits {
    kits: Vec<Kit>,
}

impl Default for MoveKits {
    fn default() -> Self {
        let kit = |identity: &str, moves: &[&str]| Kit {
            identity: identity.to_string(),
            moves: moves.iter().map(|m| m.to_string()).collect(),
        };
        Self {
            kits: vec![
                kit("Clodsire", &["earthquake", "spikes", "recover", "haze"]),
                kit("Giratina", &["defog", "poltergeist", "dragontail", "willowisp"]),
                kit("Ho-Oh", &["sacredfire", "bravebird", "recover", "whirlwind"]),
                kit("Dondozo", &["liquidation", "curse", "rest", "sleeptalk"]),
                kit("Arceus-Fairy", &["calmmind", "judgment:fairy", "recover", "earthpower"]),
                kit("Eternatus", &["cosmicpower", "recover", "flamethrower", "dragontail"]),
            ],
        }
    }
}

impl MoveKits {
    /// A table with no kits
    pub fn empty() -> Self {
        Self { kits: Vec::new() }
    }

    pub fn insert(&mut self, identity: impl Into<String>, moves: impl IntoIterator<Item = String>) {
        self.kits.push(Kit {
            identity: identity.into(),
            moves: moves.into_iter().collect(),
        });
    }

    /// Moves on file for `unit`: exact identity first, then the first fragment match
    pub fn kit_for(&self, unit: &Unit) -> Vec<Move> {
        let id = unit.id();
        if id.is_empty() {
            return Vec::new();
        }
        self.kits
            .iter()
            .find(|k| to_id(&k.identity) == id)
            .or_else(|| self.kits.iter().find(|k| unit.matches(&k.identity)))
            .map(|k| k.moves.iter().filter_map(|m| dex::resolve(m)).collect())
            .unwrap_or_default()
    }
}
