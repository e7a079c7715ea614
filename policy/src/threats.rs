//! Per-opponent override data
//!
//! Hand-tuned matchup knowledge lives here as data: which bench units answer
//! a given opponent, which opponents apply heavy pressure, and which moves an
//! opponent is likely to carry before they are revealed.

use counterplay_battle::dex::{self, to_id};
use counterplay_battle::{Move, Unit};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Threat table shipped with the crate, in the [`ThreatTable::from_json`] format
pub const BUILTIN_THREATS: &str = include_str!("../data/threats.json");

/// What is known about one opposing identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatEntry {
    /// Opposing identity or identity fragment ("Zacian" also covers "Zacian-Crowned")
    pub identity: String,
    /// Preferred bench answers, best first (identity fragments)
    pub answers: Vec<String>,
    pub high_pressure: bool,
    /// Move ids, optionally `id:type` for user-dependent elements
    pub likely_moves: Vec<String>,
}

/// Opponent identity -> override data
///
/// Lookup tries an exact identity match first, then the first entry (in
/// insertion order) whose identity is a fragment of the opponent's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatTable {
    entries: Vec<ThreatEntry>,
}

impl ThreatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<ThreatEntry> = serde_json::from_str(json)?;
        if let Some(blank) = entries.iter().position(|e| to_id(&e.identity).is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "threat entry {} has an empty identity",
                blank
            )));
        }
        Ok(Self { entries })
    }

    /// The table in [`BUILTIN_THREATS`]
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_THREATS)
    }

    /// Add an entry; later entries never shadow earlier ones on fragment matches
    pub fn insert(&mut self, entry: ThreatEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for an opposing identity
    pub fn lookup(&self, identity: &str) -> Option<&ThreatEntry> {
        let id = to_id(identity);
        if id.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| to_id(&e.identity) == id)
            .or_else(|| self.entries.iter().find(|e| id.contains(&to_id(&e.identity))))
    }

    /// Preferred answers to `opponent`, best first
    pub fn answers(&self, opponent: &Unit) -> &[String] {
        self.lookup(&opponent.species)
            .map(|e| e.answers.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_high_pressure(&self, opponent: &Unit) -> bool {
        self.lookup(&opponent.species).is_some_and(|e| e.high_pressure)
    }

    /// Likely moves of `opponent`, resolved through the move dex
    ///
    /// Ids the dex does not know are skipped.
    pub fn likely_moves(&self, opponent: &Unit) -> Vec<Move> {
        self.lookup(&opponent.species)
            .map(|e| e.likely_moves.iter().filter_map(|m| dex::resolve(m)).collect())
            .unwrap_or_default()
    }
}
