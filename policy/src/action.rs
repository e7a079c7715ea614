//! Chosen actions and where they go

use std::fmt;

use anyhow::Result;

/// One choice for one turn
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "lowercase")]
pub enum Action {
    /// Use a move by id
    Move(String),
    /// Switch to a bench unit by species
    Switch(String),
}

impl Action {
    pub fn target(&self) -> &str {
        match self {
            Self::Move(id) | Self::Switch(id) => id,
        }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switch(_))
    }

    /// Render as battle choice text: `move ID` or `switch SPECIES`
    pub fn to_choice(&self) -> String {
        match self {
            Self::Move(id) => format!("move {}", id),
            Self::Switch(species) => format!("switch {}", species),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_choice())
    }
}

/// Receiver of chosen actions
///
/// The surrounding agent implements this to forward choices to the game
/// server. Transport failures surface as errors; the policy never retries.
///
/// # Example
///
/// ```ignore
/// struct ShowdownSink {
///     handle: ClientHandle,
/// }
///
/// impl ActionSink for ShowdownSink {
///     fn submit(&mut self, battle_id: &str, action: &Action) -> anyhow::Result<()> {
///         self.handle.choose(battle_id, &action.to_choice(), None)
///     }
/// }
/// ```
pub trait ActionSink {
    fn submit(&mut self, battle_id: &str, action: &Action) -> Result<()>;
}

/// Collects submissions in order
impl ActionSink for Vec<(String, Action)> {
    fn submit(&mut self, battle_id: &str, action: &Action) -> Result<()> {
        self.push((battle_id.to_string(), action.clone()));
        Ok(())
    }
}
