//! Side (player) hazard state

use std::collections::BTreeMap;

use super::hazard::Hazard;

/// Hazards laid on one player's side of the battle
///
/// Layer counts never exceed [`Hazard::max_layers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<Hazard, u8>", into = "BTreeMap<Hazard, u8>")
)]
pub struct SideState {
    hazards: BTreeMap<Hazard, u8>,
}

impl SideState {
    /// Create a side with no hazards
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a side from explicit layer counts, clamping each to its cap
    pub fn with_layers(layers: impl IntoIterator<Item = (Hazard, u8)>) -> Self {
        let mut side = Self::new();
        for (hazard, count) in layers {
            side.set_layers(hazard, count);
        }
        side
    }

    /// Get layers for a hazard (0 if not present)
    pub fn layers(&self, hazard: Hazard) -> u8 {
        self.hazards.get(&hazard).copied().unwrap_or(0)
    }

    /// Check if side has a hazard
    pub fn has(&self, hazard: Hazard) -> bool {
        self.layers(hazard) > 0
    }

    /// Set the layer count for a hazard (clamped to its cap, 0 removes it)
    pub fn set_layers(&mut self, hazard: Hazard, count: u8) {
        let count = count.min(hazard.max_layers());
        if count == 0 {
            self.hazards.remove(&hazard);
        } else {
            self.hazards.insert(hazard, count);
        }
    }

    /// Check whether another layer of `hazard` can still be laid
    pub fn is_capped(&self, hazard: Hazard) -> bool {
        self.layers(hazard) >= hazard.max_layers()
    }

    /// Check if any hazards are set
    pub fn has_hazards(&self) -> bool {
        !self.hazards.is_empty()
    }
}

impl From<BTreeMap<Hazard, u8>> for SideState {
    fn from(layers: BTreeMap<Hazard, u8>) -> Self {
        Self::with_layers(layers)
    }
}

impl From<SideState> for BTreeMap<Hazard, u8> {
    fn from(side: SideState) -> Self {
        side.hazards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_side_is_clear() {
        let side = SideState::new();
        assert!(!side.has_hazards());
        assert_eq!(side.layers(Hazard::Spikes), 0);
    }

    #[test]
    fn test_side_layers() {
        let mut side = SideState::new();

        side.set_layers(Hazard::StealthRock, 1);
        assert!(side.has(Hazard::StealthRock));
        assert!(side.is_capped(Hazard::StealthRock));

        side.set_layers(Hazard::Spikes, 2);
        assert!(!side.is_capped(Hazard::Spikes));
        side.set_layers(Hazard::Spikes, 3);
        assert!(side.is_capped(Hazard::Spikes));
        assert_eq!(side.layers(Hazard::Spikes), 3);

        side.set_layers(Hazard::Spikes, 0);
        assert!(!side.has(Hazard::Spikes));
        assert!(side.has_hazards());
    }

    #[test]
    fn test_with_layers_clamps_to_cap() {
        let side = SideState::with_layers([(Hazard::ToxicSpikes, 5), (Hazard::Spikes, 0)]);
        assert_eq!(side.layers(Hazard::ToxicSpikes), 2);
        assert!(!side.has(Hazard::Spikes));
        assert_eq!(BTreeMap::from(side), BTreeMap::from([(Hazard::ToxicSpikes, 2)]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_clamps_layers() {
        let side: SideState = serde_json::from_str(r#"{"spikes": 7, "stealth_rock": 1}"#).unwrap();
        assert_eq!(side.layers(Hazard::Spikes), 3);
        assert!(side.has(Hazard::StealthRock));
    }
}
