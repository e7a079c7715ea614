//! Entry hazards

/// Entry hazards a side can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Hazard {
    StealthRock,
    Spikes,      // 1-3 layers
    ToxicSpikes, // 1-2 layers
    StickyWeb,
}

impl Hazard {
    /// Get maximum layers for this hazard
    pub fn max_layers(&self) -> u8 {
        match self {
            Hazard::Spikes => 3,
            Hazard::ToxicSpikes => 2,
            _ => 1,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Hazard::StealthRock => "Stealth Rock",
            Hazard::Spikes => "Spikes",
            Hazard::ToxicSpikes => "Toxic Spikes",
            Hazard::StickyWeb => "Sticky Web",
        }
    }
}

impl std::fmt::Display for Hazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazard_max_layers() {
        assert_eq!(Hazard::Spikes.max_layers(), 3);
        assert_eq!(Hazard::ToxicSpikes.max_layers(), 2);
        assert_eq!(Hazard::StealthRock.max_layers(), 1);
        assert_eq!(Hazard::StickyWeb.max_layers(), 1);
    }
}
