//! Tunable knobs for the estimators, scorer and state machine

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Relative weights of the counter score terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub resist: f32,
    pub immunity: f32,
    pub offense: f32,
    pub worst_hit: f32,
    pub hazard: f32,
    pub hp: f32,
    pub utility: f32,
    /// Subtracted when best offense is under `low_offense_floor`
    pub low_offense_penalty: f32,
    pub low_offense_floor: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            resist: 1.10,
            immunity: 0.90,
            offense: 0.72,
            worst_hit: 0.65,
            hazard: 1.00,
            hp: 0.12,
            utility: 0.30,
            low_offense_penalty: 0.70,
            low_offense_floor: 0.15,
        }
    }
}

/// Policy configuration
///
/// Every field has a default, so a JSON override only needs the knobs it
/// changes:
///
/// ```
/// use counterplay_policy::PolicyConfig;
///
/// let config = PolicyConfig::from_json(r#"{"switch_margin": 0.5}"#).unwrap();
/// assert_eq!(config.switch_margin, 0.5);
/// assert_eq!(config.heal_threshold, 0.40);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Heal when HP is at or below this fraction
    pub heal_threshold: f32,
    /// Also heal when the opponent's worst hit reaches this share of current HP
    pub near_lethal_ratio: f32,
    /// An expected hit at or above this fraction is "chunky"
    pub chunky_hit: f32,
    /// Best offense below this counts as having no offense
    pub offense_floor: f32,
    /// Resistance points at or below this are a bad defensive matchup
    pub bad_resist_points: f32,
    /// Minimum switch gain for a proactive switch
    pub switch_margin: f32,
    /// The candidate must take at least this much less from the worst hit
    pub safety_pad: f32,
    /// Resistance point improvement that justifies a switch on its own
    pub resist_gain_threshold: f32,
    /// Relative score difference under which attacks count as tied
    pub attack_tie_epsilon: f32,
    /// Turns after a switch during which proactive switches are suppressed
    pub switch_cooldown_turns: u32,
    /// Bonus added to a lethal attack's score
    pub ko_nudge: f32,
    /// Threat answers below this HP are not sent in
    pub min_answer_hp: f32,
    /// Matchup score at or below which a pivot is taken without a good attack
    pub last_resort_matchup: f32,
    /// HP at or below which a pivot is taken without a good attack
    pub critical_hp: f32,
    /// Minimum HP to spend a turn laying hazards or inflicting status
    pub utility_min_hp: f32,
    /// Utility moves are only used while the opponent's worst hit stays under this
    pub utility_safe_hit: f32,
    /// Minimum HP to spend a turn removing hazards
    pub hazard_removal_min_hp: f32,
    /// Multiplier for attacks in the unit's stronger attacking category
    pub category_bias: f32,
    /// Lead to send when nothing is known about the opponent
    pub preferred_lead: Option<String>,
    /// Fallback lead order
    pub lead_priority: Vec<String>,
    pub weights: ScoreWeights,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            heal_threshold: 0.40,
            near_lethal_ratio: 0.85,
            chunky_hit: 0.35,
            offense_floor: 0.20,
            bad_resist_points: -1.5,
            switch_margin: 0.35,
            safety_pad: 0.10,
            resist_gain_threshold: 2.0,
            attack_tie_epsilon: 0.02,
            switch_cooldown_turns: 1,
            ko_nudge: 0.4,
            min_answer_hp: 0.40,
            last_resort_matchup: -1.0,
            critical_hp: 0.30,
            utility_min_hp: 0.70,
            utility_safe_hit: 0.25,
            hazard_removal_min_hp: 0.40,
            category_bias: 1.1,
            preferred_lead: None,
            lead_priority: Vec::new(),
            weights: ScoreWeights::default(),
        }
    }
}

impl PolicyConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that fractions lie in [0, 1] and margins are non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("heal_threshold", self.heal_threshold),
            ("near_lethal_ratio", self.near_lethal_ratio),
            ("chunky_hit", self.chunky_hit),
            ("offense_floor", self.offense_floor),
            ("min_answer_hp", self.min_answer_hp),
            ("critical_hp", self.critical_hp),
            ("utility_min_hp", self.utility_min_hp),
            ("utility_safe_hit", self.utility_safe_hit),
            ("hazard_removal_min_hp", self.hazard_removal_min_hp),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("switch_margin", self.switch_margin),
            ("safety_pad", self.safety_pad),
            ("resist_gain_threshold", self.resist_gain_threshold),
            ("attack_tie_epsilon", self.attack_tie_epsilon),
            ("ko_nudge", self.ko_nudge),
            ("category_bias", self.category_bias),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
