//! Counter scoring: how good is it to have a given unit in against an opponent

use counterplay_battle::query::{attack_types, is_immune_to, resistance_points};
use counterplay_battle::{effectiveness, SideState, Type, Unit};
use tracing::trace;

use crate::config::PolicyConfig;
use crate::estimate::{
    best_offense, hazard_penalty, would_faint_on_entry, worst_expected_hit, Arsenal,
};
use crate::kits::MoveKits;
use crate::threats::ThreatTable;

/// Score given to a candidate that hazards would knock out on entry
pub const FAINT_ON_ENTRY_SCORE: f32 = -1.0e6;

/// Every term of a counter score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matchup {
    pub resist_points: f32,
    /// 1 when some attacking element does nothing to the candidate
    pub immunity: f32,
    pub best_offense: f32,
    pub worst_hit: f32,
    pub hazard_penalty: f32,
    pub hp: f32,
    pub utility: f32,
    pub faints_on_entry: bool,
    pub score: f32,
}

/// Scores units against an opponent using the configured weights and tables
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    config: &'a PolicyConfig,
    threats: &'a ThreatTable,
    kits: &'a MoveKits,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a PolicyConfig, threats: &'a ThreatTable, kits: &'a MoveKits) -> Self {
        Self {
            config,
            threats,
            kits,
        }
    }

    /// Score `candidate` entering against `opponent` onto a side with `side` hazards
    pub fn evaluate(&self, candidate: &Unit, opponent: &Unit, side: &SideState) -> Matchup {
        let weights = &self.config.weights;
        let theirs = Arsenal::of_opponent(opponent, self.threats);
        let ours = Arsenal::of_teammate(candidate, self.kits);

        let grounded = candidate.is_grounded();
        let incoming = attack_types(&theirs.attacks);
        let resist_points: f32 = incoming
            .iter()
            .map(|t| resistance_points(effectiveness(Some(*t), &candidate.types, grounded)))
            .sum();
        let immunity = if incoming.iter().any(|t| is_immune_to(candidate, *t)) {
            1.0
        } else {
            0.0
        };

        let offense = best_offense(candidate, opponent, &ours.attacks);
        let worst_hit = worst_expected_hit(candidate, opponent, &theirs.attacks);
        let hazard = hazard_penalty(side, candidate);
        let hp = candidate.hp_fraction();

        let mut utility: f32 = 0.0;
        if opponent.is_boosted()
            && (candidate.has_ability("unaware") || ours.has(|m| m.resets_boosts()))
        {
            utility += 1.0;
        }
        if candidate.has_type(Type::Poison) && incoming.contains(&Type::Fairy) {
            utility += 0.5;
        }
        let utility = utility.min(1.0);

        let faints_on_entry = would_faint_on_entry(side, candidate);
        let score = if faints_on_entry {
            FAINT_ON_ENTRY_SCORE
        } else {
            let mut score = weights.resist * resist_points
                + weights.immunity * immunity
                + weights.offense * offense
                - weights.worst_hit * worst_hit
                - weights.hazard * hazard
                + weights.hp * hp
                + weights.utility * utility;
            if offense < weights.low_offense_floor {
                score -= weights.low_offense_penalty;
            }
            score
        };

        trace!(
            candidate = %candidate.species,
            opponent = %opponent.species,
            resist_points,
            offense,
            worst_hit,
            hazard,
            score,
            "Scored matchup"
        );

        Matchup {
            resist_points,
            immunity,
            best_offense: offense,
            worst_hit,
            hazard_penalty: hazard,
            hp,
            utility,
            faints_on_entry,
            score,
        }
    }

    pub fn counter_score(&self, candidate: &Unit, opponent: &Unit, side: &SideState) -> f32 {
        self.evaluate(candidate, opponent, side).score
    }

    /// The unit already on the field pays no entry cost
    pub fn active_matchup(&self, active: &Unit, opponent: &Unit) -> Matchup {
        self.evaluate(active, opponent, &SideState::new())
    }

    /// Improvement from switching `active` out for `candidate`, net of hazards
    pub fn switch_gain(&self, candidate: &Unit, active: &Unit, opponent: &Unit, side: &SideState) -> f32 {
        self.counter_score(candidate, opponent, side)
            - self.active_matchup(active, opponent).score
            - hazard_penalty(side, candidate)
    }

    /// Candidates that survive entry, best score first (input order breaks ties)
    pub fn rank<'u>(
        &self,
        candidates: impl IntoIterator<Item = &'u Unit>,
        opponent: &Unit,
        side: &SideState,
    ) -> Vec<(&'u Unit, Matchup)> {
        let mut ranked: Vec<(&Unit, Matchup)> = candidates
            .into_iter()
            .map(|c| (c, self.evaluate(c, opponent, side)))
            .filter(|(_, m)| !m.faints_on_entry)
            .collect();
        ranked.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
        ranked
    }

    pub fn best_counter<'u>(
        &self,
        candidates: impl IntoIterator<Item = &'u Unit>,
        opponent: &Unit,
        side: &SideState,
    ) -> Option<(&'u Unit, Matchup)> {
        self.rank(candidates, opponent, side).into_iter().next()
    }

    /// First threat-table answer to `opponent` among `candidates` that is
    /// healthy enough and survives entry
    pub fn preferred_answer<'u>(
        &self,
        candidates: impl IntoIterator<Item = &'u Unit> + Clone,
        opponent: &Unit,
        side: &SideState,
    ) -> Option<&'u Unit> {
        self.answer_from(self.threats.answers(opponent), candidates, side)
    }

    /// First unit in `answers` order that is present, healthy and survives entry
    pub fn answer_from<'u>(
        &self,
        answers: &[String],
        candidates: impl IntoIterator<Item = &'u Unit> + Clone,
        side: &SideState,
    ) -> Option<&'u Unit> {
        answers.iter().find_map(|answer| {
            candidates.clone().into_iter().find(|c| {
                c.matches(answer)
                    && c.hp_fraction() >= self.config.min_answer_hp
                    && !would_faint_on_entry(side, c)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counterplay_battle::{BaseStats, Hazard, Move, MoveCategory, StatStages};

    fn stats() -> BaseStats {
        BaseStats::new(100, 100, 100, 100, 100, 100)
    }

    fn fixtures() -> (PolicyConfig, ThreatTable, MoveKits) {
        (PolicyConfig::default(), ThreatTable::new(), MoveKits::empty())
    }

    #[test]
    fn test_resisting_unit_scores_higher() {
        let (config, threats, kits) = fixtures();
        let scorer = Scorer::new(&config, &threats, &kits);

        let opponent = Unit::new("Fighter", &[Type::Fighting]).with_stats(stats());
        let ghost = Unit::new("Ghost", &[Type::Ghost])
            .with_stats(stats())
            .with_moves([Move::new("shadowball", Type::Ghost, MoveCategory::Special, 80)]);
        let normal = Unit::new("Normal", &[Type::Normal])
            .with_stats(stats())
            .with_moves([Move::new("bodyslam", Type::Normal, MoveCategory::Physical, 85)]);

        let side = SideState::new();
        let g = scorer.evaluate(&ghost, &opponent, &side);
        let n = scorer.evaluate(&normal, &opponent, &side);
        assert_eq!(g.immunity, 1.0);
        assert_eq!(g.resist_points, 3.0);
        assert_eq!(n.resist_points, -1.0);
        assert!(g.score > n.score);

        let ranked = scorer.rank([&normal, &ghost], &opponent, &side);
        assert_eq!(ranked[0].0.species, "Ghost");
    }

    #[test]
    fn test_faint_on_entry_excluded() {
        let (config, threats, kits) = fixtures();
        let scorer = Scorer::new(&config, &threats, &kits);
        let opponent = Unit::new("Rock", &[Type::Rock]).with_stats(stats());
        let side = SideState::with_layers([(Hazard::StealthRock, 1)]);

        let frail = Unit::new("Ho-Oh", &[Type::Fire, Type::Flying]).with_stats(stats()).with_hp(0.4);
        let sturdy = Unit::new("Dondozo", &[Type::Water]).with_stats(stats()).with_hp(0.2);

        let m = scorer.evaluate(&frail, &opponent, &side);
        assert!(m.faints_on_entry);
        assert_eq!(m.score, FAINT_ON_ENTRY_SCORE);

        let best = scorer.best_counter([&frail, &sturdy], &opponent, &side).unwrap();
        assert_eq!(best.0.species, "Dondozo");
        assert!(scorer.best_counter([&frail], &opponent, &side).is_none());
    }

    #[test]
    fn test_low_offense_penalty() {
        let (config, threats, kits) = fixtures();
        let scorer = Scorer::new(&config, &threats, &kits);
        let opponent = Unit::new("Target", &[Type::Normal]).with_stats(stats());
        let side = SideState::new();

        let walled = Unit::new("Walled", &[Type::Water])
            .with_stats(stats())
            .with_moves([Move::new("weak", Type::Water, MoveCategory::Physical, 10)]);
        let strong = Unit::new("Strong", &[Type::Water])
            .with_stats(stats())
            .with_moves([Move::new("strong", Type::Water, MoveCategory::Physical, 90)]);
        let w = scorer.evaluate(&walled, &opponent, &side);
        let s = scorer.evaluate(&strong, &opponent, &side);
        assert!(w.best_offense < 0.15);
        let offense_delta = config.weights.offense * (s.best_offense - w.best_offense);
        assert!((s.score - w.score - offense_delta - config.weights.low_offense_penalty).abs() < 1e-4);
    }

    #[test]
    fn test_boost_reset_utility() {
        let (config, threats, _) = fixtures();
        let kits = MoveKits::default();
        let scorer = Scorer::new(&config, &threats, &kits);
        let side = SideState::new();

        let boosted = Unit::new("Koraidon", &[Type::Fighting, Type::Dragon])
            .with_stats(stats())
            .with_boosts(StatStages {
                atk: 2,
                ..Default::default()
            });
        let calm = boosted.clone().with_boosts(StatStages::new());

        let clod = Unit::new("Clodsire", &[Type::Poison, Type::Ground]).with_stats(stats());
        assert_eq!(scorer.evaluate(&clod, &boosted, &side).utility, 1.0);
        assert_eq!(scorer.evaluate(&clod, &calm, &side).utility, 0.0);

        let unaware = Unit::new("Dondozo", &[Type::Water]).with_stats(stats()).with_ability("Unaware");
        assert_eq!(scorer.evaluate(&unaware, &boosted, &side).utility, 1.0);
    }

    #[test]
    fn test_poison_versus_fairy_synergy() {
        let (config, threats, kits) = fixtures();
        let scorer = Scorer::new(&config, &threats, &kits);
        let fairy = Unit::new("Xerneas", &[Type::Fairy]).with_stats(stats());
        let clod = Unit::new("Clodsire", &[Type::Poison, Type::Ground]).with_stats(stats());
        assert_eq!(scorer.evaluate(&clod, &fairy, &SideState::new()).utility, 0.5);
    }

    #[test]
    fn test_switch_gain_pays_hazards_twice() {
        let (config, threats, kits) = fixtures();
        let scorer = Scorer::new(&config, &threats, &kits);
        let opponent = Unit::new("Fighter", &[Type::Fighting]).with_stats(stats());
        let active = Unit::new("Normal", &[Type::Normal]).with_stats(stats());
        let cand = Unit::new("Ghost", &[Type::Ghost]).with_stats(stats());

        let clear = scorer.switch_gain(&cand, &active, &opponent, &SideState::new());
        let spiked = SideState::with_layers([(Hazard::Spikes, 1)]);
        let chipped = scorer.switch_gain(&cand, &active, &opponent, &spiked);
        // One layer costs 0.125 in the candidate's score and again in the gain
        assert!((clear - chipped - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_preferred_answer_requires_health() {
        let config = PolicyConfig::default();
        let threats = ThreatTable::from_json(
            r#"[{"identity": "Koraidon", "answers": ["Arceus", "Ho-Oh"]}]"#,
        )
        .unwrap();
        let kits = MoveKits::empty();
        let scorer = Scorer::new(&config, &threats, &kits);
        let kora = Unit::new("Koraidon", &[Type::Fighting, Type::Dragon]);

        let arceus = Unit::new("Arceus-Fairy", &[Type::Fairy]).with_hp(0.3);
        let hooh = Unit::new("Ho-Oh", &[Type::Fire, Type::Flying]);
        let bench = vec![arceus.clone(), hooh];
        let side = SideState::new();
        assert_eq!(scorer.preferred_answer(bench.iter(), &kora, &side).unwrap().species, "Ho-Oh");

        let healthy = vec![arceus.with_hp(0.9)];
        assert_eq!(
            scorer.preferred_answer(healthy.iter(), &kora, &side).unwrap().species,
            "Arceus-Fairy"
        );

        let stranger = Unit::new("Lugia", &[Type::Psychic, Type::Flying]);
        assert!(scorer.preferred_answer(bench.iter(), &stranger, &side).is_none());
    }

    #[test]
    fn test_scores_are_deterministic() {
        let (config, threats, kits) = fixtures();
        let scorer = Scorer::new(&config, &threats, &kits);
        let opponent = Unit::new("Zacian-Crowned", &[Type::Fairy, Type::Steel]).with_stats(stats());
        let cand = Unit::new("Ho-Oh", &[Type::Fire, Type::Flying]).with_stats(stats()).with_hp(0.7);
        let side = SideState::with_layers([(Hazard::Spikes, 2), (Hazard::ToxicSpikes, 1)]);
        let a = scorer.evaluate(&cand, &opponent, &side);
        let b = scorer.evaluate(&cand, &opponent, &side);
        assert_eq!(a, b);
    }
}
