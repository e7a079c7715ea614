//! Property tests over the estimators and the decision loop

use counterplay_battle::{
    effectiveness, BaseStats, BattleView, Hazard, Move, MoveCategory, SideState, Type, Unit,
};
use counterplay_policy::estimate::{
    entry_cost, expected_damage_fraction, move_effectiveness, would_faint_on_entry,
};
use counterplay_policy::{
    Action, MoveKits, Policy, PolicyConfig, ScoreWeights, Scorer, ThreatTable,
};
use proptest::prelude::*;

fn any_type() -> impl Strategy<Value = Type> {
    prop::sample::select(Type::ALL.to_vec())
}

fn any_types() -> impl Strategy<Value = Vec<Type>> {
    prop::collection::vec(any_type(), 1..=2)
}

fn any_stats() -> impl Strategy<Value = BaseStats> {
    (1u16..=255, 1u16..=255, 1u16..=255, 1u16..=255, 1u16..=255, 1u16..=255)
        .prop_map(|(hp, atk, def, spa, spd, spe)| BaseStats::new(hp, atk, def, spa, spd, spe))
}

fn any_side() -> impl Strategy<Value = SideState> {
    (0u8..=1, 0u8..=3, 0u8..=2).prop_map(|(rock, spikes, tspikes)| {
        SideState::with_layers([
            (Hazard::StealthRock, rock),
            (Hazard::Spikes, spikes),
            (Hazard::ToxicSpikes, tspikes),
        ])
    })
}

fn any_weights() -> impl Strategy<Value = ScoreWeights> {
    (0.0f32..=3.0, 0.0f32..=3.0, 0.0f32..=3.0, 0.0f32..=3.0, 0.0f32..=3.0, 0.0f32..=1.0).prop_map(
        |(resist, immunity, offense, worst_hit, hazard, utility)| ScoreWeights {
            resist,
            immunity,
            offense,
            worst_hit,
            hazard,
            utility,
            ..Default::default()
        },
    )
}

fn policy() -> Policy {
    Policy::new(
        PolicyConfig::default(),
        ThreatTable::builtin().expect("builtin threat table parses"),
        MoveKits::default(),
    )
}

proptest! {
    #[test]
    fn test_effectiveness_is_non_negative(attack in any_type(), defenders in any_types(), grounded in any::<bool>()) {
        prop_assert!(effectiveness(Some(attack), &defenders, grounded) >= 0.0);
    }

    #[test]
    fn test_ground_never_hits_airborne(defenders in any_types()) {
        prop_assert_eq!(effectiveness(Some(Type::Ground), &defenders, false), 0.0);
    }

    #[test]
    fn test_damage_is_monotonic_in_power(
        attack in any_type(),
        attacker_types in any_types(),
        defender_types in any_types(),
        attacker_stats in any_stats(),
        defender_stats in any_stats(),
        low in 1u16..=150,
        extra in 0u16..=100,
    ) {
        let attacker = Unit::new("A", &attacker_types).with_stats(attacker_stats);
        let defender = Unit::new("D", &defender_types).with_stats(defender_stats);
        let weak = Move::new("weak", attack, MoveCategory::Physical, low);
        let strong = Move::new("strong", attack, MoveCategory::Physical, low + extra);

        let weak_hit = expected_damage_fraction(&attacker, &defender, &weak);
        let strong_hit = expected_damage_fraction(&attacker, &defender, &strong);
        prop_assert!((0.0..=1.0).contains(&weak_hit));
        prop_assert!(weak_hit <= strong_hit);
    }

    #[test]
    fn test_damage_is_monotonic_in_stab(
        attack in any_type(),
        defender_types in any_types(),
        attacker_stats in any_stats(),
        defender_stats in any_stats(),
        power in 1u16..=250,
    ) {
        let plain = Unit::new("A", &[]).with_stats(attacker_stats);
        let same_type = Unit::new("A", &[attack]).with_stats(attacker_stats);
        let defender = Unit::new("D", &defender_types).with_stats(defender_stats);
        let mv = Move::new("hit", attack, MoveCategory::Special, power);

        prop_assert!(expected_damage_fraction(&plain, &defender, &mv) <= expected_damage_fraction(&same_type, &defender, &mv));
    }

    #[test]
    fn test_damage_is_monotonic_in_effectiveness(
        first in any_type(),
        second in any_type(),
        defender_types in any_types(),
        attacker_stats in any_stats(),
        defender_stats in any_stats(),
        power in 1u16..=250,
    ) {
        let attacker = Unit::new("A", &[]).with_stats(attacker_stats);
        let defender = Unit::new("D", &defender_types).with_stats(defender_stats);
        let mut hits = [
            Move::new("first", first, MoveCategory::Physical, power),
            Move::new("second", second, MoveCategory::Physical, power),
        ];
        hits.sort_by(|a, b| move_effectiveness(a, &defender).total_cmp(&move_effectiveness(b, &defender)));
        let [weaker, stronger] = hits;

        prop_assert!(expected_damage_fraction(&attacker, &defender, &weaker) <= expected_damage_fraction(&attacker, &defender, &stronger));
    }

    #[test]
    fn test_entry_cost_is_bounded(side in any_side(), types in any_types(), boots in any::<bool>()) {
        let mut unit = Unit::new("U", &types);
        if boots {
            unit = unit.with_item("Heavy-Duty Boots");
        }
        let cost = entry_cost(&side, &unit);
        prop_assert!((0.0..=1.0).contains(&cost));
        if boots {
            prop_assert_eq!(cost, 0.0);
        }
    }

    #[test]
    fn test_replacement_survives_entry_when_possible(
        side in any_side(),
        bench in prop::collection::vec((any_types(), 0.01f32..=1.0), 1..=5),
        opponent in 0u8..=2,
    ) {
        let mut view = BattleView::new("prop-forced", 10);
        view.force_switch = true;
        view.own_side = side;
        // Live, fainted or not yet revealed
        let koraidon = Unit::new("Koraidon", &[Type::Fighting, Type::Dragon]);
        view.opponent = match opponent {
            0 => Some(koraidon),
            1 => Some(koraidon.with_hp(0.0)),
            _ => None,
        };
        view.switches = bench
            .into_iter()
            .enumerate()
            .map(|(i, (types, hp))| Unit::new(format!("Bench{}", i), &types).with_hp(hp))
            .collect();

        let action = policy().choose(&view).unwrap();
        let chosen = view.available_switch(action.target()).expect("switch target is on the bench");
        let someone_survives = view.switches.iter().any(|u| !would_faint_on_entry(&view.own_side, u));
        if someone_survives {
            prop_assert!(!would_faint_on_entry(&view.own_side, chosen));
        }
    }

    #[test]
    fn test_decisions_are_deterministic(
        hp in 0.05f32..=1.0,
        opp_hp in 0.05f32..=1.0,
        active_types in any_types(),
        opp_types in any_types(),
        side in any_side(),
        turn in 1u32..=50,
    ) {
        let mut view = BattleView::new("prop-det", turn);
        view.active = Some(Unit::new("Active", &active_types).with_hp(hp));
        view.opponent = Some(Unit::new("Opponent", &opp_types).with_hp(opp_hp));
        view.legal_moves = vec![
            Move::new("strike", active_types[0], MoveCategory::Physical, 80),
            Move::new("blast", Type::Fire, MoveCategory::Special, 90),
        ];
        view.switches = vec![
            Unit::new("Dondozo", &[Type::Water]),
            Unit::new("Clodsire", &[Type::Poison, Type::Ground]).with_hp(0.5),
        ];
        view.own_side = side;

        let first = policy().decide(&view).unwrap();
        let second = policy().decide(&view).unwrap();
        prop_assert_eq!(&first, &second);

        let legal = match &first.action {
            Action::Move(id) => view.usable_move(id).is_some(),
            Action::Switch(species) => view.available_switch(species).is_some(),
        };
        prop_assert!(legal);
    }

    #[test]
    fn test_scorer_never_picks_a_unit_that_faints(
        weights in any_weights(),
        side in any_side(),
        bench in prop::collection::vec((any_types(), 0.01f32..=1.0), 1..=5),
        opp_types in any_types(),
    ) {
        let config = PolicyConfig { weights, ..Default::default() };
        let threats = ThreatTable::new();
        let kits = MoveKits::default();
        let scorer = Scorer::new(&config, &threats, &kits);

        let opponent = Unit::new("Opponent", &opp_types);
        let units: Vec<Unit> = bench
            .into_iter()
            .enumerate()
            .map(|(i, (types, hp))| Unit::new(format!("Bench{}", i), &types).with_hp(hp))
            .collect();

        for (unit, matchup) in scorer.rank(units.iter(), &opponent, &side) {
            prop_assert!(!would_faint_on_entry(&side, unit));
            prop_assert!(!matchup.faints_on_entry);
        }
        if let Some((best, _)) = scorer.best_counter(units.iter(), &opponent, &side) {
            prop_assert!(!would_faint_on_entry(&side, best));
        }
    }

    #[test]
    fn test_counter_scores_are_deterministic(
        cand_types in any_types(),
        opp_types in any_types(),
        stats in any_stats(),
        side in any_side(),
        hp in 0.01f32..=1.0,
    ) {
        let config = PolicyConfig::default();
        let threats = ThreatTable::builtin().expect("builtin threat table parses");
        let kits = MoveKits::default();
        let scorer = Scorer::new(&config, &threats, &kits);

        let candidate = Unit::new("Candidate", &cand_types).with_stats(stats).with_hp(hp);
        let opponent = Unit::new("Opponent", &opp_types).with_stats(stats);
        let first = scorer.counter_score(&candidate, &opponent, &side);
        let second = scorer.counter_score(&candidate, &opponent, &side);
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }
}
