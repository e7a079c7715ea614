//! The per-turn decision state machine
//!
//! States are tried in a fixed priority order and the first one that produces
//! an action wins:
//!
//! 1. forced replacement
//! 2. sleep talk
//! 3. anti-boost
//! 4. emergency heal
//! 5. proactive switch
//! 6. utility (hazards, status, hazard removal)
//! 7. secure knockout
//! 8. default attack
//! 9. last-resort pivot
//! 10. seeded random fallback
//!
//! States 4 to 6 stand down whenever a secure knockout is available.

use std::collections::HashMap;
use std::fmt;

use counterplay_battle::{BattleView, Move, MoveCategory, MoveTag, Status, Type, Unit};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::action::{Action, ActionSink};
use crate::config::PolicyConfig;
use crate::error::PolicyError;
use crate::estimate::{
    expected_damage_fraction, move_effectiveness, stab, worst_expected_hit, would_faint_on_entry,
    Arsenal, REFERENCE_POWER,
};
use crate::kits::MoveKits;
use crate::matchup::Scorer;
use crate::threats::ThreatTable;

/// Which state produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    ForcedReplacement,
    SleepTalk,
    AntiBoost,
    EmergencyHeal,
    ProactiveSwitch,
    Utility,
    SecureKo,
    DefaultAttack,
    LastResortPivot,
    Fallback,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::ForcedReplacement => "forced_replacement",
            State::SleepTalk => "sleep_talk",
            State::AntiBoost => "anti_boost",
            State::EmergencyHeal => "emergency_heal",
            State::ProactiveSwitch => "proactive_switch",
            State::Utility => "utility",
            State::SecureKo => "secure_ko",
            State::DefaultAttack => "default_attack",
            State::LastResortPivot => "last_resort_pivot",
            State::Fallback => "fallback",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action and the state that chose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub state: State,
    pub action: Action,
}

/// Per-battle memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SwitchMemory {
    last_switch_turn: Option<u32>,
}

impl SwitchMemory {
    /// Re-deciding the turn of the last switch is always allowed
    fn allows_switch(&self, turn: u32, cooldown: u32) -> bool {
        match self.last_switch_turn {
            Some(last) if turn > last => turn - last > cooldown,
            _ => true,
        }
    }
}

/// Everything derived from the view once per decision
struct Turn<'v> {
    view: &'v BattleView,
    /// Our active unit, carrying the legal moves when none were revealed
    me: Option<Unit>,
    opp: Option<&'v Unit>,
    bench: Vec<&'v Unit>,
    moves: &'v [Move],
    /// The opponent's worst expected hit on us (0 when unknown)
    worst_hit: f32,
    ko: Option<&'v Move>,
}

impl<'v> Turn<'v> {
    fn new(view: &'v BattleView, config: &PolicyConfig, threats: &ThreatTable) -> Self {
        let moves = view.usable_moves();
        let me = view.active.clone().map(|mut unit| {
            if unit.moves.is_empty() {
                unit.moves = moves.to_vec();
            }
            unit
        });
        let opp = view.opponent_revealed().filter(|o| o.is_alive());

        let (worst_hit, ko) = match (me.as_ref(), opp) {
            (Some(me), Some(opp)) => {
                let theirs = Arsenal::of_opponent(opp, threats);
                (
                    worst_expected_hit(me, opp, &theirs.attacks),
                    secure_ko(me, opp, moves, config),
                )
            }
            _ => (0.0, None),
        };

        Self {
            view,
            me,
            opp,
            bench: view.available_switches().collect(),
            moves,
            worst_hit,
            ko,
        }
    }

    fn bench(&self) -> impl Iterator<Item = &'v Unit> + Clone + '_ {
        self.bench.iter().copied()
    }

    fn find_move(&self, pred: impl Fn(&Move) -> bool) -> Option<Action> {
        self.moves
            .iter()
            .find(|m| pred(*m))
            .map(|m| Action::Move(m.id.clone()))
    }
}

/// Power relative to 90, times STAB, effectiveness, accuracy, hits and the
/// category bias; also returns the raw effectiveness
fn attack_score(me: &Unit, opp: Option<&Unit>, mv: &Move, category_bias: f32) -> (f32, f32) {
    let eff = opp.map_or(1.0, |o| move_effectiveness(mv, o));
    let bias = if (mv.category == MoveCategory::Physical) == me.base_stats.leans_physical() {
        category_bias
    } else {
        1.0
    };
    let score = f32::from(mv.base_power) / REFERENCE_POWER
        * stab(me, mv)
        * eff
        * mv.hit_chance()
        * mv.hits()
        * bias;
    (score, eff)
}

/// The highest-scoring attack, if its estimated damage is lethal
///
/// Lethal moves get `ko_nudge` added to their attack score.
fn secure_ko<'m>(me: &Unit, opp: &Unit, moves: &'m [Move], config: &PolicyConfig) -> Option<&'m Move> {
    let target = opp.hp_fraction();
    let mut best: Option<(&Move, bool, f32)> = None;
    for m in moves.iter().filter(|m| m.is_damaging()) {
        let lethal = expected_damage_fraction(me, opp, m) >= target;
        let (mut score, _) = attack_score(me, Some(opp), m, config.category_bias);
        if lethal {
            score += config.ko_nudge;
        }
        if best.is_none_or(|(_, _, s)| score > s) {
            best = Some((m, lethal, score));
        }
    }
    best.filter(|(_, lethal, _)| *lethal).map(|(m, _, _)| m)
}

/// First unit with the highest HP
fn highest_hp<'u>(units: impl IntoIterator<Item = &'u Unit>) -> Option<&'u Unit> {
    units.into_iter().fold(None, |best, u| match best {
        Some(b) if b.hp_fraction() >= u.hp_fraction() => Some(b),
        _ => Some(u),
    })
}

/// Whether `status` from `mv` can stick on `target`
fn status_lands(status: Status, mv: &Move, target: &Unit) -> bool {
    if target.status.is_some() {
        return false;
    }
    match status {
        Status::Burn => !target.has_type(Type::Fire) && target.base_stats.leans_physical(),
        Status::Paralysis => !target.has_type(Type::Electric) && move_effectiveness(mv, target) > 0.0,
        Status::Poison | Status::BadPoison => {
            !target.has_type(Type::Poison) && !target.has_type(Type::Steel)
        }
        Status::Sleep | Status::Freeze => true,
    }
}

/// Damaging effect moves do nothing into an immunity
fn connects(mv: &Move, target: &Unit) -> bool {
    !mv.is_damaging() || move_effectiveness(mv, target) > 0.0
}

/// FNV-1a over the battle id and turn
///
/// Must stay fixed across runs and toolchains, which std and `ahash` hashers do not promise.
fn fallback_seed(battle_id: &str, turn: u32) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in battle_id.bytes().chain(turn.to_le_bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

/// Matchup-driven decision policy
///
/// Holds configuration, the threat and kit tables, and per-battle switch
/// memory keyed by battle id.
///
/// # Example
///
/// ```
/// use counterplay_battle::{BattleView, Move, MoveCategory, Type, Unit};
/// use counterplay_policy::{Action, Policy};
///
/// let mut policy = Policy::default();
/// policy.start_battle("battle-1");
///
/// let mut view = BattleView::new("battle-1", 1);
/// view.active = Some(Unit::new("Ho-Oh", &[Type::Fire, Type::Flying]));
/// view.legal_moves = vec![Move::new("sacredfire", Type::Fire, MoveCategory::Physical, 100)];
///
/// assert_eq!(policy.choose(&view).unwrap(), Action::Move("sacredfire".into()));
/// policy.end_battle("battle-1");
/// ```
#[derive(Debug, Clone)]
pub struct Policy {
    config: PolicyConfig,
    threats: ThreatTable,
    kits: MoveKits,
    memory: HashMap<String, SwitchMemory>,
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(PolicyConfig::default(), ThreatTable::new(), MoveKits::default())
    }
}

impl Policy {
    pub fn new(config: PolicyConfig, threats: ThreatTable, kits: MoveKits) -> Self {
        Self {
            config,
            threats,
            kits,
            memory: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn threats(&self) -> &ThreatTable {
        &self.threats
    }

    /// Create fresh memory for a battle, discarding any left over
    pub fn start_battle(&mut self, battle_id: &str) {
        debug!(battle_id = %battle_id, "Battle started");
        self.memory.insert(battle_id.to_string(), SwitchMemory::default());
    }

    /// Drop a battle's memory; returns whether it was being tracked
    pub fn end_battle(&mut self, battle_id: &str) -> bool {
        debug!(battle_id = %battle_id, "Battle ended");
        self.memory.remove(battle_id).is_some()
    }

    pub fn is_tracking(&self, battle_id: &str) -> bool {
        self.memory.contains_key(battle_id)
    }

    /// Turn of the last switch chosen in a battle
    pub fn last_switch_turn(&self, battle_id: &str) -> Option<u32> {
        self.memory.get(battle_id).and_then(|m| m.last_switch_turn)
    }

    /// Choose an action for the view
    pub fn choose(&mut self, view: &BattleView) -> Result<Action, PolicyError> {
        self.decide(view).map(|d| d.action)
    }

    /// Choose an action and submit it to `sink`
    pub fn act(&mut self, view: &BattleView, sink: &mut impl ActionSink) -> anyhow::Result<Action> {
        let action = self.choose(view)?;
        sink.submit(&view.battle_id, &action)?;
        Ok(action)
    }

    /// Choose an action, reporting which state fired
    pub fn decide(&mut self, view: &BattleView) -> Result<Decision, PolicyError> {
        let no_action = || PolicyError::NoLegalAction {
            battle_id: view.battle_id.clone(),
        };
        if !view.has_legal_action() {
            return Err(no_action());
        }

        let memory = *self.memory.entry(view.battle_id.clone()).or_insert_with(|| {
            warn!(battle_id = %view.battle_id, "Deciding for a battle that was never started");
            SwitchMemory::default()
        });

        let decision = self.evaluate(view, memory).ok_or_else(no_action)?;

        if decision.action.is_switch() {
            if let Some(memory) = self.memory.get_mut(&view.battle_id) {
                memory.last_switch_turn = Some(view.turn);
            }
        }

        debug!(
            battle_id = %view.battle_id,
            turn = view.turn,
            state = %decision.state,
            action = %decision.action,
            "Chose action"
        );
        Ok(decision)
    }

    fn evaluate(&self, view: &BattleView, memory: SwitchMemory) -> Option<Decision> {
        let scorer = Scorer::new(&self.config, &self.threats, &self.kits);
        let turn = Turn::new(view, &self.config, &self.threats);
        let decided = |state, action| Some(Decision { state, action });

        if view.force_switch {
            if let Some(action) = self.forced_replacement(&turn, &scorer) {
                return decided(State::ForcedReplacement, action);
            }
        }
        if let Some(action) = self.sleep_talk(&turn) {
            return decided(State::SleepTalk, action);
        }
        if let Some(action) = self.anti_boost(&turn, &scorer) {
            return decided(State::AntiBoost, action);
        }
        if let Some(action) = self.emergency_heal(&turn) {
            return decided(State::EmergencyHeal, action);
        }
        if let Some(action) = self.proactive_switch(&turn, &scorer, memory) {
            return decided(State::ProactiveSwitch, action);
        }
        if let Some(action) = self.utility(&turn) {
            return decided(State::Utility, action);
        }
        if let Some(m) = turn.ko {
            return decided(State::SecureKo, Action::Move(m.id.clone()));
        }
        if let Some(action) = self.default_attack(&turn) {
            return decided(State::DefaultAttack, action);
        }
        if let Some(action) = self.last_resort_pivot(&turn, &scorer) {
            return decided(State::LastResortPivot, action);
        }
        self.fallback(&turn).and_then(|action| decided(State::Fallback, action))
    }

    fn forced_replacement(&self, turn: &Turn<'_>, scorer: &Scorer<'_>) -> Option<Action> {
        let side = &turn.view.own_side;
        let pick = match turn.opp {
            None => self.choose_lead(turn, scorer),
            Some(opp) => scorer
                .preferred_answer(turn.bench(), opp, side)
                .or_else(|| scorer.best_counter(turn.bench(), opp, side).map(|(u, _)| u)),
        };
        pick.or_else(|| highest_hp(turn.bench().filter(|u| !would_faint_on_entry(side, u))))
            .or_else(|| highest_hp(turn.bench()))
            .map(|u| Action::Switch(u.species.clone()))
    }

    /// Lead with nothing on the field: configured lead, an answer to a
    /// previewed threat, then the lead priority list
    fn choose_lead<'v>(&self, turn: &Turn<'v>, scorer: &Scorer<'_>) -> Option<&'v Unit> {
        let side = &turn.view.own_side;
        let survivors: Vec<&Unit> = turn
            .bench()
            .filter(|u| !would_faint_on_entry(side, u))
            .collect();

        if let Some(lead) = &self.config.preferred_lead {
            if let Some(unit) = survivors.iter().copied().find(|u| u.matches(lead)) {
                return Some(unit);
            }
        }

        for name in &turn.view.opponent_preview {
            if let Some(entry) = self.threats.lookup(name) {
                if let Some(unit) = scorer.answer_from(&entry.answers, survivors.iter().copied(), side) {
                    return Some(unit);
                }
            }
        }

        self.config
            .lead_priority
            .iter()
            .find_map(|name| survivors.iter().copied().find(|u| u.matches(name)))
    }

    fn sleep_talk(&self, turn: &Turn<'_>) -> Option<Action> {
        if !turn.me.as_ref()?.is_asleep() {
            return None;
        }
        turn.find_move(|m| m.has_tag(MoveTag::UsableAsleep))
    }

    fn anti_boost(&self, turn: &Turn<'_>, scorer: &Scorer<'_>) -> Option<Action> {
        let me = turn.me.as_ref()?;
        let opp = turn.opp?;
        if !opp.is_boosted() {
            return None;
        }

        let reset = turn
            .find_move(|m| m.has_tag(MoveTag::ClearsBoosts) && connects(m, opp))
            .or_else(|| turn.find_move(|m| m.has_tag(MoveTag::ForcesSwitch) && connects(m, opp)));
        if reset.is_some() {
            return reset;
        }

        let side = &turn.view.own_side;
        if let Some(answer) = scorer.preferred_answer(turn.bench(), opp, side) {
            return Some(Action::Switch(answer.species.clone()));
        }
        let (best, _) = scorer.best_counter(turn.bench(), opp, side)?;
        (scorer.switch_gain(best, me, opp, side) > 0.0).then(|| Action::Switch(best.species.clone()))
    }

    fn emergency_heal(&self, turn: &Turn<'_>) -> Option<Action> {
        if turn.ko.is_some() {
            return None;
        }
        let hp = turn.me.as_ref()?.hp_fraction();
        let worst = turn.worst_hit;
        let pressured = hp <= self.config.heal_threshold || worst >= hp * self.config.near_lethal_ratio;
        if !pressured || hp >= 1.0 {
            return None;
        }
        turn.find_move(|m| {
            m.heal_kind().is_some_and(|kind| {
                let after = kind.restored_from(hp);
                after > hp && after > worst
            })
        })
    }

    fn proactive_switch(&self, turn: &Turn<'_>, scorer: &Scorer<'_>, memory: SwitchMemory) -> Option<Action> {
        let me = turn.me.as_ref()?;
        let opp = turn.opp?;
        if turn.ko.is_some() || !memory.allows_switch(turn.view.turn, self.config.switch_cooldown_turns) {
            return None;
        }

        let side = &turn.view.own_side;
        let candidate = scorer
            .preferred_answer(turn.bench(), opp, side)
            .or_else(|| scorer.best_counter(turn.bench(), opp, side).map(|(u, _)| u))?;

        let gain = scorer.switch_gain(candidate, me, opp, side);
        if gain <= self.config.switch_margin {
            return None;
        }

        let active = scorer.active_matchup(me, opp);
        let incoming = scorer.evaluate(candidate, opp, side);
        let safer = incoming.worst_hit + self.config.safety_pad <= active.worst_hit;
        let resists_more =
            incoming.resist_points - active.resist_points >= self.config.resist_gain_threshold;
        let bad_matchup = active.best_offense < self.config.offense_floor
            && (active.worst_hit >= self.config.chunky_hit
                || active.resist_points <= self.config.bad_resist_points);

        (safer || resists_more || bad_matchup).then(|| Action::Switch(candidate.species.clone()))
    }

    fn utility(&self, turn: &Turn<'_>) -> Option<Action> {
        let me = turn.me.as_ref()?;
        let opp = turn.opp?;
        if turn.ko.is_some() {
            return None;
        }
        let hp = me.hp_fraction();
        let view = turn.view;

        let calm = !opp.is_boosted()
            && !self.threats.is_high_pressure(opp)
            && hp >= self.config.utility_min_hp
            && turn.worst_hit < self.config.utility_safe_hit;
        if calm {
            let lay = turn.find_move(|m| m.hazard().is_some_and(|h| !view.opponent_side.is_capped(h)));
            if lay.is_some() {
                return lay;
            }
        }

        if hp > self.config.heal_threshold {
            let status = turn.find_move(|m| {
                m.inflicted_status().is_some_and(|s| status_lands(s, m, opp))
            });
            if status.is_some() {
                return status;
            }
        }

        if view.own_side.has_hazards() && hp >= self.config.hazard_removal_min_hp {
            return turn.find_move(|m| m.has_tag(MoveTag::RemovesHazards) && connects(m, opp));
        }
        None
    }

    /// Best attack by power, STAB, effectiveness, accuracy, hits and category
    /// lane; `None` when nothing scores above zero
    fn default_attack(&self, turn: &Turn<'_>) -> Option<Action> {
        let unknown = Unit::default();
        let me = turn.me.as_ref().unwrap_or(&unknown);

        let scored: Vec<(&Move, f32, f32)> = turn
            .moves
            .iter()
            .filter(|m| m.is_damaging())
            .map(|m| {
                let (score, eff) = attack_score(me, turn.opp, m, self.config.category_bias);
                (m, score, eff)
            })
            .collect();

        let top = scored.iter().map(|(_, score, _)| *score).fold(0.0, f32::max);
        if top <= 0.0 {
            return None;
        }
        let floor = top * (1.0 - self.config.attack_tie_epsilon);
        scored
            .into_iter()
            .filter(|(_, score, _)| *score >= floor)
            .fold(None, |best: Option<(&Move, f32, f32)>, s| match best {
                Some(b) if b.2 >= s.2 => Some(b),
                _ => Some(s),
            })
            .map(|(m, _, _)| Action::Move(m.id.clone()))
    }

    fn last_resort_pivot(&self, turn: &Turn<'_>, scorer: &Scorer<'_>) -> Option<Action> {
        let me = turn.me.as_ref()?;
        let hp = me.hp_fraction();
        let side = &turn.view.own_side;

        let pick = match turn.opp {
            Some(opp) => {
                let active = scorer.active_matchup(me, opp);
                if active.score > self.config.last_resort_matchup && hp > self.config.critical_hp {
                    return None;
                }
                scorer.best_counter(turn.bench(), opp, side).map(|(u, _)| u)
            }
            None if hp <= self.config.critical_hp => {
                highest_hp(turn.bench().filter(|u| !would_faint_on_entry(side, u)))
            }
            None => None,
        };
        pick.map(|u| Action::Switch(u.species.clone()))
    }

    fn fallback(&self, turn: &Turn<'_>) -> Option<Action> {
        let actions: Vec<Action> = turn
            .moves
            .iter()
            .map(|m| Action::Move(m.id.clone()))
            .chain(turn.bench().map(|u| Action::Switch(u.species.clone())))
            .collect();

        let mut rng = StdRng::seed_from_u64(fallback_seed(&turn.view.battle_id, turn.view.turn));
        let action = actions.choose(&mut rng).cloned();
        warn!(
            battle_id = %turn.view.battle_id,
            turn = turn.view.turn,
            legal_actions = actions.len(),
            "No state matched, choosing at random"
        );
        action
    }
}
