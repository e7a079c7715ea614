//! A small built-in move dex
//!
//! Covers the attacks and utility moves the decision engine cares about:
//! teammate kits, common threats, heals, phazers, hazards and hazard removal.
//! Anything not listed resolves to `None` and callers fall back to a generic
//! same-type guess.

use crate::types::{Hazard, HealKind, Move, MoveCategory, MoveTag, Status, Type};

use MoveCategory::{Physical, Special};

/// Normalize a display name to an id: lowercase ASCII alphanumerics only
/// ("Will-O-Wisp" -> "willowisp", "Ho-Oh" -> "hooh")
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

struct Entry {
    id: &'static str,
    move_type: Type,
    category: MoveCategory,
    base_power: u16,
    accuracy: f32,
    priority: i8,
    hits: f32,
    tags: &'static [MoveTag],
}

const fn attack(id: &'static str, move_type: Type, category: MoveCategory, base_power: u16) -> Entry {
    Entry {
        id,
        move_type,
        category,
        base_power,
        accuracy: 1.0,
        priority: 0,
        hits: 1.0,
        tags: &[],
    }
}

const fn status(id: &'static str, move_type: Type, tags: &'static [MoveTag]) -> Entry {
    Entry {
        id,
        move_type,
        category: MoveCategory::Status,
        base_power: 0,
        accuracy: 1.0,
        priority: 0,
        hits: 1.0,
        tags,
    }
}

impl Entry {
    const fn acc(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;
        self
    }

    const fn prio(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    const fn hits(mut self, hits: f32) -> Self {
        self.hits = hits;
        self
    }

    const fn tags(mut self, tags: &'static [MoveTag]) -> Self {
        self.tags = tags;
        self
    }

    fn to_move(&self) -> Move {
        Move {
            id: self.id.to_string(),
            move_type: Some(self.move_type),
            category: self.category,
            base_power: self.base_power,
            accuracy: self.accuracy,
            priority: self.priority,
            expected_hits: self.hits,
            tags: self.tags.to_vec(),
        }
    }
}

const PARTIAL_HEAL: &[MoveTag] = &[MoveTag::Heal(HealKind::Partial)];
const BOOST: &[MoveTag] = &[MoveTag::BoostsSelf];
const PHAZE: &[MoveTag] = &[MoveTag::ForcesSwitch];
const CLEAR: &[MoveTag] = &[MoveTag::RemovesHazards];

#[rustfmt::skip]
static DEX: &[Entry] = &[
    // Attacks
    attack("earthquake", Type::Ground, Physical, 100),
    attack("earthpower", Type::Ground, Special, 90),
    attack("precipiceblades", Type::Ground, Physical, 120).acc(0.85),
    attack("poltergeist", Type::Ghost, Physical, 110).acc(0.9),
    attack("shadowball", Type::Ghost, Special, 80),
    attack("astralbarrage", Type::Ghost, Special, 120),
    attack("sacredfire", Type::Fire, Physical, 100).acc(0.95),
    attack("flamethrower", Type::Fire, Special, 90),
    attack("flareblitz", Type::Fire, Physical, 120),
    attack("bravebird", Type::Flying, Physical, 120),
    attack("dragonascent", Type::Flying, Physical, 120),
    attack("hurricane", Type::Flying, Special, 110).acc(0.7),
    attack("liquidation", Type::Water, Physical, 85),
    attack("surf", Type::Water, Special, 90),
    attack("originpulse", Type::Water, Special, 110).acc(0.85),
    attack("judgment", Type::Normal, Special, 100),
    attack("extremespeed", Type::Normal, Physical, 80).prio(2),
    attack("moonblast", Type::Fairy, Special, 95),
    attack("playrough", Type::Fairy, Physical, 90).acc(0.9),
    attack("closecombat", Type::Fighting, Physical, 120),
    attack("collisioncourse", Type::Fighting, Physical, 100),
    attack("knockoff", Type::Dark, Physical, 65),
    attack("kowtowcleave", Type::Dark, Physical, 85),
    attack("suckerpunch", Type::Dark, Physical, 70).prio(1),
    attack("uturn", Type::Bug, Physical, 70),
    attack("thunderbolt", Type::Electric, Special, 90),
    attack("icebeam", Type::Ice, Special, 90),
    attack("glaciallance", Type::Ice, Physical, 120),
    attack("sludgebomb", Type::Poison, Special, 90),
    attack("poisonjab", Type::Poison, Physical, 80),
    attack("ironhead", Type::Steel, Physical, 80),
    attack("behemothblade", Type::Steel, Physical, 100),
    attack("dracometeor", Type::Dragon, Special, 130).acc(0.9),
    attack("dynamaxcannon", Type::Dragon, Special, 100),
    attack("outrage", Type::Dragon, Physical, 120),
    attack("scaleshot", Type::Dragon, Physical, 25).acc(0.9).hits(3.0),
    attack("meteorbeam", Type::Rock, Special, 120).acc(0.9),
    attack("stoneedge", Type::Rock, Physical, 100).acc(0.8),
    attack("psychic", Type::Psychic, Special, 90),
    attack("leafstorm", Type::Grass, Special, 130).acc(0.9),

    // Attacks with side effects
    attack("dragontail", Type::Dragon, Physical, 60).acc(0.9).prio(-6).tags(PHAZE),
    attack("circlethrow", Type::Fighting, Physical, 60).acc(0.9).prio(-6).tags(PHAZE),
    attack("clearsmog", Type::Poison, Special, 50).tags(&[MoveTag::ClearsBoosts]),
    attack("rapidspin", Type::Normal, Physical, 50).tags(CLEAR),
    attack("mortalspin", Type::Poison, Physical, 30).tags(CLEAR),

    // Heals
    status("recover", Type::Normal, PARTIAL_HEAL),
    status("roost", Type::Flying, PARTIAL_HEAL),
    status("slackoff", Type::Normal, PARTIAL_HEAL),
    status("softboiled", Type::Normal, PARTIAL_HEAL),
    status("moonlight", Type::Fairy, PARTIAL_HEAL),
    status("morningsun", Type::Normal, PARTIAL_HEAL),
    status("synthesis", Type::Grass, PARTIAL_HEAL),
    status("rest", Type::Psychic, &[MoveTag::Heal(HealKind::Full)]),
    status("sleeptalk", Type::Normal, &[MoveTag::UsableAsleep]),

    // Boosting
    status("swordsdance", Type::Normal, BOOST),
    status("calmmind", Type::Psychic, BOOST),
    status("nastyplot", Type::Dark, BOOST),
    status("dragondance", Type::Dragon, BOOST),
    status("cosmicpower", Type::Psychic, BOOST),
    status("curse", Type::Ghost, BOOST),

    // Boost control
    status("haze", Type::Ice, &[MoveTag::ClearsBoosts]),
    status("whirlwind", Type::Normal, PHAZE).prio(-6),
    status("roar", Type::Normal, PHAZE).prio(-6),

    // Hazards
    status("stealthrock", Type::Rock, &[MoveTag::SetsHazard(Hazard::StealthRock)]),
    status("spikes", Type::Ground, &[MoveTag::SetsHazard(Hazard::Spikes)]),
    status("toxicspikes", Type::Poison, &[MoveTag::SetsHazard(Hazard::ToxicSpikes)]),
    status("stickyweb", Type::Bug, &[MoveTag::SetsHazard(Hazard::StickyWeb)]),
    status("defog", Type::Flying, CLEAR),

    // Status infliction
    status("willowisp", Type::Fire, &[MoveTag::InflictsStatus(Status::Burn)]).acc(0.85),
    status("thunderwave", Type::Electric, &[MoveTag::InflictsStatus(Status::Paralysis)]).acc(0.9),
    status("toxic", Type::Poison, &[MoveTag::InflictsStatus(Status::BadPoison)]).acc(0.9),
];

/// Look up a move by id or display name
pub fn lookup(name: &str) -> Option<Move> {
    let id = to_id(name);
    DEX.iter().find(|e| e.id == id).map(Entry::to_move)
}

/// Look up a move, overriding its element.
///
/// Accepts `"id:type"` (e.g. `"judgment:fairy"`) for moves whose element
/// depends on the user.
pub fn resolve(entry: &str) -> Option<Move> {
    match entry.split_once(':') {
        Some((name, ty)) => {
            let mut m = lookup(name)?;
            m.move_type = Some(Type::from_name(ty)?);
            Some(m)
        }
        None => lookup(entry),
    }
}
