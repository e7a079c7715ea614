//! Domain types for matchup evaluation

mod hazard;
mod moves;
mod pokemon;
mod pokemon_type;
mod side;
mod stats;
mod status;

pub use hazard::Hazard;
pub use moves::{HealKind, Move, MoveCategory, MoveTag};
pub use pokemon::Unit;
pub use pokemon_type::{effectiveness, Type, TYPE_CHART};
pub use side::SideState;
pub use stats::{BaseStats, Stat, StatStages};
pub use status::Status;
