pub mod catalog;
pub mod event;
pub mod group;
pub mod outcome;
pub mod player;
pub mod validate;

pub use event::{EventKind, GameEvent};
pub use group::PlayerGroup;
pub use outcome::{EliminationOutcome, EventResult, SurvivorOutcome};
pub use player::{generate_player, generate_players, Gender, Player, PlayerStats, Role};
