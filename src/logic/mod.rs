//! Bracket business logic: pool generation, shuffling, battles and advancement.

mod advance;
mod battle;
mod controller;
mod pool;
mod shuffle;

pub use advance::{advance_round, needs_another_round, RESCHEDULE_ABOVE};
pub use battle::{battle, resolve_round};
pub use controller::{BracketController, BracketEvent, BracketSnapshot};
pub use pool::{create_player, generate_players, requested_size_from_json};
pub use shuffle::{shuffle_players, swap_players};
