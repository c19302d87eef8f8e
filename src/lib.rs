//! Single-elimination bracket tournament: library with models and business logic.

pub mod config;
pub mod corpus;
pub mod logic;
pub mod models;

pub use config::{BracketConfig, ConfigError, MAX_POOL_SIZE};
pub use corpus::{CorpusError, NameCorpus, NAME_KEY_RANGE};
pub use logic::{
    advance_round, battle, create_player, generate_players, needs_another_round,
    requested_size_from_json, resolve_round, shuffle_players, swap_players, BracketController,
    BracketEvent, BracketSnapshot,
};
pub use models::{
    Pair, Player, PlayerId, Round, Tournament, TournamentError, TournamentId, TournamentState,
    START_ROUND_NAME,
};
