//! Data structures for the bracket: players, rounds, tournament.

mod player;
mod round;
mod tournament;

pub use player::{Player, PlayerId};
pub use round::{Pair, Round, START_ROUND_NAME};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};
