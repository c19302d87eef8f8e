//! Tournament (bracket root), TournamentState and TournamentError.

use crate::models::player::Player;
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Actions the engine declined. State is left untouched whenever one of these is returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// The tournament already has a round counter; it cannot be started again.
    AlreadyStarted,
    /// A tick arrived before the tournament was started.
    NotStarted,
    /// The frontier already holds the last player standing.
    Complete,
    /// Shuffling is locked once the tournament has advanced past round 1.
    ShuffleLocked { round: u32 },
    /// Players can only be reordered before the start round is resolved.
    RoundResolved,
    /// A reorder index does not point into the start round.
    InvalidIndex { index: i64, len: usize },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::AlreadyStarted => write!(f, "Tournament has already started"),
            TournamentError::NotStarted => write!(f, "Tournament has not started"),
            TournamentError::Complete => write!(f, "Tournament is already complete"),
            TournamentError::ShuffleLocked { round } => {
                write!(f, "Cannot shuffle players after round {}", round)
            }
            TournamentError::RoundResolved => write!(f, "The start round has already been resolved"),
            TournamentError::InvalidIndex { index, len } => {
                write!(f, "Index {} is outside the round (size {})", index, len)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Where the bracket is in its progression.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Pool is in place, no round counter yet. Shuffle and reorder are allowed.
    #[default]
    Seeded,
    /// At least one round has been resolved and battles remain.
    Advancing,
    /// The frontier round holds a single player (or nobody, for an empty pool).
    Complete,
}

/// Bracket root: the start round followed by every resolved round, oldest first.
///
/// The rounds form a chain with fan-out 1; the last one is the frontier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    rounds: Vec<Round>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament whose start round holds `players`.
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Tournament".to_string(),
            rounds: vec![Round::start(players)],
            created_at: Utc::now(),
        }
    }

    /// Replace the start round with `players`, dropping every resolved round.
    pub fn reseed(&mut self, players: Vec<Player>) {
        self.rounds = vec![Round::start(players)];
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The round holding the initial pool.
    pub fn start_round(&self) -> Option<&Round> {
        self.rounds.first()
    }

    /// Rounds produced by battles, oldest first.
    pub fn resolved_rounds(&self) -> &[Round] {
        self.rounds.get(1..).unwrap_or(&[])
    }

    /// Last round with no successor yet.
    pub fn frontier(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Attach `round` as the frontier's sole successor.
    pub fn append_round(&mut self, round: Round) {
        self.rounds.push(round);
    }

    /// Number of resolved rounds.
    pub fn depth(&self) -> usize {
        self.rounds.len().saturating_sub(1)
    }

    /// The last player standing, once at least one round was resolved down to one.
    pub fn winner(&self) -> Option<&Player> {
        if self.depth() == 0 {
            return None;
        }
        match self.frontier() {
            Some(round) if round.len() == 1 => round.players.first(),
            _ => None,
        }
    }

    /// Nested `{ name, children: [ { name, players, children } ] }` view of the chain.
    ///
    /// Rendering layers written against the tree shape walk `children[0]` until it is null.
    pub fn to_nested(&self) -> Value {
        let mut child = Value::Null;
        for round in self.rounds.iter().rev() {
            let children = if child.is_null() {
                Value::Null
            } else {
                Value::Array(vec![child])
            };
            child = json!({
                "name": round.name,
                "players": round.players,
                "children": children,
            });
        }
        let children = if child.is_null() {
            Value::Null
        } else {
            Value::Array(vec![child])
        };
        json!({ "name": self.name, "children": children })
    }
}
