//! Round and Pair: one elimination stage and the pairings a renderer draws for it.

use crate::models::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name given to the round holding the initial pool.
pub const START_ROUND_NAME: &str = "start place";

/// Two players that meet in a round. The trailing player of an odd round has no opponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub player_one: Player,
    pub player_two: Option<Player>,
}

/// One elimination stage. Appended once to the bracket and never edited afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    pub players: Vec<Player>,
    pub created_at: DateTime<Utc>,
}

impl Round {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            name: name.into(),
            players,
            created_at: Utc::now(),
        }
    }

    /// The round holding the initial (possibly shuffled) pool.
    pub fn start(players: Vec<Player>) -> Self {
        Self::new(START_ROUND_NAME, players)
    }

    /// A resolved round, named after the round counter that produced it.
    pub fn resolved(counter: u32, players: Vec<Player>) -> Self {
        Self::new(format!("round: {counter}"), players)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Consecutive pairs `(p[2k], p[2k+1])` in round order.
    pub fn pairs(&self) -> Vec<Pair> {
        self.players
            .chunks(2)
            .map(|chunk| Pair {
                player_one: chunk[0].clone(),
                player_two: chunk.get(1).cloned(),
            })
            .collect()
    }
}
