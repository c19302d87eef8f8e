//! Player data structure.

use serde::{Deserialize, Serialize};

/// Identifier for a player: the decimal corpus key the name was drawn with.
pub type PlayerId = String;

/// A player in the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Display/seed order within the round the player is shown in.
    pub position: Option<usize>,
    /// Visual tag fixed at pool creation; never recomputed.
    pub color: Option<usize>,
}

impl Player {
    /// Create a player for corpus key `key`. Position and color are unset.
    pub fn new(key: usize, name: impl Into<String>) -> Self {
        Self {
            id: key.to_string(),
            name: name.into(),
            position: None,
            color: None,
        }
    }

    /// Same player, placed at `position`.
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}
