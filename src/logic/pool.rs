//! Player pool generation from the name corpus.

use crate::config::BracketConfig;
use crate::corpus::{NameCorpus, NAME_KEY_RANGE};
use crate::models::Player;
use rand::Rng;
use serde_json::Value;
use std::collections::HashSet;

/// Draw one player at a uniformly random corpus key. `None` if the key has no name.
pub fn create_player<R: Rng + ?Sized>(corpus: &NameCorpus, rng: &mut R) -> Option<Player> {
    let key = rng.gen_range(NAME_KEY_RANGE);
    corpus.get(key).map(|name| Player::new(key, name))
}

/// Build a pool for `requested` players (clamped by `config`).
///
/// Keys already drawn are redrawn, so the pool always holds exactly the clamped size
/// with distinct ids. `position` and `color` are both the generation index.
pub fn generate_players<R: Rng + ?Sized>(
    config: &BracketConfig,
    corpus: &NameCorpus,
    requested: Option<i64>,
    rng: &mut R,
) -> Vec<Player> {
    // Only NAME_KEY_RANGE.len() distinct ids exist.
    let n = config.clamp_size(requested).min(NAME_KEY_RANGE.len());

    let mut drawn = HashSet::with_capacity(n);
    let mut players = Vec::with_capacity(n);
    while players.len() < n {
        let Some(player) = create_player(corpus, rng) else {
            continue;
        };
        if !drawn.insert(player.id.clone()) {
            log::trace!("Key {} already in pool, redrawing", player.id);
            continue;
        }
        let index = players.len();
        players.push(Player {
            position: Some(index),
            color: Some(index),
            ..player
        });
    }

    log::info!("Generated pool of {} players (requested {:?})", n, requested);
    players
}

/// Interpret a player count coming from an outer surface.
///
/// Numbers and numeric strings are rounded up; anything else is treated as absent.
pub fn requested_size_from_json(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.ceil() as i64)
}
