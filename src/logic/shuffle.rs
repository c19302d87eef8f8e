//! Shuffling the pool before the bracket gets going.

use crate::models::Player;
use rand::seq::SliceRandom;
use rand::Rng;

/// Random permutation of `players` with positions renumbered `0..n`. The input is left as is.
pub fn shuffle_players<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Vec<Player> {
    let mut result = players.to_vec();
    // Fisher-Yates from the back: slot i swaps with a uniform j in [0, i].
    result.shuffle(rng);
    renumber(&mut result);
    result
}

/// Swap the players at `drag` and `drop`, fixing both positions.
///
/// Panics if either index is out of bounds, like `slice::swap`.
pub fn swap_players(players: &[Player], drag: usize, drop: usize) -> Vec<Player> {
    let mut result = players.to_vec();
    result.swap(drag, drop);
    result[drag].position = Some(drag);
    result[drop].position = Some(drop);
    result
}

fn renumber(players: &mut [Player]) {
    for (i, p) in players.iter_mut().enumerate() {
        p.position = Some(i);
    }
}
