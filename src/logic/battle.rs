//! Round resolution: pair players off and keep one per pair.

use crate::models::Player;
use rand::Rng;

/// Resolve one round.
///
/// Players meet in consecutive pairs `(p[2k], p[2k+1])` and a fair coin picks the survivor.
/// A trailing unpaired player goes through. Survivors keep pairing order.
pub fn battle<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Vec<Player> {
    players
        .chunks(2)
        .map(|pair| match pair {
            [only] => only.clone(),
            _ => pair[rng.gen_range(0..2)].clone(),
        })
        .collect()
}

/// [`battle`] over a pool that may be absent. No pool means no round to resolve.
pub fn resolve_round<R: Rng + ?Sized>(players: Option<&[Player]>, rng: &mut R) -> Option<Vec<Player>> {
    players.map(|p| battle(p, rng))
}
