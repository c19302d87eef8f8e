//! Bracket advancement: resolve the frontier round and append its survivors.

use crate::logic::battle::battle;
use crate::models::{Round, Tournament};
use rand::Rng;

/// Resolving a round larger than this schedules another round.
pub const RESCHEDULE_ABOVE: usize = 2;

/// Resolve the frontier and append the survivors as round `counter`.
///
/// Returns the size of the round that was resolved, or `None` when the frontier is
/// missing or empty (nothing is appended then).
pub fn advance_round<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    counter: u32,
    rng: &mut R,
) -> Option<usize> {
    let frontier = tournament.frontier()?;
    if frontier.is_empty() {
        return None;
    }
    let resolved = frontier.len();
    let survivors = battle(&frontier.players, rng);
    tournament.append_round(Round::resolved(counter, survivors));
    Some(resolved)
}

/// Whether resolving a round of `resolved` players leaves battles to fight.
///
/// A 2-player round is still resolved, but does not schedule a further tick.
pub fn needs_another_round(resolved: usize) -> bool {
    resolved > RESCHEDULE_ABOVE
}
