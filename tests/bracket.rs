//! Integration tests for the bracket controller: starting, ticking, shuffling, reordering
//! and resetting.

use bracket_tournament::{
    BracketConfig, BracketController, BracketEvent, NameCorpus, TournamentError, TournamentState,
};
use std::collections::HashSet;
use std::sync::Arc;

fn corpus() -> Arc<NameCorpus> {
    Arc::new(NameCorpus::builtin().unwrap())
}

fn config(seed: u64) -> BracketConfig {
    BracketConfig {
        min_size: 2,
        max_size: 64,
        size: 8,
        seed: Some(seed),
    }
}

fn controller_with(seed: u64, count: i64) -> BracketController {
    let mut c = BracketController::new(config(seed), corpus());
    c.dispatch(BracketEvent::SetPlayerCount(Some(count))).unwrap();
    c
}

fn round_sizes(c: &BracketController) -> Vec<usize> {
    c.tournament().rounds().iter().map(|r| r.len()).collect()
}

#[test]
fn new_controller_is_seeded_with_default_pool() {
    let c = BracketController::new(config(1), corpus());
    assert_eq!(c.state(), TournamentState::Seeded);
    assert_eq!(c.round(), None);
    assert_eq!(c.players().len(), 8);
    assert_eq!(c.tournament().rounds().len(), 1);
    assert_eq!(c.tournament().rounds()[0].name, "start place");
    assert_eq!(c.tournament().rounds()[0].players, c.players());
    assert!(c.can_shuffle());
    assert!(c.can_reorder());
}

#[test]
fn mount_plays_default_pool_to_a_winner() {
    let c = BracketController::mount(config(2), corpus());
    assert_eq!(c.state(), TournamentState::Complete);
    assert_eq!(c.round(), Some(3));
    assert_eq!(round_sizes(&c), vec![8, 4, 2, 1]);
    assert_eq!(c.pending(), 0);

    let winner = c.winner().unwrap();
    assert!(c.players().iter().any(|p| p.id == winner.id));
}

#[test]
fn rounds_are_named_after_the_counter() {
    let c = BracketController::mount(config(3), corpus());
    let names: Vec<_> = c.tournament().rounds().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["start place", "round: 1", "round: 2", "round: 3"]);
}

#[test]
fn power_of_two_pools_finish_in_log2_ticks() {
    for (k, expected_ticks) in [(2, 1), (4, 2), (8, 3), (16, 4), (32, 5), (64, 6)] {
        let mut c = controller_with(k as u64, k);
        c.submit(BracketEvent::Start);
        let mut ticks = 0;
        while let Some(result) = c.step() {
            result.unwrap();
            ticks += 1;
        }
        assert_eq!(ticks, expected_ticks, "pool of {k}");
        assert_eq!(c.tournament().frontier().unwrap().len(), 1);
        assert_eq!(c.state(), TournamentState::Complete);
    }
}

#[test]
fn odd_survivor_is_carried_forward() {
    let mut c = controller_with(5, 5);
    c.dispatch(BracketEvent::Start).unwrap();
    assert_eq!(round_sizes(&c), vec![5, 3, 2, 1]);

    // The fifth seed has no opponent in round 1 and always reaches round 2.
    let fifth = &c.players()[4];
    let round_one = &c.tournament().rounds()[1];
    assert_eq!(round_one.players.last(), Some(fifth));
}

#[test]
fn shuffled_eight_player_scenario() {
    let mut c = controller_with(8, 8);
    let original: HashSet<_> = c.players().iter().map(|p| p.id.clone()).collect();

    c.dispatch(BracketEvent::Shuffle).unwrap();
    c.submit(BracketEvent::Start);
    for _ in 0..3 {
        c.step().unwrap().unwrap();
    }

    assert_eq!(c.pending(), 0);
    let frontier = c.tournament().frontier().unwrap();
    assert_eq!(frontier.len(), 1);
    assert!(original.contains(&frontier.players[0].id));
}

#[test]
fn state_is_advancing_between_ticks() {
    let mut c = controller_with(9, 8);
    c.submit(BracketEvent::Start);
    c.step().unwrap().unwrap();
    assert_eq!(c.state(), TournamentState::Advancing);
    assert_eq!(c.round(), Some(1));
    assert_eq!(c.pending(), 1);
    assert!(c.can_shuffle());
    assert!(!c.can_reorder());

    c.step().unwrap().unwrap();
    assert_eq!(c.round(), Some(2));
    assert!(!c.can_shuffle());
}

#[test]
fn changing_count_mid_tournament_discards_history() {
    let mut c = controller_with(10, 16);
    c.submit(BracketEvent::Start);
    c.step().unwrap().unwrap();
    c.step().unwrap().unwrap();
    assert_eq!(c.pending(), 1);

    c.dispatch(BracketEvent::SetPlayerCount(Some(6))).unwrap();
    assert_eq!(c.round(), None);
    assert_eq!(c.pending(), 0);
    assert_eq!(c.state(), TournamentState::Seeded);
    assert_eq!(round_sizes(&c), vec![6]);
}

#[test]
fn changing_count_after_completion_resets() {
    let mut c = BracketController::mount(config(12), corpus());
    c.dispatch(BracketEvent::SetPlayerCount(Some(100))).unwrap();
    assert_eq!(c.round(), None);
    assert_eq!(round_sizes(&c), vec![64]);
    assert!(c.winner().is_none());
}

#[test]
fn start_twice_is_declined() {
    let mut c = BracketController::mount(config(13), corpus());
    let rounds = c.tournament().rounds().to_vec();
    assert_eq!(c.dispatch(BracketEvent::Start), Err(TournamentError::AlreadyStarted));
    assert_eq!(c.tournament().rounds(), rounds.as_slice());
}

#[test]
fn tick_before_start_is_declined() {
    let mut c = controller_with(14, 4);
    c.submit(BracketEvent::Tick);
    assert_eq!(c.step(), Some(Err(TournamentError::NotStarted)));
    assert_eq!(c.tournament().depth(), 0);
}

#[test]
fn tick_after_completion_is_declined() {
    let mut c = BracketController::mount(config(15), corpus());
    c.submit(BracketEvent::Tick);
    assert_eq!(c.step(), Some(Err(TournamentError::Complete)));
    assert_eq!(c.round(), Some(3));
}

#[test]
fn shuffle_before_start_renumbers_and_keeps_colors() {
    let mut c = controller_with(16, 12);
    let before = c.players().to_vec();
    c.dispatch(BracketEvent::Shuffle).unwrap();

    let after = c.players();
    assert_eq!(after.len(), before.len());
    for (i, p) in after.iter().enumerate() {
        assert_eq!(p.position, Some(i));
        let original = before.iter().find(|b| b.id == p.id).unwrap();
        assert_eq!(p.color, original.color);
    }
    assert_eq!(c.tournament().rounds()[0].players, after);
}

#[test]
fn shuffle_is_locked_after_round_one() {
    let mut c = BracketController::mount(config(17), corpus());
    let rounds = c.tournament().rounds().to_vec();
    assert_eq!(
        c.dispatch(BracketEvent::Shuffle),
        Err(TournamentError::ShuffleLocked { round: 3 })
    );
    assert_eq!(c.tournament().rounds(), rounds.as_slice());
}

#[test]
fn shuffle_at_round_one_returns_to_seeded() {
    let mut c = controller_with(18, 2);
    c.dispatch(BracketEvent::Start).unwrap();
    assert_eq!(c.round(), Some(1));
    assert_eq!(c.state(), TournamentState::Complete);

    c.dispatch(BracketEvent::Shuffle).unwrap();
    assert_eq!(c.round(), None);
    assert_eq!(c.state(), TournamentState::Seeded);
    assert_eq!(round_sizes(&c), vec![2]);
}

#[test]
fn reorder_swaps_two_players() {
    let mut c = controller_with(19, 6);
    let before = c.players().to_vec();
    c.dispatch(BracketEvent::Reorder { drag: 1, drop: 4 }).unwrap();

    let after = c.players();
    assert_eq!(after[1].id, before[4].id);
    assert_eq!(after[4].id, before[1].id);
    assert_eq!(after[1].position, Some(1));
    assert_eq!(after[4].position, Some(4));
    assert_eq!(after[0], before[0]);
    assert_eq!(c.tournament().rounds()[0].players, after);
}

#[test]
fn reorder_with_invalid_index_is_ignored() {
    let mut c = controller_with(20, 6);
    let before = c.players().to_vec();
    assert_eq!(
        c.dispatch(BracketEvent::Reorder { drag: 0, drop: 6 }),
        Err(TournamentError::InvalidIndex { index: 6, len: 6 })
    );
    assert_eq!(
        c.dispatch(BracketEvent::Reorder { drag: -1, drop: 2 }),
        Err(TournamentError::InvalidIndex { index: -1, len: 6 })
    );
    assert_eq!(c.players(), before.as_slice());
}

#[test]
fn reorder_after_start_is_ignored() {
    let mut c = BracketController::mount(config(21), corpus());
    let before = c.players().to_vec();
    assert_eq!(
        c.dispatch(BracketEvent::Reorder { drag: 0, drop: 1 }),
        Err(TournamentError::RoundResolved)
    );
    assert_eq!(c.players(), before.as_slice());
}

#[test]
fn same_seed_gives_same_bracket() {
    let a = BracketController::mount(config(22), corpus());
    let b = BracketController::mount(config(22), corpus());
    let players = |c: &BracketController| -> Vec<Vec<String>> {
        c.tournament()
            .rounds()
            .iter()
            .map(|r| r.players.iter().map(|p| p.id.clone()).collect())
            .collect()
    };
    assert_eq!(players(&a), players(&b));
}

#[test]
fn snapshot_exposes_pairs_per_round() {
    let c = controller_with(23, 5);
    let snapshot = c.snapshot();
    assert_eq!(snapshot.state, TournamentState::Seeded);
    assert_eq!(snapshot.pairs.len(), 1);
    let pairs = &snapshot.pairs[0];
    assert_eq!(pairs.len(), 3);
    assert!(pairs[0].player_two.is_some());
    assert!(pairs[2].player_two.is_none());
    assert_eq!(pairs[2].player_one, c.players()[4]);
    assert!(snapshot.winner.is_none());
}
