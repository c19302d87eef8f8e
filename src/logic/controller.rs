//! Bracket controller: owns the pool, the bracket and the round counter, and drives the
//! tournament from one event to the next.
//!
//! Every event runs to completion before the next one is taken off the queue. Resolving a
//! round that still had more than two players enqueues the next [`BracketEvent::Tick`], so
//! [`BracketController::dispatch`] of a `Start` plays the whole bracket out while
//! [`BracketController::submit`] + [`BracketController::step`] walk it one tick at a time.
//!
//! The pool and the bracket are replaced wholesale on every change to the seed round.

use crate::config::BracketConfig;
use crate::corpus::NameCorpus;
use crate::logic::advance::{advance_round, needs_another_round};
use crate::logic::pool::generate_players;
use crate::logic::shuffle::{shuffle_players, swap_players};
use crate::models::{Pair, Player, Tournament, TournamentError, TournamentId, TournamentState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;

/// Inputs the controller reacts to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketEvent {
    /// Regenerate the pool for a new count, discarding any progress.
    SetPlayerCount(Option<i64>),
    /// Resolve the start round (only while no round counter exists).
    Start,
    /// Shuffle the pool (up to round 1).
    Shuffle,
    /// Swap two players in the start round (only before the start).
    Reorder { drag: i64, drop: i64 },
    /// Resolve the frontier round.
    Tick,
}

/// Read-only view of the bracket handed to renderers.
#[derive(Debug, Serialize)]
pub struct BracketSnapshot<'a> {
    pub id: TournamentId,
    pub state: TournamentState,
    pub round: Option<u32>,
    pub can_shuffle: bool,
    pub can_reorder: bool,
    pub tournament: &'a Tournament,
    /// Pairings per round, in round order.
    pub pairs: Vec<Vec<Pair>>,
    pub winner: Option<&'a Player>,
}

pub struct BracketController {
    config: BracketConfig,
    corpus: Arc<NameCorpus>,
    rng: StdRng,
    players: Vec<Player>,
    tournament: Tournament,
    round: Option<u32>,
    queue: VecDeque<BracketEvent>,
}

impl BracketController {
    /// A seeded controller holding a pool of the configured default size.
    ///
    /// The RNG is seeded from `config.seed` when present.
    pub fn new(config: BracketConfig, corpus: Arc<NameCorpus>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, corpus, rng)
    }

    pub fn with_rng(config: BracketConfig, corpus: Arc<NameCorpus>, mut rng: StdRng) -> Self {
        let players = generate_players(&config, &corpus, None, &mut rng);
        let tournament = Tournament::new(players.clone());
        Self {
            config,
            corpus,
            rng,
            players,
            tournament,
            round: None,
            queue: VecDeque::new(),
        }
    }

    /// What a freshly opened bracket does: seed the default pool and play it out.
    pub fn mount(config: BracketConfig, corpus: Arc<NameCorpus>) -> Self {
        let mut controller = Self::new(config, corpus);
        if let Err(e) = controller.dispatch(BracketEvent::Start) {
            log::debug!("Mount start ignored: {}", e);
        }
        controller
    }

    /// Queue `event` without processing it.
    pub fn submit(&mut self, event: BracketEvent) {
        self.queue.push_back(event);
    }

    /// Process the oldest queued event. `None` when the queue is empty.
    pub fn step(&mut self) -> Option<Result<(), TournamentError>> {
        let event = self.queue.pop_front()?;
        Some(self.handle(event))
    }

    /// Process queued events until none are left. Declined events are logged and dropped.
    pub fn run_until_idle(&mut self) {
        while let Some(result) = self.step() {
            if let Err(e) = result {
                log::debug!("Queued event ignored: {}", e);
            }
        }
    }

    /// Handle `event` right away, then run until idle.
    ///
    /// Pending ticks are processed afterwards, so a count change or shuffle cancels them.
    /// Returns the outcome of `event` itself. On `Err` the bracket is unchanged.
    pub fn dispatch(&mut self, event: BracketEvent) -> Result<(), TournamentError> {
        let result = self.handle(event);
        self.run_until_idle();
        result
    }

    fn handle(&mut self, event: BracketEvent) -> Result<(), TournamentError> {
        match event {
            BracketEvent::SetPlayerCount(requested) => {
                self.set_player_count(requested);
                Ok(())
            }
            BracketEvent::Start => self.start(),
            BracketEvent::Shuffle => self.shuffle(),
            BracketEvent::Reorder { drag, drop } => self.reorder_players(drag, drop),
            BracketEvent::Tick => self.tick(),
        }
    }

    fn set_player_count(&mut self, requested: Option<i64>) {
        if self.round.take().is_some() {
            log::debug!(
                "Player count changed mid-tournament, discarding {} rounds",
                self.tournament.depth()
            );
        }
        self.queue.retain(|e| *e != BracketEvent::Tick);
        self.players = generate_players(&self.config, &self.corpus, requested, &mut self.rng);
        self.tournament.reseed(self.players.clone());
    }

    fn start(&mut self) -> Result<(), TournamentError> {
        if self.round.is_some() {
            return Err(TournamentError::AlreadyStarted);
        }
        self.round = Some(1);
        self.resolve_frontier(1);
        Ok(())
    }

    fn tick(&mut self) -> Result<(), TournamentError> {
        let round = self.round.ok_or(TournamentError::NotStarted)?;
        if self.state() == TournamentState::Complete {
            return Err(TournamentError::Complete);
        }
        let next = round + 1;
        self.round = Some(next);
        self.resolve_frontier(next);
        Ok(())
    }

    fn resolve_frontier(&mut self, counter: u32) {
        let Some(resolved) = advance_round(&mut self.tournament, counter, &mut self.rng) else {
            log::debug!("Round {}: nothing to resolve, tournament ends without a winner", counter);
            return;
        };
        let survivors = self.tournament.frontier().map_or(0, |r| r.len());
        log::debug!("Round {}: {} players -> {}", counter, resolved, survivors);

        if needs_another_round(resolved) {
            self.queue.push_back(BracketEvent::Tick);
        } else if let Some(winner) = self.tournament.winner() {
            log::info!("Tournament {} won by {} ({})", self.tournament.id, winner.name, winner.id);
        }
    }

    fn shuffle(&mut self) -> Result<(), TournamentError> {
        match self.round {
            Some(round) if round > 1 => Err(TournamentError::ShuffleLocked { round }),
            _ => {
                // The round-1 result was drawn from the old order; start over from the seed.
                if self.round.take().is_some() {
                    self.queue.retain(|e| *e != BracketEvent::Tick);
                }
                self.players = shuffle_players(&self.players, &mut self.rng);
                self.tournament.reseed(self.players.clone());
                Ok(())
            }
        }
    }

    /// Swap the players at `drag` and `drop` in the start round.
    fn reorder_players(&mut self, drag: i64, drop: i64) -> Result<(), TournamentError> {
        if self.round.is_some() {
            return Err(TournamentError::RoundResolved);
        }
        let len = self.players.len();
        let drag = checked_index(drag, len)?;
        let drop = checked_index(drop, len)?;
        self.players = swap_players(&self.players, drag, drop);
        self.tournament.reseed(self.players.clone());
        Ok(())
    }

    pub fn state(&self) -> TournamentState {
        if self.round.is_none() {
            return TournamentState::Seeded;
        }
        match self.tournament.frontier() {
            Some(frontier) if frontier.len() > 1 => TournamentState::Advancing,
            _ => TournamentState::Complete,
        }
    }

    pub fn can_shuffle(&self) -> bool {
        self.round.map_or(true, |r| r <= 1)
    }

    pub fn can_reorder(&self) -> bool {
        self.round.is_none()
    }

    pub fn config(&self) -> &BracketConfig {
        &self.config
    }

    /// Current pool, in start-round order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn id(&self) -> TournamentId {
        self.tournament.id
    }

    /// Round counter; `None` until the tournament starts.
    pub fn round(&self) -> Option<u32> {
        self.round
    }

    /// Number of events waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.tournament.winner()
    }

    pub fn snapshot(&self) -> BracketSnapshot<'_> {
        BracketSnapshot {
            id: self.tournament.id,
            state: self.state(),
            round: self.round,
            can_shuffle: self.can_shuffle(),
            can_reorder: self.can_reorder(),
            tournament: &self.tournament,
            pairs: self.tournament.rounds().iter().map(|r| r.pairs()).collect(),
            winner: self.tournament.winner(),
        }
    }
}

fn checked_index(index: i64, len: usize) -> Result<usize, TournamentError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(TournamentError::InvalidIndex { index, len })
}
