//! Automated players that drive a `Board` through its public click interface.
//!
//! A strategy only ever learns faces the way a human would: by looking at the
//! face-up tiles after each click. `play_out` runs one to completion on a
//! simulated clock, which is what the `strategy_evaluator` binary benchmarks.
use crate::engine::{Board, BoardPhase, FaceValue};
use crate::render::Visual;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::time::Duration;

/// Chooses which tile to click next.
pub trait Strategy {
    fn name(&self) -> &str;

    /// Picks a hidden tile to click, or `None` if there is nothing left to click.
    fn choose(&mut self, board: &Board) -> Option<(usize, usize)>;

    /// Called after every click with the board as the player now sees it.
    fn observe(&mut self, _board: &Board) {}

    /// Forgets everything learned about the previous board.
    fn reset(&mut self) {}
}

/// Remembers every face it has seen and never misses a known pair.
#[derive(Clone, Debug, Default)]
pub struct PerfectMemory {
    seen: BTreeMap<FaceValue, Vec<(usize, usize)>>,
}

impl PerfectMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_seen(&self, pos: (usize, usize)) -> bool {
        self.seen.values().any(|positions| positions.contains(&pos))
    }

    fn first_unseen_hidden(&self, board: &Board) -> Option<(usize, usize)> {
        board
            .tiles()
            .filter(|t| t.is_hidden())
            .map(|t| t.position())
            .find(|&pos| !self.is_seen(pos))
    }

    fn known_hidden_pair(&self, board: &Board) -> Option<(usize, usize)> {
        self.seen.values().find_map(|positions| {
            let hidden: Vec<_> = positions
                .iter()
                .filter(|&&(r, c)| board.tile(r, c).is_hidden())
                .collect();
            (hidden.len() == 2).then(|| *hidden[0])
        })
    }
}

impl Strategy for PerfectMemory {
    fn name(&self) -> &str {
        "perfect-memory"
    }

    fn choose(&mut self, board: &Board) -> Option<(usize, usize)> {
        match board.pending().as_slice() {
            [] => self
                .known_hidden_pair(board)
                .or_else(|| self.first_unseen_hidden(board)),
            [(r, c)] => {
                // The first tile is face-up, so its face is fair game.
                let face = board.tile(*r, *c).face();
                let partner = self.seen.get(&face).and_then(|positions| {
                    positions
                        .iter()
                        .copied()
                        .find(|&(pr, pc)| (pr, pc) != (*r, *c) && board.tile(pr, pc).is_hidden())
                });
                partner
                    .or_else(|| self.first_unseen_hidden(board))
                    .or_else(|| board.tiles().find(|t| t.is_hidden()).map(|t| t.position()))
            }
            _ => None,
        }
    }

    fn observe(&mut self, board: &Board) {
        for view in board.tile_views() {
            if let Visual::FaceUp(face) = view.visual {
                let positions = self.seen.entry(face).or_default();
                if !positions.contains(&(view.row, view.col)) {
                    positions.push((view.row, view.col));
                }
            }
        }
    }

    fn reset(&mut self) {
        self.seen.clear();
    }
}

/// Clicks a uniformly random hidden tile every time.
#[derive(Clone, Debug)]
pub struct RandomGuesser {
    rng: SmallRng,
}

impl RandomGuesser {
    pub fn with_seed(seed: u64) -> Self {
        RandomGuesser {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomGuesser {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, board: &Board) -> Option<(usize, usize)> {
        let hidden: Vec<(usize, usize)> = board
            .tiles()
            .filter(|t| t.is_hidden())
            .map(|t| t.position())
            .collect();
        hidden.choose(&mut self.rng).copied()
    }
}

/// Outcome of one automated game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayReport {
    /// Clicks that flipped a tile.
    pub clicks: u32,
    /// Pairs resolved, matched or not.
    pub attempts: u32,
    /// Final elapsed-time score on the simulated clock.
    pub score: u64,
}

/// Plays `board` to the end with `strategy`, starting from a reset strategy.
///
/// Time is simulated: each click happens `click_interval` after the previous
/// one, and a mismatched pair is left on display for exactly the board's
/// mismatch delay before play continues. Stops early if the strategy gives up
/// or picks a tile that cannot be flipped.
pub fn play_out<S: Strategy + ?Sized>(
    board: &mut Board,
    strategy: &mut S,
    click_interval: Duration,
) -> PlayReport {
    let mut now = board.started_at();
    let mut clicks = 0;
    strategy.reset();

    while !board.is_game_over() {
        if board.phase() == BoardPhase::Resolving {
            now += board.mismatch_delay();
            board.tick(now);
            continue;
        }

        let Some((r, c)) = strategy.choose(board) else {
            break;
        };
        now += click_interval;
        if !board.handle_click(board.tile_center(r, c)) {
            break;
        }
        clicks += 1;
        strategy.observe(board);
        board.tick(now);
    }

    PlayReport {
        clicks,
        attempts: board.attempts(),
        score: board.elapsed_score(),
    }
}
