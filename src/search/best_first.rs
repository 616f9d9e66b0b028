//! Best-first search over a priority frontier.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::{Result, SolverConfig};
use crate::game::{Board, Deck};

use super::duplicate::DuplicateTracker;
use super::evaluator::{Evaluator, Heuristic};
use super::ranking::WasteRanking;
use super::stats::SearchStats;
use super::{Budget, Expander, SearchOutcome, Solver};

/// A frontier board with its priority and insertion sequence.
struct FrontierEntry {
    priority: f64,
    sequence: u64,
    board: Board,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // Reversed so the max-heap pops the lowest priority, oldest first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Best-first solver.
///
/// Always expands the frontier board with the lowest priority; equal
/// priorities leave in insertion order, so runs are deterministic. A board
/// is recorded when it is enqueued, which keeps every distinct board on the
/// frontier at most once per run.
pub struct BestFirstSolver {
    config: SolverConfig,
    expander: Expander,
    heuristic: Box<dyn Heuristic>,
    tracker: DuplicateTracker,
    stats: SearchStats,
}

impl BestFirstSolver {
    /// Solver using the configured ranking and the default evaluator.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            expander: Expander::from_config(&config),
            heuristic: Box::new(Evaluator::new(config.lookahead)),
            tracker: DuplicateTracker::new(),
            stats: SearchStats::default(),
            config,
        }
    }

    /// Set a custom waste ranking.
    pub fn with_ranking<R: WasteRanking + 'static>(mut self, ranking: R) -> Self {
        self.expander.set_ranking(Box::new(ranking));
        self
    }

    /// Set a custom heuristic.
    pub fn with_heuristic<H: Heuristic + 'static>(mut self, heuristic: H) -> Self {
        self.heuristic = Box::new(heuristic);
        self
    }

    /// Boards recorded by the most recent search.
    pub fn tracker(&self) -> &DuplicateTracker {
        &self.tracker
    }

    fn finish(&mut self, budget: &Budget, outcome: SearchOutcome) -> Result<SearchOutcome> {
        self.stats.time_us = budget.elapsed().as_micros() as u64;
        log::info!(
            "{}: {} after {} expansions ({} boards, {:.0} expansions/s)",
            self.name(),
            outcome.label(),
            self.stats.expansions,
            self.tracker.len(),
            self.stats.expansions_per_second()
        );
        Ok(outcome)
    }
}

impl Solver for BestFirstSolver {
    fn solve_from(&mut self, root: Board, deck: &Deck) -> Result<SearchOutcome> {
        self.stats.reset();
        self.stats.passes = 1;
        self.tracker.clear();
        let budget = Budget::start(self.config.limits);
        let base_depth = root.move_count();

        log::info!(
            "{}: solving {} cards per suit with {} ranking",
            self.name(),
            deck.cards_per_suit(),
            self.expander.ranking_name()
        );

        let mut frontier = BinaryHeap::new();
        let mut sequence = 0u64;
        self.tracker.record(&root);
        frontier.push(FrontierEntry {
            priority: self.heuristic.priority(&root),
            sequence,
            board: root,
        });

        while let Some(FrontierEntry { board, .. }) = frontier.pop() {
            if board.is_winning() {
                return self.finish(&budget, SearchOutcome::Solved(board));
            }
            if budget.exhausted(self.stats.expansions) {
                return self.finish(&budget, SearchOutcome::Timeout);
            }

            self.stats.expansions += 1;
            self.stats.max_depth = self.stats.max_depth.max(board.move_count() - base_depth);
            if self.stats.expansions % self.config.progress_interval.max(1) == 0 {
                log::debug!(
                    "{}: {} expansions, frontier {}, {} boards seen",
                    self.name(),
                    self.stats.expansions,
                    frontier.len(),
                    self.tracker.len()
                );
                log::trace!("current board:\n{board}");
            }

            for mv in self.expander.moves(&board, deck) {
                let child = board.apply(mv, deck)?;
                self.stats.generated += 1;

                if self.heuristic.is_lost(&child, deck) {
                    continue;
                }
                if !self.tracker.record(&child) {
                    self.stats.duplicates += 1;
                    continue;
                }

                sequence += 1;
                frontier.push(FrontierEntry {
                    priority: self.heuristic.priority(&child),
                    sequence,
                    board: child,
                });
            }
            self.stats.max_frontier = self.stats.max_frontier.max(frontier.len());
        }

        self.finish(&budget, SearchOutcome::NoSolution)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "bfs"
    }
}
