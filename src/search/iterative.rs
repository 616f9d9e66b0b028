//! Iterative-deepening threshold search.
//!
//! Each pass is a depth-first walk that only descends into children whose
//! priority is within the current threshold. The smallest priority that was
//! cut off becomes the next threshold; a pass that cuts nothing off means
//! the reachable space is exhausted.
//!
//! The walk keeps an explicit stack of frames, so deep solutions (a full
//! deal is 48 draws or more) never touch the call stack.

use crate::core::{Result, SolverConfig};
use crate::game::{Board, Deck};

use super::duplicate::DuplicateTracker;
use super::evaluator::{Evaluator, Heuristic};
use super::ranking::WasteRanking;
use super::stats::SearchStats;
use super::{Budget, Expander, SearchOutcome, Solver};

/// Children of one expanded board, in visiting order.
struct Frame {
    children: Vec<(Board, f64)>,
    cursor: usize,
}

enum PassResult {
    Solved(Board),
    Timeout,
    /// Smallest priority above the threshold, `INFINITY` if none.
    Exhausted(f64),
}

/// Iterative-deepening solver.
pub struct IterativeDeepeningSolver {
    config: SolverConfig,
    expander: Expander,
    heuristic: Box<dyn Heuristic>,
    /// Boards on or below the threshold in the current pass.
    tracker: DuplicateTracker,
    stats: SearchStats,
}

impl IterativeDeepeningSolver {
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

    /// Expand `board` into a frame, or `None` once the budget is spent.
    ///
    /// Foundation moves are tried cheapest first, so a card that fits two
    /// foundations goes where it keeps the piles even. Waste placements keep
    /// the ranking order behind them.
    fn expand(&mut self, board: &Board, deck: &Deck, budget: &Budget) -> Result<Option<Frame>> {
        if budget.exhausted(self.stats.expansions) {
            return Ok(None);
        }
        self.stats.expansions += 1;
        if self.stats.expansions % self.config.progress_interval.max(1) == 0 {
            log::debug!(
                "{}: {} expansions, pass {}, depth {}",
                self.name(),
                self.stats.expansions,
                self.stats.passes,
                board.move_count()
            );
            log::trace!("current board:\n{board}");
        }

        let moves = self.expander.moves(board, deck);
        let mut builds = Vec::with_capacity(moves.len());
        let mut placements = Vec::with_capacity(moves.len());
        for mv in moves {
            let child = board.apply(mv, deck)?;
            let priority = self.heuristic.priority(&child);
            if mv.is_foundation_move() {
                builds.push((child, priority));
            } else {
                placements.push((child, priority));
            }
        }
        self.stats.generated += (builds.len() + placements.len()) as u64;

        // Stable, so equal-priority builds keep generated order
        builds.sort_by(|a, b| a.1.total_cmp(&b.1));
        builds.extend(placements);
        Ok(Some(Frame {
            children: builds,
            cursor: 0,
        }))
    }

    fn pass(&mut self, root: &Board, deck: &Deck, threshold: f64, budget: &Budget) -> Result<PassResult> {
        self.tracker.clear();
        self.tracker.record(root);
        let base_depth = root.move_count();
        let mut next_threshold = f64::INFINITY;

        let Some(frame) = self.expand(root, deck, budget)? else {
            return Ok(PassResult::Timeout);
        };
        let mut stack = vec![frame];

        while let Some(frame) = stack.last_mut() {
            let Some((child, cost)) = frame.children.get(frame.cursor).cloned() else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            if child.is_winning() {
                return Ok(PassResult::Solved(child));
            }
            if self.heuristic.is_lost(&child, deck) {
                continue;
            }
            if self.tracker.seen(&child) {
                self.stats.duplicates += 1;
                continue;
            }

            if cost <= threshold {
                self.tracker.record(&child);
                let Some(frame) = self.expand(&child, deck, budget)? else {
                    return Ok(PassResult::Timeout);
                };
                stack.push(frame);
                self.stats.max_frontier = self.stats.max_frontier.max(stack.len());
                self.stats.max_depth = self.stats.max_depth.max(child.move_count() - base_depth);
            } else {
                next_threshold = next_threshold.min(cost);
            }
        }

        Ok(PassResult::Exhausted(next_threshold))
    }

    fn finish(&mut self, budget: &Budget, outcome: SearchOutcome) -> Result<SearchOutcome> {
        self.stats.time_us = budget.elapsed().as_micros() as u64;
        log::info!(
            "{}: {} after {} expansions in {} passes ({:.0} expansions/s)",
            self.name(),
            outcome.label(),
            self.stats.expansions,
            self.stats.passes,
            self.stats.expansions_per_second()
        );
        Ok(outcome)
    }
}

impl Solver for IterativeDeepeningSolver {
    fn solve_from(&mut self, root: Board, deck: &Deck) -> Result<SearchOutcome> {
        self.stats.reset();
        self.tracker.clear();
        let budget = Budget::start(self.config.limits);

        log::info!(
            "{}: solving {} cards per suit with {} ranking",
            self.name(),
            deck.cards_per_suit(),
            self.expander.ranking_name()
        );

        if root.is_winning() {
            return self.finish(&budget, SearchOutcome::Solved(root));
        }

        let mut threshold = self.heuristic.priority(&root);
        loop {
            self.stats.passes += 1;
            match self.pass(&root, deck, threshold, &budget)? {
                PassResult::Solved(board) => return self.finish(&budget, SearchOutcome::Solved(board)),
                PassResult::Timeout => return self.finish(&budget, SearchOutcome::Timeout),
                PassResult::Exhausted(next) if next.is_infinite() => {
                    return self.finish(&budget, SearchOutcome::NoSolution);
                }
                PassResult::Exhausted(next) => {
                    log::debug!(
                        "{}: threshold {threshold:.2} -> {next:.2} after {} expansions",
                        self.name(),
                        self.stats.expansions
                    );
                    threshold = next;
                }
            }
        }
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "ida"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SearchLimits;
    use crate::game::Move;
    use crate::search::ranking::KingReserved;

    fn config() -> SolverConfig {
        SolverConfig::default().with_cards_per_suit(5)
    }

    fn round_robin_deck() -> Deck {
        Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap()
    }

    #[test]
    fn test_round_robin_deck() {
        let deck = round_robin_deck();
        let mut solver = IterativeDeepeningSolver::new(config());

        let board = solver.solve(&deck).unwrap().into_board().unwrap();

        assert!(board.is_winning());
        assert_eq!(board.move_count(), 16);
        assert!(board.move_log().iter().all(|mv| mv.draws() && mv.is_foundation_move()));
        assert_eq!(solver.stats().passes, 1);
    }

    #[test]
    fn test_dead_end_board() {
        let deck = round_robin_deck();
        let root = Board::from_piles(
            &deck,
            [vec![1, 2], vec![2], vec![3], vec![4]],
            [vec![3, 4, 1, 0], vec![3, 1, 4, 0], vec![3, 4, 2, 0], vec![2, 0, 1]],
            16,
        )
        .unwrap();

        let mut solver = IterativeDeepeningSolver::new(config());
        let outcome = solver.solve_from(root, &deck).unwrap();

        assert_eq!(outcome, SearchOutcome::NoSolution);
        assert!(solver.stats().expansions <= 10);
        assert!(solver.stats().passes <= 3);
    }

    #[test]
    fn test_expansion_budget() {
        let deck = round_robin_deck();
        let config = config().with_limits(SearchLimits::unlimited().with_max_expansions(5));
        let mut solver = IterativeDeepeningSolver::new(config);

        assert_eq!(solver.solve(&deck).unwrap(), SearchOutcome::Timeout);
        assert_eq!(solver.stats().expansions, 5);
    }

    #[test]
    fn test_builds_visited_cheapest_first() {
        // After 2 -> F0 and 4 -> F1, the next card 1 fits both F1 and F2.
        // F2 keeps the foundations even, so it is tried first.
        let deck = round_robin_deck();
        let board = Board::new(&deck)
            .apply(Move::draw_to_foundation(0), &deck)
            .unwrap()
            .apply(Move::draw_to_foundation(1), &deck)
            .unwrap();
        let mut solver = IterativeDeepeningSolver::new(config());
        let budget = Budget::start(SearchLimits::unlimited());

        let frame = solver.expand(&board, &deck, &budget).unwrap().unwrap();
        let visited: Vec<Move> = frame
            .children
            .iter()
            .filter_map(|(child, _)| child.move_log().last().copied())
            .collect();

        let generated = solver.expander.moves(&board, &deck);
        assert_eq!(generated[..2], [Move::draw_to_foundation(1), Move::draw_to_foundation(2)]);
        assert_eq!(visited[..2], [Move::draw_to_foundation(2), Move::draw_to_foundation(1)]);
        assert!(frame.children[0].1 < frame.children[1].1);
        assert_eq!(visited[2..], generated[2..]);
        assert_eq!(visited.len(), 6);
        assert_eq!(solver.stats().generated, 6);
    }

    #[test]
    fn test_reversed_round_robin_deck() {
        let mut cards = vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0];
        cards.reverse();
        let deck = Deck::from_cards(5, cards).unwrap();
        let mut solver = IterativeDeepeningSolver::new(config()).with_ranking(KingReserved::new(0));

        let board = solver.solve(&deck).unwrap().into_board().unwrap();
        assert_eq!(board.move_count(), 20);

        let replayed = Board::replay(&deck, board.move_log()).unwrap();
        assert_eq!(replayed, board);
        assert!(replayed.is_winning());
    }

    #[test]
    fn test_solve_is_repeatable() {
        let deck = Deck::from_cards(5, vec![1, 3, 4, 2, 0, 4, 3, 2, 1, 0, 2, 3, 4, 1, 0, 0]).unwrap();
        let mut solver = IterativeDeepeningSolver::new(config());

        let first = solver.solve(&deck).unwrap();
        let first_stats = solver.stats().clone();
        let second = solver.solve(&deck).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.board().map(Board::move_log), second.board().map(Board::move_log));
        assert_eq!(first_stats.expansions, solver.stats().expansions);
    }
}
