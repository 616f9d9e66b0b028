//! Solvers for Calculation deals.
//!
//! ## Overview
//!
//! Two strategies share the same building blocks:
//!
//! - **Best-first** ([`BestFirstSolver`]): a priority frontier ordered by the
//!   [`Heuristic`], each distinct board enqueued once per run
//! - **Iterative deepening** ([`IterativeDeepeningSolver`]): repeated
//!   depth-first passes bounded by a priority threshold, using an explicit
//!   stack instead of recursion
//!
//! Children of a board are produced by the [`MoveGenerator`]; foundation
//! moves always come first, and waste placements follow in the order chosen
//! by the configured [`WasteRanking`].
//!
//! ## Usage
//!
//! ```rust
//! use calculation_solver::core::SolverConfig;
//! use calculation_solver::game::Deck;
//! use calculation_solver::search::{solve, SearchOutcome};
//!
//! let deck = Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap();
//! let config = SolverConfig::default().with_cards_per_suit(5);
//!
//! let report = solve(&deck, &config).unwrap();
//! if let SearchOutcome::Solved(board) = &report.outcome {
//!     println!("won in {} moves", board.move_count());
//! }
//! ```
//!
//! Unsolvable deals and exhausted budgets are ordinary outcomes
//! (`NoSolution`, `Timeout`), not errors.

pub mod best_first;
pub mod duplicate;
pub mod evaluator;
pub mod iterative;
pub mod ranking;
pub mod stats;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::{Result, SearchLimits, SearchMode, SolverConfig, SolverError};
use crate::game::{Board, Deck, Move, MoveGenerator, Moves};

pub use best_first::BestFirstSolver;
pub use duplicate::{CanonicalKey, DuplicateTracker};
pub use evaluator::{AStarHeuristic, Evaluator, Heuristic};
pub use iterative::IterativeDeepeningSolver;
pub use ranking::{ranking_for, ByLength, KingReserved, PileOrder, ShortTermChain, WasteRanking};
pub use stats::SearchStats;

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A winning board; its move log is the solution.
    Solved(Board),
    /// Every reachable board was examined without finding a win.
    NoSolution,
    /// The expansion or time budget ran out first.
    Timeout,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        match self {
            SearchOutcome::Solved(board) => Some(board),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_board(self) -> Option<Board> {
        match self {
            SearchOutcome::Solved(board) => Some(board),
            _ => None,
        }
    }

    /// Short name used in logs and result records.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Solved(_) => "solved",
            SearchOutcome::NoSolution => "no-solution",
            SearchOutcome::Timeout => "timeout",
        }
    }
}

/// A search strategy.
///
/// A solver owns its frontier, duplicate tracker and statistics for the
/// duration of one call; calling `solve` again starts from scratch.
pub trait Solver {
    /// Search from the opening board of `deck`.
    fn solve(&mut self, deck: &Deck) -> Result<SearchOutcome> {
        self.solve_from(Board::new(deck), deck)
    }

    /// Search from an arbitrary board dealt from `deck`.
    fn solve_from(&mut self, root: Board, deck: &Deck) -> Result<SearchOutcome>;

    /// Statistics of the most recent search.
    fn stats(&self) -> &SearchStats;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Search budget started at a fixed instant.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Budget {
    limits: SearchLimits,
    started: Instant,
}

impl Budget {
    pub(crate) fn start(limits: SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether another expansion would exceed the budget.
    pub(crate) fn exhausted(&self, expansions: u64) -> bool {
        if self.limits.max_expansions.is_some_and(|max| expansions >= max) {
            return true;
        }
        self.limits
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }
}

/// Produces the ordered moves the solvers expand.
pub(crate) struct Expander {
    generator: MoveGenerator,
    ranking: Box<dyn WasteRanking>,
}

impl Expander {
    pub(crate) fn new(generator: MoveGenerator, ranking: Box<dyn WasteRanking>) -> Self {
        Self { generator, ranking }
    }

    pub(crate) fn from_config(config: &SolverConfig) -> Self {
        let generator = if config.reserve_king_pile {
            MoveGenerator::with_king_pile(config.king_pile)
        } else {
            MoveGenerator::new()
        };
        Self::new(generator, ranking_for(config.ranking, config.king_pile))
    }

    pub(crate) fn set_ranking(&mut self, ranking: Box<dyn WasteRanking>) {
        self.ranking = ranking;
    }

    pub(crate) fn ranking_name(&self) -> &'static str {
        self.ranking.name()
    }

    /// Foundation moves in generated order, then waste placements in
    /// ranking order. Placements the generator refused stay out.
    pub(crate) fn moves(&self, board: &Board, deck: &Deck) -> Moves {
        let generated = self.generator.generate(board, deck);
        let mut ordered: Moves = generated.iter().copied().filter(Move::is_foundation_move).collect();

        if let Some(card) = board.next_card(deck) {
            for w in self.ranking.order(board, card) {
                let placement = Move::draw_to_waste(w);
                if generated.contains(&placement) {
                    ordered.push(placement);
                }
            }
        }

        ordered
    }
}

/// Build the solver selected by `config`.
pub fn solver_for(config: &SolverConfig) -> Result<Box<dyn Solver>> {
    config.validate()?;
    Ok(match config.mode {
        SearchMode::BestFirst => Box::new(BestFirstSolver::new(config.clone())),
        SearchMode::IterativeDeepening => Box::new(IterativeDeepeningSolver::new(config.clone())),
    })
}

/// Outcome and statistics of one solve.
#[derive(Clone, Debug)]
pub struct SolveReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Solve `deck` with the solver described by `config`.
pub fn solve(deck: &Deck, config: &SolverConfig) -> Result<SolveReport> {
    if deck.cards_per_suit() != config.cards_per_suit {
        return Err(SolverError::Config(format!(
            "deck has {} cards per suit but the configuration asks for {}",
            deck.cards_per_suit(),
            config.cards_per_suit
        )));
    }
    let mut solver = solver_for(config)?;
    let outcome = solver.solve(deck)?;
    Ok(SolveReport {
        outcome,
        stats: solver.stats().clone(),
    })
}

/// Serializable summary of an outcome, used in result records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    Solved,
    NoSolution,
    Timeout,
}

impl From<&SearchOutcome> for OutcomeKind {
    fn from(outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Solved(_) => OutcomeKind::Solved,
            SearchOutcome::NoSolution => OutcomeKind::NoSolution,
            SearchOutcome::Timeout => OutcomeKind::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RankingKind;

    fn round_robin_deck() -> Deck {
        Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap()
    }

    #[test]
    fn test_expander_puts_foundation_moves_first() {
        let deck = round_robin_deck();
        let board = Board::new(&deck);
        let expander = Expander::new(MoveGenerator::new(), Box::new(ByLength));

        let moves = expander.moves(&board, &deck);
        assert_eq!(
            moves.as_slice(),
            &[
                Move::draw_to_foundation(0),
                Move::draw_to_waste(0),
                Move::draw_to_waste(1),
                Move::draw_to_waste(2),
                Move::draw_to_waste(3),
            ]
        );
    }

    #[test]
    fn test_expander_follows_ranking() {
        let deck = round_robin_deck();
        let board = Board::new(&deck).apply(Move::draw_to_waste(0), &deck).unwrap();
        let expander = Expander::new(MoveGenerator::new(), Box::new(KingReserved::new(1)));

        // Next card is 4: W0 is deeper, W1 is held back for Kings
        let moves = expander.moves(&board, &deck);
        let placements: Vec<_> = moves.iter().filter(|m| m.is_waste_placement()).copied().collect();
        assert_eq!(
            placements,
            vec![Move::draw_to_waste(2), Move::draw_to_waste(3), Move::draw_to_waste(0), Move::draw_to_waste(1)]
        );
        assert_eq!(expander.ranking_name(), "king-reserved");
    }

    #[test]
    fn test_expander_respects_generator_reservation() {
        let deck = round_robin_deck();
        let board = Board::new(&deck);
        let config = SolverConfig::default()
            .with_cards_per_suit(5)
            .with_ranking(RankingKind::KingReserved)
            .with_reserved_king_pile(2);
        let expander = Expander::from_config(&config);

        let moves = expander.moves(&board, &deck);
        assert!(!moves.contains(&Move::draw_to_waste(2)));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_budget() {
        let unlimited = Budget::start(SearchLimits::unlimited());
        assert!(!unlimited.exhausted(u64::MAX));

        let capped = Budget::start(SearchLimits::unlimited().with_max_expansions(3));
        assert!(!capped.exhausted(2));
        assert!(capped.exhausted(3));

        let instant = Budget::start(SearchLimits::unlimited().with_time_limit(Duration::ZERO));
        assert!(instant.exhausted(0));
    }

    #[test]
    fn test_outcome_helpers() {
        let deck = round_robin_deck();
        let solved = SearchOutcome::Solved(Board::new(&deck));

        assert!(solved.is_solved());
        assert!(solved.board().is_some());
        assert_eq!(solved.label(), "solved");
        assert_eq!(OutcomeKind::from(&solved), OutcomeKind::Solved);
        assert!(SearchOutcome::Timeout.into_board().is_none());
        assert_eq!(SearchOutcome::NoSolution.label(), "no-solution");
    }

    #[test]
    fn test_solve_rejects_mismatched_config() {
        let deck = round_robin_deck();
        let err = solve(&deck, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));
    }

    #[test]
    fn test_solver_for_validates() {
        let config = SolverConfig::default().with_lookahead(0);
        assert!(solver_for(&config).is_err());

        let config = SolverConfig::default().with_mode(SearchMode::IterativeDeepening);
        assert_eq!(solver_for(&config).unwrap().name(), "ida");
    }
}
