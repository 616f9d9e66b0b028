//! # calculation-solver
//!
//! A search engine for Calculation, the patience game where four foundations
//! are built up in steps of one, two, three and four.
//!
//! ## Design Principles
//!
//! 1. **Immutable Boards**: `Board::apply` returns a new board and never
//!    touches its parent. Solvers hold as many boards as they like.
//!
//! 2. **Configurable Size**: Every API takes `cards_per_suit` (5 to 13) from
//!    the deck, so small deals can be searched exhaustively in tests.
//!
//! 3. **Outcomes, Not Panics**: Unsolvable deals and exhausted budgets are
//!    ordinary `SearchOutcome`s; only misuse is a `SolverError`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Piles are `im` vectors, so a child board
//!   shares almost all of its storage with its parent.
//!
//! - **Pluggable Ordering**: Heuristics and waste rankings are trait objects
//!   injected into the solvers.
//!
//! - **Deterministic**: Shuffles come from a seeded ChaCha stream and frontier
//!   ties break by insertion order, so a seed reproduces a run exactly.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG
//! - `game`: Cards, decks, boards, moves, move generation, rendering
//! - `search`: Evaluator, duplicate tracking, rankings, solvers
//! - `play`: Casual one-move-at-a-time players
//! - `results`: JSON-lines run records

pub mod core;
pub mod game;
pub mod play;
pub mod results;
pub mod search;

// Re-export commonly used types
pub use crate::core::{GameRng, RankingKind, Result, SearchLimits, SearchMode, SolverConfig, SolverError};

pub use crate::game::{get_deck, render_moves, Board, Card, Deck, Location, Move, MoveGenerator, Moves};

pub use crate::search::{
    solve, solver_for, AStarHeuristic, BestFirstSolver, DuplicateTracker, Evaluator, Heuristic,
    IterativeDeepeningSolver, SearchOutcome, SearchStats, SolveReport, Solver, WasteRanking,
};

pub use crate::play::{compare_players, play_game, GreedyPlayer, Player, RandomPlayer};

pub use crate::results::{write_results, RunRecord};
