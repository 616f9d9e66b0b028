//! Error types shared across the crate.

use thiserror::Error;

use crate::game::Move;

/// Errors raised by the board model, the solvers and the result writer.
///
/// Unsolvable deals and exhausted budgets are not errors: solvers report
/// them as [`SearchOutcome`](crate::search::SearchOutcome) variants.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A move that the rules never allow, or that does not fit the board.
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: &'static str },

    #[error("invalid deck: {0}")]
    InvalidDeck(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SolverError>;
