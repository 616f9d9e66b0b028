//! Core solver infrastructure: configuration, errors and the deterministic RNG.
//!
//! Nothing here knows the game rules; `game` and `search` build on it.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{RankingKind, SearchLimits, SearchMode, SolverConfig};
pub use error::{Result, SolverError};
pub use rng::GameRng;
