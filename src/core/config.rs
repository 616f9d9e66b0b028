//! Solver configuration.
//!
//! A `SolverConfig` fixes everything a run needs besides the deck:
//! - the game size (`cards_per_suit`)
//! - which search strategy runs (`SearchMode`)
//! - how waste placements are ordered (`RankingKind`)
//! - the evaluator lookahead and the search budget (`SearchLimits`)

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{Result, SolverError};
use crate::game::{validate_cards_per_suit, NUM_WASTES};

/// Which search strategy to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchMode {
    /// Best-first priority search.
    #[default]
    BestFirst,
    /// Iterative-deepening threshold search.
    IterativeDeepening,
}

impl SearchMode {
    /// Short name used on the command line and in result records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchMode::BestFirst => "bfs",
            SearchMode::IterativeDeepening => "ida",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfs" => Ok(SearchMode::BestFirst),
            "ida" => Ok(SearchMode::IterativeDeepening),
            other => Err(SolverError::Config(format!("unknown search mode '{other}'"))),
        }
    }
}

/// Which waste-placement ordering the solvers use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankingKind {
    /// Shallowest waste pile first.
    #[default]
    ByLength,
    /// One waste pile is kept for Kings.
    KingReserved,
    /// Prefer piles whose top card can follow the placed card.
    ShortTermChain,
}

impl RankingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RankingKind::ByLength => "by-length",
            RankingKind::KingReserved => "king-reserved",
            RankingKind::ShortTermChain => "short-term-chain",
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingKind {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "by-length" => Ok(RankingKind::ByLength),
            "king-reserved" => Ok(RankingKind::KingReserved),
            "short-term-chain" => Ok(RankingKind::ShortTermChain),
            other => Err(SolverError::Config(format!("unknown ranking '{other}'"))),
        }
    }
}

/// Search budget. Exceeding either bound ends the search with a timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of board expansions (`None` = unlimited).
    pub max_expansions: Option<u64>,

    /// Wall-clock limit for one `solve` call (`None` = unlimited).
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    /// No budget at all.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_expansions: None,
            time_limit: None,
        }
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max: u64) -> Self {
        self.max_expansions = Some(max);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Configuration for one solver run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Cards in one suit; 13 for the full game.
    pub cards_per_suit: u8,

    /// Search strategy.
    pub mode: SearchMode,

    /// Waste-placement ordering.
    pub ranking: RankingKind,

    /// Waste pile kept for Kings by the king-aware rankings.
    pub king_pile: usize,

    /// When set, the move generator refuses non-King cards on `king_pile`
    /// until all four Kings have been drawn.
    pub reserve_king_pile: bool,

    /// How many upcoming foundation cards the buried-cost term inspects.
    pub lookahead: usize,

    /// Expansion and wall-clock budget.
    pub limits: SearchLimits,

    /// Expansions between progress log lines.
    pub progress_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cards_per_suit: 13,
            mode: SearchMode::BestFirst,
            ranking: RankingKind::ByLength,
            king_pile: NUM_WASTES - 1,
            reserve_king_pile: false,
            lookahead: 4,
            limits: SearchLimits::unlimited(),
            progress_interval: 10_000,
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn with_cards_per_suit(mut self, cards_per_suit: u8) -> Self {
        self.cards_per_suit = cards_per_suit;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_ranking(mut self, ranking: RankingKind) -> Self {
        self.ranking = ranking;
        self
    }

    /// Use `pile` as the King pile and reserve it in the move generator.
    #[must_use]
    pub fn with_reserved_king_pile(mut self, pile: usize) -> Self {
        self.king_pile = pile;
        self.reserve_king_pile = true;
        self
    }

    #[must_use]
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Check the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        validate_cards_per_suit(self.cards_per_suit)?;
        if self.king_pile >= NUM_WASTES {
            return Err(SolverError::Config(format!(
                "king pile {} out of range (0..{NUM_WASTES})",
                self.king_pile
            )));
        }
        if self.lookahead == 0 {
            return Err(SolverError::Config("lookahead must be at least 1".into()));
        }
        if self.progress_interval == 0 {
            return Err(SolverError::Config("progress interval must be at least 1".into()));
        }
        Ok(())
    }
}
