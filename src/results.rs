//! Run records appended to a JSON-lines results file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{RankingKind, Result, SearchMode};
use crate::game::{Card, Deck, Move};
use crate::search::{OutcomeKind, SearchOutcome, SearchStats};

/// Everything needed to reproduce and compare one solver run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub cards_per_suit: u8,
    pub deck: Vec<Card>,
    pub mode: SearchMode,
    pub ranking: RankingKind,
    pub outcome: OutcomeKind,
    /// The winning line; empty unless solved.
    pub moves: Vec<Move>,
    pub elapsed_ms: u64,
    pub stats: SearchStats,
}

impl RunRecord {
    pub fn new(
        deck: &Deck,
        mode: SearchMode,
        ranking: RankingKind,
        outcome: &SearchOutcome,
        stats: &SearchStats,
    ) -> Self {
        Self {
            cards_per_suit: deck.cards_per_suit(),
            deck: deck.cards().to_vec(),
            mode,
            ranking,
            outcome: OutcomeKind::from(outcome),
            moves: outcome
                .board()
                .map(|board| board.move_log().iter().copied().collect())
                .unwrap_or_default(),
            elapsed_ms: stats.time_us / 1_000,
            stats: stats.clone(),
        }
    }
}

/// Append `record` to `path` as one JSON line, creating the file if needed.
pub fn write_results(path: impl AsRef<Path>, record: &RunRecord) -> Result<()> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path.as_ref())?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SolverConfig;
    use crate::search::solve;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("calculation-{}-{name}.jsonl", std::process::id()))
    }

    #[test]
    fn test_record_of_solved_run() {
        let deck = Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap();
        let config = SolverConfig::default().with_cards_per_suit(5);
        let report = solve(&deck, &config).unwrap();

        let record = RunRecord::new(&deck, config.mode, config.ranking, &report.outcome, &report.stats);

        assert_eq!(record.outcome, OutcomeKind::Solved);
        assert_eq!(record.moves.len(), 16);
        assert_eq!(record.deck, deck.cards());
        assert_eq!(record.stats.expansions, report.stats.expansions);
    }

    #[test]
    fn test_write_results_appends_lines() {
        let path = temp_path("append");
        let _ = fs::remove_file(&path);

        let deck = Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap();
        let record = RunRecord::new(
            &deck,
            SearchMode::IterativeDeepening,
            RankingKind::KingReserved,
            &SearchOutcome::Timeout,
            &SearchStats::default(),
        );

        write_results(&path, &record).unwrap();
        write_results(&path, &record).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"outcome\":\"timeout\""));

        let parsed: RunRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.moves.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_results_reports_io_errors() {
        let dir = std::env::temp_dir();
        let deck = Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap();
        let record = RunRecord::new(
            &deck,
            SearchMode::BestFirst,
            RankingKind::ByLength,
            &SearchOutcome::NoSolution,
            &SearchStats::default(),
        );

        // A directory cannot be opened for appending
        let err = write_results(&dir, &record).unwrap_err();
        assert!(matches!(err, crate::core::SolverError::Io(_)));
    }
}
