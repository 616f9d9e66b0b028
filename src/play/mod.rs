//! Casual single-line playthroughs.
//!
//! A [`Player`] picks one move at a time with no lookahead or backtracking.
//! These are baselines for the solvers: a greedy player wins only the
//! easiest deals, a random one almost never.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Result};
use crate::game::{Board, Deck, Move, MoveGenerator};

/// Chooses the next move from the legal ones.
pub trait Player {
    /// Pick one of `moves`; `None` gives up.
    fn choose_move(&mut self, board: &Board, moves: &[Move]) -> Option<Move>;

    /// Short name used in reports.
    fn name(&self) -> &'static str;
}

/// Uniformly random legal moves.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("random-player"),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, _board: &Board, moves: &[Move]) -> Option<Move> {
        self.rng.choose(moves).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Builds on a foundation whenever it can, otherwise takes the first move.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPlayer;

impl GreedyPlayer {
    fn weight(mv: &Move) -> u8 {
        if mv.is_foundation_move() {
            1
        } else {
            2
        }
    }
}

impl Player for GreedyPlayer {
    fn choose_move(&mut self, _board: &Board, moves: &[Move]) -> Option<Move> {
        // min_by_key keeps the first of equal weights
        moves.iter().min_by_key(|mv| Self::weight(mv)).copied()
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Result of one playthrough.
#[derive(Clone, Debug)]
pub struct PlayResult {
    pub won: bool,
    /// The final board; its move log is the line that was played.
    pub board: Board,
}

/// Play `deck` from the opening board until it is won or stuck.
///
/// Every move either draws a card or builds on a foundation, so a game ends
/// after at most `deck.len()` + 4 * `cards_per_suit` moves.
pub fn play_game(deck: &Deck, player: &mut dyn Player) -> Result<PlayResult> {
    let generator = MoveGenerator::new();
    let mut board = Board::new(deck);

    while !board.is_winning() {
        let moves = generator.generate(&board, deck);
        let Some(mv) = player.choose_move(&board, &moves) else {
            log::debug!("{}: stuck after {} moves", player.name(), board.move_count());
            return Ok(PlayResult { won: false, board });
        };
        board = board.apply(mv, deck)?;
    }

    log::debug!("{}: won in {} moves", player.name(), board.move_count());
    Ok(PlayResult { won: true, board })
}

/// Win counts of two players over the same deals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
}

/// Let both players play the same `games` shuffled deals.
pub fn compare_players(
    first: &mut dyn Player,
    second: &mut dyn Player,
    cards_per_suit: u8,
    games: usize,
    rng: &mut GameRng,
) -> Result<Comparison> {
    let mut comparison = Comparison {
        games,
        ..Comparison::default()
    };

    for _ in 0..games {
        let deck = Deck::shuffled(cards_per_suit, &mut rng.fork())?;
        if play_game(&deck, first)?.won {
            comparison.first_wins += 1;
        }
        if play_game(&deck, second)?.won {
            comparison.second_wins += 1;
        }
    }

    log::info!(
        "{} won {}/{games}, {} won {}/{games}",
        first.name(),
        comparison.first_wins,
        second.name(),
        comparison.second_wins
    );
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_robin_deck() -> Deck {
        Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap()
    }

    #[test]
    fn test_greedy_prefers_foundation() {
        let moves = [Move::draw_to_waste(0), Move::draw_to_foundation(2), Move::draw_to_foundation(1)];
        let deck = round_robin_deck();
        let board = Board::new(&deck);

        assert_eq!(GreedyPlayer.choose_move(&board, &moves), Some(Move::draw_to_foundation(2)));
        assert_eq!(GreedyPlayer.choose_move(&board, &[]), None);
    }

    #[test]
    fn test_greedy_wins_round_robin() {
        let deck = round_robin_deck();
        let result = play_game(&deck, &mut GreedyPlayer).unwrap();

        assert!(result.won);
        assert!(result.board.is_winning());
        // Drawing all 16 cards is the least a win can take
        assert!(result.board.move_count() >= 16);
    }

    #[test]
    fn test_random_player_is_deterministic() {
        let deck = Deck::shuffled(7, &mut GameRng::new(3)).unwrap();

        let first = play_game(&deck, &mut RandomPlayer::new(11)).unwrap();
        let second = play_game(&deck, &mut RandomPlayer::new(11)).unwrap();

        assert_eq!(first.won, second.won);
        assert_eq!(first.board.move_log(), second.board.move_log());
    }

    #[test]
    fn test_playthrough_is_legal() {
        let deck = Deck::shuffled(6, &mut GameRng::new(5)).unwrap();
        let result = play_game(&deck, &mut RandomPlayer::new(1)).unwrap();

        let replayed = Board::replay(&deck, result.board.move_log()).unwrap();
        assert_eq!(replayed, result.board);
        assert!(result.board.move_count() <= deck.len() + 4 * 6);
        if !result.won {
            assert!(MoveGenerator::new().generate(&result.board, &deck).is_empty());
        }
    }

    #[test]
    fn test_compare_players() {
        let mut rng = GameRng::new(9);
        let comparison =
            compare_players(&mut RandomPlayer::new(2), &mut GreedyPlayer, 5, 6, &mut rng).unwrap();

        assert_eq!(comparison.games, 6);
        assert!(comparison.first_wins <= 6);
        assert!(comparison.second_wins <= 6);

        let mut rng = GameRng::new(9);
        let again = compare_players(&mut RandomPlayer::new(2), &mut GreedyPlayer, 5, 6, &mut rng).unwrap();
        assert_eq!(comparison, again);
    }
}
