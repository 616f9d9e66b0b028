//! Board evaluation for the solvers.
//!
//! A [`Heuristic`] maps a board to a priority where lower means closer to a
//! win. Both solvers order or bound their search by it, so it must be a pure
//! function of the board.
//!
//! ## The default evaluator
//!
//! ```text
//! progress   = cards on the foundations
//! distance   = cards still in the deck
//! evenness   = (foundation length spread + waste length spread) / 4
//! difficulty = buried cost
//! priority   = distance + difficulty + evenness - progress
//! ```
//!
//! The buried cost looks at the next few cards each foundation needs. A
//! needed card sitting `d` cards below the top of a waste pile costs
//! `d * urgency`, where urgency shrinks the further down the foundation's
//! sequence the card is.

use im::Vector;

use crate::game::{base_card, deck_len, foundation_card, Board, Card, Deck, NUM_FOUNDATIONS, NUM_SUITS};

/// Board scoring used to order and bound the search.
pub trait Heuristic: Send + Sync {
    /// Estimated distance to a win; lower is more promising.
    fn priority(&self, board: &Board) -> f64;

    /// Hook for pruning boards that can no longer be won.
    ///
    /// No loss rule is known, so the default never prunes.
    fn is_lost(&self, _board: &Board, _deck: &Deck) -> bool {
        false
    }
}

/// The hand-tuned priority with buried-card lookahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluator {
    lookahead: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self { lookahead: 4 }
    }
}

impl Evaluator {
    /// Evaluator inspecting the next `lookahead` cards of each foundation.
    #[must_use]
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead }
    }

    /// Penalty for soon-needed cards buried in the waste piles.
    #[must_use]
    pub fn buried_cost(&self, board: &Board) -> f64 {
        let cards_per_suit = board.cards_per_suit() as usize;
        let mut total = 0usize;

        for f in 0..NUM_FOUNDATIONS {
            let base = base_card(f);
            let len = board.foundation(f).len();
            let horizon = self.lookahead.min(cards_per_suit.saturating_sub(len));

            for k in 0..horizon {
                let card = foundation_card(base, len + k, board.cards_per_suit());
                // A full cycle: the sequence is back at its base
                if card == base {
                    break;
                }
                if let Some(depth) = shallowest_depth(board, card) {
                    total += depth * (cards_per_suit - len - k);
                }
            }
        }

        total as f64
    }
}

/// Smallest distance from a waste top to a copy of `card`, top card = 0.
fn shallowest_depth(board: &Board, card: Card) -> Option<usize> {
    board
        .wastes()
        .iter()
        .filter_map(|pile| pile.iter().rev().position(|&c| c == card))
        .min()
}

fn spread<'a>(piles: impl Iterator<Item = &'a Vector<Card>>) -> usize {
    let (min, max) = piles
        .map(Vector::len)
        .fold((usize::MAX, 0), |(min, max), len| (min.min(len), max.max(len)));
    max.saturating_sub(min)
}

impl Heuristic for Evaluator {
    fn priority(&self, board: &Board) -> f64 {
        let progress = board.progress() as f64;
        let distance = deck_len(board.cards_per_suit()).saturating_sub(board.drawn()) as f64;
        let evenness =
            (spread(board.foundations().iter()) + spread(board.wastes().iter())) as f64 / 4.0;
        let difficulty = self.buried_cost(board);

        distance + difficulty + evenness - progress
    }
}

/// Cards drawn plus cards still missing from the foundations.
///
/// Cheaper than [`Evaluator`] and blind to waste layout; useful as a
/// baseline ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AStarHeuristic;

impl Heuristic for AStarHeuristic {
    fn priority(&self, board: &Board) -> f64 {
        let total = NUM_SUITS * board.cards_per_suit() as usize;
        (board.drawn() + total - board.progress()) as f64
    }
}
