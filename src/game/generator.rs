//! Legal move generation.

use super::board::Board;
use super::deck::{Card, Deck, KING, NUM_FOUNDATIONS, NUM_WASTES};
use super::moves::{Move, Moves};

/// Enumerates the legal moves of a board.
///
/// Moves come out in a fixed order: waste to foundation (by waste pile, then
/// foundation), deck to foundation, deck to waste. Generation only reads the
/// board and the deck.
///
/// The optional King pile is a search policy rather than a rule: while it is
/// set and not every King has been drawn, non-King cards may not be parked
/// on that waste pile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveGenerator {
    king_pile: Option<usize>,
}

impl MoveGenerator {
    /// Generator without any placement restriction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that keeps waste pile `pile` for Kings.
    #[must_use]
    pub fn with_king_pile(pile: usize) -> Self {
        Self { king_pile: Some(pile) }
    }

    /// All legal moves for `board`.
    #[must_use]
    pub fn generate(&self, board: &Board, deck: &Deck) -> Moves {
        let mut moves = Moves::new();

        for w in 0..NUM_WASTES {
            if let Some(&card) = board.waste(w).last() {
                for f in 0..NUM_FOUNDATIONS {
                    if board.accepts(f, card) {
                        moves.push(Move::waste_to_foundation(w, f));
                    }
                }
            }
        }

        if let Some(card) = board.next_card(deck) {
            for f in 0..NUM_FOUNDATIONS {
                if board.accepts(f, card) {
                    moves.push(Move::draw_to_foundation(f));
                }
            }
            for w in 0..NUM_WASTES {
                if self.allows_waste(board, card, w) {
                    moves.push(Move::draw_to_waste(w));
                }
            }
        }

        moves
    }

    fn allows_waste(&self, board: &Board, card: Card, waste: usize) -> bool {
        match self.king_pile {
            Some(pile) if pile == waste => card == KING || board.all_kings_seen(),
            _ => true,
        }
    }
}
