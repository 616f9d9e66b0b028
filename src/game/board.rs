//! Board state: foundations, waste piles, deck cursor and move history.
//!
//! Boards are immutable snapshots. `apply` returns a new board and leaves
//! the parent untouched; piles and the move log are `im` persistent vectors,
//! so a child shares almost all of its storage with its parent.
//!
//! ## Identity
//!
//! Equality and hashing look at the eight piles only. The deck cursor
//! follows from the piles (cards are conserved) and the move log is history,
//! so two boards reached by different move orders compare equal.

use std::hash::{Hash, Hasher};

use im::Vector;

use super::deck::{full_value_counts, Card, Deck, KING, NUM_FOUNDATIONS, NUM_SUITS, NUM_WASTES};
use super::moves::{Location, Move};
use crate::core::{Result, SolverError};

/// One pile of cards; the top card is the last element.
pub type Pile = Vector<Card>;

/// Base card of foundation `foundation` (1 for the first pile, 4 for the last).
#[must_use]
pub const fn base_card(foundation: usize) -> Card {
    foundation as Card + 1
}

/// The card that belongs at `position` of the foundation built on `base`.
///
/// Position 0 holds the base itself; the last position always holds the King.
#[must_use]
pub fn foundation_card(base: Card, position: usize, cards_per_suit: u8) -> Card {
    ((base as usize * (position + 1)) % cards_per_suit as usize) as Card
}

/// The complete, winning contents of the foundation built on `base`.
#[must_use]
pub fn winning_foundation(base: Card, cards_per_suit: u8) -> Vec<Card> {
    (0..cards_per_suit as usize)
        .map(|position| foundation_card(base, position, cards_per_suit))
        .collect()
}

/// A snapshot of one Calculation game.
#[derive(Clone, Debug)]
pub struct Board {
    cards_per_suit: u8,
    foundations: [Pile; NUM_FOUNDATIONS],
    wastes: [Pile; NUM_WASTES],
    /// Cards drawn so far; the next card is `deck[drawn]`.
    drawn: usize,
    kings_seen: u8,
    moves: Vector<Move>,
}

impl Board {
    /// The opening board for `deck`: bases on the foundations, nothing drawn.
    #[must_use]
    pub fn new(deck: &Deck) -> Self {
        Self {
            cards_per_suit: deck.cards_per_suit(),
            foundations: std::array::from_fn(|f| Vector::unit(base_card(f))),
            wastes: Default::default(),
            drawn: 0,
            kings_seen: 0,
            moves: Vector::new(),
        }
    }

    /// Build a mid-game board from explicit piles.
    ///
    /// Each foundation must start at its base and follow its step sequence,
    /// and the piles plus the undrawn part of the deck must hold exactly one
    /// full deal. The move log of the result is empty.
    pub fn from_piles(
        deck: &Deck,
        foundations: [Vec<Card>; NUM_FOUNDATIONS],
        wastes: [Vec<Card>; NUM_WASTES],
        drawn: usize,
    ) -> Result<Self> {
        let cards_per_suit = deck.cards_per_suit();
        if drawn > deck.len() {
            return Err(SolverError::InvalidBoard(format!(
                "{drawn} cards drawn from a deck of {}",
                deck.len()
            )));
        }

        for (f, pile) in foundations.iter().enumerate() {
            let expected = winning_foundation(base_card(f), cards_per_suit);
            if pile.is_empty() || pile.len() > expected.len() || pile[..] != expected[..pile.len()] {
                return Err(SolverError::InvalidBoard(format!(
                    "foundation {f} is not a prefix of {expected:?}: {pile:?}"
                )));
            }
        }

        let mut counts = vec![0usize; cards_per_suit as usize];
        let placed = foundations.iter().chain(wastes.iter()).flatten();
        for &card in placed.chain(&deck.cards()[drawn..]) {
            let slot = counts
                .get_mut(card as usize)
                .ok_or_else(|| SolverError::InvalidBoard(format!("card {card} out of range")))?;
            *slot += 1;
        }
        if counts != full_value_counts(cards_per_suit) {
            return Err(SolverError::InvalidBoard(format!(
                "piles and undrawn deck do not form one deal: value counts {counts:?}"
            )));
        }

        let kings_seen = deck.cards()[..drawn].iter().filter(|&&card| card == KING).count() as u8;

        Ok(Self {
            cards_per_suit,
            foundations: foundations.map(Vector::from),
            wastes: wastes.map(Vector::from),
            drawn,
            kings_seen,
            moves: Vector::new(),
        })
    }

    /// Re-apply `moves` one by one from the opening board of `deck`.
    pub fn replay<'a>(deck: &Deck, moves: impl IntoIterator<Item = &'a Move>) -> Result<Self> {
        moves
            .into_iter()
            .try_fold(Board::new(deck), |board, mv| board.apply(*mv, deck))
    }

    #[must_use]
    pub fn cards_per_suit(&self) -> u8 {
        self.cards_per_suit
    }

    #[must_use]
    pub fn foundations(&self) -> &[Pile; NUM_FOUNDATIONS] {
        &self.foundations
    }

    #[must_use]
    pub fn wastes(&self) -> &[Pile; NUM_WASTES] {
        &self.wastes
    }

    #[must_use]
    pub fn foundation(&self, index: usize) -> &Pile {
        &self.foundations[index]
    }

    #[must_use]
    pub fn waste(&self, index: usize) -> &Pile {
        &self.wastes[index]
    }

    /// Number of cards drawn from the deck so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Index of the last drawn card, `None` before the first draw.
    #[must_use]
    pub fn deck_cursor(&self) -> Option<usize> {
        self.drawn.checked_sub(1)
    }

    /// The next card to draw, `None` once the deck is exhausted.
    #[must_use]
    pub fn next_card(&self, deck: &Deck) -> Option<Card> {
        deck.get(self.drawn)
    }

    /// Cards still waiting in the deck.
    #[must_use]
    pub fn remaining(&self, deck: &Deck) -> usize {
        deck.len().saturating_sub(self.drawn)
    }

    #[must_use]
    pub fn kings_seen(&self) -> u8 {
        self.kings_seen
    }

    /// Whether every King has already come out of the deck.
    #[must_use]
    pub fn all_kings_seen(&self) -> bool {
        self.kings_seen as usize >= NUM_SUITS
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn move_log(&self) -> &Vector<Move> {
        &self.moves
    }

    /// Cards on all eight piles.
    #[must_use]
    pub fn cards_on_piles(&self) -> usize {
        self.foundations.iter().chain(self.wastes.iter()).map(Vector::len).sum()
    }

    /// Cards on the foundations.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.foundations.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_complete(&self, foundation: usize) -> bool {
        self.foundations[foundation].len() >= self.cards_per_suit as usize
    }

    /// The card foundation `foundation` needs next, `None` once it is complete.
    #[must_use]
    pub fn next_required(&self, foundation: usize) -> Option<Card> {
        let len = self.foundations[foundation].len();
        (len < self.cards_per_suit as usize)
            .then(|| foundation_card(base_card(foundation), len, self.cards_per_suit))
    }

    #[must_use]
    pub fn accepts(&self, foundation: usize, card: Card) -> bool {
        self.next_required(foundation) == Some(card)
    }

    /// Every foundation complete and matching its step sequence.
    #[must_use]
    pub fn is_winning(&self) -> bool {
        self.foundations.iter().enumerate().all(|(f, pile)| {
            pile.len() == self.cards_per_suit as usize
                && pile.iter().copied().eq(winning_foundation(base_card(f), self.cards_per_suit))
        })
    }

    /// Apply `mv` and return the resulting board.
    ///
    /// Fails with [`SolverError::InvalidMove`] for moves the rules never
    /// allow: anything leaving a foundation or returning to the deck, waste
    /// to waste, drawing from an exhausted deck, taking from an empty waste
    /// pile, or building a card its foundation does not need.
    pub fn apply(&self, mv: Move, deck: &Deck) -> Result<Board> {
        let invalid = |reason: &'static str| SolverError::InvalidMove { mv, reason };
        let mut next = self.clone();

        let card = match mv.from {
            Location::Deck => {
                let card = deck.get(self.drawn).ok_or_else(|| invalid("the deck is exhausted"))?;
                next.drawn += 1;
                if card == KING {
                    next.kings_seen += 1;
                }
                card
            }
            Location::Waste(w) => {
                if !mv.is_foundation_move() {
                    return Err(invalid("waste cards may only move to a foundation"));
                }
                let pile = next
                    .wastes
                    .get_mut(w as usize)
                    .ok_or_else(|| invalid("no such waste pile"))?;
                pile.pop_back().ok_or_else(|| invalid("the waste pile is empty"))?
            }
            Location::Foundation(_) => return Err(invalid("cards never leave a foundation")),
        };

        match mv.to {
            Location::Foundation(f) => {
                let f = f as usize;
                if f >= NUM_FOUNDATIONS {
                    return Err(invalid("no such foundation"));
                }
                if !self.accepts(f, card) {
                    return Err(invalid("the foundation does not take this card"));
                }
                next.foundations[f].push_back(card);
            }
            Location::Waste(w) => {
                let pile = next
                    .wastes
                    .get_mut(w as usize)
                    .ok_or_else(|| invalid("no such waste pile"))?;
                pile.push_back(card);
            }
            Location::Deck => return Err(invalid("cards never return to the deck")),
        }

        next.moves.push_back(mv);
        Ok(next)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.foundations == other.foundations && self.wastes == other.wastes
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.foundations.hash(state);
        self.wastes.hash(state);
    }
}
