//! Card values and the shared draw deck.
//!
//! A Calculation deck holds four suits of `cards_per_suit` values. The four
//! foundation starters (1, 2, 3, 4) are taken out before shuffling, so a deck
//! always has `4 * cards_per_suit - 4` cards. Every board of one game reads
//! from the same `Deck`; boards only remember how many cards were drawn.

use std::sync::Arc;

use crate::core::{GameRng, Result, SolverError};

/// A card value in `0..cards_per_suit`. `0` is the King.
pub type Card = u8;

/// The wrap-around top card of every foundation.
pub const KING: Card = 0;

pub const NUM_SUITS: usize = 4;
pub const NUM_FOUNDATIONS: usize = 4;
pub const NUM_WASTES: usize = 4;

pub const MIN_CARDS_PER_SUIT: u8 = 5;
pub const MAX_CARDS_PER_SUIT: u8 = 13;

/// Reject suit sizes the game cannot be played with.
///
/// Below five the foundation bases collide with each other. Sizes that pass
/// may still be unwinnable; see [`is_winnable_size`].
pub fn validate_cards_per_suit(cards_per_suit: u8) -> Result<()> {
    if (MIN_CARDS_PER_SUIT..=MAX_CARDS_PER_SUIT).contains(&cards_per_suit) {
        Ok(())
    } else {
        Err(SolverError::Config(format!(
            "cards per suit must be in {MIN_CARDS_PER_SUIT}..={MAX_CARDS_PER_SUIT}, got {cards_per_suit}"
        )))
    }
}

/// Whether any deal of this size can be won.
///
/// A foundation with base `b` only visits every value when `b` and
/// `cards_per_suit` share no factor. Otherwise it repeats values the deck
/// does not have enough copies of (with six per suit the foundations would
/// need eight Kings), and a solver can only run out its budget. Of `5..=13`
/// that leaves 5, 7, 11 and 13.
#[must_use]
pub fn is_winnable_size(cards_per_suit: u8) -> bool {
    (1..=NUM_FOUNDATIONS as u8).all(|base| gcd(base, cards_per_suit) == 1)
}

fn gcd(mut a: u8, mut b: u8) -> u8 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Number of cards in a deck once the foundation starters are removed.
#[must_use]
pub const fn deck_len(cards_per_suit: u8) -> usize {
    NUM_SUITS * cards_per_suit as usize - NUM_FOUNDATIONS
}

/// How many copies of each value a full four-suit deal contains, foundations included.
pub(crate) fn full_value_counts(cards_per_suit: u8) -> Vec<usize> {
    vec![NUM_SUITS; cards_per_suit as usize]
}

/// The deck in suit order with the starters removed (unshuffled).
#[must_use]
pub fn unshuffled_cards(cards_per_suit: u8) -> Vec<Card> {
    let suit = (1..cards_per_suit).chain(std::iter::once(KING));
    let mut cards: Vec<Card> = Vec::with_capacity(NUM_SUITS * cards_per_suit as usize);
    for _ in 0..NUM_SUITS {
        cards.extend(suit.clone());
    }
    cards.split_off(NUM_FOUNDATIONS)
}

/// The fixed, shared draw order for one game.
///
/// Cloning is cheap: the cards live behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Arc<[Card]>,
    cards_per_suit: u8,
}

impl Deck {
    /// Shuffle a fresh deck with the given RNG.
    pub fn shuffled(cards_per_suit: u8, rng: &mut GameRng) -> Result<Self> {
        validate_cards_per_suit(cards_per_suit)?;
        let mut cards = unshuffled_cards(cards_per_suit);
        rng.shuffle(&mut cards);
        Ok(Self {
            cards: cards.into(),
            cards_per_suit,
        })
    }

    /// Use a caller-chosen draw order, e.g. a reproducible test deal.
    ///
    /// The cards must be exactly the deck contents: right length, every value
    /// in range and each value appearing as often as in a real deal.
    pub fn from_cards(cards_per_suit: u8, cards: Vec<Card>) -> Result<Self> {
        validate_cards_per_suit(cards_per_suit)?;

        let expected_len = deck_len(cards_per_suit);
        if cards.len() != expected_len {
            return Err(SolverError::InvalidDeck(format!(
                "expected {expected_len} cards, got {}",
                cards.len()
            )));
        }

        let mut counts = vec![0usize; cards_per_suit as usize];
        for &card in &cards {
            let slot = counts.get_mut(card as usize).ok_or_else(|| {
                SolverError::InvalidDeck(format!("card {card} out of range for {cards_per_suit} cards per suit"))
            })?;
            *slot += 1;
        }

        let mut expected = full_value_counts(cards_per_suit);
        for base in 1..=NUM_FOUNDATIONS {
            expected[base] -= 1;
        }
        if let Some(value) = (0..counts.len()).find(|&v| counts[v] != expected[v]) {
            return Err(SolverError::InvalidDeck(format!(
                "value {value} appears {} times, expected {}",
                counts[value], expected[value]
            )));
        }

        Ok(Self {
            cards: cards.into(),
            cards_per_suit,
        })
    }

    #[must_use]
    pub fn cards_per_suit(&self) -> u8 {
        self.cards_per_suit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at draw position `index`, if the deck is that long.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Supply the deck for one game: the fixed sequence when given, otherwise a
/// deal shuffled from `seed`.
pub fn get_deck(cards_per_suit: u8, fixed: Option<Vec<Card>>, seed: u64) -> Result<Deck> {
    match fixed {
        Some(cards) => Deck::from_cards(cards_per_suit, cards),
        None => {
            let mut rng = GameRng::new(seed).for_context("deal");
            Deck::shuffled(cards_per_suit, &mut rng)
        }
    }
}
