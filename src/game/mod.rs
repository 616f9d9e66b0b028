//! The Calculation game model: cards, the shared deck, boards and moves.
//!
//! Everything here is rule-level and search-agnostic. Solvers in
//! [`crate::search`] only talk to the game through `Board::apply`,
//! `MoveGenerator::generate` and the board accessors.

pub mod board;
pub mod deck;
pub mod generator;
pub mod moves;
pub mod render;

pub use board::{base_card, foundation_card, winning_foundation, Board, Pile};
pub use deck::{
    deck_len, get_deck, is_winnable_size, unshuffled_cards, validate_cards_per_suit, Card, Deck, KING,
    MAX_CARDS_PER_SUIT, MIN_CARDS_PER_SUIT, NUM_FOUNDATIONS, NUM_SUITS, NUM_WASTES,
};
pub use generator::MoveGenerator;
pub use moves::{Location, Move, Moves};
pub use render::{card_label, render_moves};
