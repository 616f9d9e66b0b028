//! Human-readable rendering of boards and move logs.

use std::fmt::{self, Write as _};

use super::board::{Board, Pile};
use super::deck::Card;
use super::moves::Move;

/// Face label for a card value: `K` for 0, `A`, `J`, `Q`, digits otherwise.
#[must_use]
pub fn card_label(card: Card) -> String {
    match card {
        0 => "K".to_string(),
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        n => n.to_string(),
    }
}

fn write_pile(f: &mut fmt::Formatter<'_>, name: &str, pile: &Pile) -> fmt::Result {
    write!(f, "  {name}:")?;
    for &card in pile {
        write!(f, " {}", card_label(card))?;
    }
    writeln!(f)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Foundations:")?;
        for (i, pile) in self.foundations().iter().enumerate() {
            write_pile(f, &format!("F{i}"), pile)?;
        }
        writeln!(f, "Wastes:")?;
        for (i, pile) in self.wastes().iter().enumerate() {
            write_pile(f, &format!("W{i}"), pile)?;
        }
        write!(f, "Drawn: {}  Moves: {}", self.drawn(), self.move_count())
    }
}

/// One numbered move per line.
#[must_use]
pub fn render_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    let mut out = String::new();
    for (i, mv) in moves.into_iter().enumerate() {
        let _ = writeln!(out, "{:>4}. {mv}", i + 1);
    }
    out
}
