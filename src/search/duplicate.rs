//! Duplicate detection over canonical board keys.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::game::Board;

/// Separates piles inside a key; never a card value.
const PILE_SEPARATOR: u8 = u8::MAX;

/// Compact canonical form of a board's eight piles.
///
/// Two boards get the same key exactly when they compare equal, so the key
/// ignores move history and the deck cursor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalKey(SmallVec<[u8; 64]>);

impl CanonicalKey {
    #[must_use]
    pub fn of(board: &Board) -> Self {
        let mut bytes = SmallVec::with_capacity(board.cards_on_piles() + 8);
        for pile in board.foundations().iter().chain(board.wastes().iter()) {
            bytes.extend(pile.iter().copied());
            bytes.push(PILE_SEPARATOR);
        }
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Set of boards already met by a search.
#[derive(Clone, Debug, Default)]
pub struct DuplicateTracker {
    seen: FxHashSet<CanonicalKey>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn seen(&self, board: &Board) -> bool {
        self.seen.contains(&CanonicalKey::of(board))
    }

    /// Record `board`; `true` if it was not seen before.
    pub fn record(&mut self, board: &Board) -> bool {
        self.seen.insert(CanonicalKey::of(board))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
