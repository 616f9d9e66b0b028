//! Waste-placement orderings.
//!
//! When the drawn card does not go to a foundation, it has to be parked on
//! one of the four waste piles. A [`WasteRanking`] decides in which order
//! the solvers try those piles. Rankings only reorder: every pile index is
//! returned exactly once, and the move generator alone decides legality.

use smallvec::SmallVec;

use crate::core::RankingKind;
use crate::game::{base_card, Board, Card, KING, NUM_FOUNDATIONS, NUM_WASTES};

/// Waste pile indices in preference order.
pub type PileOrder = SmallVec<[usize; NUM_WASTES]>;

/// Strategy for ordering waste destinations.
pub trait WasteRanking: Send + Sync {
    /// All waste pile indices, most preferred first, for placing `card`.
    fn order(&self, board: &Board, card: Card) -> PileOrder;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Shallowest pile first, ties by index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByLength;

fn by_length(board: &Board) -> PileOrder {
    let mut order: PileOrder = (0..NUM_WASTES).collect();
    // Stable: equal lengths keep index order
    order.sort_by_key(|&w| board.waste(w).len());
    order
}

impl WasteRanking for ByLength {
    fn order(&self, board: &Board, _card: Card) -> PileOrder {
        by_length(board)
    }

    fn name(&self) -> &'static str {
        "by-length"
    }
}

/// Keeps one pile for Kings.
///
/// A King tries the reserved pile first. Any other card tries it last until
/// every King has come out of the deck. The remaining piles go by length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KingReserved {
    pile: usize,
}

impl KingReserved {
    #[must_use]
    pub fn new(pile: usize) -> Self {
        Self { pile }
    }
}

impl WasteRanking for KingReserved {
    fn order(&self, board: &Board, card: Card) -> PileOrder {
        let mut order = by_length(board);
        if card == KING {
            move_to_front(&mut order, self.pile);
        } else if !board.all_kings_seen() {
            move_to_back(&mut order, self.pile);
        }
        order
    }

    fn name(&self) -> &'static str {
        "king-reserved"
    }
}

/// Prefers piles the placed card can chain off.
///
/// A pile chains when its top card directly follows `card` in the step
/// sequence of some incomplete foundation: once `card` is built there, the
/// top becomes playable too. Chaining piles come first; everything else
/// keeps the king-reserved order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortTermChain {
    fallback: KingReserved,
}

impl ShortTermChain {
    #[must_use]
    pub fn new(king_pile: usize) -> Self {
        Self {
            fallback: KingReserved::new(king_pile),
        }
    }

    fn chains(board: &Board, card: Card, top: Card) -> bool {
        let cards_per_suit = board.cards_per_suit();
        (0..NUM_FOUNDATIONS).any(|f| {
            let follower = (card as usize + base_card(f) as usize) % cards_per_suit as usize;
            !board.is_complete(f) && top as usize == follower
        })
    }
}

impl WasteRanking for ShortTermChain {
    fn order(&self, board: &Board, card: Card) -> PileOrder {
        let fallback = self.fallback.order(board, card);
        let (mut chained, rest): (PileOrder, PileOrder) = fallback.into_iter().partition(|&w| {
            board
                .waste(w)
                .last()
                .is_some_and(|&top| Self::chains(board, card, top))
        });
        chained.extend(rest);
        chained
    }

    fn name(&self) -> &'static str {
        "short-term-chain"
    }
}

fn move_to_front(order: &mut PileOrder, pile: usize) {
    if let Some(pos) = order.iter().position(|&w| w == pile) {
        let w = order.remove(pos);
        order.insert(0, w);
    }
}

fn move_to_back(order: &mut PileOrder, pile: usize) {
    if let Some(pos) = order.iter().position(|&w| w == pile) {
        let w = order.remove(pos);
        order.push(w);
    }
}

/// The ranking selected by `kind`, using `king_pile` where it applies.
#[must_use]
pub fn ranking_for(kind: RankingKind, king_pile: usize) -> Box<dyn WasteRanking> {
    match kind {
        RankingKind::ByLength => Box::new(ByLength),
        RankingKind::KingReserved => Box::new(KingReserved::new(king_pile)),
        RankingKind::ShortTermChain => Box::new(ShortTermChain::new(king_pile)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Deck;

    fn deck() -> Deck {
        Deck::from_cards(5, vec![2, 4, 1, 3, 3, 1, 4, 2, 4, 3, 2, 1, 0, 0, 0, 0]).unwrap()
    }

    /// W0 = [3, 3], W1 = [1], W2 = [], W3 = [1]; no King drawn yet.
    fn uneven_board(deck: &Deck) -> Board {
        Board::from_piles(
            deck,
            [vec![1, 2], vec![2, 4], vec![3], vec![4]],
            [vec![3, 3], vec![1], vec![], vec![1]],
            6,
        )
        .unwrap()
    }

    fn is_permutation(order: &PileOrder) -> bool {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        sorted.as_slice() == [0, 1, 2, 3]
    }

    #[test]
    fn test_by_length() {
        let deck = deck();
        let board = uneven_board(&deck);

        let order = ByLength.order(&board, 4);
        assert_eq!(order.as_slice(), &[2, 1, 3, 0]);
    }

    #[test]
    fn test_by_length_ties_keep_index_order() {
        let deck = deck();
        let board = Board::new(&deck);

        assert_eq!(ByLength.order(&board, 2).as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_king_reserved() {
        let deck = deck();
        let board = uneven_board(&deck);
        let ranking = KingReserved::new(2);

        // King goes to the reserved pile first
        assert_eq!(ranking.order(&board, KING).as_slice(), &[2, 1, 3, 0]);
        // Everything else avoids it while Kings are still in the deck
        assert_eq!(ranking.order(&board, 4).as_slice(), &[1, 3, 0, 2]);

        let ranking = KingReserved::new(0);
        assert_eq!(ranking.order(&board, KING).as_slice(), &[0, 2, 1, 3]);
    }

    #[test]
    fn test_king_reserved_opens_after_all_kings() {
        let deck = Deck::from_cards(5, vec![0, 0, 0, 0, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]).unwrap();
        let board = Board::from_piles(
            &deck,
            [vec![1], vec![2], vec![3], vec![4]],
            [vec![0, 0], vec![0], vec![0], vec![]],
            4,
        )
        .unwrap();

        assert!(board.all_kings_seen());
        assert_eq!(KingReserved::new(3).order(&board, 1).as_slice(), &[3, 1, 2, 0]);
    }

    #[test]
    fn test_short_term_chain() {
        let deck = deck();
        let board = uneven_board(&deck);
        let ranking = ShortTermChain::new(2);

        // After a 1 the foundations want 2, 3, 4 or a King; only W0 shows a 3
        let order = ranking.order(&board, 1);
        assert_eq!(order.as_slice(), &[0, 1, 3, 2]);
    }

    #[test]
    fn test_short_term_chain_falls_back() {
        let deck = deck();
        let board = Board::new(&deck);
        let ranking = ShortTermChain::new(3);

        // Nothing to chain on an empty tableau
        assert_eq!(ranking.order(&board, 2).as_slice(), &[0, 1, 2, 3]);
        assert_eq!(ranking.order(&board, KING).as_slice(), &[3, 0, 1, 2]);
    }

    #[test]
    fn test_rankings_never_filter() {
        let deck = deck();
        let board = uneven_board(&deck);

        for kind in [RankingKind::ByLength, RankingKind::KingReserved, RankingKind::ShortTermChain] {
            let ranking = ranking_for(kind, 1);
            assert_eq!(ranking.name(), kind.as_str());
            for card in 0..5 {
                assert!(is_permutation(&ranking.order(&board, card)));
            }
        }
    }
}
