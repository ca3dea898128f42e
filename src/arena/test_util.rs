use crate::core::{CardBitSet, Deck, cards_from_str};

use super::game_state::Seat;

/// Build a deck that deals `top` first, in order, followed by the rest of
/// the deck.
pub fn stacked_deck(top: &str) -> Deck {
    let top = cards_from_str(top).unwrap();
    let known = CardBitSet::from_distinct(&top).unwrap();
    let mut cards = Deck::without(&known).cards().to_vec();
    cards.extend(top.iter().rev());
    Deck::from(cards)
}

pub fn assert_chips_conserved(expected_total: u32, seats: &[Seat]) {
    let total: u32 = seats.iter().map(|s| s.stack).sum();
    assert_eq!(expected_total, total, "chips changed hands off the table");
}

/// Every seat should be in a sane end of hand state.
pub fn assert_valid_seats(seats: &[Seat]) {
    for seat in seats {
        // Street bets are always cleared at the end of a street.
        assert_eq!(0, seat.round_bet, "{} has a street bet left over", seat.name);
        if seat.all_in {
            assert!(seat.in_hand);
            assert!(!seat.folded);
        }
        if !seat.in_hand {
            assert_eq!(0, seat.hand_bet);
            assert!(seat.hole.is_none());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_deck_deals_in_order() {
        let mut deck = stacked_deck("AsKdQh");
        assert_eq!(52, deck.len());
        assert_eq!(cards_from_str("AsKd").unwrap(), deck.deal(2).unwrap());
        assert_eq!(cards_from_str("Qh").unwrap(), deck.deal(1).unwrap());
        assert_eq!(49, deck.len());
    }
}
