//! Single-elimination bracket arithmetic. Rounds and match orders are
//! 1-based; a bracket of `n` players (power of two) runs `log2(n)` rounds
//! with the match count halving each round.

pub fn is_valid_player_count(n: u8) -> bool {
    (2..=16).contains(&n) && n.is_power_of_two()
}

/// Number of rounds in a bracket of `max_players` (log2).
pub fn rounds_for(max_players: u8) -> u8 {
    max_players.trailing_zeros() as u8
}

/// Matches played in `round` of a bracket of `max_players`.
pub fn matches_in_round(max_players: u8, round: u8) -> u8 {
    max_players >> round
}

/// The next-round match fed by the winner of match `order`: `ceil(order / 2)`.
pub fn next_match_order(order: u8) -> u8 {
    (order + 1) / 2
}

/// Odd orders fill the next match's challenger slot, even orders the
/// opponent slot.
pub fn feeds_challenger_slot(order: u8) -> bool {
    order % 2 == 1
}

pub fn is_final(round: u8, max_players: u8) -> bool {
    round == rounds_for(max_players)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_count_validation() {
        for n in [2u8, 4, 8, 16] {
            assert!(is_valid_player_count(n));
        }
        for n in [0u8, 1, 3, 6, 10, 12, 32] {
            assert!(!is_valid_player_count(n));
        }
    }

    #[test]
    fn round_counts_are_log2() {
        assert_eq!(rounds_for(2), 1);
        assert_eq!(rounds_for(4), 2);
        assert_eq!(rounds_for(8), 3);
        assert_eq!(rounds_for(16), 4);
    }

    #[test]
    fn match_counts_halve_each_round() {
        assert_eq!(matches_in_round(8, 1), 4);
        assert_eq!(matches_in_round(8, 2), 2);
        assert_eq!(matches_in_round(8, 3), 1);
    }

    #[test]
    fn winners_pair_into_the_next_round() {
        assert_eq!(next_match_order(1), 1);
        assert_eq!(next_match_order(2), 1);
        assert_eq!(next_match_order(3), 2);
        assert_eq!(next_match_order(4), 2);
        assert!(feeds_challenger_slot(1));
        assert!(!feeds_challenger_slot(2));
        assert!(feeds_challenger_slot(3));
    }

    #[test]
    fn final_detection() {
        assert!(is_final(1, 2));
        assert!(!is_final(1, 4));
        assert!(is_final(2, 4));
        assert!(is_final(4, 16));
    }
}
