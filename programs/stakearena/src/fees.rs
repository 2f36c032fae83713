//! Fee and prize computation. Pure integer math over base units: floor
//! division throughout, with any rounding remainder assigned to the last leg
//! of the payout batch so escrow never accumulates dust.
//!
//! Fee policy (applies to every contest type): fees are deducted from the
//! pooled amount, and the remainder goes to the prize legs. The fee is never
//! charged per participant on top of the pool.

use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// `amount * bps / 10_000`, floored.
fn bps_share(amount: u64, bps: u16) -> Result<u64> {
    amount
        .checked_mul(bps as u64)
        .ok_or(StakeArenaError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR)
        .ok_or(StakeArenaError::MathOverflow.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadsUpSplit {
    pub platform_fee: u64,
    /// Last leg: absorbs the rounding remainder.
    pub winner_prize: u64,
}

/// Heads-up settlement: platform fee off the pooled stakes, remainder to the
/// winner.
pub fn heads_up_split(pool: u64, platform_fee_bps: u16) -> Result<HeadsUpSplit> {
    let platform_fee = bps_share(pool, platform_fee_bps)?;
    let winner_prize = pool
        .checked_sub(platform_fee)
        .ok_or(StakeArenaError::MathOverflow)?;
    Ok(HeadsUpSplit {
        platform_fee,
        winner_prize,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSplit {
    pub host_fee: u64,
    pub platform_fee: u64,
    pub first: u64,
    pub second: u64,
    /// 0 for two-player brackets and winner-take-all tournaments.
    pub third: u64,
}

impl TournamentSplit {
    pub fn total(&self) -> u64 {
        self.host_fee + self.platform_fee + self.first + self.second + self.third
    }
}

/// Tournament settlement: host and platform fees off the pool, then the
/// remainder split 70/30 for a single-round bracket or 50/30/20 otherwise.
/// The last prize leg absorbs the rounding remainder.
pub fn tournament_split(
    pool: u64,
    host_fee_bps: u16,
    platform_fee_bps: u16,
    two_player: bool,
    winner_take_all: bool,
) -> Result<TournamentSplit> {
    let host_fee = bps_share(pool, host_fee_bps)?;
    let platform_fee = bps_share(pool, platform_fee_bps)?;
    let remaining = pool
        .checked_sub(host_fee)
        .and_then(|r| r.checked_sub(platform_fee))
        .ok_or(StakeArenaError::MathOverflow)?;

    let (first, second, third) = if winner_take_all {
        (remaining, 0, 0)
    } else if two_player {
        let first = bps_share(remaining, 7_000)?;
        (first, remaining - first, 0)
    } else {
        let first = bps_share(remaining, 5_000)?;
        let second = bps_share(remaining, 3_000)?;
        (first, second, remaining - first - second)
    };

    Ok(TournamentSplit {
        host_fee,
        platform_fee,
        first,
        second,
        third,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotSplit {
    pub platform_fee: u64,
    /// 0 for externally funded pots (no entry fee was charged).
    pub host_fee: u64,
    /// Last leg: absorbs the rounding remainder.
    pub winner_amount: u64,
}

/// Pot settlement over the observed claimable balance. The host fee is only
/// charged when the pot collected entry fees.
pub fn pot_split(
    claimable: u64,
    platform_fee_bps: u16,
    host_fee_bps: u16,
    charge_host_fee: bool,
) -> Result<PotSplit> {
    require!(claimable > 0, StakeArenaError::NothingClaimable);
    let platform_fee = bps_share(claimable, platform_fee_bps)?;
    let host_fee = if charge_host_fee {
        bps_share(claimable, host_fee_bps)?
    } else {
        0
    };
    let winner_amount = claimable
        .checked_sub(platform_fee)
        .and_then(|r| r.checked_sub(host_fee))
        .ok_or(StakeArenaError::MathOverflow)?;
    Ok(PotSplit {
        platform_fee,
        host_fee,
        winner_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_five_percent_of_twenty() {
        // Entry fee 10 per side, 5% platform rate.
        let split = heads_up_split(20, 500).unwrap();
        assert_eq!(split.platform_fee, 1);
        assert_eq!(split.winner_prize, 19);
        assert_eq!(split.platform_fee + split.winner_prize, 20);
    }

    #[test]
    fn heads_up_remainder_goes_to_winner() {
        // 3% of 7 floors to 0; the whole pool reaches the winner.
        let split = heads_up_split(7, 300).unwrap();
        assert_eq!(split.platform_fee, 0);
        assert_eq!(split.winner_prize, 7);
    }

    #[test]
    fn heads_up_conserves_pool_exactly() {
        for pool in [1u64, 19, 20, 999, 1_000_000_007] {
            for bps in [0u16, 1, 250, 500, 2_500] {
                let s = heads_up_split(pool, bps).unwrap();
                assert_eq!(s.platform_fee + s.winner_prize, pool);
            }
        }
    }

    #[test]
    fn four_player_tournament_splits_50_30_20() {
        // 4 players x 100, host 18%, platform 7%.
        let split = tournament_split(400, 1_800, 700, false, false).unwrap();
        assert_eq!(split.host_fee, 72);
        assert_eq!(split.platform_fee, 28);
        assert_eq!(split.first, 150);
        assert_eq!(split.second, 90);
        assert_eq!(split.third, 60);
        assert_eq!(split.total(), 400);
    }

    #[test]
    fn two_player_tournament_splits_70_30() {
        let split = tournament_split(400, 1_800, 700, true, false).unwrap();
        assert_eq!(split.first, 210);
        assert_eq!(split.second, 90);
        assert_eq!(split.third, 0);
        assert_eq!(split.total(), 400);
    }

    #[test]
    fn winner_take_all_gives_first_everything_after_fees() {
        let split = tournament_split(400, 1_800, 700, false, true).unwrap();
        assert_eq!(split.first, 300);
        assert_eq!(split.second, 0);
        assert_eq!(split.third, 0);
        assert_eq!(split.total(), 400);
    }

    #[test]
    fn tournament_remainder_lands_on_last_prize_leg() {
        // Pool 103 with zero fees: 50% = 51, 30% = 30, third takes 22.
        let split = tournament_split(103, 0, 0, false, false).unwrap();
        assert_eq!(split.first, 51);
        assert_eq!(split.second, 30);
        assert_eq!(split.third, 22);
        assert_eq!(split.total(), 103);
    }

    #[test]
    fn tournament_conserves_pool_exactly() {
        for pool in [2u64, 103, 400, 1_000, 7_777_777] {
            let s = tournament_split(pool, 1_800, 700, false, false).unwrap();
            assert_eq!(s.total(), pool);
            let s2 = tournament_split(pool, 1_800, 700, true, false).unwrap();
            assert_eq!(s2.total(), pool);
        }
    }

    #[test]
    fn pot_host_fee_gated_on_entry_fee() {
        let with_host = pot_split(1_000, 500, 300, true).unwrap();
        assert_eq!(with_host.platform_fee, 50);
        assert_eq!(with_host.host_fee, 30);
        assert_eq!(with_host.winner_amount, 920);

        let without_host = pot_split(1_000, 500, 300, false).unwrap();
        assert_eq!(without_host.host_fee, 0);
        assert_eq!(without_host.winner_amount, 950);
    }

    #[test]
    fn pot_split_floors_and_conserves() {
        let split = pot_split(999, 500, 300, true).unwrap();
        assert_eq!(split.platform_fee, 49);
        assert_eq!(split.host_fee, 29);
        assert_eq!(split.winner_amount, 921);
        assert_eq!(
            split.platform_fee + split.host_fee + split.winner_amount,
            999
        );
    }

    #[test]
    fn empty_pot_is_rejected() {
        assert!(pot_split(0, 500, 300, true).is_err());
    }
}
