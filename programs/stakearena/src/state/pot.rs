use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::state::PaymentRecord;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum PotStatus {
    /// Accepting entries (or external funding).
    Open,
    /// Winner declared, prize awaiting claim.
    Resolved,
    /// Prize paid out. Terminal.
    Claimed,
    /// Abandoned before resolution. Terminal.
    Cancelled,
}

/// A pot-style contest: the payable amount is the observed balance of the
/// escrow at claim time, never a pre-declared figure.
#[account]
#[derive(InitSpace)]
pub struct PotGame {
    /// Sequential pot identifier.
    pub pot_id: u64,
    /// Host who opened the pot and earns the host fee on fee-based pots.
    pub host: Pubkey,
    /// SPL mint of the staked currency (None = native SOL).
    pub mint: Option<Pubkey>,
    /// Token account owned by this PDA holding the escrow.
    pub escrow_token_account: Option<Pubkey>,
    /// Entry fee per participant; 0 for externally funded pots.
    pub entry_fee: u64,
    #[max_len(32)]
    pub participants: Vec<Pubkey>,
    pub status: PotStatus,
    /// Winner as declared by the moderator (None until resolved).
    pub winner: Option<Pubkey>,
    /// Flips false -> true at most once, ever.
    pub prize_claimed: bool,
    /// Observed claimable total at claim time (0 until claimed).
    pub realized_amount: u64,
    /// Slot of the winner's transfer (0 until claimed).
    pub claim_slot: u64,
    /// Settlement, cancellation and reissued legs.
    #[max_len(6)]
    pub payments: Vec<PaymentRecord>,
    pub created_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl PotGame {
    pub const SEED: &'static [u8] = b"pot";
    pub const MAX_PARTICIPANTS: usize = 32;

    /// Claim gating: the recorded winner, exactly once, after resolution.
    pub fn assert_claimable(&self, claimant: &Pubkey) -> Result<()> {
        require!(self.winner == Some(*claimant), StakeArenaError::NotWinner);
        require!(!self.prize_claimed, StakeArenaError::AlreadyClaimed);
        require!(
            self.status == PotStatus::Resolved,
            StakeArenaError::InvalidState
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pot(winner: Pubkey) -> PotGame {
        PotGame {
            pot_id: 1,
            host: Pubkey::new_unique(),
            mint: None,
            escrow_token_account: None,
            entry_fee: 10,
            participants: vec![winner],
            status: PotStatus::Resolved,
            winner: Some(winner),
            prize_claimed: false,
            realized_amount: 0,
            claim_slot: 0,
            payments: Vec::new(),
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn only_the_recorded_winner_can_claim() {
        let winner = Pubkey::new_unique();
        let p = pot(winner);
        assert!(p.assert_claimable(&winner).is_ok());
        assert_eq!(
            p.assert_claimable(&Pubkey::new_unique()),
            Err(StakeArenaError::NotWinner.into())
        );
    }

    #[test]
    fn second_claim_is_rejected() {
        let winner = Pubkey::new_unique();
        let mut p = pot(winner);
        p.prize_claimed = true;
        p.status = PotStatus::Claimed;
        assert_eq!(
            p.assert_claimable(&winner),
            Err(StakeArenaError::AlreadyClaimed.into())
        );
    }

    #[test]
    fn unresolved_pot_is_not_claimable() {
        let winner = Pubkey::new_unique();
        let mut p = pot(winner);
        p.status = PotStatus::Open;
        assert_eq!(
            p.assert_claimable(&winner),
            Err(StakeArenaError::InvalidState.into())
        );
    }
}
