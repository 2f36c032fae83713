use anchor_lang::prelude::*;

use crate::state::PaymentRecord;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum TournamentStatus {
    /// Accepting registrations and entry fees.
    Registration,
    /// Roster full; bracket play underway.
    InProgress,
    /// Settled. Terminal.
    Completed,
    /// Cancelled; registrants may withdraw their entry fee. Terminal.
    Cancelled,
}

#[account]
#[derive(InitSpace)]
pub struct Tournament {
    /// Sequential tournament identifier.
    pub tournament_id: u64,
    /// Host who organized the bracket and earns the host fee.
    pub host: Pubkey,
    /// SPL mint of the staked currency (None = native SOL).
    pub mint: Option<Pubkey>,
    /// Token account owned by this PDA holding the pooled entry fees.
    pub escrow_token_account: Option<Pubkey>,
    /// Entry fee per registrant in base units.
    pub entry_fee: u64,
    /// Bracket capacity: a power of two, 2..=16.
    pub max_players: u8,
    /// Registered players, in registration order. Order seeds round one.
    #[max_len(16)]
    pub players: Vec<Pubkey>,
    /// First place takes the whole prize pool after fees.
    pub winner_take_all: bool,
    pub status: TournamentStatus,
    /// Champion (None until settled).
    pub winner: Option<Pubkey>,
    /// Flips false -> true at most once, ever.
    pub funds_distributed: bool,
    /// Settlement and refund legs. Refunds of a 16-seat bracket plus five
    /// settlement legs bound the length.
    #[max_len(21)]
    pub payments: Vec<PaymentRecord>,
    /// Registrants already refunded after cancellation.
    #[max_len(16)]
    pub refunded: Vec<Pubkey>,
    pub created_at: i64,
    pub settled_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Tournament {
    pub const SEED: &'static [u8] = b"tournament";

    pub fn is_registered(&self, key: &Pubkey) -> bool {
        self.players.contains(key)
    }

    /// Pooled entry fees actually collected.
    pub fn pool(&self) -> Option<u64> {
        self.entry_fee.checked_mul(self.players.len() as u64)
    }
}
