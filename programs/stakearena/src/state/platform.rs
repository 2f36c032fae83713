use anchor_lang::prelude::*;

/// Fee configuration singleton. Every settlement context requires this
/// account, so settlement fails closed while it is uninitialized.
#[account]
#[derive(InitSpace)]
pub struct Platform {
    /// Admin holding moderator authority (confirms outcomes, resolves disputes).
    pub authority: Pubkey,
    /// Treasury wallet that receives platform fees.
    pub treasury: Pubkey,
    /// Platform fee in basis points (100 = 1%).
    pub platform_fee_bps: u16,
    /// Tournament/pot host fee in basis points.
    pub host_fee_bps: u16,
    /// Smallest accepted entry fee, in base units of the staked currency.
    pub min_entry_fee: u64,
    /// Running count of contests created.
    pub total_contests: u64,
    /// Running count of tournaments created.
    pub total_tournaments: u64,
    /// Running count of pot games created.
    pub total_pots: u64,
    /// Cumulative staked volume in base units.
    pub total_volume: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Platform {
    pub const SEED: &'static [u8] = b"platform";

    /// Upper bound for either fee rate.
    pub const MAX_FEE_BPS: u16 = 2_500;

    pub fn is_moderator(&self, key: &Pubkey) -> bool {
        self.authority == *key
    }
}
