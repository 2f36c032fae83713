use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::state::Platform;

#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Platform::INIT_SPACE,
        seeds = [Platform::SEED],
        bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Treasury wallet that receives platform fees.
    pub treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializePlatform>,
    platform_fee_bps: u16,
    host_fee_bps: u16,
    min_entry_fee: u64,
) -> Result<()> {
    require!(
        platform_fee_bps <= Platform::MAX_FEE_BPS && host_fee_bps <= Platform::MAX_FEE_BPS,
        StakeArenaError::InvalidFeeBps
    );

    let platform = &mut ctx.accounts.platform;
    platform.authority = ctx.accounts.authority.key();
    platform.treasury = ctx.accounts.treasury.key();
    platform.platform_fee_bps = platform_fee_bps;
    platform.host_fee_bps = host_fee_bps;
    platform.min_entry_fee = min_entry_fee;
    platform.total_contests = 0;
    platform.total_tournaments = 0;
    platform.total_pots = 0;
    platform.total_volume = 0;
    platform.bump = ctx.bumps.platform;

    Ok(())
}
