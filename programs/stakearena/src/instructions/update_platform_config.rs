use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::state::Platform;

#[derive(Accounts)]
pub struct UpdatePlatformConfig<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ StakeArenaError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    pub authority: Signer<'info>,

    /// CHECK: Replacement treasury wallet, when rotating it.
    pub new_treasury: Option<UncheckedAccount<'info>>,
}

pub fn handler(
    ctx: Context<UpdatePlatformConfig>,
    platform_fee_bps: Option<u16>,
    host_fee_bps: Option<u16>,
    min_entry_fee: Option<u64>,
) -> Result<()> {
    let platform = &mut ctx.accounts.platform;

    if let Some(bps) = platform_fee_bps {
        require!(bps <= Platform::MAX_FEE_BPS, StakeArenaError::InvalidFeeBps);
        platform.platform_fee_bps = bps;
    }
    if let Some(bps) = host_fee_bps {
        require!(bps <= Platform::MAX_FEE_BPS, StakeArenaError::InvalidFeeBps);
        platform.host_fee_bps = bps;
    }
    if let Some(min) = min_entry_fee {
        platform.min_entry_fee = min;
    }
    if let Some(treasury) = &ctx.accounts.new_treasury {
        platform.treasury = treasury.key();
    }

    Ok(())
}
