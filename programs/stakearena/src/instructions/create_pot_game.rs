use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::PotCreated;
use crate::state::{Platform, PotGame, PotStatus};

#[derive(Accounts)]
pub struct CreatePotGame<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init,
        payer = host,
        space = 8 + PotGame::INIT_SPACE,
        seeds = [PotGame::SEED, (platform.total_pots + 1).to_le_bytes().as_ref()],
        bump,
    )]
    pub pot: Account<'info, PotGame>,

    /// Staked mint. Omit for native SOL pots.
    pub mint: Option<Account<'info, Mint>>,

    /// Escrow token account owned by the pot PDA (token pots only).
    #[account(
        init,
        payer = host,
        associated_token::mint = mint,
        associated_token::authority = pot,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub host: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Option<Program<'info, Token>>,
    pub associated_token_program: Option<Program<'info, AssociatedToken>>,
}

pub fn handler(ctx: Context<CreatePotGame>, entry_fee: u64) -> Result<()> {
    // Zero-entry pots are funded externally; otherwise the platform minimum
    // applies.
    if entry_fee > 0 {
        require!(
            entry_fee >= ctx.accounts.platform.min_entry_fee,
            StakeArenaError::EntryFeeTooLow
        );
    }

    let platform = &mut ctx.accounts.platform;
    let pot_id = platform.total_pots + 1;
    platform.total_pots = pot_id;

    let clock = Clock::get()?;
    let mint_key = ctx.accounts.mint.as_ref().map(|m| m.key());

    let pot = &mut ctx.accounts.pot;
    pot.pot_id = pot_id;
    pot.host = ctx.accounts.host.key();
    pot.mint = mint_key;
    pot.escrow_token_account = ctx.accounts.escrow_token_account.as_ref().map(|a| a.key());
    pot.entry_fee = entry_fee;
    pot.participants = Vec::new();
    pot.status = PotStatus::Open;
    pot.winner = None;
    pot.prize_claimed = false;
    pot.realized_amount = 0;
    pot.claim_slot = 0;
    pot.payments = Vec::new();
    pot.created_at = clock.unix_timestamp;
    pot.bump = ctx.bumps.pot;

    emit!(PotCreated {
        pot_id,
        host: pot.host,
        entry_fee,
        mint: mint_key,
    });

    Ok(())
}
