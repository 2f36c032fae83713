use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::PotEntered;
use crate::payout;
use crate::state::{Platform, PotGame, PotStatus};

#[derive(Accounts)]
pub struct EnterPot<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [PotGame::SEED, pot.pot_id.to_le_bytes().as_ref()],
        bump = pot.bump,
        constraint = pot.status == PotStatus::Open @ StakeArenaError::InvalidState,
    )]
    pub pot: Account<'info, PotGame>,

    /// Escrow token account owned by the pot PDA (token pots only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == pot.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// Participant's token account the entry is drawn from (token pots only).
    #[account(mut)]
    pub participant_token_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub participant: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<EnterPot>, amount: u64) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    let pot = &ctx.accounts.pot;

    if pot.entry_fee > 0 {
        require!(amount == pot.entry_fee, StakeArenaError::InsufficientStake);
        require!(
            !pot.participants.contains(&participant),
            StakeArenaError::AlreadyRegistered
        );
    } else {
        // Externally funded pot: any positive contribution.
        require!(amount > 0, StakeArenaError::InsufficientStake);
    }
    require!(
        pot.participants.len() < PotGame::MAX_PARTICIPANTS,
        StakeArenaError::ContestFull
    );

    match pot.mint {
        None => payout::collect_native_stake(
            &ctx.accounts.participant,
            ctx.accounts.pot.to_account_info(),
            &ctx.accounts.system_program,
            amount,
        )?,
        Some(mint) => {
            let from = ctx
                .accounts
                .participant_token_account
                .as_ref()
                .ok_or(StakeArenaError::InvalidCurrency)?;
            let escrow = ctx
                .accounts
                .escrow_token_account
                .as_ref()
                .ok_or(StakeArenaError::InvalidCurrency)?;
            let token_program = ctx
                .accounts
                .token_program
                .as_ref()
                .ok_or(StakeArenaError::InvalidCurrency)?;
            require_keys_eq!(from.mint, mint, StakeArenaError::InvalidCurrency);
            payout::collect_token_stake(
                from.to_account_info(),
                escrow.to_account_info(),
                &ctx.accounts.participant,
                token_program,
                amount,
            )?;
        }
    }

    let platform = &mut ctx.accounts.platform;
    platform.total_volume = platform
        .total_volume
        .checked_add(amount)
        .ok_or(StakeArenaError::MathOverflow)?;

    let pot = &mut ctx.accounts.pot;
    if !pot.participants.contains(&participant) {
        pot.participants.push(participant);
    }

    emit!(PotEntered {
        pot_id: pot.pot_id,
        participant,
        amount,
    });

    Ok(())
}
