use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{Platform, PotGame, PotStatus};

#[derive(Accounts)]
pub struct RetryPotPayment<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ StakeArenaError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [PotGame::SEED, pot.pot_id.to_le_bytes().as_ref()],
        bump = pot.bump,
        constraint = pot.status == PotStatus::Claimed @ StakeArenaError::InvalidState,
    )]
    pub pot: Account<'info, PotGame>,

    /// Escrow token account owned by the pot PDA (token pots only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == pot.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// CHECK: Destination for the reissued leg; validated against the
    /// recipient recorded on the failed leg.
    #[account(mut)]
    pub recipient_account: UncheckedAccount<'info>,

    /// Platform authority (moderator).
    pub authority: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<RetryPotPayment>, record_index: u8) -> Result<()> {
    let record = payout::retryable_record(&ctx.accounts.pot.payments, record_index as usize)?;

    let id_bytes = ctx.accounts.pot.pot_id.to_le_bytes();
    let bump_bytes = [ctx.accounts.pot.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[PotGame::SEED, id_bytes.as_ref(), bump_bytes.as_ref()]];

    let pot_info = ctx.accounts.pot.to_account_info();
    let escrow_token_info = ctx
        .accounts
        .escrow_token_account
        .as_ref()
        .map(|a| a.to_account_info());
    let token = match ctx.accounts.pot.mint {
        None => None,
        Some(mint) => Some(TokenEscrow {
            escrow_token_account: escrow_token_info
                .as_ref()
                .ok_or(StakeArenaError::InvalidCurrency)?,
            token_program: ctx
                .accounts
                .token_program
                .as_ref()
                .ok_or(StakeArenaError::InvalidCurrency)?,
            mint,
        }),
    };
    let source = EscrowSource {
        authority: &pot_info,
        token,
    };

    // Load-bearing: a reissue that fails again aborts and records nothing.
    let recipient_info = ctx.accounts.recipient_account.to_account_info();
    let legs = [PayoutLeg {
        to: &recipient_info,
        expected_recipient: record.recipient,
        amount: record.amount,
        purpose: record.purpose,
        load_bearing: true,
    }];

    let pot_key = ctx.accounts.pot.key();
    payout::execute_batch(
        pot_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.pot.payments,
    )?;

    Ok(())
}
