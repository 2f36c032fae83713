use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{Platform, Tournament, TournamentStatus};

#[derive(Accounts)]
pub struct RetryTournamentPayment<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ StakeArenaError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Tournament::SEED, tournament.tournament_id.to_le_bytes().as_ref()],
        bump = tournament.bump,
    )]
    pub tournament: Account<'info, Tournament>,

    /// Escrow token account owned by the tournament PDA (token tournaments only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == tournament.escrow_token_account
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

pub fn handler(ctx: Context<RetryTournamentPayment>, record_index: u8) -> Result<()> {
    let status = ctx.accounts.tournament.status;
    require!(
        status == TournamentStatus::Completed || status == TournamentStatus::Cancelled,
        StakeArenaError::InvalidState
    );

    let record =
        payout::retryable_record(&ctx.accounts.tournament.payments, record_index as usize)?;

    let id_bytes = ctx.accounts.tournament.tournament_id.to_le_bytes();
    let bump_bytes = [ctx.accounts.tournament.bump];
    let signer_seeds: &[&[&[u8]]] =
        &[&[Tournament::SEED, id_bytes.as_ref(), bump_bytes.as_ref()]];

    let tournament_info = ctx.accounts.tournament.to_account_info();
    let escrow_token_info = ctx
        .accounts
        .escrow_token_account
        .as_ref()
        .map(|a| a.to_account_info());
    let token = match ctx.accounts.tournament.mint {
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
        authority: &tournament_info,
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

    let tournament_key = ctx.accounts.tournament.key();
    payout::execute_batch(
        tournament_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.tournament.payments,
    )?;

    Ok(())
}
