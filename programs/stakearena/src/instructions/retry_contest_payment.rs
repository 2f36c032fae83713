use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{Contest, ContestKind, ContestStatus, Platform};

#[derive(Accounts)]
pub struct RetryContestPayment<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ StakeArenaError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Contest::SEED, contest.contest_id.to_le_bytes().as_ref()],
        bump = contest.bump,
        constraint = contest.kind == ContestKind::HeadsUp @ StakeArenaError::InvalidState,
    )]
    pub contest: Account<'info, Contest>,

    /// Escrow token account owned by the contest PDA (token contests only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == contest.escrow_token_account
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

pub fn handler(ctx: Context<RetryContestPayment>, record_index: u8) -> Result<()> {
    // Reissue only once the contest has reached a terminal status; earlier
    // failures resolve through the normal settlement path.
    let status = ctx.accounts.contest.status;
    require!(
        status == ContestStatus::ScoreConfirmed || status == ContestStatus::Cancelled,
        StakeArenaError::InvalidState
    );

    let record =
        payout::retryable_record(&ctx.accounts.contest.payments, record_index as usize)?;

    let id_bytes = ctx.accounts.contest.contest_id.to_le_bytes();
    let bump_bytes = [ctx.accounts.contest.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[Contest::SEED, id_bytes.as_ref(), bump_bytes.as_ref()]];

    let contest_info = ctx.accounts.contest.to_account_info();
    let escrow_token_info = ctx
        .accounts
        .escrow_token_account
        .as_ref()
        .map(|a| a.to_account_info());
    let token = match ctx.accounts.contest.mint {
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
        authority: &contest_info,
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

    let contest_key = ctx.accounts.contest.key();
    payout::execute_batch(
        contest_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.contest.payments,
    )?;

    Ok(())
}
