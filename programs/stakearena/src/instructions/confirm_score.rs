use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::ContestSettled;
use crate::fees;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{Contest, ContestKind, ContestStatus, PaymentPurpose, Platform};

#[derive(Accounts)]
pub struct ConfirmScore<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(mut)]
    pub contest: Account<'info, Contest>,

    /// Escrow token account owned by the contest PDA (token contests only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == contest.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// CHECK: Winner payout destination, either the winner's wallet or their
    /// token account for token contests. Validated against the derived winner.
    #[account(mut)]
    pub winner_account: UncheckedAccount<'info>,

    /// CHECK: Treasury destination for the platform fee.
    #[account(mut)]
    pub treasury_account: UncheckedAccount<'info>,

    pub confirmer: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<ConfirmScore>) -> Result<()> {
    // Idempotent: a repeat confirmation of a settled contest is a no-op
    // success, never a second transfer.
    if ctx.accounts.contest.is_settled() {
        return Ok(());
    }

    require!(
        ctx.accounts.contest.status == ContestStatus::ScoreReported,
        StakeArenaError::InvalidState
    );

    let confirmer = ctx.accounts.confirmer.key();
    let reporter = ctx
        .accounts
        .contest
        .reported_by
        .ok_or(StakeArenaError::InvalidState)?;
    // The confirmer must be the participant who did not file the report, or
    // hold moderator authority.
    let authorized = ctx.accounts.platform.is_moderator(&confirmer)
        || (ctx.accounts.contest.is_participant(&confirmer) && confirmer != reporter);
    require!(authorized, StakeArenaError::Unauthorized);

    let winner = ctx.accounts.contest.winner_from_scores()?;
    let clock = Clock::get()?;

    // Tournament matches carry no escrow of their own; the result feeds the
    // bracket and funds settle at tournament level.
    if ctx.accounts.contest.kind == ContestKind::TournamentMatch {
        let contest = &mut ctx.accounts.contest;
        contest.winner = Some(winner);
        contest.status = ContestStatus::ScoreConfirmed;
        contest.prior_status = ContestStatus::ScoreConfirmed;
        contest.settled_at = clock.unix_timestamp;

        emit!(ContestSettled {
            contest_id: contest.contest_id,
            winner,
            pool: 0,
            platform_fee: 0,
            winner_prize: 0,
        });
        return Ok(());
    }

    let pool = ctx
        .accounts
        .contest
        .entry_fee
        .checked_mul(2)
        .ok_or(StakeArenaError::MathOverflow)?;
    let split = fees::heads_up_split(pool, ctx.accounts.platform.platform_fee_bps)?;

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

    let treasury_info = ctx.accounts.treasury_account.to_account_info();
    let winner_info = ctx.accounts.winner_account.to_account_info();
    let legs = [
        // A fee-collection problem never blocks the winner's prize.
        PayoutLeg {
            to: &treasury_info,
            expected_recipient: ctx.accounts.platform.treasury,
            amount: split.platform_fee,
            purpose: PaymentPurpose::PlatformFee,
            load_bearing: false,
        },
        PayoutLeg {
            to: &winner_info,
            expected_recipient: winner,
            amount: split.winner_prize,
            purpose: PaymentPurpose::WinnerPrize,
            load_bearing: true,
        },
    ];

    let contest_key = ctx.accounts.contest.key();
    let report = payout::execute_batch(
        contest_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.contest.payments,
    )?;
    msg!(
        "settlement batch: {} completed, {} failed",
        report.completed,
        report.failed
    );

    let contest = &mut ctx.accounts.contest;
    contest.winner = Some(winner);
    contest.funds_distributed = true;
    contest.status = ContestStatus::ScoreConfirmed;
    contest.prior_status = ContestStatus::ScoreConfirmed;
    contest.settled_at = clock.unix_timestamp;

    emit!(ContestSettled {
        contest_id: contest.contest_id,
        winner,
        pool,
        platform_fee: split.platform_fee,
        winner_prize: split.winner_prize,
    });

    Ok(())
}
