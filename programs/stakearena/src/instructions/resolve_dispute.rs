use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::DisputeResolved;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{Contest, ContestStatus, PaymentPurpose, Platform};

#[derive(Accounts)]
pub struct ResolveDispute<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ StakeArenaError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        constraint = contest.status == ContestStatus::Disputed @ StakeArenaError::InvalidState,
    )]
    pub contest: Account<'info, Contest>,

    /// Escrow token account owned by the contest PDA (token contests only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == contest.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// CHECK: Challenger refund destination (wallet or token account).
    #[account(mut)]
    pub challenger_account: UncheckedAccount<'info>,

    /// CHECK: Opponent refund destination, required once the opponent has
    /// deposited.
    #[account(mut)]
    pub opponent_account: Option<UncheckedAccount<'info>>,

    /// Platform authority (moderator).
    pub authority: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<ResolveDispute>, refund: bool) -> Result<()> {
    let moderator = ctx.accounts.authority.key();

    if !refund {
        // No funds move; the contest returns to wherever it was before the
        // dispute, including a settled terminal state.
        let contest = &mut ctx.accounts.contest;
        contest.status = contest.prior_status;

        emit!(DisputeResolved {
            contest_id: contest.contest_id,
            moderator,
            refunded: false,
        });
        return Ok(());
    }

    // Funds that already left escrow cannot be clawed back, and bracket
    // matches hold no escrow of their own.
    ctx.accounts.contest.assert_refundable()?;

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

    // Refund every stake actually escrowed. Both legs are load-bearing: a
    // participant's refund failing must block cancellation.
    let challenger_info = ctx.accounts.challenger_account.to_account_info();
    let entry_fee = ctx.accounts.contest.entry_fee;
    let mut legs = vec![PayoutLeg {
        to: &challenger_info,
        expected_recipient: ctx.accounts.contest.challenger,
        amount: entry_fee,
        purpose: PaymentPurpose::Refund,
        load_bearing: true,
    }];

    let opponent_info = ctx
        .accounts
        .opponent_account
        .as_ref()
        .map(|a| a.to_account_info());
    if ctx.accounts.contest.opponent_deposited {
        let opponent = ctx
            .accounts
            .contest
            .opponent
            .ok_or(StakeArenaError::InvalidState)?;
        legs.push(PayoutLeg {
            to: opponent_info
                .as_ref()
                .ok_or(StakeArenaError::BadRecipient)?,
            expected_recipient: opponent,
            amount: entry_fee,
            purpose: PaymentPurpose::Refund,
            load_bearing: true,
        });
    }

    let contest_key = ctx.accounts.contest.key();
    payout::execute_batch(
        contest_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.contest.payments,
    )?;

    let clock = Clock::get()?;
    let contest = &mut ctx.accounts.contest;
    contest.status = ContestStatus::Cancelled;
    contest.settled_at = clock.unix_timestamp;

    emit!(DisputeResolved {
        contest_id: contest.contest_id,
        moderator,
        refunded: true,
    });

    Ok(())
}
