use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::ContestCreated;
use crate::payout;
use crate::state::{Contest, ContestKind, ContestStatus, Platform};

#[derive(Accounts)]
pub struct CreateContest<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init,
        payer = challenger,
        space = 8 + Contest::INIT_SPACE,
        seeds = [Contest::SEED, (platform.total_contests + 1).to_le_bytes().as_ref()],
        bump,
    )]
    pub contest: Account<'info, Contest>,

    /// Staked mint. Omit for native SOL contests.
    pub mint: Option<Account<'info, Mint>>,

    /// Escrow token account owned by the contest PDA (token contests only).
    #[account(
        init,
        payer = challenger,
        associated_token::mint = mint,
        associated_token::authority = contest,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// Challenger's token account the stake is drawn from (token contests only).
    #[account(mut)]
    pub challenger_token_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub challenger: Signer<'info>,

    /// CHECK: Pre-designated opponent wallet, when the contest is an invite.
    pub invited_opponent: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
    pub token_program: Option<Program<'info, Token>>,
    pub associated_token_program: Option<Program<'info, AssociatedToken>>,
}

pub fn handler(ctx: Context<CreateContest>, entry_fee: u64) -> Result<()> {
    require!(entry_fee > 0, StakeArenaError::EntryFeeTooLow);
    require!(
        entry_fee >= ctx.accounts.platform.min_entry_fee,
        StakeArenaError::EntryFeeTooLow
    );

    let mint_key = ctx.accounts.mint.as_ref().map(|m| m.key());

    // Pre-escrow trust model: the creator's stake moves into escrow now, not
    // at settlement time.
    match mint_key {
        None => payout::collect_native_stake(
            &ctx.accounts.challenger,
            ctx.accounts.contest.to_account_info(),
            &ctx.accounts.system_program,
            entry_fee,
        )?,
        Some(mint) => {
            let from = ctx
                .accounts
                .challenger_token_account
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
                &ctx.accounts.challenger,
                token_program,
                entry_fee,
            )?;
        }
    }

    let platform = &mut ctx.accounts.platform;
    let contest_id = platform.total_contests + 1;
    platform.total_contests = contest_id;
    platform.total_volume = platform
        .total_volume
        .checked_add(entry_fee)
        .ok_or(StakeArenaError::MathOverflow)?;

    let clock = Clock::get()?;
    let invited = ctx.accounts.invited_opponent.as_ref().map(|a| a.key());

    let contest = &mut ctx.accounts.contest;
    contest.contest_id = contest_id;
    contest.kind = ContestKind::HeadsUp;
    contest.mint = mint_key;
    contest.escrow_token_account = ctx.accounts.escrow_token_account.as_ref().map(|a| a.key());
    contest.entry_fee = entry_fee;
    contest.challenger = ctx.accounts.challenger.key();
    contest.opponent = invited;
    contest.opponent_deposited = false;
    contest.status = ContestStatus::Active;
    contest.prior_status = ContestStatus::Active;
    contest.challenger_score = 0;
    contest.opponent_score = 0;
    contest.scores_reported = false;
    contest.reported_by = None;
    contest.winner = None;
    contest.funds_distributed = false;
    contest.dispute_reason = String::new();
    contest.tournament = None;
    contest.round = 0;
    contest.match_order = 0;
    contest.advanced = false;
    contest.payments = Vec::new();
    contest.created_at = clock.unix_timestamp;
    contest.settled_at = 0;
    contest.bump = ctx.bumps.contest;

    emit!(ContestCreated {
        contest_id,
        challenger: contest.challenger,
        invited_opponent: invited,
        entry_fee,
        mint: mint_key,
    });

    Ok(())
}
