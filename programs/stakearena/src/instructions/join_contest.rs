use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::ContestJoined;
use crate::payout;
use crate::state::{Contest, ContestKind, ContestStatus, Platform};

#[derive(Accounts)]
pub struct JoinContest<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Contest::SEED, contest.contest_id.to_le_bytes().as_ref()],
        bump = contest.bump,
        constraint = contest.status == ContestStatus::Active @ StakeArenaError::InvalidState,
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

    /// Participant's token account the stake is drawn from (token contests only).
    #[account(mut)]
    pub participant_token_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub participant: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<JoinContest>, stake: u64) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    let contest = &ctx.accounts.contest;

    require!(
        participant != contest.challenger,
        StakeArenaError::AlreadyRegistered
    );
    if let Some(invited) = contest.opponent {
        require_keys_eq!(invited, participant, StakeArenaError::Unauthorized);
    }
    // The stake must match the entry fee exactly, in the contest's currency.
    require!(stake == contest.entry_fee, StakeArenaError::InsufficientStake);

    match contest.mint {
        None => payout::collect_native_stake(
            &ctx.accounts.participant,
            ctx.accounts.contest.to_account_info(),
            &ctx.accounts.system_program,
            stake,
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
                stake,
            )?;
        }
    }

    let platform = &mut ctx.accounts.platform;
    platform.total_volume = platform
        .total_volume
        .checked_add(stake)
        .ok_or(StakeArenaError::MathOverflow)?;

    let contest = &mut ctx.accounts.contest;
    contest.opponent = Some(participant);
    contest.opponent_deposited = true;
    contest.status = ContestStatus::Accepted;
    contest.prior_status = ContestStatus::Accepted;

    emit!(ContestJoined {
        contest_id: contest.contest_id,
        opponent: participant,
        stake,
    });

    Ok(())
}
