use anchor_lang::prelude::*;

use crate::bracket;
use crate::errors::StakeArenaError;
use crate::events::BracketAdvanced;
use crate::state::{Contest, ContestKind, ContestStatus, Tournament, TournamentStatus};

#[derive(Accounts)]
pub struct ReportMatchResult<'info> {
    #[account(
        seeds = [Tournament::SEED, tournament.tournament_id.to_le_bytes().as_ref()],
        bump = tournament.bump,
        constraint = tournament.status == TournamentStatus::InProgress
            @ StakeArenaError::InvalidState,
    )]
    pub tournament: Account<'info, Tournament>,

    #[account(
        mut,
        constraint = completed_match.tournament == Some(tournament.key())
            @ StakeArenaError::InvalidBracket,
        constraint = completed_match.status == ContestStatus::ScoreConfirmed
            @ StakeArenaError::InvalidState,
        constraint = !completed_match.advanced @ StakeArenaError::AlreadyAdvanced,
    )]
    pub completed_match: Account<'info, Contest>,

    /// The next-round match this winner feeds; created on first report.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Contest::INIT_SPACE,
        seeds = [
            Contest::MATCH_SEED,
            tournament.key().as_ref(),
            &[completed_match.round + 1],
            &[bracket::next_match_order(completed_match.match_order)],
        ],
        bump,
    )]
    pub next_match: Account<'info, Contest>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ReportMatchResult>) -> Result<()> {
    let tournament = &ctx.accounts.tournament;
    let completed = &ctx.accounts.completed_match;

    // The final's result settles the tournament; it never advances a bracket.
    require!(
        !bracket::is_final(completed.round, tournament.max_players),
        StakeArenaError::InvalidBracket
    );
    let winner = completed.winner.ok_or(StakeArenaError::InvalidState)?;

    let next_round = completed.round + 1;
    let next_order = bracket::next_match_order(completed.match_order);
    let fills_challenger = bracket::feeds_challenger_slot(completed.match_order);
    let completed_round = completed.round;
    let completed_order = completed.match_order;
    let tournament_key = tournament.key();
    let mint = tournament.mint;

    let clock = Clock::get()?;
    let next = &mut ctx.accounts.next_match;
    if next.created_at == 0 {
        // Freshly created by init_if_needed: seed the shell before filling
        // the winner's slot.
        next.contest_id = 0;
        next.kind = ContestKind::TournamentMatch;
        next.mint = mint;
        next.escrow_token_account = None;
        next.entry_fee = 0;
        next.challenger = Pubkey::default();
        next.opponent = None;
        next.opponent_deposited = true;
        next.status = ContestStatus::Active;
        next.prior_status = ContestStatus::Active;
        next.challenger_score = 0;
        next.opponent_score = 0;
        next.scores_reported = false;
        next.reported_by = None;
        next.winner = None;
        next.funds_distributed = false;
        next.dispute_reason = String::new();
        next.tournament = Some(tournament_key);
        next.round = next_round;
        next.match_order = next_order;
        next.advanced = false;
        next.payments = Vec::new();
        next.created_at = clock.unix_timestamp;
        next.settled_at = 0;
        next.bump = ctx.bumps.next_match;
    } else {
        require!(
            next.tournament == Some(tournament_key) && next.round == next_round,
            StakeArenaError::InvalidBracket
        );
    }

    if fills_challenger {
        require!(
            next.challenger == Pubkey::default(),
            StakeArenaError::AlreadyAdvanced
        );
        next.challenger = winner;
    } else {
        require!(next.opponent.is_none(), StakeArenaError::AlreadyAdvanced);
        next.opponent = Some(winner);
    }
    if next.challenger != Pubkey::default() && next.opponent.is_some() {
        next.status = ContestStatus::Accepted;
        next.prior_status = ContestStatus::Accepted;
    }

    ctx.accounts.completed_match.advanced = true;

    emit!(BracketAdvanced {
        tournament: tournament_key,
        round: completed_round,
        match_order: completed_order,
        winner,
        next_round,
        next_match_order: next_order,
    });

    Ok(())
}
