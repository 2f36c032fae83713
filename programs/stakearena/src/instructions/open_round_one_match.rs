use anchor_lang::prelude::*;

use crate::bracket;
use crate::errors::StakeArenaError;
use crate::events::MatchOpened;
use crate::state::{Contest, ContestKind, ContestStatus, Tournament, TournamentStatus};

#[derive(Accounts)]
#[instruction(match_order: u8)]
pub struct OpenRoundOneMatch<'info> {
    #[account(
        seeds = [Tournament::SEED, tournament.tournament_id.to_le_bytes().as_ref()],
        bump = tournament.bump,
        constraint = tournament.status == TournamentStatus::InProgress
            @ StakeArenaError::InvalidState,
    )]
    pub tournament: Account<'info, Tournament>,

    #[account(
        init,
        payer = payer,
        space = 8 + Contest::INIT_SPACE,
        seeds = [
            Contest::MATCH_SEED,
            tournament.key().as_ref(),
            &[1u8],
            &[match_order],
        ],
        bump,
    )]
    pub match_contest: Account<'info, Contest>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<OpenRoundOneMatch>, match_order: u8) -> Result<()> {
    let tournament = &ctx.accounts.tournament;
    let first_round_matches = bracket::matches_in_round(tournament.max_players, 1);
    require!(
        match_order >= 1 && match_order <= first_round_matches,
        StakeArenaError::InvalidBracket
    );

    // Round one pairs registrants in registration order.
    let idx = (2 * match_order - 2) as usize;
    require!(
        tournament.players.len() > idx + 1,
        StakeArenaError::InvalidBracket
    );
    let challenger = tournament.players[idx];
    let opponent = tournament.players[idx + 1];

    let clock = Clock::get()?;
    let tournament_key = tournament.key();
    let mint = tournament.mint;

    let contest = &mut ctx.accounts.match_contest;
    contest.contest_id = 0;
    contest.kind = ContestKind::TournamentMatch;
    contest.mint = mint;
    contest.escrow_token_account = None;
    contest.entry_fee = 0;
    contest.challenger = challenger;
    contest.opponent = Some(opponent);
    contest.opponent_deposited = true;
    contest.status = ContestStatus::Accepted;
    contest.prior_status = ContestStatus::Accepted;
    contest.challenger_score = 0;
    contest.opponent_score = 0;
    contest.scores_reported = false;
    contest.reported_by = None;
    contest.winner = None;
    contest.funds_distributed = false;
    contest.dispute_reason = String::new();
    contest.tournament = Some(tournament_key);
    contest.round = 1;
    contest.match_order = match_order;
    contest.advanced = false;
    contest.payments = Vec::new();
    contest.created_at = clock.unix_timestamp;
    contest.settled_at = 0;
    contest.bump = ctx.bumps.match_contest;

    emit!(MatchOpened {
        tournament: tournament_key,
        round: 1,
        match_order,
        challenger,
        opponent,
    });

    Ok(())
}
