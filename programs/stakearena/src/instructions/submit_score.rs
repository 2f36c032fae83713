use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::events::ScoreSubmitted;
use crate::state::{Contest, ContestStatus};

#[derive(Accounts)]
pub struct SubmitScore<'info> {
    #[account(mut)]
    pub contest: Account<'info, Contest>,

    pub reporter: Signer<'info>,
}

pub fn handler(ctx: Context<SubmitScore>, challenger_score: u32, opponent_score: u32) -> Result<()> {
    let contest = &mut ctx.accounts.contest;
    let reporter = ctx.accounts.reporter.key();

    // A later report may correct an earlier one until the result is confirmed.
    require!(
        contest.status == ContestStatus::Accepted
            || contest.status == ContestStatus::ScoreReported,
        StakeArenaError::InvalidState
    );
    require!(
        contest.is_participant(&reporter),
        StakeArenaError::NotParticipant
    );

    contest.challenger_score = challenger_score;
    contest.opponent_score = opponent_score;
    contest.scores_reported = true;
    contest.reported_by = Some(reporter);
    contest.status = ContestStatus::ScoreReported;

    emit!(ScoreSubmitted {
        contest_id: contest.contest_id,
        reporter,
        challenger_score,
        opponent_score,
    });

    Ok(())
}
