use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::events::ContestDisputed;
use crate::state::{Contest, ContestStatus};

#[derive(Accounts)]
pub struct DisputeContest<'info> {
    #[account(mut)]
    pub contest: Account<'info, Contest>,

    pub disputant: Signer<'info>,
}

pub fn handler(ctx: Context<DisputeContest>, reason: String) -> Result<()> {
    let contest = &mut ctx.accounts.contest;
    let disputant = ctx.accounts.disputant.key();

    contest.assert_can_dispute()?;
    require!(
        contest.is_participant(&disputant),
        StakeArenaError::NotParticipant
    );
    require!(
        reason.len() <= Contest::MAX_REASON_LEN,
        StakeArenaError::ReasonTooLong
    );

    // Remember where to return if the dispute resolves without a refund.
    // Disputing after settlement does not reverse the completed distribution.
    if contest.status != ContestStatus::Disputed {
        contest.prior_status = contest.status;
    }
    contest.status = ContestStatus::Disputed;
    contest.dispute_reason = reason.clone();

    emit!(ContestDisputed {
        contest_id: contest.contest_id,
        disputant,
        reason,
    });

    Ok(())
}
