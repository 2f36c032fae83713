use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::events::TournamentCancelled;
use crate::state::{Platform, Tournament, TournamentStatus};

#[derive(Accounts)]
pub struct CancelTournament<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Tournament::SEED, tournament.tournament_id.to_le_bytes().as_ref()],
        bump = tournament.bump,
    )]
    pub tournament: Account<'info, Tournament>,

    /// Host or platform authority.
    pub caller: Signer<'info>,
}

pub fn handler(ctx: Context<CancelTournament>) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    let tournament = &mut ctx.accounts.tournament;

    require!(
        caller == tournament.host || ctx.accounts.platform.is_moderator(&caller),
        StakeArenaError::Unauthorized
    );
    require!(
        tournament.status == TournamentStatus::Registration
            || tournament.status == TournamentStatus::InProgress,
        StakeArenaError::InvalidState
    );

    tournament.status = TournamentStatus::Cancelled;

    emit!(TournamentCancelled {
        tournament_id: tournament.tournament_id,
    });

    Ok(())
}
