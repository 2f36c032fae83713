use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::events::PotWinnerDeclared;
use crate::state::{Platform, PotGame, PotStatus};

#[derive(Accounts)]
pub struct SetPotWinner<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ StakeArenaError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [PotGame::SEED, pot.pot_id.to_le_bytes().as_ref()],
        bump = pot.bump,
        constraint = pot.status == PotStatus::Open @ StakeArenaError::InvalidState,
    )]
    pub pot: Account<'info, PotGame>,

    /// Platform authority (moderator).
    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetPotWinner>, winner: Pubkey) -> Result<()> {
    let pot = &mut ctx.accounts.pot;

    // Fee-based pots restrict the winner to an actual entrant; externally
    // funded pots may pay out any identity the moderator names.
    if pot.entry_fee > 0 {
        require!(
            pot.participants.contains(&winner),
            StakeArenaError::InvalidWinner
        );
    }

    pot.winner = Some(winner);
    pot.status = PotStatus::Resolved;

    emit!(PotWinnerDeclared {
        pot_id: pot.pot_id,
        winner,
    });

    Ok(())
}
