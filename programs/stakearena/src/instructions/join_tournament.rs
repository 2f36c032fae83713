use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::TournamentJoined;
use crate::payout;
use crate::state::{Platform, Tournament, TournamentStatus};

#[derive(Accounts)]
pub struct JoinTournament<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Tournament::SEED, tournament.tournament_id.to_le_bytes().as_ref()],
        bump = tournament.bump,
        constraint = tournament.status == TournamentStatus::Registration
            @ StakeArenaError::InvalidState,
    )]
    pub tournament: Account<'info, Tournament>,

    /// Escrow token account owned by the tournament PDA (token tournaments only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == tournament.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// Player's token account the entry fee is drawn from (token tournaments only).
    #[account(mut)]
    pub player_token_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<JoinTournament>, stake: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let tournament = &ctx.accounts.tournament;

    require!(
        !tournament.is_registered(&player),
        StakeArenaError::AlreadyRegistered
    );
    require!(
        tournament.players.len() < tournament.max_players as usize,
        StakeArenaError::ContestFull
    );
    require!(
        stake == tournament.entry_fee,
        StakeArenaError::InsufficientStake
    );

    match tournament.mint {
        None => payout::collect_native_stake(
            &ctx.accounts.player,
            ctx.accounts.tournament.to_account_info(),
            &ctx.accounts.system_program,
            stake,
        )?,
        Some(mint) => {
            let from = ctx
                .accounts
                .player_token_account
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
                &ctx.accounts.player,
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

    let tournament = &mut ctx.accounts.tournament;
    tournament.players.push(player);

    // A full roster locks registration and opens bracket play.
    let started = tournament.players.len() == tournament.max_players as usize;
    if started {
        tournament.status = TournamentStatus::InProgress;
    }

    emit!(TournamentJoined {
        tournament_id: tournament.tournament_id,
        player,
        registered: tournament.players.len() as u8,
        started,
    });

    Ok(())
}
