use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::bracket;
use crate::errors::StakeArenaError;
use crate::events::TournamentCreated;
use crate::state::{Platform, Tournament, TournamentStatus};

#[derive(Accounts)]
pub struct CreateTournament<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init,
        payer = host,
        space = 8 + Tournament::INIT_SPACE,
        seeds = [Tournament::SEED, (platform.total_tournaments + 1).to_le_bytes().as_ref()],
        bump,
    )]
    pub tournament: Account<'info, Tournament>,

    /// Staked mint. Omit for native SOL tournaments.
    pub mint: Option<Account<'info, Mint>>,

    /// Escrow token account owned by the tournament PDA (token tournaments only).
    #[account(
        init,
        payer = host,
        associated_token::mint = mint,
        associated_token::authority = tournament,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub host: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Option<Program<'info, Token>>,
    pub associated_token_program: Option<Program<'info, AssociatedToken>>,
}

pub fn handler(
    ctx: Context<CreateTournament>,
    entry_fee: u64,
    max_players: u8,
    winner_take_all: bool,
) -> Result<()> {
    require!(
        bracket::is_valid_player_count(max_players),
        StakeArenaError::InvalidPlayerCount
    );
    require!(entry_fee > 0, StakeArenaError::EntryFeeTooLow);
    require!(
        entry_fee >= ctx.accounts.platform.min_entry_fee,
        StakeArenaError::EntryFeeTooLow
    );

    let platform = &mut ctx.accounts.platform;
    let tournament_id = platform.total_tournaments + 1;
    platform.total_tournaments = tournament_id;

    let clock = Clock::get()?;
    let mint_key = ctx.accounts.mint.as_ref().map(|m| m.key());

    let tournament = &mut ctx.accounts.tournament;
    tournament.tournament_id = tournament_id;
    tournament.host = ctx.accounts.host.key();
    tournament.mint = mint_key;
    tournament.escrow_token_account =
        ctx.accounts.escrow_token_account.as_ref().map(|a| a.key());
    tournament.entry_fee = entry_fee;
    tournament.max_players = max_players;
    tournament.players = Vec::new();
    tournament.winner_take_all = winner_take_all;
    tournament.status = TournamentStatus::Registration;
    tournament.winner = None;
    tournament.funds_distributed = false;
    tournament.payments = Vec::new();
    tournament.refunded = Vec::new();
    tournament.created_at = clock.unix_timestamp;
    tournament.settled_at = 0;
    tournament.bump = ctx.bumps.tournament;

    emit!(TournamentCreated {
        tournament_id,
        host: tournament.host,
        entry_fee,
        max_players,
        mint: mint_key,
    });

    Ok(())
}
