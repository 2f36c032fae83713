use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::TournamentEntryRefunded;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{PaymentPurpose, Tournament, TournamentStatus};

#[derive(Accounts)]
pub struct RefundTournamentEntry<'info> {
    #[account(
        mut,
        seeds = [Tournament::SEED, tournament.tournament_id.to_le_bytes().as_ref()],
        bump = tournament.bump,
        constraint = tournament.status == TournamentStatus::Cancelled
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

    /// CHECK: Refund destination (the player's wallet or token account).
    #[account(mut)]
    pub player_account: UncheckedAccount<'info>,

    pub player: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<RefundTournamentEntry>) -> Result<()> {
    let player = ctx.accounts.player.key();
    let tournament = &ctx.accounts.tournament;

    require!(
        tournament.is_registered(&player),
        StakeArenaError::NotParticipant
    );
    // Pull-pattern refunds: each registrant withdraws once.
    require!(
        !tournament.refunded.contains(&player),
        StakeArenaError::AlreadyClaimed
    );

    let id_bytes = tournament.tournament_id.to_le_bytes();
    let bump_bytes = [tournament.bump];
    let signer_seeds: &[&[&[u8]]] =
        &[&[Tournament::SEED, id_bytes.as_ref(), bump_bytes.as_ref()]];

    let tournament_info = ctx.accounts.tournament.to_account_info();
    let escrow_token_info = ctx
        .accounts
        .escrow_token_account
        .as_ref()
        .map(|a| a.to_account_info());
    let token = match ctx.accounts.tournament.mint {
        None => None,
        Some(mint) => Some(TokenEscrow {
            escrow_token_account: escrow_token_info
                .as_ref()
                .ok_or(StakeArenaError::InvalidCurrency)?,
            token_program: ctx
                .accounts
                .token_program
                .as_ref()
                .ok_or(StakeArenaError::InvalidCurrency)?,
            mint,
        }),
    };
    let source = EscrowSource {
        authority: &tournament_info,
        token,
    };

    let player_info = ctx.accounts.player_account.to_account_info();
    let amount = ctx.accounts.tournament.entry_fee;
    let legs = [PayoutLeg {
        to: &player_info,
        expected_recipient: player,
        amount,
        purpose: PaymentPurpose::Refund,
        load_bearing: true,
    }];

    let tournament_key = ctx.accounts.tournament.key();
    payout::execute_batch(
        tournament_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.tournament.payments,
    )?;

    let tournament = &mut ctx.accounts.tournament;
    tournament.refunded.push(player);

    emit!(TournamentEntryRefunded {
        tournament_id: tournament.tournament_id,
        player,
        amount,
    });

    Ok(())
}
