use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::bracket;
use crate::errors::StakeArenaError;
use crate::events::TournamentSettled;
use crate::fees;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{
    Contest, ContestStatus, PaymentPurpose, Platform, Tournament, TournamentStatus,
};

#[derive(Accounts)]
pub struct SettleTournament<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Tournament::SEED, tournament.tournament_id.to_le_bytes().as_ref()],
        bump = tournament.bump,
        constraint = tournament.status == TournamentStatus::InProgress
            @ StakeArenaError::InvalidState,
    )]
    pub tournament: Account<'info, Tournament>,

    #[account(
        constraint = final_match.tournament == Some(tournament.key())
            @ StakeArenaError::InvalidBracket,
        constraint = final_match.status == ContestStatus::ScoreConfirmed
            @ StakeArenaError::InvalidState,
    )]
    pub final_match: Account<'info, Contest>,

    /// Semifinal feeding the top of the final (brackets of four or more).
    pub semifinal_one: Option<Account<'info, Contest>>,

    /// Semifinal feeding the bottom of the final (brackets of four or more).
    pub semifinal_two: Option<Account<'info, Contest>>,

    /// Escrow token account owned by the tournament PDA (token tournaments only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == tournament.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// CHECK: Host fee destination.
    #[account(mut)]
    pub host_account: UncheckedAccount<'info>,

    /// CHECK: Treasury destination for the platform fee.
    #[account(mut)]
    pub treasury_account: UncheckedAccount<'info>,

    /// CHECK: First-place prize destination.
    #[account(mut)]
    pub first_account: UncheckedAccount<'info>,

    /// CHECK: Second-place prize destination.
    #[account(mut)]
    pub second_account: UncheckedAccount<'info>,

    /// CHECK: Third-place prize destination (brackets of four or more).
    #[account(mut)]
    pub third_account: Option<UncheckedAccount<'info>>,

    /// Anyone can trigger settlement once the final is confirmed.
    pub caller: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
}

/// Third place is the losing semifinalist from the champion's half of the
/// bracket, the player eliminated only by the eventual winner.
fn third_place(
    champion: &Pubkey,
    semi_one: &Account<Contest>,
    semi_two: &Account<Contest>,
) -> Result<Pubkey> {
    if semi_one.winner == Some(*champion) {
        semi_one.counterpart(champion)
    } else if semi_two.winner == Some(*champion) {
        semi_two.counterpart(champion)
    } else {
        Err(StakeArenaError::InvalidBracket.into())
    }
}

pub fn handler(ctx: Context<SettleTournament>) -> Result<()> {
    let tournament = &ctx.accounts.tournament;
    let final_match = &ctx.accounts.final_match;
    let rounds = bracket::rounds_for(tournament.max_players);

    require!(
        final_match.round == rounds && final_match.match_order == 1,
        StakeArenaError::InvalidBracket
    );
    let winner = final_match.winner.ok_or(StakeArenaError::InvalidState)?;
    let second = final_match.counterpart(&winner)?;

    let two_player = tournament.max_players == 2;
    let pool = tournament.pool().ok_or(StakeArenaError::MathOverflow)?;
    let split = fees::tournament_split(
        pool,
        ctx.accounts.platform.host_fee_bps,
        ctx.accounts.platform.platform_fee_bps,
        two_player,
        tournament.winner_take_all,
    )?;

    let third = if split.third > 0 {
        let semi_one = ctx
            .accounts
            .semifinal_one
            .as_ref()
            .ok_or(StakeArenaError::InvalidBracket)?;
        let semi_two = ctx
            .accounts
            .semifinal_two
            .as_ref()
            .ok_or(StakeArenaError::InvalidBracket)?;
        for (semi, order) in [(semi_one, 1u8), (semi_two, 2u8)] {
            require!(
                semi.tournament == Some(tournament.key())
                    && semi.round == rounds - 1
                    && semi.match_order == order
                    && semi.status == ContestStatus::ScoreConfirmed,
                StakeArenaError::InvalidBracket
            );
        }
        Some(third_place(&winner, semi_one, semi_two)?)
    } else {
        None
    };

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

    let host_info = ctx.accounts.host_account.to_account_info();
    let treasury_info = ctx.accounts.treasury_account.to_account_info();
    let first_info = ctx.accounts.first_account.to_account_info();
    let second_info = ctx.accounts.second_account.to_account_info();
    let third_info = ctx
        .accounts
        .third_account
        .as_ref()
        .map(|a| a.to_account_info());

    // Fee legs first, never blocking; prize legs load-bearing, third last so
    // it absorbs the rounding remainder.
    let mut legs = vec![
        PayoutLeg {
            to: &host_info,
            expected_recipient: ctx.accounts.tournament.host,
            amount: split.host_fee,
            purpose: PaymentPurpose::HostFee,
            load_bearing: false,
        },
        PayoutLeg {
            to: &treasury_info,
            expected_recipient: ctx.accounts.platform.treasury,
            amount: split.platform_fee,
            purpose: PaymentPurpose::PlatformFee,
            load_bearing: false,
        },
        PayoutLeg {
            to: &first_info,
            expected_recipient: winner,
            amount: split.first,
            purpose: PaymentPurpose::FirstPrize,
            load_bearing: true,
        },
        PayoutLeg {
            to: &second_info,
            expected_recipient: second,
            amount: split.second,
            purpose: PaymentPurpose::SecondPrize,
            load_bearing: true,
        },
    ];
    if let Some(third) = third {
        legs.push(PayoutLeg {
            to: third_info.as_ref().ok_or(StakeArenaError::BadRecipient)?,
            expected_recipient: third,
            amount: split.third,
            purpose: PaymentPurpose::ThirdPrize,
            load_bearing: true,
        });
    }

    let tournament_key = ctx.accounts.tournament.key();
    let report = payout::execute_batch(
        tournament_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.tournament.payments,
    )?;
    msg!(
        "tournament settlement: {} completed, {} failed",
        report.completed,
        report.failed
    );

    let clock = Clock::get()?;
    let tournament = &mut ctx.accounts.tournament;
    tournament.winner = Some(winner);
    tournament.funds_distributed = true;
    tournament.status = TournamentStatus::Completed;
    tournament.settled_at = clock.unix_timestamp;

    emit!(TournamentSettled {
        tournament_id: tournament.tournament_id,
        winner,
        second_place: second,
        third_place: third,
        pool,
    });

    Ok(())
}
