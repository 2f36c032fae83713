use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::PotClaimed;
use crate::fees;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{PaymentPurpose, Platform, PotGame, PotStatus};

#[derive(Accounts)]
pub struct ClaimPot<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [PotGame::SEED, pot.pot_id.to_le_bytes().as_ref()],
        bump = pot.bump,
    )]
    pub pot: Account<'info, PotGame>,

    /// Escrow token account owned by the pot PDA (token pots only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == pot.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// CHECK: Winner payout destination (wallet, or token account for token pots).
    #[account(mut)]
    pub winner_account: UncheckedAccount<'info>,

    /// CHECK: Host fee destination.
    #[account(mut)]
    pub host_account: UncheckedAccount<'info>,

    /// CHECK: Treasury destination for the platform fee.
    #[account(mut)]
    pub treasury_account: UncheckedAccount<'info>,

    pub claimant: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<ClaimPot>) -> Result<()> {
    let claimant = ctx.accounts.claimant.key();
    ctx.accounts.pot.assert_claimable(&claimant)?;

    let pot_info = ctx.accounts.pot.to_account_info();

    // The realized pot is whatever the escrow actually holds right now, not
    // a pre-declared amount.
    let claimable = match ctx.accounts.pot.mint {
        None => payout::observed_native_escrow(&pot_info)?,
        Some(_) => ctx
            .accounts
            .escrow_token_account
            .as_ref()
            .ok_or(StakeArenaError::InvalidCurrency)?
            .amount,
    };

    let split = fees::pot_split(
        claimable,
        ctx.accounts.platform.platform_fee_bps,
        ctx.accounts.platform.host_fee_bps,
        ctx.accounts.pot.entry_fee > 0,
    )?;

    // assert_claimable pinned the claimant to the recorded winner.
    let winner = claimant;

    let id_bytes = ctx.accounts.pot.pot_id.to_le_bytes();
    let bump_bytes = [ctx.accounts.pot.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[PotGame::SEED, id_bytes.as_ref(), bump_bytes.as_ref()]];

    let escrow_token_info = ctx
        .accounts
        .escrow_token_account
        .as_ref()
        .map(|a| a.to_account_info());
    let token = match ctx.accounts.pot.mint {
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
        authority: &pot_info,
        token,
    };

    let treasury_info = ctx.accounts.treasury_account.to_account_info();
    let host_info = ctx.accounts.host_account.to_account_info();
    let winner_info = ctx.accounts.winner_account.to_account_info();
    let legs = [
        PayoutLeg {
            to: &treasury_info,
            expected_recipient: ctx.accounts.platform.treasury,
            amount: split.platform_fee,
            purpose: PaymentPurpose::PlatformFee,
            load_bearing: false,
        },
        PayoutLeg {
            to: &host_info,
            expected_recipient: ctx.accounts.pot.host,
            amount: split.host_fee,
            purpose: PaymentPurpose::HostFee,
            load_bearing: false,
        },
        // Last leg absorbs the rounding remainder; its failure blocks the claim.
        PayoutLeg {
            to: &winner_info,
            expected_recipient: winner,
            amount: split.winner_amount,
            purpose: PaymentPurpose::WinnerPrize,
            load_bearing: true,
        },
    ];

    let pot_key = ctx.accounts.pot.key();
    let report = payout::execute_batch(
        pot_key,
        &source,
        signer_seeds,
        &legs,
        &mut ctx.accounts.pot.payments,
    )?;

    // Only once the winner's leg has completed does the claim flag flip.
    let pot = &mut ctx.accounts.pot;
    pot.prize_claimed = true;
    pot.realized_amount = claimable;
    pot.claim_slot = report.last_slot;
    pot.status = PotStatus::Claimed;

    emit!(PotClaimed {
        pot_id: pot.pot_id,
        winner,
        realized_amount: claimable,
        platform_fee: split.platform_fee,
        host_fee: split.host_fee,
        slot: report.last_slot,
    });

    Ok(())
}
