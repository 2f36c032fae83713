use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::StakeArenaError;
use crate::events::PotCancelled;
use crate::payout::{self, EscrowSource, PayoutLeg, TokenEscrow};
use crate::state::{PaymentPurpose, Platform, PotGame, PotStatus};

#[derive(Accounts)]
pub struct CancelPot<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [PotGame::SEED, pot.pot_id.to_le_bytes().as_ref()],
        bump = pot.bump,
        constraint = pot.status == PotStatus::Open @ StakeArenaError::InvalidState,
    )]
    pub pot: Account<'info, PotGame>,

    /// Escrow token account owned by the pot PDA (token pots only).
    #[account(
        mut,
        constraint = Some(escrow_token_account.key()) == pot.escrow_token_account
            @ StakeArenaError::InvalidCurrency,
    )]
    pub escrow_token_account: Option<Account<'info, TokenAccount>>,

    /// CHECK: Host wallet or token account the remaining escrow returns to.
    #[account(mut)]
    pub host_account: UncheckedAccount<'info>,

    /// Host or platform authority.
    pub caller: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
}

pub fn handler(ctx: Context<CancelPot>) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    require!(
        caller == ctx.accounts.pot.host || ctx.accounts.platform.is_moderator(&caller),
        StakeArenaError::Unauthorized
    );
    // Fee-based pots can only be abandoned while empty; entrants' stakes are
    // never swept to the host. Externally funded pots return their balance
    // to the host who funded them.
    if ctx.accounts.pot.entry_fee > 0 {
        require!(
            ctx.accounts.pot.participants.is_empty(),
            StakeArenaError::InvalidState
        );
    }

    let pot_info = ctx.accounts.pot.to_account_info();
    let remaining = match ctx.accounts.pot.mint {
        None => payout::observed_native_escrow(&pot_info)?,
        Some(_) => ctx
            .accounts
            .escrow_token_account
            .as_ref()
            .ok_or(StakeArenaError::InvalidCurrency)?
            .amount,
    };

    if remaining > 0 {
        let id_bytes = ctx.accounts.pot.pot_id.to_le_bytes();
        let bump_bytes = [ctx.accounts.pot.bump];
        let signer_seeds: &[&[&[u8]]] =
            &[&[PotGame::SEED, id_bytes.as_ref(), bump_bytes.as_ref()]];

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

        let host_info = ctx.accounts.host_account.to_account_info();
        let host = ctx.accounts.pot.host;
        let legs = [PayoutLeg {
            to: &host_info,
            expected_recipient: host,
            amount: remaining,
            purpose: PaymentPurpose::Refund,
            load_bearing: true,
        }];

        let pot_key = ctx.accounts.pot.key();
        payout::execute_batch(
            pot_key,
            &source,
            signer_seeds,
            &legs,
            &mut ctx.accounts.pot.payments,
        )?;
    }

    let pot = &mut ctx.accounts.pot;
    pot.status = PotStatus::Cancelled;

    emit!(PotCancelled {
        pot_id: pot.pot_id,
        returned: remaining,
    });

    Ok(())
}
