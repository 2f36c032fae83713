//! Payout execution against a PDA-held escrow, in batch order, with one
//! `PaymentRecord` appended per attempted leg.
//!
//! Legs are independent once funds sit in escrow: a fee leg that cannot be
//! delivered is recorded as `Failed` and the batch moves on, so a player's
//! prize is never stuck behind a fee-collection problem. Load-bearing legs
//! (prizes and refunds) propagate their error instead; the transaction
//! aborts, so the contest never reaches a terminal status without the
//! recipient being paid.
//!
//! Native escrow is held as lamports on the state PDA itself and paid out by
//! direct lamport arithmetic, keeping the rent-exempt reserve untouched.
//! Token escrow lives in a token account owned by the PDA and is paid out
//! via `token::transfer` with the PDA's signer seeds. Recoverable failures
//! (wrong recipient, wrong mint, underfunded escrow) are detected before any
//! funds move.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::StakeArenaError;
use crate::events::{PaymentExecuted, PaymentFailed};
use crate::state::{PaymentRecord, PaymentStatus};

pub use crate::state::PaymentPurpose;

/// One payment leg: `amount` owed to the identity `expected_recipient`,
/// delivered to `to` (a wallet, or a token account owned by the identity).
pub struct PayoutLeg<'a, 'info> {
    pub to: &'a AccountInfo<'info>,
    pub expected_recipient: Pubkey,
    pub amount: u64,
    pub purpose: PaymentPurpose,
    /// Failure aborts the batch instead of being recorded and skipped.
    pub load_bearing: bool,
}

pub struct TokenEscrow<'a, 'info> {
    pub escrow_token_account: &'a AccountInfo<'info>,
    pub token_program: &'a Program<'info, Token>,
    pub mint: Pubkey,
}

/// The escrow being drained: the state PDA (native lamports live here and it
/// signs for the token escrow), plus the token escrow when the contest is
/// denominated in an SPL token.
pub struct EscrowSource<'a, 'info> {
    pub authority: &'a AccountInfo<'info>,
    pub token: Option<TokenEscrow<'a, 'info>>,
}

#[derive(Default)]
pub struct BatchReport {
    pub completed: u8,
    pub failed: u8,
    /// Slot of the last completed leg (0 if none completed).
    pub last_slot: u64,
}

/// Runs every leg in order, appending a record per attempt.
pub fn execute_batch<'info>(
    parent: Pubkey,
    source: &EscrowSource<'_, 'info>,
    signer_seeds: &[&[&[u8]]],
    legs: &[PayoutLeg<'_, 'info>],
    records: &mut Vec<PaymentRecord>,
) -> Result<BatchReport> {
    let clock = Clock::get()?;
    let mut report = BatchReport::default();

    for leg in legs {
        if leg.amount == 0 {
            continue;
        }

        let mut record =
            PaymentRecord::pending(leg.expected_recipient, leg.amount, leg.purpose);

        match attempt_transfer(source, signer_seeds, leg) {
            Ok(()) => {
                record.status = PaymentStatus::Completed;
                record.slot = clock.slot;
                record.executed_at = clock.unix_timestamp;
                records.push(record);
                report.completed += 1;
                report.last_slot = clock.slot;
                emit!(PaymentExecuted {
                    parent,
                    recipient: leg.expected_recipient,
                    amount: leg.amount,
                    purpose: leg.purpose,
                    slot: clock.slot,
                });
            }
            Err(err) if !leg.load_bearing => {
                let code = error_code_of(&err);
                msg!(
                    "payment leg failed and was recorded: {:?} for {} (code {})",
                    leg.purpose,
                    leg.expected_recipient,
                    code
                );
                record.status = PaymentStatus::Failed;
                record.error_code = code;
                record.executed_at = clock.unix_timestamp;
                records.push(record);
                report.failed += 1;
                emit!(PaymentFailed {
                    parent,
                    recipient: leg.expected_recipient,
                    amount: leg.amount,
                    purpose: leg.purpose,
                    error_code: code,
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

fn attempt_transfer<'info>(
    source: &EscrowSource<'_, 'info>,
    signer_seeds: &[&[&[u8]]],
    leg: &PayoutLeg<'_, 'info>,
) -> Result<()> {
    match &source.token {
        None => transfer_native(source.authority, leg),
        Some(escrow) => transfer_token(escrow, source.authority, signer_seeds, leg),
    }
}

fn transfer_native<'info>(
    escrow: &AccountInfo<'info>,
    leg: &PayoutLeg<'_, 'info>,
) -> Result<()> {
    require_keys_eq!(
        leg.to.key(),
        leg.expected_recipient,
        StakeArenaError::BadRecipient
    );

    // The escrow PDA carries its own rent; only the balance above the
    // rent-exempt reserve is spendable.
    let reserve = Rent::get()?.minimum_balance(escrow.data_len());
    let available = escrow.lamports().saturating_sub(reserve);
    require!(available >= leg.amount, StakeArenaError::InsufficientEscrow);

    {
        let mut from_lamports = escrow.try_borrow_mut_lamports()?;
        **from_lamports = (**from_lamports)
            .checked_sub(leg.amount)
            .ok_or(StakeArenaError::InsufficientEscrow)?;
    }
    {
        let mut to_lamports = leg.to.try_borrow_mut_lamports()?;
        **to_lamports = (**to_lamports)
            .checked_add(leg.amount)
            .ok_or(StakeArenaError::MathOverflow)?;
    }
    Ok(())
}

fn transfer_token<'info>(
    escrow: &TokenEscrow<'_, 'info>,
    authority: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    leg: &PayoutLeg<'_, 'info>,
) -> Result<()> {
    let destination = read_token_account(leg.to)?;
    require_keys_eq!(
        destination.owner,
        leg.expected_recipient,
        StakeArenaError::BadRecipient
    );
    require_keys_eq!(destination.mint, escrow.mint, StakeArenaError::InvalidCurrency);

    let escrow_state = read_token_account(escrow.escrow_token_account)?;
    require!(
        escrow_state.amount >= leg.amount,
        StakeArenaError::InsufficientEscrow
    );

    let cpi = CpiContext::new_with_signer(
        escrow.token_program.to_account_info(),
        Transfer {
            from: escrow.escrow_token_account.clone(),
            to: leg.to.clone(),
            authority: authority.clone(),
        },
        signer_seeds,
    );
    token::transfer(cpi, leg.amount)
}

fn read_token_account(info: &AccountInfo) -> Result<TokenAccount> {
    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    TokenAccount::try_deserialize(&mut slice).map_err(|_| StakeArenaError::BadRecipient.into())
}

fn error_code_of(err: &Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => u64::from(e.program_error.clone()) as u32,
    }
}

/// Moves a participant's stake into the native escrow held by the state PDA.
pub fn collect_native_stake<'info>(
    from: &Signer<'info>,
    escrow: AccountInfo<'info>,
    system_program: &Program<'info, System>,
    amount: u64,
) -> Result<()> {
    let cpi = CpiContext::new(
        system_program.to_account_info(),
        anchor_lang::system_program::Transfer {
            from: from.to_account_info(),
            to: escrow,
        },
    );
    anchor_lang::system_program::transfer(cpi, amount)
}

/// Moves a participant's stake into the token escrow owned by the state PDA.
pub fn collect_token_stake<'info>(
    from_token_account: AccountInfo<'info>,
    escrow_token_account: AccountInfo<'info>,
    owner: &Signer<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    let cpi = CpiContext::new(
        token_program.to_account_info(),
        Transfer {
            from: from_token_account,
            to: escrow_token_account,
            authority: owner.to_account_info(),
        },
    );
    token::transfer(cpi, amount)
}

/// Escrow balance observable above the rent-exempt reserve (native pots).
pub fn observed_native_escrow(escrow: &AccountInfo) -> Result<u64> {
    let reserve = Rent::get()?.minimum_balance(escrow.data_len());
    Ok(escrow.lamports().saturating_sub(reserve))
}

/// Validates that `records[index]` is a failed leg that may be reissued.
/// Records are append-only: a retry is a fresh record, and a purpose already
/// made whole by a later completed record must never pay twice.
pub fn retryable_record(records: &[PaymentRecord], index: usize) -> Result<PaymentRecord> {
    let record = records
        .get(index)
        .ok_or(StakeArenaError::InvalidState)?;
    require!(
        record.status == PaymentStatus::Failed,
        StakeArenaError::InvalidState
    );
    let made_whole = records.iter().any(|r| {
        r.status == PaymentStatus::Completed
            && r.recipient == record.recipient
            && r.purpose == record.purpose
    });
    require!(!made_whole, StakeArenaError::AlreadyClaimed);
    Ok(*record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(recipient: Pubkey, purpose: PaymentPurpose, status: PaymentStatus) -> PaymentRecord {
        let mut r = PaymentRecord::pending(recipient, 100, purpose);
        r.status = status;
        r
    }

    #[test]
    fn failed_leg_may_be_reissued() {
        let treasury = Pubkey::new_unique();
        let records = vec![
            record(treasury, PaymentPurpose::PlatformFee, PaymentStatus::Failed),
            record(
                Pubkey::new_unique(),
                PaymentPurpose::WinnerPrize,
                PaymentStatus::Completed,
            ),
        ];
        let r = retryable_record(&records, 0).unwrap();
        assert_eq!(r.recipient, treasury);
        assert_eq!(r.amount, 100);
    }

    #[test]
    fn completed_leg_is_not_retryable() {
        let records = vec![record(
            Pubkey::new_unique(),
            PaymentPurpose::WinnerPrize,
            PaymentStatus::Completed,
        )];
        assert_eq!(
            retryable_record(&records, 0),
            Err(StakeArenaError::InvalidState.into())
        );
    }

    #[test]
    fn leg_already_made_whole_is_not_retryable() {
        let treasury = Pubkey::new_unique();
        let records = vec![
            record(treasury, PaymentPurpose::PlatformFee, PaymentStatus::Failed),
            record(treasury, PaymentPurpose::PlatformFee, PaymentStatus::Completed),
        ];
        assert_eq!(
            retryable_record(&records, 0),
            Err(StakeArenaError::AlreadyClaimed.into())
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(retryable_record(&[], 0).is_err());
    }
}
