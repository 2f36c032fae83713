use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum PaymentPurpose {
    PlatformFee,
    HostFee,
    WinnerPrize,
    FirstPrize,
    SecondPrize,
    ThirdPrize,
    Refund,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Audit row for one attempted transfer out of escrow. Append-only: a
/// `Completed` record is never mutated, and a retry is a new record.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct PaymentRecord {
    /// Identity owed the funds (wallet owner, not the token account).
    pub recipient: Pubkey,
    pub amount: u64,
    pub purpose: PaymentPurpose,
    pub status: PaymentStatus,
    /// Slot at which the transfer landed (0 until completed).
    pub slot: u64,
    /// Error code of the failure (0 unless failed).
    pub error_code: u32,
    pub executed_at: i64,
}

impl PaymentRecord {
    pub fn pending(recipient: Pubkey, amount: u64, purpose: PaymentPurpose) -> Self {
        Self {
            recipient,
            amount,
            purpose,
            status: PaymentStatus::Pending,
            slot: 0,
            error_code: 0,
            executed_at: 0,
        }
    }
}
