use anchor_lang::prelude::*;

#[error_code]
pub enum StakeArenaError {
    #[msg("Operation is not legal in the contest's current status.")]
    InvalidState,
    #[msg("Caller lacks participant or moderator standing.")]
    Unauthorized,
    #[msg("Signer is not a participant in this contest.")]
    NotParticipant,
    #[msg("Stake does not match the contest's entry fee.")]
    InsufficientStake,
    #[msg("Escrow balance is insufficient for this payout leg.")]
    InsufficientEscrow,
    #[msg("Resolution conflicts with already-recorded terminal facts.")]
    Contradiction,
    #[msg("Scores are tied; submit a corrected result before confirming.")]
    ScoresTied,
    #[msg("Only the recorded winner can claim this prize.")]
    NotWinner,
    #[msg("Prize has already been claimed.")]
    AlreadyClaimed,
    #[msg("Reported winner is not a participant.")]
    InvalidWinner,
    #[msg("Match result has already been advanced into the bracket.")]
    AlreadyAdvanced,
    #[msg("Match does not belong where the bracket expects it.")]
    InvalidBracket,
    #[msg("Fee basis points must be between 0 and 2500 (25%).")]
    InvalidFeeBps,
    #[msg("Entry fee is below the platform minimum.")]
    EntryFeeTooLow,
    #[msg("Player count must be a power of two between 2 and 16.")]
    InvalidPlayerCount,
    #[msg("Contest already has a full roster.")]
    ContestFull,
    #[msg("Player is already registered.")]
    AlreadyRegistered,
    #[msg("Arithmetic overflow.")]
    MathOverflow,
    #[msg("Account currency does not match the contest's currency.")]
    InvalidCurrency,
    #[msg("Recipient account is not usable for this payout leg.")]
    BadRecipient,
    #[msg("Dispute reason exceeds the maximum length of 200 bytes.")]
    ReasonTooLong,
    #[msg("Escrow holds nothing claimable above the rent reserve.")]
    NothingClaimable,
}
