use anchor_lang::prelude::*;

use crate::state::PaymentPurpose;

#[event]
pub struct ContestCreated {
    pub contest_id: u64,
    pub challenger: Pubkey,
    pub invited_opponent: Option<Pubkey>,
    pub entry_fee: u64,
    pub mint: Option<Pubkey>,
}

#[event]
pub struct ContestJoined {
    pub contest_id: u64,
    pub opponent: Pubkey,
    pub stake: u64,
}

#[event]
pub struct ScoreSubmitted {
    pub contest_id: u64,
    pub reporter: Pubkey,
    pub challenger_score: u32,
    pub opponent_score: u32,
}

#[event]
pub struct ContestSettled {
    pub contest_id: u64,
    pub winner: Pubkey,
    pub pool: u64,
    pub platform_fee: u64,
    pub winner_prize: u64,
}

#[event]
pub struct ContestDisputed {
    pub contest_id: u64,
    pub disputant: Pubkey,
    pub reason: String,
}

#[event]
pub struct DisputeResolved {
    pub contest_id: u64,
    pub moderator: Pubkey,
    pub refunded: bool,
}

/// One payment leg completed. Emitted by the payout executor.
#[event]
pub struct PaymentExecuted {
    /// Contest, tournament or pot account the leg settles.
    pub parent: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub purpose: PaymentPurpose,
    pub slot: u64,
}

/// One payment leg failed and was recorded without aborting the batch.
#[event]
pub struct PaymentFailed {
    pub parent: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub purpose: PaymentPurpose,
    pub error_code: u32,
}

#[event]
pub struct TournamentCreated {
    pub tournament_id: u64,
    pub host: Pubkey,
    pub entry_fee: u64,
    pub max_players: u8,
    pub mint: Option<Pubkey>,
}

#[event]
pub struct TournamentJoined {
    pub tournament_id: u64,
    pub player: Pubkey,
    pub registered: u8,
    pub started: bool,
}

#[event]
pub struct MatchOpened {
    pub tournament: Pubkey,
    pub round: u8,
    pub match_order: u8,
    pub challenger: Pubkey,
    pub opponent: Pubkey,
}

#[event]
pub struct BracketAdvanced {
    pub tournament: Pubkey,
    pub round: u8,
    pub match_order: u8,
    pub winner: Pubkey,
    pub next_round: u8,
    pub next_match_order: u8,
}

#[event]
pub struct TournamentSettled {
    pub tournament_id: u64,
    pub winner: Pubkey,
    pub second_place: Pubkey,
    pub third_place: Option<Pubkey>,
    pub pool: u64,
}

#[event]
pub struct TournamentCancelled {
    pub tournament_id: u64,
}

#[event]
pub struct TournamentEntryRefunded {
    pub tournament_id: u64,
    pub player: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PotCreated {
    pub pot_id: u64,
    pub host: Pubkey,
    pub entry_fee: u64,
    pub mint: Option<Pubkey>,
}

#[event]
pub struct PotEntered {
    pub pot_id: u64,
    pub participant: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PotCancelled {
    pub pot_id: u64,
    /// Remaining escrow returned to the host.
    pub returned: u64,
}

#[event]
pub struct PotWinnerDeclared {
    pub pot_id: u64,
    pub winner: Pubkey,
}

#[event]
pub struct PotClaimed {
    pub pot_id: u64,
    pub winner: Pubkey,
    pub realized_amount: u64,
    pub platform_fee: u64,
    pub host_fee: u64,
    pub slot: u64,
}
