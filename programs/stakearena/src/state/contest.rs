use anchor_lang::prelude::*;

use crate::errors::StakeArenaError;
use crate::state::PaymentRecord;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum ContestStatus {
    /// Creator's stake escrowed, waiting for an opponent.
    Active,
    /// Both stakes escrowed; contest underway.
    Accepted,
    /// One participant has reported a result.
    ScoreReported,
    /// Result confirmed and settled. Terminal.
    ScoreConfirmed,
    /// Under dispute, awaiting moderator resolution.
    Disputed,
    /// Refunded or abandoned. Terminal.
    Cancelled,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum ContestKind {
    /// Stand-alone heads-up challenge carrying its own escrow.
    HeadsUp,
    /// One match inside a tournament bracket; funds live at tournament level.
    TournamentMatch,
}

#[account]
#[derive(InitSpace)]
pub struct Contest {
    /// Sequential contest identifier (heads-up contests only; 0 for matches).
    pub contest_id: u64,
    pub kind: ContestKind,
    /// SPL mint of the staked currency (None = native SOL).
    pub mint: Option<Pubkey>,
    /// Token account owned by this PDA holding the escrow (token contests only).
    pub escrow_token_account: Option<Pubkey>,
    /// Stake per participant in base units (0 for tournament matches).
    pub entry_fee: u64,
    /// First participant slot. `Pubkey::default()` while a bracket slot is empty.
    pub challenger: Pubkey,
    /// Second participant slot (pre-designated invite, or filled on join).
    pub opponent: Option<Pubkey>,
    /// Whether the opponent's stake has been escrowed.
    pub opponent_deposited: bool,
    pub status: ContestStatus,
    /// Status to restore when a dispute resolves without a refund.
    pub prior_status: ContestStatus,
    pub challenger_score: u32,
    pub opponent_score: u32,
    pub scores_reported: bool,
    /// Participant who filed the most recent score report.
    pub reported_by: Option<Pubkey>,
    /// Winner (None until settled).
    pub winner: Option<Pubkey>,
    /// Flips false -> true at most once, ever.
    pub funds_distributed: bool,
    #[max_len(200)]
    pub dispute_reason: String,
    /// Parent tournament (matches only).
    pub tournament: Option<Pubkey>,
    /// Bracket round, 1-based (matches only).
    pub round: u8,
    /// Position within the round, 1-based (matches only).
    pub match_order: u8,
    /// Winner already forwarded into the next bracket round.
    pub advanced: bool,
    #[max_len(4)]
    pub payments: Vec<PaymentRecord>,
    pub created_at: i64,
    /// Unix timestamp when settled or cancelled (0 if not yet).
    pub settled_at: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Contest {
    pub const SEED: &'static [u8] = b"contest";
    pub const MATCH_SEED: &'static [u8] = b"match";
    pub const MAX_REASON_LEN: usize = 200;

    pub fn is_participant(&self, key: &Pubkey) -> bool {
        self.challenger == *key || self.opponent == Some(*key)
    }

    /// Winner derived from the recorded scores. Ties are rejected until a
    /// corrected report lands.
    pub fn winner_from_scores(&self) -> Result<Pubkey> {
        require!(self.scores_reported, StakeArenaError::InvalidState);
        let opponent = self.opponent.ok_or(StakeArenaError::InvalidState)?;
        require!(
            self.challenger_score != self.opponent_score,
            StakeArenaError::ScoresTied
        );
        if self.challenger_score > self.opponent_score {
            Ok(self.challenger)
        } else {
            Ok(opponent)
        }
    }

    /// The participant who is not `key`. Valid once both slots are filled.
    pub fn counterpart(&self, key: &Pubkey) -> Result<Pubkey> {
        let opponent = self.opponent.ok_or(StakeArenaError::InvalidState)?;
        if self.challenger == *key {
            Ok(opponent)
        } else if opponent == *key {
            Ok(self.challenger)
        } else {
            Err(StakeArenaError::NotParticipant.into())
        }
    }

    pub fn assert_can_dispute(&self) -> Result<()> {
        require!(
            self.status != ContestStatus::Cancelled,
            StakeArenaError::InvalidState
        );
        Ok(())
    }

    /// Idempotency guard for confirmation: a settled contest accepts a
    /// repeat confirmation as a no-op, never a second transfer.
    pub fn is_settled(&self) -> bool {
        self.funds_distributed || self.status == ContestStatus::ScoreConfirmed
    }

    /// A refund may only move funds still held in escrow, and only for
    /// contests that carry their own escrow.
    pub fn assert_refundable(&self) -> Result<()> {
        require!(!self.funds_distributed, StakeArenaError::Contradiction);
        require!(
            self.kind == ContestKind::HeadsUp,
            StakeArenaError::InvalidState
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contest(challenger: Pubkey, opponent: Pubkey) -> Contest {
        Contest {
            contest_id: 1,
            kind: ContestKind::HeadsUp,
            mint: None,
            escrow_token_account: None,
            entry_fee: 10,
            challenger,
            opponent: Some(opponent),
            opponent_deposited: true,
            status: ContestStatus::Accepted,
            prior_status: ContestStatus::Accepted,
            challenger_score: 0,
            opponent_score: 0,
            scores_reported: false,
            reported_by: None,
            winner: None,
            funds_distributed: false,
            dispute_reason: String::new(),
            tournament: None,
            round: 0,
            match_order: 0,
            advanced: false,
            payments: Vec::new(),
            created_at: 0,
            settled_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn winner_is_higher_score() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut c = contest(a, b);
        c.challenger_score = 5;
        c.opponent_score = 3;
        c.scores_reported = true;
        assert_eq!(c.winner_from_scores().unwrap(), a);

        c.opponent_score = 7;
        assert_eq!(c.winner_from_scores().unwrap(), b);
    }

    #[test]
    fn tied_scores_are_rejected() {
        let mut c = contest(Pubkey::new_unique(), Pubkey::new_unique());
        c.challenger_score = 4;
        c.opponent_score = 4;
        c.scores_reported = true;
        assert!(c.winner_from_scores().is_err());
    }

    #[test]
    fn unreported_scores_are_rejected() {
        let c = contest(Pubkey::new_unique(), Pubkey::new_unique());
        assert!(c.winner_from_scores().is_err());
    }

    #[test]
    fn counterpart_resolves_both_ways() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let c = contest(a, b);
        assert_eq!(c.counterpart(&a).unwrap(), b);
        assert_eq!(c.counterpart(&b).unwrap(), a);
        assert!(c.counterpart(&Pubkey::new_unique()).is_err());
    }

    #[test]
    fn settled_contest_confirms_as_noop() {
        let mut c = contest(Pubkey::new_unique(), Pubkey::new_unique());
        assert!(!c.is_settled());

        c.status = ContestStatus::ScoreConfirmed;
        assert!(c.is_settled());

        // The flag alone settles it, whatever the status says.
        c.status = ContestStatus::Disputed;
        c.funds_distributed = true;
        assert!(c.is_settled());
    }

    #[test]
    fn refund_after_distribution_is_a_contradiction() {
        let mut c = contest(Pubkey::new_unique(), Pubkey::new_unique());
        assert!(c.assert_refundable().is_ok());

        c.funds_distributed = true;
        assert_eq!(
            c.assert_refundable(),
            Err(StakeArenaError::Contradiction.into())
        );
    }

    #[test]
    fn bracket_matches_hold_no_refundable_escrow() {
        let mut c = contest(Pubkey::new_unique(), Pubkey::new_unique());
        c.kind = ContestKind::TournamentMatch;
        assert_eq!(
            c.assert_refundable(),
            Err(StakeArenaError::InvalidState.into())
        );
    }

    #[test]
    fn cancelled_contest_cannot_be_disputed() {
        let mut c = contest(Pubkey::new_unique(), Pubkey::new_unique());
        c.status = ContestStatus::Cancelled;
        assert!(c.assert_can_dispute().is_err());

        c.status = ContestStatus::ScoreConfirmed;
        assert!(c.assert_can_dispute().is_ok());
    }
}
