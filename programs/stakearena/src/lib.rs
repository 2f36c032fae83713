use anchor_lang::prelude::*;

pub mod bracket;
pub mod errors;
pub mod events;
pub mod fees;
pub mod instructions;
pub mod payout;
pub mod state;

use instructions::*;

declare_id!("48tAH517FyQpKom2mWie7ih7UYo8MnE5vMnReRw8Zyht");

#[program]
pub mod stakearena {
    use super::*;

    /// One-time fee-configuration initialization. Settlement fails closed
    /// until this account exists.
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        platform_fee_bps: u16,
        host_fee_bps: u16,
        min_entry_fee: u64,
    ) -> Result<()> {
        instructions::initialize_platform::handler(
            ctx,
            platform_fee_bps,
            host_fee_bps,
            min_entry_fee,
        )
    }

    /// Admin updates to fee rates, minimum entry fee or treasury.
    pub fn update_platform_config(
        ctx: Context<UpdatePlatformConfig>,
        platform_fee_bps: Option<u16>,
        host_fee_bps: Option<u16>,
        min_entry_fee: Option<u64>,
    ) -> Result<()> {
        instructions::update_platform_config::handler(
            ctx,
            platform_fee_bps,
            host_fee_bps,
            min_entry_fee,
        )
    }

    /// Propose a heads-up contest; the creator's stake is escrowed now.
    pub fn create_contest(ctx: Context<CreateContest>, entry_fee: u64) -> Result<()> {
        instructions::create_contest::handler(ctx, entry_fee)
    }

    /// Opponent joins with a matching stake; the contest becomes Accepted.
    pub fn join_contest(ctx: Context<JoinContest>, stake: u64) -> Result<()> {
        instructions::join_contest::handler(ctx, stake)
    }

    /// A participant reports the result. A later report corrects an earlier
    /// one until confirmation.
    pub fn submit_score(
        ctx: Context<SubmitScore>,
        challenger_score: u32,
        opponent_score: u32,
    ) -> Result<()> {
        instructions::submit_score::handler(ctx, challenger_score, opponent_score)
    }

    /// The counterpart (or a moderator) confirms the reported result, which
    /// settles the contest. Idempotent once funds are distributed.
    pub fn confirm_score(ctx: Context<ConfirmScore>) -> Result<()> {
        instructions::confirm_score::handler(ctx)
    }

    /// A participant disputes the contest from any non-cancelled state.
    pub fn dispute_contest(ctx: Context<DisputeContest>, reason: String) -> Result<()> {
        instructions::dispute_contest::handler(ctx, reason)
    }

    /// Moderator resolves a dispute: refund every escrowed stake and cancel,
    /// or return the contest to its pre-dispute status.
    pub fn resolve_dispute(ctx: Context<ResolveDispute>, refund: bool) -> Result<()> {
        instructions::resolve_dispute::handler(ctx, refund)
    }

    /// Host opens a single-elimination bracket.
    pub fn create_tournament(
        ctx: Context<CreateTournament>,
        entry_fee: u64,
        max_players: u8,
        winner_take_all: bool,
    ) -> Result<()> {
        instructions::create_tournament::handler(ctx, entry_fee, max_players, winner_take_all)
    }

    /// Register and escrow the entry fee; a full roster starts bracket play.
    pub fn join_tournament(ctx: Context<JoinTournament>, stake: u64) -> Result<()> {
        instructions::join_tournament::handler(ctx, stake)
    }

    /// Open a round-one match, pairing registrants in registration order.
    pub fn open_round_one_match(ctx: Context<OpenRoundOneMatch>, match_order: u8) -> Result<()> {
        instructions::open_round_one_match::handler(ctx, match_order)
    }

    /// Forward a confirmed match winner into the next bracket round.
    pub fn report_match_result(ctx: Context<ReportMatchResult>) -> Result<()> {
        instructions::report_match_result::handler(ctx)
    }

    /// Settle a tournament off its confirmed final: fees to host and
    /// treasury, prizes to the placements. Guarded against double settlement.
    pub fn settle_tournament(ctx: Context<SettleTournament>) -> Result<()> {
        instructions::settle_tournament::handler(ctx)
    }

    /// Host or moderator cancels an unsettled tournament.
    pub fn cancel_tournament(ctx: Context<CancelTournament>) -> Result<()> {
        instructions::cancel_tournament::handler(ctx)
    }

    /// Registrant withdraws their entry fee from a cancelled tournament.
    pub fn refund_tournament_entry(ctx: Context<RefundTournamentEntry>) -> Result<()> {
        instructions::refund_tournament_entry::handler(ctx)
    }

    /// Open a pot game. A zero entry fee means the pot is funded externally.
    pub fn create_pot_game(ctx: Context<CreatePotGame>, entry_fee: u64) -> Result<()> {
        instructions::create_pot_game::handler(ctx, entry_fee)
    }

    /// Pay into an open pot.
    pub fn enter_pot(ctx: Context<EnterPot>, amount: u64) -> Result<()> {
        instructions::enter_pot::handler(ctx, amount)
    }

    /// Moderator declares the pot winner.
    pub fn set_pot_winner(ctx: Context<SetPotWinner>, winner: Pubkey) -> Result<()> {
        instructions::set_pot_winner::handler(ctx, winner)
    }

    /// Winner claims the observed pot, net of fees. Rejected once claimed.
    pub fn claim_pot(ctx: Context<ClaimPot>) -> Result<()> {
        instructions::claim_pot::handler(ctx)
    }

    /// Host or moderator abandons an open pot; remaining escrow returns to
    /// the host. Fee-based pots can only be abandoned while empty.
    pub fn cancel_pot(ctx: Context<CancelPot>) -> Result<()> {
        instructions::cancel_pot::handler(ctx)
    }

    /// Moderator reissues a failed fee leg on a settled contest as a fresh
    /// payment record.
    pub fn retry_contest_payment(
        ctx: Context<RetryContestPayment>,
        record_index: u8,
    ) -> Result<()> {
        instructions::retry_contest_payment::handler(ctx, record_index)
    }

    /// Moderator reissues a failed leg on a settled or cancelled tournament.
    pub fn retry_tournament_payment(
        ctx: Context<RetryTournamentPayment>,
        record_index: u8,
    ) -> Result<()> {
        instructions::retry_tournament_payment::handler(ctx, record_index)
    }

    /// Moderator reissues a failed fee leg on a claimed pot.
    pub fn retry_pot_payment(ctx: Context<RetryPotPayment>, record_index: u8) -> Result<()> {
        instructions::retry_pot_payment::handler(ctx, record_index)
    }
}
