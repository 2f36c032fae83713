pub mod cancel_pot;
pub mod cancel_tournament;
pub mod claim_pot;
pub mod confirm_score;
pub mod create_contest;
pub mod create_pot_game;
pub mod create_tournament;
pub mod dispute_contest;
pub mod enter_pot;
pub mod initialize_platform;
pub mod join_contest;
pub mod join_tournament;
pub mod open_round_one_match;
pub mod refund_tournament_entry;
pub mod report_match_result;
pub mod resolve_dispute;
pub mod retry_contest_payment;
pub mod retry_pot_payment;
pub mod retry_tournament_payment;
pub mod set_pot_winner;
pub mod settle_tournament;
pub mod submit_score;
pub mod update_platform_config;

pub use cancel_pot::*;
pub use cancel_tournament::*;
pub use claim_pot::*;
pub use confirm_score::*;
pub use create_contest::*;
pub use create_pot_game::*;
pub use create_tournament::*;
pub use dispute_contest::*;
pub use enter_pot::*;
pub use initialize_platform::*;
pub use join_contest::*;
pub use join_tournament::*;
pub use open_round_one_match::*;
pub use refund_tournament_entry::*;
pub use report_match_result::*;
pub use resolve_dispute::*;
pub use retry_contest_payment::*;
pub use retry_pot_payment::*;
pub use retry_tournament_payment::*;
pub use set_pot_winner::*;
pub use settle_tournament::*;
pub use submit_score::*;
pub use update_platform_config::*;
