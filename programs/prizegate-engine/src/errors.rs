use anchor_lang::prelude::*;

/// PrizeGate Engine Error Codes
///
/// Ledger-level conflicts (duplicate payment references, transaction
/// replays) are handled as idempotent no-ops or PDA collisions and do not
/// appear here.
#[error_code]
pub enum ErrorCode {
    #[msg("No attempts remaining")]
    InsufficientAttempts,

    #[msg("Cycle is not the currently open cycle")]
    InvalidCycle,

    #[msg("Cycle is not open")]
    CycleNotOpen,

    #[msg("Unauthorized")]
    UnauthorizedAccess,

    #[msg("Engine is paused")]
    EnginePaused,

    #[msg("Player is disqualified")]
    PlayerDisqualified,

    #[msg("Chosen or correct option out of range")]
    InvalidOption,

    #[msg("Reward table has no obtainable outcome")]
    EmptyRewardTable,

    #[msg("Too many reward outcomes")]
    TooManyOutcomes,

    #[msg("Total outcome weight overflows")]
    WeightOverflow,

    #[msg("Invalid threshold configuration")]
    InvalidThreshold,

    #[msg("Invalid parameter")]
    InvalidParameter,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Drawn outcome requires no fulfillment")]
    PayoutNotRequired,

    #[msg("Payout ticket already settled or cancelled")]
    PayoutAlreadyFinal,

    #[msg("No admin transfer pending for this signer")]
    NoPendingAdminTransfer,
}
