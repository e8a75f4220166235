use anchor_lang::prelude::*;

use crate::state::{RewardKind, SpinTier, ThresholdConfig};

// ══════════════════════════════════════════════════════════════════════════════
// INITIALIZATION EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when the engine is initialized
#[event]
pub struct EngineInitialized {
    pub admin: Pubkey,
    pub operator: Pubkey,
    pub payment_authority: Pubkey,
    pub points_per_correct: u64,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// ATTEMPT LEDGER EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a verified payment credits paid attempts (first application only)
#[event]
pub struct AttemptsCredited {
    pub user: Pubkey,
    pub payment_ref: [u8; 32],
    pub amount: u64,
    pub attempts: u64,
    pub paid_balance: u64,
    pub bonus_balance: u64,
    pub timestamp: i64,
}

/// Emitted when the operator or admin grants bonus attempts
#[event]
pub struct BonusAttemptsGranted {
    pub authority: Pubkey,
    pub user: Pubkey,
    pub count: u64,
    pub bonus_balance: u64,
    pub timestamp: i64,
}

/// Emitted for every admin balance correction
#[event]
pub struct AttemptsAdjusted {
    pub admin: Pubkey,
    pub user: Pubkey,
    pub delta: i64,
    pub bonus: bool,
    pub paid_balance: u64,
    pub bonus_balance: u64,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// PLAY EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted once per resolved play
#[event]
pub struct PlayResolved {
    pub user: Pubkey,
    pub play_id: [u8; 32],
    pub cycle_index: u32,
    pub question_id: u64,
    pub correct: bool,
    pub tier: SpinTier,
    pub outcome_id: u16,
    pub outcome_kind: RewardKind,
    pub points_awarded: u64,
    pub cycle_points: u64,
    pub attempts_paid: u64,
    pub attempts_bonus: u64,
    pub cycle_closed: bool,
    pub winner: Option<Pubkey>,
    pub timestamp: i64,
}

/// Emitted for every premium point award
#[event]
pub struct PointsAwarded {
    pub user: Pubkey,
    pub cycle_index: u32,
    pub amount: u64,
    pub cycle_points: u64,
    pub play_id: [u8; 32],
    pub timestamp: i64,
}

/// Emitted when a drawn outcome requires off-platform fulfillment
#[event]
pub struct PayoutRequired {
    pub user: Pubkey,
    pub play_id: [u8; 32],
    pub kind: RewardKind,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// CYCLE EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a cycle opens (bootstrap or rollover)
#[event]
pub struct CycleOpened {
    pub index: u32,
    pub threshold: ThresholdConfig,
    pub timestamp: i64,
}

/// Emitted when a cycle closes; winner is null when nobody scored
#[event]
pub struct CycleClosed {
    pub index: u32,
    pub winner: Option<Pubkey>,
    pub winner_points: Option<u64>,
    pub paid_plays: u64,
    pub total_plays: u64,
    pub total_points: u64,
    pub forced: bool,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// PAYOUT EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a payout ticket enters the fulfillment queue
#[event]
pub struct PayoutEnqueued {
    pub user: Pubkey,
    pub play_id: [u8; 32],
    pub kind: RewardKind,
    pub timestamp: i64,
}

/// Emitted when the admin marks a payout delivered
#[event]
pub struct PayoutSettled {
    pub admin: Pubkey,
    pub user: Pubkey,
    pub play_id: [u8; 32],
    pub timestamp: i64,
}

/// Emitted when the admin voids a payout ticket
#[event]
pub struct PayoutCancelled {
    pub admin: Pubkey,
    pub user: Pubkey,
    pub play_id: [u8; 32],
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// ADMIN EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a reward table tier is reconfigured
#[event]
pub struct RewardTableUpdated {
    pub admin: Pubkey,
    pub tier: SpinTier,
    pub outcomes: u16,
    pub total_weight: u64,
    pub timestamp: i64,
}

/// Emitted when runtime parameters change
#[event]
pub struct ParametersUpdated {
    pub admin: Pubkey,
    pub points_per_correct: u64,
    pub default_threshold: ThresholdConfig,
    pub timestamp: i64,
}

/// Emitted when the engine is paused or resumed
#[event]
pub struct PausedSet {
    pub admin: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

/// Emitted when the operator or payment authority is rotated
#[event]
pub struct AuthoritiesUpdated {
    pub admin: Pubkey,
    pub operator: Pubkey,
    pub payment_authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a player's disqualification flag changes
#[event]
pub struct DisqualificationSet {
    pub admin: Pubkey,
    pub user: Pubkey,
    pub disqualified: bool,
    pub timestamp: i64,
}

/// Emitted when admin transfer is proposed (two-step transfer)
#[event]
pub struct AdminTransferProposed {
    pub current_admin: Pubkey,
    pub proposed_admin: Pubkey,
    pub timestamp: i64,
}

/// Emitted when admin transfer is completed
#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}
