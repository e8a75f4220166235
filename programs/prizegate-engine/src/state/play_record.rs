use anchor_lang::prelude::*;

use crate::state::{RewardKind, SpinTier};

/// Immutable record of one resolved play
///
/// The PDA address is derived from the client-supplied play request id, so
/// a retried request collides with the committed record instead of
/// consuming a second attempt.
///
/// PDA Seeds: ["play_v1", play_id]
#[account]
pub struct PlayRecord {
    pub bump: u8,

    /// Client-supplied play request id (idempotency key)
    pub id: [u8; 32],

    pub user: Pubkey,

    /// Cycle this play was attributed to
    pub cycle_index: u32,

    pub question_id: u64,

    pub chosen_option: u8,

    pub correct_option: u8,

    pub correct: bool,

    /// Whether a paid attempt was consumed (bonus plays don't count
    /// toward paid-play thresholds)
    pub paid: bool,

    pub tier: SpinTier,

    pub outcome_id: u16,

    pub outcome_kind: RewardKind,

    pub points_awarded: u64,

    pub cycle_points_after: u64,

    pub attempts_paid_after: u64,

    pub attempts_bonus_after: u64,

    pub timestamp: i64,

    pub slot: u64,
}

/// Returned to the transport layer for rendering: the drawn reward, the
/// balances after the play and the cycle-closure flag with the winner.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct PlayOutcome {
    pub tier: SpinTier,
    pub correct: bool,
    pub outcome_id: u16,
    pub outcome_kind: RewardKind,
    pub points_awarded: u64,
    pub cycle_points: u64,
    pub attempts_paid: u64,
    pub attempts_bonus: u64,
    pub cycle_index: u32,
    pub cycle_closed: bool,
    pub winner: Option<Pubkey>,
}

impl PlayRecord {
    /// Account size calculation:
    /// - id + user: 64 bytes
    /// - 5 u8/bool (bump, chosen, correct_option, correct, paid): 5 bytes
    /// - tier enum: 1 byte, outcome_id: 2 bytes, outcome_kind: 9 bytes
    /// - cycle_index: 4 bytes
    /// - 7 u64/i64: 56 bytes (question_id, points_awarded,
    ///   cycle_points_after, attempts_paid_after, attempts_bonus_after,
    ///   timestamp, slot)
    /// Total: 64 + 5 + 12 + 4 + 56 = 141 bytes
    pub const LEN: usize = 64 + 5 + 1 + 2 + RewardKind::LEN + 4 + 56;
}
