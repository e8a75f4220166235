use anchor_lang::prelude::*;

use crate::state::ThresholdConfig;

/// Global engine configuration and statistics
///
/// Stores authorities, runtime parameters, the pointer to the currently
/// open cycle and cumulative metrics. Only one EngineState account exists
/// per program instance; every play reads through it, so the open-cycle
/// pointer is authoritative and never cached elsewhere.
#[account]
pub struct EngineState {
    /// PDA bump seed
    pub bump: u8,

    /// Current admin authority
    pub admin: Pubkey,

    /// Two-step admin transfer: proposed new admin
    pub pending_admin: Option<Pubkey>,

    /// Authority allowed to submit plays on behalf of users
    pub operator: Pubkey,

    /// Authority allowed to submit verified payment confirmations
    pub payment_authority: Pubkey,

    /// Emergency pause flag; blocks plays and credits while set
    pub paused: bool,

    /// Points granted per correct (premium-tier) answer
    pub points_per_correct: u64,

    /// Threshold applied to each newly opened cycle
    pub default_threshold: ThresholdConfig,

    /// Index of the single open cycle
    pub current_cycle: u32,

    /// Number of cycles closed so far
    pub cycles_closed: u32,

    /// Total plays resolved across all cycles
    pub lifetime_plays: u64,

    /// Total paid plays resolved across all cycles
    pub lifetime_paid_plays: u64,

    /// Total premium points awarded across all cycles
    pub lifetime_points: u64,

    /// Total attempts credited from verified payments
    pub lifetime_attempts_credited: u64,

    /// Timestamp when the engine was initialized
    pub initialized_at: i64,

    /// Timestamp of the last resolved play
    pub last_play_at: i64,
}

impl EngineState {
    /// Account size calculation:
    /// - 3 Pubkeys: 32 * 3 = 96 bytes (admin, operator, payment_authority)
    /// - 1 Option<Pubkey>: 33 bytes (pending_admin)
    /// - 2 u8/bool: 2 bytes (bump, paused)
    /// - 1 threshold: 9 bytes (default_threshold)
    /// - 2 u32: 8 bytes (current_cycle, cycles_closed)
    /// - 7 u64/i64: 56 bytes (points_per_correct, lifetime_plays,
    ///   lifetime_paid_plays, lifetime_points, lifetime_attempts_credited,
    ///   initialized_at, last_play_at)
    /// Total: 96 + 33 + 2 + 9 + 8 + 56 = 204 bytes
    pub const LEN: usize = 32 * 3 + 33 + 2 + ThresholdConfig::LEN + 8 + 56;
}
