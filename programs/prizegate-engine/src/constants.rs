// PDA seeds (versioned so a redeploy with changed layouts gets fresh addresses)
pub const ENGINE_SEED: &[u8] = b"engine_v1";
pub const PLAYER_SEED: &[u8] = b"player_v1";
pub const CYCLE_SEED: &[u8] = b"cycle_v1";
pub const PAYMENT_SEED: &[u8] = b"payment_v1";
pub const PLAY_SEED: &[u8] = b"play_v1";
pub const PAYOUT_SEED: &[u8] = b"payout_v1";
pub const REWARD_TABLE_SEED: &[u8] = b"reward_table_v1";

/// Index of the cycle opened at bootstrap.
pub const FIRST_CYCLE_INDEX: u32 = 1;

/// Maximum configured outcomes per spin tier.
pub const MAX_REWARD_OUTCOMES: usize = 16;

/// On-chain leaderboard capacity per cycle.
pub const LEADERBOARD_LEN: usize = 10;

/// Trivia questions carry four options (A-D).
pub const OPTION_COUNT: u8 = 4;

/// Sentinel submitted when the user let the answer timer expire.
/// Never equal to a valid option index, so the play resolves standard-tier.
pub const NO_ANSWER: u8 = u8::MAX;

/// Points granted per correct answer unless overridden at initialization.
pub const DEFAULT_POINTS_PER_CORRECT: u64 = 10;

/// Default leader-points closure target for a fresh engine.
pub const DEFAULT_LEADER_POINTS_TARGET: u64 = 50;

/// Checkout bundles: (amount in minor currency units, attempts granted).
/// Amounts that match no bundle fall back to one attempt per unit price.
pub const ATTEMPT_BUNDLES: [(u64, u64); 3] = [(500, 1), (2_000, 5), (5_000, 15)];

/// Fallback unit price for a single attempt.
pub const SINGLE_ATTEMPT_PRICE: u64 = 500;
