use anchor_lang::prelude::*;

use crate::constants::MAX_REWARD_OUTCOMES;

/// Spin tier drawn after a trivia round: premium for a correct answer,
/// standard otherwise (including timeouts).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpinTier {
    Standard,
    Premium,
}

/// What a drawn outcome delivers. Everything except `Nothing` requires
/// off-platform fulfillment through the payout queue.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum RewardKind {
    Nothing,
    /// Airtime top-up, amount in minor currency units
    Airtime { amount: u64 },
    /// Mobile data bundle
    Data { megabytes: u64 },
    /// Physical item, catalog code resolved by the fulfillment side
    Physical { code: u16 },
}

impl RewardKind {
    pub const LEN: usize = 1 + 8;

    pub fn requires_fulfillment(&self) -> bool {
        !matches!(self, RewardKind::Nothing)
    }
}

/// One weighted outcome. A zero weight keeps the prize configured but
/// currently unobtainable.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct RewardOutcome {
    pub outcome_id: u16,
    pub weight: u32,
    pub kind: RewardKind,
}

impl RewardOutcome {
    pub const LEN: usize = 2 + 4 + RewardKind::LEN;
}

/// Weighted outcome tables, one ordered list per spin tier.
///
/// PDA Seeds: ["reward_table_v1"]
#[account]
pub struct RewardTable {
    pub bump: u8,
    pub standard: Vec<RewardOutcome>,
    pub premium: Vec<RewardOutcome>,
    pub updated_at: i64,
}

impl RewardTable {
    /// Account size calculation:
    /// - bump: 1 byte
    /// - 2 vecs: (4 + MAX_REWARD_OUTCOMES * 15) * 2 = 488 bytes
    /// - updated_at: 8 bytes
    /// Total: 497 bytes
    pub const LEN: usize = 1 + (4 + MAX_REWARD_OUTCOMES * RewardOutcome::LEN) * 2 + 8;

    pub fn tier(&self, tier: SpinTier) -> &[RewardOutcome] {
        match tier {
            SpinTier::Standard => &self.standard,
            SpinTier::Premium => &self.premium,
        }
    }

    pub fn set_tier(&mut self, tier: SpinTier, outcomes: Vec<RewardOutcome>) {
        match tier {
            SpinTier::Standard => self.standard = outcomes,
            SpinTier::Premium => self.premium = outcomes,
        }
    }
}
