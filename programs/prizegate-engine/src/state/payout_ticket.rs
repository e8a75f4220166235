use anchor_lang::prelude::*;

use crate::state::RewardKind;

/// Payout lifecycle: Pending → Settled / Cancelled, one-way.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PayoutStatus {
    Pending,
    Settled,
    Cancelled,
}

/// Off-platform fulfillment tracker (airtime, data, physical delivery).
/// Delivery itself happens outside the program; this account only tracks
/// the queue state for the fulfillment collaborator.
///
/// PDA Seeds: ["payout_v1", play_id]
#[account]
pub struct PayoutTicket {
    pub bump: u8,

    /// The play whose drawn outcome requires fulfillment
    pub play_id: [u8; 32],

    pub user: Pubkey,

    pub kind: RewardKind,

    pub status: PayoutStatus,

    pub enqueued_at: i64,

    /// Zero until settled or cancelled
    pub settled_at: i64,
}

impl PayoutTicket {
    /// 1 + 32 + 32 + 9 + 1 + 8 + 8 = 91 bytes
    pub const LEN: usize = 1 + 32 + 32 + RewardKind::LEN + 1 + 8 + 8;
}
