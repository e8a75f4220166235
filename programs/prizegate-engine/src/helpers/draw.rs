use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::errors::ErrorCode;
use crate::state::RewardOutcome;

/// Mixes server-side state (player, slot, timestamp) with the play id and
/// the client seed into the draw seed. The sampling itself is split into
/// `uniform_draw` + `pick_outcome` so tests can drive fixed values through
/// the exact same walk the program uses.
pub fn draw_seed(
    user: &Pubkey,
    play_id: &[u8; 32],
    client_seed: &[u8; 32],
    slot: u64,
    unix_timestamp: i64,
) -> [u8; 32] {
    hashv(&[
        user.as_ref(),
        play_id,
        client_seed,
        &slot.to_le_bytes(),
        &unix_timestamp.to_le_bytes(),
    ])
    .to_bytes()
}

/// Sum of all configured weights, rejecting overflow and all-zero tables.
pub fn total_weight(outcomes: &[RewardOutcome]) -> Result<u64> {
    let mut total: u64 = 0;
    for outcome in outcomes {
        total = total
            .checked_add(outcome.weight as u64)
            .ok_or(ErrorCode::WeightOverflow)?;
    }
    require!(total > 0, ErrorCode::EmptyRewardTable);
    Ok(total)
}

/// Maps a draw seed onto [0, total_weight).
pub fn uniform_draw(seed: &[u8; 32], total_weight: u64) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&seed[..8]);
    u64::from_le_bytes(raw) % total_weight.max(1)
}

/// Walks cumulative weights in configured order and returns the first
/// outcome whose cumulative weight exceeds the drawn value. Zero-weight
/// entries can never be selected.
pub fn pick_outcome(outcomes: &[RewardOutcome], value: u64) -> Result<&RewardOutcome> {
    let mut cumulative: u64 = 0;
    for outcome in outcomes {
        cumulative = cumulative
            .checked_add(outcome.weight as u64)
            .ok_or(ErrorCode::WeightOverflow)?;
        if value < cumulative {
            return Ok(outcome);
        }
    }
    // Unreachable for value < total_weight; a mis-ranged value is a bug.
    err!(ErrorCode::EmptyRewardTable)
}
