use anchor_lang::prelude::*;

use crate::helpers::attempts_for_amount;
use crate::state::PlayerAccount;

/// Applied payment confirmation
///
/// The PDA address is derived from the external transaction reference, so
/// a reference maps to exactly one receipt. Redelivered confirmations find
/// `applied` already set and return without touching balances.
///
/// PDA Seeds: ["payment_v1", payment_ref]
#[account]
pub struct PaymentReceipt {
    pub bump: u8,

    /// External transaction reference (hashed to 32 bytes by the gateway)
    pub reference: [u8; 32],

    pub user: Pubkey,

    /// Verified amount in minor currency units
    pub amount: u64,

    pub attempts_granted: u64,

    /// Set once on first application; the idempotency latch
    pub applied: bool,

    pub credited_at: i64,
}

impl PaymentReceipt {
    /// 1 + 32 + 32 + 8 + 8 + 1 + 8 = 90 bytes
    pub const LEN: usize = 1 + 32 + 32 + 8 + 8 + 1 + 8;

    /// Applies the confirmation exactly once. A redelivered confirmation
    /// finds the latch set and returns None without touching the balance.
    pub fn apply(
        &mut self,
        player: &mut PlayerAccount,
        reference: [u8; 32],
        user: Pubkey,
        amount: u64,
        bump: u8,
        now: i64,
    ) -> Result<Option<u64>> {
        if self.applied {
            return Ok(None);
        }

        let attempts = attempts_for_amount(amount);
        player.credit_paid(attempts)?;

        self.bump = bump;
        self.reference = reference;
        self.user = user;
        self.amount = amount;
        self.attempts_granted = attempts;
        self.applied = true;
        self.credited_at = now;

        Ok(Some(attempts))
    }
}
