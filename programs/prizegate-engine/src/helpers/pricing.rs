use crate::constants::{ATTEMPT_BUNDLES, SINGLE_ATTEMPT_PRICE};

/// Attempts granted for a verified payment amount.
/// Exact bundle amounts use the configured schedule; anything else falls
/// back to one attempt per unit price, never zero for a verified payment.
pub fn attempts_for_amount(amount: u64) -> u64 {
    for (price, attempts) in ATTEMPT_BUNDLES {
        if amount == price {
            return attempts;
        }
    }
    (amount / SINGLE_ATTEMPT_PRICE).max(1)
}
