use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Per-user attempt and point ledger
///
/// Created lazily on first interaction, never deleted. Balances are the
/// live cache of the append-only audit stream (credit/debit events); the
/// lifetime counters make the two reconcilable at any point:
/// `attempts_paid + attempts_bonus ==
///  lifetime_paid_credited + lifetime_bonus_credited - lifetime_debited`.
///
/// PDA Seeds: ["player_v1", user_pubkey]
#[account]
pub struct PlayerAccount {
    /// PDA bump seed
    pub bump: u8,

    /// The user's opaque identity (derived by the transport layer)
    pub user: Pubkey,

    /// Attempts bought through verified payments
    pub attempts_paid: u64,

    /// Attempts granted free (referrals, promos, admin grants)
    pub attempts_bonus: u64,

    /// Lifetime paid attempts credited
    pub lifetime_paid_credited: u64,

    /// Lifetime bonus attempts credited
    pub lifetime_bonus_credited: u64,

    /// Lifetime attempts consumed or removed by adjustment
    pub lifetime_debited: u64,

    /// Blocked from further plays while set
    pub disqualified: bool,

    /// Cycle index the points below belong to
    pub points_cycle: u32,

    /// Premium points accumulated within `points_cycle`
    pub cycle_points: u64,

    /// Lifetime premium points across all cycles
    pub lifetime_points: u64,

    pub total_plays: u64,

    pub premium_plays: u64,

    pub created_at: i64,

    pub last_play_at: i64,
}

impl PlayerAccount {
    /// Account size calculation:
    /// - bump + disqualified: 2 bytes
    /// - user: 32 bytes
    /// - points_cycle: 4 bytes
    /// - 11 u64/i64: 88 bytes
    /// Total: 2 + 32 + 4 + 88 = 126 bytes
    pub const LEN: usize = 2 + 32 + 4 + 88;

    /// Lazy initialization on the first instruction touching this account.
    pub fn ensure_initialized(&mut self, user: Pubkey, bump: u8, now: i64) {
        if self.user == Pubkey::default() {
            self.bump = bump;
            self.user = user;
            self.created_at = now;
        }
    }

    pub fn attempts_remaining(&self) -> u64 {
        self.attempts_paid.saturating_add(self.attempts_bonus)
    }

    pub fn credit_paid(&mut self, count: u64) -> Result<()> {
        self.attempts_paid = self
            .attempts_paid
            .checked_add(count)
            .ok_or(ErrorCode::MathOverflow)?;
        self.lifetime_paid_credited = self
            .lifetime_paid_credited
            .checked_add(count)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn credit_bonus(&mut self, count: u64) -> Result<()> {
        self.attempts_bonus = self
            .attempts_bonus
            .checked_add(count)
            .ok_or(ErrorCode::MathOverflow)?;
        self.lifetime_bonus_credited = self
            .lifetime_bonus_credited
            .checked_add(count)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Consumes one attempt, bonus first. Returns whether a paid attempt
    /// was spent (only paid plays count toward paid-play thresholds).
    pub fn debit_one(&mut self, now: i64) -> Result<bool> {
        let paid = if self.attempts_bonus > 0 {
            self.attempts_bonus -= 1;
            false
        } else if self.attempts_paid > 0 {
            self.attempts_paid -= 1;
            true
        } else {
            return err!(ErrorCode::InsufficientAttempts);
        };

        self.lifetime_debited = self.lifetime_debited.saturating_add(1);
        self.total_plays = self.total_plays.saturating_add(1);
        self.last_play_at = now;
        Ok(paid)
    }

    /// Adds premium points for the given cycle, resetting the running
    /// total first if a rollover happened since this user last scored.
    pub fn award_points(&mut self, cycle_index: u32, amount: u64) -> u64 {
        if self.points_cycle != cycle_index {
            self.points_cycle = cycle_index;
            self.cycle_points = 0;
        }
        self.cycle_points = self.cycle_points.saturating_add(amount);
        self.lifetime_points = self.lifetime_points.saturating_add(amount);
        self.premium_plays = self.premium_plays.saturating_add(1);
        self.cycle_points
    }

    /// Point balance scoped to a cycle; stale stamps read as zero.
    pub fn cycle_balance(&self, cycle_index: u32) -> u64 {
        if self.points_cycle == cycle_index {
            self.cycle_points
        } else {
            0
        }
    }

    /// Admin correction: positive deltas credit, negative deltas remove,
    /// failing rather than driving a balance negative.
    pub fn apply_adjustment(&mut self, delta: i64, bonus: bool) -> Result<()> {
        if delta >= 0 {
            let count = delta as u64;
            if bonus {
                self.credit_bonus(count)
            } else {
                self.credit_paid(count)
            }
        } else {
            let count = delta.unsigned_abs();
            let balance = if bonus {
                &mut self.attempts_bonus
            } else {
                &mut self.attempts_paid
            };
            *balance = balance
                .checked_sub(count)
                .ok_or(ErrorCode::InsufficientAttempts)?;
            self.lifetime_debited = self.lifetime_debited.saturating_add(count);
            Ok(())
        }
    }
}
