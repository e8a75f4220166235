use anchor_lang::prelude::*;

use crate::constants::LEADERBOARD_LEN;
use crate::errors::ErrorCode;

/// Closure condition evaluated after each play attributed to a cycle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ThresholdConfig {
    /// First individual user whose cycle total reaches `target` points.
    LeaderPoints { target: u64 },
    /// Cycle-wide paid play count reaches `target`.
    PaidPlays { target: u64 },
    /// Wall-clock deadline, evaluated lazily on the next play.
    Deadline { closes_at: i64 },
}

impl ThresholdConfig {
    pub const LEN: usize = 1 + 8;

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::LeaderPoints { target } => {
                require!(*target > 0, ErrorCode::InvalidThreshold)
            }
            Self::PaidPlays { target } => {
                require!(*target > 0, ErrorCode::InvalidThreshold)
            }
            Self::Deadline { closes_at } => {
                require!(*closes_at > 0, ErrorCode::InvalidThreshold)
            }
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CycleStatus {
    /// Lazily created next-cycle account, not yet open for attribution.
    Dormant,
    Open,
    Closed,
}

/// Leaderboard slot: `reached_seq` is the per-cycle award sequence at which
/// the user attained their current total. Ranking is points descending,
/// then lowest sequence (earliest attainment wins ties).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct LeaderEntry {
    pub user: Pubkey,
    pub points: u64,
    pub reached_at: i64,
    pub reached_seq: u64,
}

impl LeaderEntry {
    pub const LEN: usize = 32 + 8 + 8 + 8;

    fn outranks(&self, other: &LeaderEntry) -> bool {
        self.points > other.points
            || (self.points == other.points && self.reached_seq < other.reached_seq)
    }
}

/// One competitive cycle
///
/// The state machine is one-way: Dormant → Open → Closed. Exactly one
/// cycle is Open at any time; EngineState.current_cycle names it. Winner
/// fields are written once at closure and never mutated again.
///
/// PDA Seeds: ["cycle_v1", index_le]
#[account]
pub struct Cycle {
    /// PDA bump seed
    pub bump: u8,

    /// Sequential cycle number, starting at 1
    pub index: u32,

    pub status: CycleStatus,

    /// Closure condition for this cycle (copied from the engine at open)
    pub threshold: ThresholdConfig,

    pub opened_at: i64,

    /// Zero until the cycle closes
    pub closed_at: i64,

    /// Paid plays attributed to this cycle (bonus plays excluded)
    pub paid_plays: u64,

    /// All plays attributed to this cycle
    pub total_plays: u64,

    /// Premium points awarded within this cycle
    pub total_points: u64,

    /// Monotone award counter; orders tie-breaks deterministically
    pub award_seq: u64,

    /// Winning user, set at closure; None when nobody scored
    pub winner: Option<Pubkey>,

    /// Winner's point total at closure
    pub winner_points: Option<u64>,

    /// Bounded top-N standings, kept sorted (points desc, earliest first)
    pub leaderboard: Vec<LeaderEntry>,
}

impl Cycle {
    /// Account size calculation:
    /// - 2 u8 (bump, status enum) + 1 u32 (index): 6 bytes
    /// - threshold: 9 bytes
    /// - 6 u64/i64: 48 bytes (opened_at, closed_at, paid_plays,
    ///   total_plays, total_points, award_seq)
    /// - Option<Pubkey> + Option<u64>: 33 + 9 = 42 bytes
    /// - leaderboard: 4 + LEADERBOARD_LEN * 56 bytes
    /// Total: 6 + 9 + 48 + 42 + 4 + 560 = 669 bytes
    pub const LEN: usize = 6 + ThresholdConfig::LEN + 48 + 42 + 4 + LEADERBOARD_LEN * LeaderEntry::LEN;

    pub fn open(&mut self, index: u32, threshold: ThresholdConfig, now: i64, bump: u8) {
        self.bump = bump;
        self.index = index;
        self.status = CycleStatus::Open;
        self.threshold = threshold;
        self.opened_at = now;
        self.closed_at = 0;
        self.paid_plays = 0;
        self.total_plays = 0;
        self.total_points = 0;
        self.award_seq = 0;
        self.winner = None;
        self.winner_points = None;
        self.leaderboard.clear();
    }

    pub fn is_open(&self) -> bool {
        self.status == CycleStatus::Open
    }

    /// True when this open cycle carries an expired deadline threshold.
    pub fn deadline_passed(&self, now: i64) -> bool {
        match self.threshold {
            ThresholdConfig::Deadline { closes_at } => self.is_open() && now >= closes_at,
            _ => false,
        }
    }

    pub fn note_play(&mut self, paid: bool) {
        self.total_plays = self.total_plays.saturating_add(1);
        if paid {
            self.paid_plays = self.paid_plays.saturating_add(1);
        }
    }

    /// Registers a premium award: bumps the sequence, accumulates the cycle
    /// total and upserts the user's leaderboard slot at `new_total`.
    pub fn record_award(&mut self, user: Pubkey, amount: u64, new_total: u64, now: i64) {
        self.award_seq = self.award_seq.saturating_add(1);
        self.total_points = self.total_points.saturating_add(amount);

        let entry = LeaderEntry {
            user,
            points: new_total,
            reached_at: now,
            reached_seq: self.award_seq,
        };

        if let Some(existing) = self.leaderboard.iter_mut().find(|e| e.user == user) {
            *existing = entry;
        } else if self.leaderboard.len() < LEADERBOARD_LEN {
            self.leaderboard.push(entry);
        } else if let Some(weakest) = self.leaderboard.last_mut() {
            // Board is kept sorted, so the tail is the weakest slot.
            if entry.outranks(weakest) {
                *weakest = entry;
            }
        }

        self.leaderboard
            .sort_by(|a, b| b.points.cmp(&a.points).then(a.reached_seq.cmp(&b.reached_seq)));
    }

    /// Whether the threshold is now satisfied. `awarded_total` carries the
    /// point total the current play's user just reached, if any; deadlines
    /// are handled before attribution and never trip here.
    pub fn threshold_met_after(&self, awarded_total: Option<u64>) -> bool {
        match self.threshold {
            ThresholdConfig::LeaderPoints { target } => {
                awarded_total.map_or(false, |total| total >= target)
            }
            ThresholdConfig::PaidPlays { target } => self.paid_plays >= target,
            ThresholdConfig::Deadline { .. } => false,
        }
    }

    /// One-way transition to Closed. Returns the winner taken from the
    /// leaderboard head (None when nobody scored this cycle).
    pub fn close(&mut self, now: i64) -> (Option<Pubkey>, Option<u64>) {
        self.status = CycleStatus::Closed;
        self.closed_at = now;

        if let Some(top) = self.leaderboard.first() {
            self.winner = Some(top.user);
            self.winner_points = Some(top.points);
        }

        (self.winner, self.winner_points)
    }
}
