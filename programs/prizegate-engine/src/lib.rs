#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod state;

#[cfg(test)]
mod invariants;

pub use constants::*;
pub use contexts::*;
pub use errors::ErrorCode;
pub use events::*;
pub use helpers::*;
pub use state::*;

declare_id!("5xNrxW6obMV51DCXdmmNYYTeibxj6j2mykdoo7ckzpWT");

#[program]
pub mod prizegate_engine {
    use super::*;

    /// Bootstraps the engine and opens cycle #1.
    pub fn initialize(
        ctx: Context<Initialize>,
        operator: Pubkey,
        payment_authority: Pubkey,
        points_per_correct: u64,
        default_threshold: ThresholdConfig,
    ) -> Result<()> {
        require!(points_per_correct > 0, ErrorCode::InvalidParameter);
        default_threshold.validate()?;

        let clock = Clock::get()?;
        let engine = &mut ctx.accounts.engine;

        engine.bump = ctx.bumps.engine;
        engine.admin = ctx.accounts.admin.key();
        engine.pending_admin = None;
        engine.operator = operator;
        engine.payment_authority = payment_authority;
        engine.paused = false;
        engine.points_per_correct = points_per_correct;
        engine.default_threshold = default_threshold;
        engine.current_cycle = FIRST_CYCLE_INDEX;
        engine.cycles_closed = 0;
        engine.lifetime_plays = 0;
        engine.lifetime_paid_plays = 0;
        engine.lifetime_points = 0;
        engine.lifetime_attempts_credited = 0;
        engine.initialized_at = clock.unix_timestamp;
        engine.last_play_at = 0;

        let first_cycle = &mut ctx.accounts.first_cycle;
        first_cycle.open(
            FIRST_CYCLE_INDEX,
            default_threshold,
            clock.unix_timestamp,
            ctx.bumps.first_cycle,
        );

        emit!(EngineInitialized {
            admin: engine.admin,
            operator,
            payment_authority,
            points_per_correct,
            timestamp: clock.unix_timestamp,
        });
        emit!(CycleOpened {
            index: FIRST_CYCLE_INDEX,
            threshold: default_threshold,
            timestamp: clock.unix_timestamp,
        });

        msg!("Engine initialized; cycle #{} open", FIRST_CYCLE_INDEX);
        Ok(())
    }

    /// Replaces one spin tier's weighted outcome list.
    pub fn configure_reward_table(
        ctx: Context<ConfigureRewardTable>,
        tier: SpinTier,
        outcomes: Vec<RewardOutcome>,
    ) -> Result<()> {
        require!(!outcomes.is_empty(), ErrorCode::EmptyRewardTable);
        require!(
            outcomes.len() <= MAX_REWARD_OUTCOMES,
            ErrorCode::TooManyOutcomes
        );
        let total = total_weight(&outcomes)?;

        let clock = Clock::get()?;
        let count = outcomes.len() as u16;

        let table = &mut ctx.accounts.reward_table;
        table.bump = ctx.bumps.reward_table;
        table.set_tier(tier, outcomes);
        table.updated_at = clock.unix_timestamp;

        emit!(RewardTableUpdated {
            admin: ctx.accounts.admin.key(),
            tier,
            outcomes: count,
            total_weight: total,
            timestamp: clock.unix_timestamp,
        });

        msg!("Reward table updated: {:?} ({} outcomes)", tier, count);
        Ok(())
    }

    /// Tunes runtime parameters; new cycles pick up the new threshold.
    pub fn update_parameters(
        ctx: Context<AdminAction>,
        points_per_correct: Option<u64>,
        default_threshold: Option<ThresholdConfig>,
    ) -> Result<()> {
        let clock = Clock::get()?;
        let engine = &mut ctx.accounts.engine;

        if let Some(points) = points_per_correct {
            require!(points > 0, ErrorCode::InvalidParameter);
            engine.points_per_correct = points;
        }
        if let Some(threshold) = default_threshold {
            threshold.validate()?;
            engine.default_threshold = threshold;
        }

        emit!(ParametersUpdated {
            admin: ctx.accounts.admin.key(),
            points_per_correct: engine.points_per_correct,
            default_threshold: engine.default_threshold,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn set_paused(ctx: Context<AdminAction>, paused: bool) -> Result<()> {
        let clock = Clock::get()?;
        let engine = &mut ctx.accounts.engine;
        engine.paused = paused;

        emit!(PausedSet {
            admin: ctx.accounts.admin.key(),
            paused,
            timestamp: clock.unix_timestamp,
        });

        msg!("Engine {}", if paused { "paused" } else { "resumed" });
        Ok(())
    }

    /// Rotates the operator and/or payment authority.
    pub fn set_authorities(
        ctx: Context<AdminAction>,
        operator: Option<Pubkey>,
        payment_authority: Option<Pubkey>,
    ) -> Result<()> {
        let clock = Clock::get()?;
        let engine = &mut ctx.accounts.engine;

        if let Some(key) = operator {
            engine.operator = key;
        }
        if let Some(key) = payment_authority {
            engine.payment_authority = key;
        }

        emit!(AuthoritiesUpdated {
            admin: ctx.accounts.admin.key(),
            operator: engine.operator,
            payment_authority: engine.payment_authority,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    /// Step one of the two-step admin transfer.
    pub fn propose_admin(ctx: Context<AdminAction>, new_admin: Pubkey) -> Result<()> {
        let clock = Clock::get()?;
        let engine = &mut ctx.accounts.engine;
        engine.pending_admin = Some(new_admin);

        emit!(AdminTransferProposed {
            current_admin: engine.admin,
            proposed_admin: new_admin,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    /// Step two: the proposed admin claims the role.
    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        let clock = Clock::get()?;
        let engine = &mut ctx.accounts.engine;

        let pending = engine
            .pending_admin
            .ok_or(ErrorCode::NoPendingAdminTransfer)?;
        require_keys_eq!(
            ctx.accounts.new_admin.key(),
            pending,
            ErrorCode::UnauthorizedAccess
        );

        let old_admin = engine.admin;
        engine.admin = pending;
        engine.pending_admin = None;

        emit!(AdminTransferred {
            old_admin,
            new_admin: pending,
            timestamp: clock.unix_timestamp,
        });

        msg!("Admin transferred");
        Ok(())
    }

    /// Applies a verified payment confirmation exactly once.
    ///
    /// The webhook side delivers at-least-once; redeliveries find the
    /// receipt already applied and return successfully without mutating
    /// any balance.
    pub fn credit_attempts(
        ctx: Context<CreditAttempts>,
        payment_ref: [u8; 32],
        amount: u64,
    ) -> Result<u64> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;

        let player_bump = ctx.bumps.player;
        let receipt_bump = ctx.bumps.receipt;

        let CreditAttempts {
            engine,
            user,
            player,
            receipt,
            ..
        } = ctx.accounts;

        require!(!engine.paused, ErrorCode::EnginePaused);
        require!(amount > 0, ErrorCode::InvalidParameter);

        let user_key = user.key();
        player.ensure_initialized(user_key, player_bump, now);

        let attempts =
            match receipt.apply(player, payment_ref, user_key, amount, receipt_bump, now)? {
                Some(attempts) => attempts,
                None => {
                    // At-least-once redelivery: report the balance the
                    // original application produced, change nothing.
                    msg!(
                        "Payment already credited ({} attempts); skipping",
                        receipt.attempts_granted
                    );
                    return Ok(player.attempts_remaining());
                }
            };

        engine.lifetime_attempts_credited =
            engine.lifetime_attempts_credited.saturating_add(attempts);

        emit!(AttemptsCredited {
            user: user_key,
            payment_ref,
            amount,
            attempts,
            paid_balance: player.attempts_paid,
            bonus_balance: player.attempts_bonus,
            timestamp: now,
        });

        msg!("Credited {} attempts (amount {})", attempts, amount);
        Ok(player.attempts_remaining())
    }

    /// Grants free attempts (referrals, promos). Bonus attempts are spent
    /// before paid ones and never count toward paid-play thresholds.
    pub fn grant_bonus_attempts(ctx: Context<GrantBonusAttempts>, count: u64) -> Result<()> {
        require!(count > 0, ErrorCode::InvalidParameter);

        let clock = Clock::get()?;
        let now = clock.unix_timestamp;
        let player_bump = ctx.bumps.player;

        let GrantBonusAttempts {
            engine,
            user,
            player,
            authority,
            ..
        } = ctx.accounts;

        require!(!engine.paused, ErrorCode::EnginePaused);

        let user_key = user.key();
        player.ensure_initialized(user_key, player_bump, now);
        player.credit_bonus(count)?;

        emit!(BonusAttemptsGranted {
            authority: authority.key(),
            user: user_key,
            count,
            bonus_balance: player.attempts_bonus,
            timestamp: now,
        });

        Ok(())
    }

    /// Admin balance correction; audited like every other ledger change.
    pub fn adjust_attempts(ctx: Context<AdjustAttempts>, delta: i64, bonus: bool) -> Result<()> {
        require!(delta != 0, ErrorCode::InvalidParameter);

        let clock = Clock::get()?;
        let now = clock.unix_timestamp;
        let player_bump = ctx.bumps.player;

        let AdjustAttempts {
            user,
            player,
            admin,
            ..
        } = ctx.accounts;

        let user_key = user.key();
        player.ensure_initialized(user_key, player_bump, now);
        player.apply_adjustment(delta, bonus)?;

        emit!(AttemptsAdjusted {
            admin: admin.key(),
            user: user_key,
            delta,
            bonus,
            paid_balance: player.attempts_paid,
            bonus_balance: player.attempts_bonus,
            timestamp: now,
        });

        msg!("Adjusted attempts by {} (bonus={})", delta, bonus);
        Ok(())
    }

    pub fn set_disqualified(ctx: Context<SetDisqualified>, disqualified: bool) -> Result<()> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;
        let player_bump = ctx.bumps.player;

        let SetDisqualified {
            user,
            player,
            admin,
            ..
        } = ctx.accounts;

        let user_key = user.key();
        player.ensure_initialized(user_key, player_bump, now);
        player.disqualified = disqualified;

        emit!(DisqualificationSet {
            admin: admin.key(),
            user: user_key,
            disqualified,
            timestamp: now,
        });

        Ok(())
    }

    /// Resolves one play end to end: debits an attempt, grades the answer,
    /// draws the reward, awards points, records the play and evaluates
    /// cycle closure. The whole sequence is one transaction; a retry with
    /// the same play id collides with the committed record instead of
    /// consuming a second attempt.
    pub fn resolve_play(
        ctx: Context<ResolvePlay>,
        play_id: [u8; 32],
        question_id: u64,
        chosen_option: u8,
        correct_option: u8,
        client_seed: [u8; 32],
        next_cycle_index: u32,
    ) -> Result<PlayOutcome> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;

        let player_bump = ctx.bumps.player;
        let next_cycle_bump = ctx.bumps.next_cycle;
        let record_bump = ctx.bumps.play_record;

        let ResolvePlay {
            engine,
            cycle,
            next_cycle,
            user,
            player,
            reward_table,
            play_record,
            ..
        } = ctx.accounts;

        require!(!engine.paused, ErrorCode::EnginePaused);
        require!(correct_option < OPTION_COUNT, ErrorCode::InvalidOption);
        require!(
            chosen_option < OPTION_COUNT || chosen_option == NO_ANSWER,
            ErrorCode::InvalidOption
        );
        require!(cycle.is_open(), ErrorCode::CycleNotOpen);

        let user_key = user.key();
        player.ensure_initialized(user_key, player_bump, now);
        require!(!player.disqualified, ErrorCode::PlayerDisqualified);

        // 1) consume one attempt (bonus first)
        let paid = player.debit_one(now)?;

        // 2) spin tier from answer correctness
        let correct = chosen_option == correct_option;
        let tier = if correct {
            SpinTier::Premium
        } else {
            SpinTier::Standard
        };

        // 3) weighted reward draw
        let outcomes = reward_table.tier(tier);
        let total = total_weight(outcomes)?;
        let seed = draw_seed(&user_key, &play_id, &client_seed, clock.slot, now);
        let value = uniform_draw(&seed, total);
        let outcome = *pick_outcome(outcomes, value)?;

        #[cfg(feature = "verbose")]
        msg!(
            "Draw: tier={:?} value={}/{} outcome={}",
            tier,
            value,
            total,
            outcome.outcome_id
        );

        let mut cycle_closed = false;
        let mut winner: Option<Pubkey> = None;

        // 4) lazily observed deadline: the expiring cycle closes first and
        //    this play lands in the fresh one
        let mut rotated = false;
        if cycle.deadline_passed(now) {
            let (w, wp) = Cycle::close(&mut *cycle, now);
            winner = w;
            engine.current_cycle = next_cycle_index;
            engine.cycles_closed = engine.cycles_closed.saturating_add(1);
            emit!(CycleClosed {
                index: cycle.index,
                winner: w,
                winner_points: wp,
                paid_plays: cycle.paid_plays,
                total_plays: cycle.total_plays,
                total_points: cycle.total_points,
                forced: false,
                timestamp: now,
            });

            next_cycle.open(next_cycle_index, engine.default_threshold, now, next_cycle_bump);
            emit!(CycleOpened {
                index: next_cycle_index,
                threshold: engine.default_threshold,
                timestamp: now,
            });

            msg!(
                "Cycle #{} deadline reached; cycle #{} open",
                cycle.index,
                next_cycle_index
            );
            cycle_closed = true;
            rotated = true;
        }

        // 5) attribute the play to the active cycle
        let active_index = if rotated { next_cycle_index } else { cycle.index };
        let mut points_awarded: u64 = 0;
        let mut cycle_points: u64 = player.cycle_balance(active_index);
        let threshold_hit;
        {
            let active: &mut Cycle = if rotated {
                &mut *next_cycle
            } else {
                &mut *cycle
            };
            active.note_play(paid);

            if correct {
                points_awarded = engine.points_per_correct;
                cycle_points = player.award_points(active_index, points_awarded);
                active.record_award(user_key, points_awarded, cycle_points, now);

                emit!(PointsAwarded {
                    user: user_key,
                    cycle_index: active_index,
                    amount: points_awarded,
                    cycle_points,
                    play_id,
                    timestamp: now,
                });
            }

            // A cycle opened by this same play defers its threshold to the
            // next play; only one successor account exists per transaction.
            threshold_hit = active.threshold_met_after(correct.then_some(cycle_points));
        }

        // 6) closure decided by this play
        if !rotated && threshold_hit {
            let (w, wp) = Cycle::close(&mut *cycle, now);
            winner = w;
            engine.current_cycle = next_cycle_index;
            engine.cycles_closed = engine.cycles_closed.saturating_add(1);
            emit!(CycleClosed {
                index: cycle.index,
                winner: w,
                winner_points: wp,
                paid_plays: cycle.paid_plays,
                total_plays: cycle.total_plays,
                total_points: cycle.total_points,
                forced: false,
                timestamp: now,
            });

            next_cycle.open(next_cycle_index, engine.default_threshold, now, next_cycle_bump);
            emit!(CycleOpened {
                index: next_cycle_index,
                threshold: engine.default_threshold,
                timestamp: now,
            });

            msg!(
                "Cycle #{} threshold reached; cycle #{} open",
                cycle.index,
                next_cycle_index
            );
            cycle_closed = true;
        }

        // 7) immutable play record
        play_record.bump = record_bump;
        play_record.id = play_id;
        play_record.user = user_key;
        play_record.cycle_index = active_index;
        play_record.question_id = question_id;
        play_record.chosen_option = chosen_option;
        play_record.correct_option = correct_option;
        play_record.correct = correct;
        play_record.paid = paid;
        play_record.tier = tier;
        play_record.outcome_id = outcome.outcome_id;
        play_record.outcome_kind = outcome.kind;
        play_record.points_awarded = points_awarded;
        play_record.cycle_points_after = cycle_points;
        play_record.attempts_paid_after = player.attempts_paid;
        play_record.attempts_bonus_after = player.attempts_bonus;
        play_record.timestamp = now;
        play_record.slot = clock.slot;

        engine.lifetime_plays = engine.lifetime_plays.saturating_add(1);
        if paid {
            engine.lifetime_paid_plays = engine.lifetime_paid_plays.saturating_add(1);
        }
        engine.lifetime_points = engine.lifetime_points.saturating_add(points_awarded);
        engine.last_play_at = now;

        emit!(PlayResolved {
            user: user_key,
            play_id,
            cycle_index: active_index,
            question_id,
            correct,
            tier,
            outcome_id: outcome.outcome_id,
            outcome_kind: outcome.kind,
            points_awarded,
            cycle_points,
            attempts_paid: player.attempts_paid,
            attempts_bonus: player.attempts_bonus,
            cycle_closed,
            winner,
            timestamp: now,
        });

        if outcome.kind.requires_fulfillment() {
            emit!(PayoutRequired {
                user: user_key,
                play_id,
                kind: outcome.kind,
                timestamp: now,
            });
        }

        msg!(
            "Play resolved: tier={:?} outcome={} attempts_left={}",
            tier,
            outcome.outcome_id,
            player.attempts_remaining()
        );

        Ok(PlayOutcome {
            tier,
            correct,
            outcome_id: outcome.outcome_id,
            outcome_kind: outcome.kind,
            points_awarded,
            cycle_points,
            attempts_paid: player.attempts_paid,
            attempts_bonus: player.attempts_bonus,
            cycle_index: active_index,
            cycle_closed,
            winner,
        })
    }

    /// Admin override: closes the current cycle regardless of threshold
    /// and opens its successor atomically.
    pub fn force_close_cycle(ctx: Context<ForceCloseCycle>, next_cycle_index: u32) -> Result<()> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;
        let next_cycle_bump = ctx.bumps.next_cycle;

        let ForceCloseCycle {
            engine,
            cycle,
            next_cycle,
            admin,
            ..
        } = ctx.accounts;

        require!(cycle.is_open(), ErrorCode::CycleNotOpen);

        let (winner, winner_points) = Cycle::close(&mut *cycle, now);
        engine.current_cycle = next_cycle_index;
        engine.cycles_closed = engine.cycles_closed.saturating_add(1);

        emit!(CycleClosed {
            index: cycle.index,
            winner,
            winner_points,
            paid_plays: cycle.paid_plays,
            total_plays: cycle.total_plays,
            total_points: cycle.total_points,
            forced: true,
            timestamp: now,
        });

        next_cycle.open(next_cycle_index, engine.default_threshold, now, next_cycle_bump);
        emit!(CycleOpened {
            index: next_cycle_index,
            threshold: engine.default_threshold,
            timestamp: now,
        });

        msg!(
            "Cycle #{} force-closed by {}; cycle #{} open",
            cycle.index,
            admin.key(),
            next_cycle_index
        );
        Ok(())
    }

    /// Puts a fulfillment-bearing outcome into the payout queue.
    pub fn enqueue_payout(ctx: Context<EnqueuePayout>) -> Result<()> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;
        let ticket_bump = ctx.bumps.ticket;

        let EnqueuePayout {
            play_record,
            ticket,
            ..
        } = ctx.accounts;

        require!(
            play_record.outcome_kind.requires_fulfillment(),
            ErrorCode::PayoutNotRequired
        );

        ticket.bump = ticket_bump;
        ticket.play_id = play_record.id;
        ticket.user = play_record.user;
        ticket.kind = play_record.outcome_kind;
        ticket.status = PayoutStatus::Pending;
        ticket.enqueued_at = now;
        ticket.settled_at = 0;

        emit!(PayoutEnqueued {
            user: ticket.user,
            play_id: ticket.play_id,
            kind: ticket.kind,
            timestamp: now,
        });

        Ok(())
    }

    pub fn settle_payout(ctx: Context<PayoutAction>) -> Result<()> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;

        let PayoutAction { ticket, admin, .. } = ctx.accounts;

        require!(
            ticket.status == PayoutStatus::Pending,
            ErrorCode::PayoutAlreadyFinal
        );
        ticket.status = PayoutStatus::Settled;
        ticket.settled_at = now;

        emit!(PayoutSettled {
            admin: admin.key(),
            user: ticket.user,
            play_id: ticket.play_id,
            timestamp: now,
        });

        Ok(())
    }

    pub fn cancel_payout(ctx: Context<PayoutAction>) -> Result<()> {
        let clock = Clock::get()?;
        let now = clock.unix_timestamp;

        let PayoutAction { ticket, admin, .. } = ctx.accounts;

        require!(
            ticket.status == PayoutStatus::Pending,
            ErrorCode::PayoutAlreadyFinal
        );
        ticket.status = PayoutStatus::Cancelled;
        ticket.settled_at = now;

        emit!(PayoutCancelled {
            admin: admin.key(),
            user: ticket.user,
            play_id: ticket.play_id,
            timestamp: now,
        });

        Ok(())
    }
}
