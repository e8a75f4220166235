use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;

// ACCOUNTS - Instruction account validation structs

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + EngineState::LEN,
        seeds = [ENGINE_SEED],
        bump
    )]
    pub engine: Account<'info, EngineState>,
    #[account(
        init,
        payer = admin,
        space = 8 + Cycle::LEN,
        seeds = [CYCLE_SEED, &FIRST_CYCLE_INDEX.to_le_bytes()],
        bump
    )]
    pub first_cycle: Box<Account<'info, Cycle>>,
    #[account(mut)]
    pub admin: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ConfigureRewardTable<'info> {
    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + RewardTable::LEN,
        seeds = [REWARD_TABLE_SEED],
        bump
    )]
    pub reward_table: Box<Account<'info, RewardTable>>,
    #[account(mut, constraint = admin.key() == engine.admin @ ErrorCode::UnauthorizedAccess)]
    pub admin: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// Shared by parameter updates, pause toggling, authority rotation and the
/// two-step admin transfer proposal.
#[derive(Accounts)]
pub struct AdminAction<'info> {
    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    #[account(constraint = admin.key() == engine.admin @ ErrorCode::UnauthorizedAccess)]
    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    pub new_admin: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(payment_ref: [u8; 32])]
pub struct CreditAttempts<'info> {
    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    /// CHECK: Opaque user identity; only its key seeds the player PDA
    pub user: AccountInfo<'info>,
    #[account(
        init_if_needed,
        payer = payment_authority,
        space = 8 + PlayerAccount::LEN,
        seeds = [PLAYER_SEED, user.key().as_ref()],
        bump
    )]
    pub player: Account<'info, PlayerAccount>,
    #[account(
        init_if_needed,
        payer = payment_authority,
        space = 8 + PaymentReceipt::LEN,
        seeds = [PAYMENT_SEED, payment_ref.as_ref()],
        bump
    )]
    pub receipt: Account<'info, PaymentReceipt>,
    #[account(
        mut,
        constraint = payment_authority.key() == engine.payment_authority @ ErrorCode::UnauthorizedAccess
    )]
    pub payment_authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct GrantBonusAttempts<'info> {
    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    /// CHECK: Opaque user identity; only its key seeds the player PDA
    pub user: AccountInfo<'info>,
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + PlayerAccount::LEN,
        seeds = [PLAYER_SEED, user.key().as_ref()],
        bump
    )]
    pub player: Account<'info, PlayerAccount>,
    #[account(
        mut,
        constraint = authority.key() == engine.operator || authority.key() == engine.admin
            @ ErrorCode::UnauthorizedAccess
    )]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AdjustAttempts<'info> {
    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    /// CHECK: Opaque user identity; only its key seeds the player PDA
    pub user: AccountInfo<'info>,
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + PlayerAccount::LEN,
        seeds = [PLAYER_SEED, user.key().as_ref()],
        bump
    )]
    pub player: Account<'info, PlayerAccount>,
    #[account(mut, constraint = admin.key() == engine.admin @ ErrorCode::UnauthorizedAccess)]
    pub admin: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(
    play_id: [u8; 32],
    question_id: u64,
    chosen_option: u8,
    correct_option: u8,
    client_seed: [u8; 32],
    next_cycle_index: u32
)]
pub struct ResolvePlay<'info> {
    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    /// The single open cycle; a stale account fails here before anything
    /// is debited.
    #[account(
        mut,
        seeds = [CYCLE_SEED, &engine.current_cycle.to_le_bytes()],
        bump = cycle.bump,
        constraint = cycle.index == engine.current_cycle @ ErrorCode::InvalidCycle
    )]
    pub cycle: Box<Account<'info, Cycle>>,
    /// Lazily created successor, opened only when this play closes the
    /// current cycle.
    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + Cycle::LEN,
        seeds = [CYCLE_SEED, &next_cycle_index.to_le_bytes()],
        bump,
        constraint = Some(next_cycle_index) == engine.current_cycle.checked_add(1)
            @ ErrorCode::InvalidCycle
    )]
    pub next_cycle: Box<Account<'info, Cycle>>,
    /// CHECK: Opaque user identity; only its key seeds the player PDA
    pub user: AccountInfo<'info>,
    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + PlayerAccount::LEN,
        seeds = [PLAYER_SEED, user.key().as_ref()],
        bump
    )]
    pub player: Account<'info, PlayerAccount>,
    #[account(seeds = [REWARD_TABLE_SEED], bump = reward_table.bump)]
    pub reward_table: Box<Account<'info, RewardTable>>,
    #[account(
        init,
        payer = operator,
        space = 8 + PlayRecord::LEN,
        seeds = [PLAY_SEED, play_id.as_ref()],
        bump
    )]
    pub play_record: Box<Account<'info, PlayRecord>>,
    #[account(
        mut,
        constraint = operator.key() == engine.operator @ ErrorCode::UnauthorizedAccess
    )]
    pub operator: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(next_cycle_index: u32)]
pub struct ForceCloseCycle<'info> {
    #[account(mut, seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    #[account(
        mut,
        seeds = [CYCLE_SEED, &engine.current_cycle.to_le_bytes()],
        bump = cycle.bump,
        constraint = cycle.index == engine.current_cycle @ ErrorCode::InvalidCycle
    )]
    pub cycle: Box<Account<'info, Cycle>>,
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + Cycle::LEN,
        seeds = [CYCLE_SEED, &next_cycle_index.to_le_bytes()],
        bump,
        constraint = Some(next_cycle_index) == engine.current_cycle.checked_add(1)
            @ ErrorCode::InvalidCycle
    )]
    pub next_cycle: Box<Account<'info, Cycle>>,
    #[account(mut, constraint = admin.key() == engine.admin @ ErrorCode::UnauthorizedAccess)]
    pub admin: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetDisqualified<'info> {
    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    /// CHECK: Opaque user identity; only its key seeds the player PDA
    pub user: AccountInfo<'info>,
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + PlayerAccount::LEN,
        seeds = [PLAYER_SEED, user.key().as_ref()],
        bump
    )]
    pub player: Account<'info, PlayerAccount>,
    #[account(mut, constraint = admin.key() == engine.admin @ ErrorCode::UnauthorizedAccess)]
    pub admin: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EnqueuePayout<'info> {
    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    #[account(
        seeds = [PLAY_SEED, play_record.id.as_ref()],
        bump = play_record.bump
    )]
    pub play_record: Box<Account<'info, PlayRecord>>,
    #[account(
        init,
        payer = authority,
        space = 8 + PayoutTicket::LEN,
        seeds = [PAYOUT_SEED, play_record.id.as_ref()],
        bump
    )]
    pub ticket: Account<'info, PayoutTicket>,
    #[account(
        mut,
        constraint = authority.key() == engine.operator || authority.key() == engine.admin
            @ ErrorCode::UnauthorizedAccess
    )]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct PayoutAction<'info> {
    #[account(seeds = [ENGINE_SEED], bump = engine.bump)]
    pub engine: Account<'info, EngineState>,
    #[account(
        mut,
        seeds = [PAYOUT_SEED, ticket.play_id.as_ref()],
        bump = ticket.bump
    )]
    pub ticket: Account<'info, PayoutTicket>,
    #[account(constraint = admin.key() == engine.admin @ ErrorCode::UnauthorizedAccess)]
    pub admin: Signer<'info>,
}
