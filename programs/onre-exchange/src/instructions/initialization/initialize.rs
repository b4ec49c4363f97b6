use crate::constants::{seeds, MAX_ADMINS};
use crate::program::OnreExchange;
use crate::state::State;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

/// Error codes for the initialize instruction.
#[error_code]
pub enum InitializeErrorCode {
    /// The signer is not the program's upgrade authority
    #[msg("Only the program upgrade authority can initialize")]
    NotUpgradeAuthority,
    /// The program data account does not belong to this program
    #[msg("Program data account does not match the program")]
    InvalidProgramData,
}

/// Event emitted when the program state is created
#[event]
pub struct StateInitializedEvent {
    pub boss: Pubkey,
    pub reference_mint: Pubkey,
}

/// Account structure for initializing the program state.
///
/// # Preconditions
/// - The `state` account must not exist prior to execution; it will be initialized here.
/// - The signer must be the program's upgrade authority.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The program state account, initialized with the boss's public key.
    ///
    /// Space is `8 + State::INIT_SPACE` bytes, 8 bytes for the discriminator.
    #[account(
        init,
        payer = boss,
        space = 8 + State::INIT_SPACE,
        seeds = [seeds::STATE],
        bump
    )]
    pub state: Account<'info, State>,

    /// The signer funding and authorizing the state initialization, becomes the boss.
    #[account(mut)]
    pub boss: Signer<'info>,

    /// This program, used to locate its program data account
    #[account(
        constraint = program.programdata_address()? == Some(program_data.key())
            @ InitializeErrorCode::InvalidProgramData
    )]
    pub program: Program<'info, OnreExchange>,

    /// Program data holding the upgrade authority
    #[account(
        constraint = program_data.upgrade_authority_address == Some(boss.key())
            @ InitializeErrorCode::NotUpgradeAuthority
    )]
    pub program_data: Account<'info, ProgramData>,

    /// Reference token mint recorded in state
    pub reference_mint: InterfaceAccount<'info, Mint>,

    /// Solana System program for account creation and rent payment.
    pub system_program: Program<'info, System>,
}

/// Initializes the program state with the boss's public key, kill switch
/// disabled, no admins and no approver.
///
/// The account is created as a PDA with the seed `"state"`, so a second
/// call fails in account creation.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let state = &mut ctx.accounts.state;
    state.boss = ctx.accounts.boss.key();
    state.is_killed = false;
    state.reference_mint = ctx.accounts.reference_mint.key();
    state.admins = [Pubkey::default(); MAX_ADMINS];
    state.approver = Pubkey::default();
    state.bump = ctx.bumps.state;

    msg!("State initialized, boss: {}", state.boss);

    emit!(StateInitializedEvent {
        boss: state.boss,
        reference_mint: state.reference_mint,
    });

    Ok(())
}
