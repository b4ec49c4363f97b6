use crate::constants::{seeds, MAX_NAME_LEN};
use crate::state::{PermissionlessAuthority, State};
use anchor_lang::prelude::*;

#[error_code]
pub enum InitializePermissionlessErrorCode {
    #[msg("Permissionless account name must be 1 to 50 characters")]
    InvalidPermissionlessAccountName,
}

#[event]
pub struct PermissionlessAuthorityCreatedEvent {
    pub authority: Pubkey,
    pub name: String,
}

/// Creates the relay authority PDA used by `take_offer_permissionless`.
/// One per program; a second call fails in account creation.
#[derive(Accounts)]
pub struct InitializePermissionlessAccount<'info> {
    #[account(
        init,
        payer = boss,
        space = 8 + PermissionlessAuthority::INIT_SPACE,
        seeds = [seeds::PERMISSIONLESS_AUTHORITY],
        bump
    )]
    pub permissionless_authority: Account<'info, PermissionlessAuthority>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Account<'info, State>,

    #[account(mut)]
    pub boss: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Stores `name` with surrounding whitespace removed.
///
/// # Errors
/// - `InvalidPermissionlessAccountName` when the trimmed label is blank or
///   exceeds `MAX_NAME_LEN` bytes
pub fn initialize_permissionless_account(
    ctx: Context<InitializePermissionlessAccount>,
    name: String,
) -> Result<()> {
    let label = name.trim();
    require!(
        (1..=MAX_NAME_LEN).contains(&label.len()),
        InitializePermissionlessErrorCode::InvalidPermissionlessAccountName
    );

    let authority = &mut ctx.accounts.permissionless_authority;
    authority.name = label.to_owned();
    authority.bump = ctx.bumps.permissionless_authority;

    msg!("Relay authority {} created as {:?}", authority.key(), label);
    emit!(PermissionlessAuthorityCreatedEvent {
        authority: authority.key(),
        name: authority.name.clone(),
    });

    Ok(())
}
