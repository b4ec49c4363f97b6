use crate::constants::{seeds, MAX_ADMINS};
use crate::state::State;
use anchor_lang::prelude::*;

#[error_code]
pub enum AdminErrorCode {
    #[msg("Admin already exists in the admin list")]
    AdminAlreadyExists,
    #[msg("Maximum number of admins (20) reached")]
    MaxAdminsReached,
    #[msg("Admin cannot be the default public key")]
    InvalidAdmin,
    #[msg("Admin not found in the admin list")]
    AdminNotFound,
}

/// What happened to the admin list
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminChange {
    Added,
    Removed,
    Cleared,
}

#[event]
pub struct AdminListChangedEvent {
    pub change: AdminChange,
    /// Affected admin, `Pubkey::default()` for `Cleared`
    pub admin: Pubkey,
    /// Occupied slots after the change
    pub admin_count: u8,
    pub boss: Pubkey,
}

/// Shared by every boss-only admin list instruction.
#[derive(Accounts)]
pub struct ManageAdmins<'info> {
    #[account(mut, seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Account<'info, State>,

    pub boss: Signer<'info>,
}

/// Appends `new_admin` at the end of the dense list.
pub fn add_admin(ctx: Context<ManageAdmins>, new_admin: Pubkey) -> Result<()> {
    require!(new_admin != Pubkey::default(), AdminErrorCode::InvalidAdmin);

    let state = &mut ctx.accounts.state;
    require!(!state.is_admin(&new_admin), AdminErrorCode::AdminAlreadyExists);

    let end = state.admin_count();
    require!(end < MAX_ADMINS, AdminErrorCode::MaxAdminsReached);
    state.admins[end] = new_admin;

    announce(&ctx.accounts.state, AdminChange::Added, new_admin, ctx.accounts.boss.key());
    Ok(())
}

/// Swap-remove: the last occupied slot fills the hole, so ordering of the
/// survivors is not stable.
pub fn remove_admin(ctx: Context<ManageAdmins>, admin_to_remove: Pubkey) -> Result<()> {
    require!(admin_to_remove != Pubkey::default(), AdminErrorCode::AdminNotFound);

    let state = &mut ctx.accounts.state;
    let hole = state
        .admins
        .iter()
        .position(|admin| *admin == admin_to_remove)
        .ok_or(AdminErrorCode::AdminNotFound)?;

    let last = state
        .admin_count()
        .checked_sub(1)
        .ok_or(AdminErrorCode::AdminNotFound)?;
    state.admins[hole] = state.admins[last];
    state.admins[last] = Pubkey::default();

    announce(&ctx.accounts.state, AdminChange::Removed, admin_to_remove, ctx.accounts.boss.key());
    Ok(())
}

pub fn clear_admins(ctx: Context<ManageAdmins>) -> Result<()> {
    ctx.accounts.state.admins = [Pubkey::default(); MAX_ADMINS];

    announce(&ctx.accounts.state, AdminChange::Cleared, Pubkey::default(), ctx.accounts.boss.key());
    Ok(())
}

fn announce(state: &State, change: AdminChange, admin: Pubkey, boss: Pubkey) {
    let admin_count = state.admin_count() as u8;
    msg!("Admin list {:?}: {} ({} active)", change, admin, admin_count);

    emit!(AdminListChangedEvent {
        change,
        admin,
        admin_count,
        boss,
    });
}
