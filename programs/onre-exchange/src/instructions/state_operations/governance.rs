//! Boss-level switches on the global `State`: the kill switch, the approval
//! authority and the boss key itself.

use crate::constants::seeds;
use crate::state::State;
use anchor_lang::prelude::*;

#[error_code]
pub enum GovernanceErrorCode {
    #[msg("Only boss can disable the kill switch")]
    OnlyBossCanDisable,
    #[msg("Unauthorized to enable the kill switch")]
    UnauthorizedToEnable,
    #[msg("Boss cannot be the default public key")]
    InvalidBossAddress,
}

#[event]
pub struct KillSwitchToggledEvent {
    pub enabled: bool,
    pub signer: Pubkey,
}

#[event]
pub struct ApproverUpdatedEvent {
    pub old_approver: Pubkey,
    pub new_approver: Pubkey,
}

#[event]
pub struct BossUpdated {
    pub old_boss: Pubkey,
    pub new_boss: Pubkey,
}

/// Any signer may reach the handler; it decides by role.
#[derive(Accounts)]
pub struct SetKillSwitch<'info> {
    #[account(mut, seeds = [seeds::STATE], bump = state.bump)]
    pub state: Box<Account<'info, State>>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct BossOnly<'info> {
    #[account(mut, seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Account<'info, State>,

    pub boss: Signer<'info>,
}

/// Halts or resumes `take_offer` and `take_offer_permissionless`.
///
/// Raising the switch is open to the boss and every admin, lowering it is
/// reserved to the boss. Setting the current value again is accepted.
pub fn set_kill_switch(ctx: Context<SetKillSwitch>, enable: bool) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let state = &mut ctx.accounts.state;
    let is_boss = state.boss == signer;

    if enable {
        require!(
            is_boss || state.is_admin(&signer),
            GovernanceErrorCode::UnauthorizedToEnable
        );
    } else {
        require!(is_boss, GovernanceErrorCode::OnlyBossCanDisable);
    }
    state.is_killed = enable;

    msg!("Kill switch {} by {}", if enable { "raised" } else { "lowered" }, signer);
    emit!(KillSwitchToggledEvent { enabled: enable, signer });

    Ok(())
}

/// Installs the key whose Ed25519 signatures unlock approval-gated offers.
///
/// `Pubkey::default()` leaves no valid approver, which closes every gated
/// offer until a real key is set.
pub fn set_approver(ctx: Context<BossOnly>, approver: Pubkey) -> Result<()> {
    let old_approver = std::mem::replace(&mut ctx.accounts.state.approver, approver);

    msg!("Approver {} -> {}", old_approver, approver);
    emit!(ApproverUpdatedEvent {
        old_approver,
        new_approver: approver,
    });

    Ok(())
}

/// Hands every boss-only instruction to `new_boss`, effective immediately.
pub fn set_boss(ctx: Context<BossOnly>, new_boss: Pubkey) -> Result<()> {
    require!(
        new_boss != Pubkey::default(),
        GovernanceErrorCode::InvalidBossAddress
    );

    let old_boss = std::mem::replace(&mut ctx.accounts.state.boss, new_boss);

    msg!("Boss {} -> {}", old_boss, new_boss);
    emit!(BossUpdated { old_boss, new_boss });

    Ok(())
}
