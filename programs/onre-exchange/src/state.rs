use crate::constants::{MAX_ADMINS, MAX_NAME_LEN};
use anchor_lang::prelude::*;

/// Global program state containing governance and configuration settings
///
/// Stores the authority structure, the emergency halt flag and the trusted
/// approver key used by the approval verifier.
#[account]
#[derive(InitSpace)]
pub struct State {
    /// Primary program authority with full control over all operations
    pub boss: Pubkey,
    /// Emergency kill switch, blocks offer execution while set
    pub is_killed: bool,
    /// Reference token mint recorded at initialization
    pub reference_mint: Pubkey,
    /// Dense list of admin keys; `Pubkey::default()` marks an empty slot
    pub admins: [Pubkey; MAX_ADMINS],
    /// Trusted authority whose Ed25519 signature unlocks approval-gated offers
    pub approver: Pubkey,
    /// PDA bump seed for account derivation
    pub bump: u8,
    /// Reserved space for future program state extensions
    pub reserved: [u8; 128],
}

impl State {
    pub fn is_admin(&self, key: &Pubkey) -> bool {
        *key != Pubkey::default() && self.admins.contains(key)
    }

    /// Number of occupied admin slots (the list is kept dense)
    pub fn admin_count(&self) -> usize {
        self.admins
            .iter()
            .take_while(|admin| **admin != Pubkey::default())
            .count()
    }
}

/// Program-derived authority owning the relay token accounts
///
/// Value taken through `take_offer_permissionless` passes through token
/// accounts owned by this PDA and leaves them at their pre-call balance.
#[account]
#[derive(InitSpace)]
pub struct PermissionlessAuthority {
    /// Human readable label for the relay authority
    #[max_len(MAX_NAME_LEN)]
    pub name: String,
    /// PDA bump seed for account derivation
    pub bump: u8,
}
