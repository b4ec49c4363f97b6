use anchor_lang::prelude::*;

/// Off-chain issued authorization for a single caller
///
/// Borsh-encoded and signed by the configured approver. The take
/// instructions receive the same struct as an argument and compare it
/// byte-for-byte against the signed copy.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApprovalMessage {
    /// Program the approval is scoped to
    pub program_id: Pubkey,
    /// Caller the approval is issued to
    pub user_pubkey: Pubkey,
    /// Last unix timestamp (inclusive) at which the approval is accepted
    pub expiry_unix: u64,
}
