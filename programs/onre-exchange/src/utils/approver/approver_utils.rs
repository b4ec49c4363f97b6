use crate::utils::approver::ApprovalMessage;
use crate::utils::ed25519_parser::{ed25519_sig_count, parse_ed25519_ix};
use anchor_lang::prelude::*;
use solana_instructions_sysvar::{load_current_index_checked, load_instruction_at_checked};

/// Program id of the Ed25519 signature verification precompile
pub const ED25519_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("Ed25519SigVerify111111111111111111111111111");

#[error_code]
pub enum ApprovalErrorCode {
    #[msg("The approval message has expired.")]
    Expired,
    #[msg("The approval message is for the wrong program.")]
    WrongProgram,
    #[msg("The approval message is for the wrong user.")]
    WrongUser,
    #[msg("Missing Ed25519 instruction.")]
    MissingEd25519Ix,
    #[msg("The instruction is for the wrong program.")]
    WrongIxProgram,
    #[msg("Malformed Ed25519 instruction.")]
    MalformedEd25519Ix,
    #[msg("Multiple signatures found in Ed25519 instruction.")]
    MultipleSigs,
    #[msg("The authority public key does not match.")]
    WrongAuthority,
    #[msg("The message in the Ed25519 instruction does not match the approval message.")]
    MsgMismatch,
    #[msg("Failed to deserialize the approval message.")]
    MsgDeserialize,
    #[msg("This offer requires an approval message.")]
    ApprovalRequired,
}

/// Verifies approval for an approval-gated offer
///
/// No-op when the offer does not require approval. Otherwise an
/// `ApprovalMessage` must be supplied and the previous instruction must be
/// an Ed25519 verification of that exact message by `trusted_pubkey`.
pub fn verify_offer_approval(
    needs_approval: bool,
    approval_message: &Option<ApprovalMessage>,
    program_id: &Pubkey,
    user_pubkey: &Pubkey,
    trusted_pubkey: &Pubkey,
    instructions_sysvar: &UncheckedAccount,
) -> Result<()> {
    if !needs_approval {
        return Ok(());
    }

    let message = approval_message
        .as_ref()
        .ok_or(ApprovalErrorCode::ApprovalRequired)?;

    verify_approval_message_generic(
        program_id,
        user_pubkey,
        trusted_pubkey,
        instructions_sysvar,
        message,
    )
}

/// Runs the approval checks in a fixed order so that each failure maps to
/// exactly one error code.
pub fn verify_approval_message_generic(
    program_id: &Pubkey,
    user_pubkey: &Pubkey,
    trusted_pubkey: &Pubkey,
    instructions_sysvar: &UncheckedAccount,
    msg: &ApprovalMessage,
) -> Result<()> {
    let sysvar_info = instructions_sysvar.to_account_info();

    // 1) previous instruction must exist
    let cur_idx = load_current_index_checked(&sysvar_info)
        .map_err(|_| ApprovalErrorCode::MissingEd25519Ix)?;
    require!(cur_idx > 0, ApprovalErrorCode::MissingEd25519Ix);

    let ix = load_instruction_at_checked((cur_idx - 1) as usize, &sysvar_info)
        .map_err(|_| ApprovalErrorCode::MissingEd25519Ix)?;

    // 2) and be an Ed25519 verification
    require!(
        ix.program_id == ED25519_PROGRAM_ID,
        ApprovalErrorCode::WrongIxProgram
    );

    // 3) carrying one signature, the only one in the transaction
    require!(
        ed25519_sig_count(&ix.data).unwrap_or(0) <= 1,
        ApprovalErrorCode::MultipleSigs
    );
    require!(
        !has_other_ed25519_ix(&sysvar_info, (cur_idx - 1) as usize),
        ApprovalErrorCode::MultipleSigs
    );

    // 4) with a well formed header
    let parsed = parse_ed25519_ix(&ix.data).ok_or(ApprovalErrorCode::MalformedEd25519Ix)?;

    // 5) signed by the approver
    require!(
        *trusted_pubkey != Pubkey::default() && parsed.pubkey == trusted_pubkey.to_bytes(),
        ApprovalErrorCode::WrongAuthority
    );

    // 6) over the supplied approval message
    let signed_msg = ApprovalMessage::try_from_slice(&parsed.message)
        .map_err(|_| ApprovalErrorCode::MsgDeserialize)?;
    require!(signed_msg == *msg, ApprovalErrorCode::MsgMismatch);

    // 7..9) scoped to this program, this caller and still valid
    require!(
        signed_msg.program_id == *program_id,
        ApprovalErrorCode::WrongProgram
    );
    require!(
        signed_msg.user_pubkey == *user_pubkey,
        ApprovalErrorCode::WrongUser
    );
    let now = Clock::get()?.unix_timestamp;
    require!(
        signed_msg.expiry_unix as i128 >= now as i128,
        ApprovalErrorCode::Expired
    );

    Ok(())
}

/// True when an Ed25519 instruction other than the one at `skip` is present
fn has_other_ed25519_ix(sysvar_info: &AccountInfo, skip: usize) -> bool {
    (0..)
        .map_while(|index| load_instruction_at_checked(index, sysvar_info).ok().map(|ix| (index, ix)))
        .any(|(index, ix)| index != skip && ix.program_id == ED25519_PROGRAM_ID)
}
