use super::offer_state::OfferAccount;
use super::offer_utils::{
    distribute_token_out, find_offer, process_offer_core, DistributeTokenOutParams,
    OfferProcessResult,
};
use crate::constants::seeds;
use crate::state::State;
use crate::utils::{transfer_tokens, u64_to_dec9, verify_offer_approval, ApprovalMessage};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Rejections raised by the account checks of both take instructions
#[error_code]
pub enum TakeOfferErrorCode {
    #[msg("Invalid boss account")]
    InvalidBoss,
    #[msg("Kill switch is activated")]
    KillSwitchActivated,
}

/// Emitted once per successful take, direct or relayed
#[event]
pub struct OfferTakenEvent {
    pub offer_id: u64,
    /// token_in that bought token_out, fee excluded
    pub token_in_amount: u64,
    pub token_out_amount: u64,
    /// token_in kept by the boss as fee
    pub fee_amount: u64,
    /// 9-decimal price the take was sized at
    pub price: u64,
    /// token_out was issued by the program rather than paid from the reserve
    pub minted: bool,
    /// Routed through the permissionless relay accounts
    pub relayed: bool,
    pub user: Pubkey,
}

impl OfferTakenEvent {
    pub(crate) fn record(
        offer_id: u64,
        quote: &OfferProcessResult,
        minted: bool,
        relayed: bool,
        user: Pubkey,
    ) {
        msg!(
            "Offer {} taken{} by {}: in {} + fee {}, out {} at {}",
            offer_id,
            if relayed { " via relay" } else { "" },
            user,
            quote.token_in_amount,
            quote.fee_amount,
            quote.token_out_amount,
            u64_to_dec9(quote.current_price)
        );

        emit!(OfferTakenEvent {
            offer_id,
            token_in_amount: quote.token_in_amount,
            token_out_amount: quote.token_out_amount,
            fee_amount: quote.fee_amount,
            price: quote.current_price,
            minted,
            relayed,
            user,
        });
    }
}

/// Direct swap between the user and the boss.
///
/// `boss_token_in_account` must already exist. `vault_token_out_account`
/// is needed only when token_out is paid from the reserve.
#[derive(Accounts)]
pub struct TakeOffer<'info> {
    #[account(seeds = [seeds::OFFERS], bump)]
    pub offer_account: AccountLoader<'info, OfferAccount>,

    #[account(
        seeds = [seeds::STATE],
        bump = state.bump,
        has_one = boss @ TakeOfferErrorCode::InvalidBoss,
        constraint = !state.is_killed @ TakeOfferErrorCode::KillSwitchActivated
    )]
    pub state: Box<Account<'info, State>>,

    /// CHECK: `has_one` on state
    pub boss: UncheckedAccount<'info>,

    /// CHECK: reserve owner PDA, signs reserve payouts
    #[account(seeds = [seeds::OFFER_VAULT_AUTHORITY], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    /// Reserve for token_out. Only read on the reserve path, so it may be
    /// omitted while the program holds the mint authority
    #[account(
        mut,
        associated_token::mint = token_out_mint,
        associated_token::authority = vault_authority,
        associated_token::token_program = token_out_program
    )]
    pub vault_token_out_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_in_mint: Box<InterfaceAccount<'info, Mint>>,
    pub token_in_program: Interface<'info, TokenInterface>,

    /// Writable for supply changes on the mint path
    #[account(mut)]
    pub token_out_mint: Box<InterfaceAccount<'info, Mint>>,
    pub token_out_program: Interface<'info, TokenInterface>,

    #[account(
        mut,
        associated_token::mint = token_in_mint,
        associated_token::authority = user,
        associated_token::token_program = token_in_program
    )]
    pub user_token_in_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = token_out_mint,
        associated_token::authority = user,
        associated_token::token_program = token_out_program
    )]
    pub user_token_out_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = token_in_mint,
        associated_token::authority = boss,
        associated_token::token_program = token_in_program
    )]
    pub boss_token_in_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: mint authority PDA, only signs when it controls token_out_mint
    #[account(seeds = [seeds::MINT_AUTHORITY], bump)]
    pub mint_authority_pda: UncheckedAccount<'info>,

    /// CHECK: pinned to the instructions sysvar address
    #[account(address = solana_instructions_sysvar::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Sells token_out to the user for `token_in_amount` of token_in.
///
/// The boss receives the whole `token_in_amount`; the fee is the part of it
/// that buys nothing. token_out is minted when the program holds the mint
/// authority and paid from the reserve otherwise.
///
/// # Errors
/// * `KillSwitchActivated`, `InvalidBoss` from the account checks
/// * `OfferNotFound`, `InvalidTokenInMint`, `InvalidTokenOutMint`
/// * `NoActiveVector` / `NoActiveSegment` when nothing prices the offer now
/// * `ZeroOutputAmount` when the net amount buys less than one unit
/// * any approval rejection when the offer is gated
/// * token program failures for short balances
pub fn take_offer(
    ctx: Context<TakeOffer>,
    offer_id: u64,
    token_in_amount: u64,
    approval_message: Option<ApprovalMessage>,
) -> Result<()> {
    let accounts = &ctx.accounts;
    let user = accounts.user.key();
    let offer = find_offer(&*accounts.offer_account.load()?, offer_id)?;

    verify_offer_approval(
        offer.needs_approval(),
        &approval_message,
        ctx.program_id,
        &user,
        &accounts.state.approver,
        &accounts.instructions_sysvar,
    )?;

    let quote = process_offer_core(
        &offer,
        token_in_amount,
        &accounts.token_in_mint,
        &accounts.token_out_mint,
        Clock::get()?.unix_timestamp as u64,
    )?;

    transfer_tokens(
        &accounts.token_in_mint,
        &accounts.token_in_program,
        &accounts.user_token_in_account,
        &accounts.boss_token_in_account,
        &accounts.user,
        None,
        token_in_amount,
    )?;

    let minted = distribute_token_out(DistributeTokenOutParams {
        token_out_program: &accounts.token_out_program,
        token_out_mint: &accounts.token_out_mint,
        token_out_amount: quote.token_out_amount,
        destination_account: &accounts.user_token_out_account,
        vault_authority: &accounts.vault_authority,
        vault_authority_bump: ctx.bumps.vault_authority,
        vault_token_out_account: accounts.vault_token_out_account.as_deref(),
        mint_authority_pda: &accounts.mint_authority_pda,
        mint_authority_bump: ctx.bumps.mint_authority_pda,
    })?;

    OfferTakenEvent::record(offer_id, &quote, minted, false, user);
    Ok(())
}
