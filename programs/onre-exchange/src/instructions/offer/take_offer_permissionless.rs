use super::offer_state::OfferAccount;
use super::offer_utils::{
    distribute_token_out, find_offer, process_offer_core, DistributeTokenOutParams,
};
use super::take_offer::{OfferTakenEvent, TakeOfferErrorCode};
use crate::constants::seeds;
use crate::state::{PermissionlessAuthority, State};
use crate::utils::{transfer_tokens, verify_offer_approval, ApprovalMessage};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Same swap as `TakeOffer`, with both tokens passing through accounts owned
/// by the permissionless authority PDA so the user never transfers to the
/// boss directly.
#[derive(Accounts)]
pub struct TakeOfferPermissionless<'info> {
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

    /// Must have been created by `initialize_permissionless_account`
    #[account(
        seeds = [seeds::PERMISSIONLESS_AUTHORITY],
        bump = permissionless_authority.bump
    )]
    pub permissionless_authority: Box<Account<'info, PermissionlessAuthority>>,

    /// Relay leg for token_in. Any balance it held before is left untouched
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = token_in_mint,
        associated_token::authority = permissionless_authority,
        associated_token::token_program = token_in_program
    )]
    pub permissionless_token_in_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Relay leg for token_out
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = token_out_mint,
        associated_token::authority = permissionless_authority,
        associated_token::token_program = token_out_program
    )]
    pub permissionless_token_out_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_in_mint: Box<InterfaceAccount<'info, Mint>>,
    pub token_in_program: Interface<'info, TokenInterface>,

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

    /// Pays for any relay or user account created on the way
    #[account(mut)]
    pub user: Signer<'info>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Relayed take. Quote, fee and fulfillment follow `take_offer`; the
/// transfers become four legs:
///
/// 1. user -> relay(token_in), the gross amount
/// 2. relay(token_in) -> boss, the same gross amount
/// 3. mint or vault -> relay(token_out)
/// 4. relay(token_out) -> user
///
/// Legs 1 and 2 move the same amount, as do legs 3 and 4, so the relay
/// balances end where they started.
pub fn take_offer_permissionless(
    ctx: Context<TakeOfferPermissionless>,
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

    let relay = accounts.permissionless_authority.to_account_info();
    let relay_seeds: &[&[&[u8]]] = &[&[
        seeds::PERMISSIONLESS_AUTHORITY,
        &[accounts.permissionless_authority.bump],
    ]];

    // 1. user -> relay(token_in)
    transfer_tokens(
        &accounts.token_in_mint,
        &accounts.token_in_program,
        &accounts.user_token_in_account,
        &accounts.permissionless_token_in_account,
        &accounts.user,
        None,
        token_in_amount,
    )?;

    // 2. relay(token_in) -> boss
    transfer_tokens(
        &accounts.token_in_mint,
        &accounts.token_in_program,
        &accounts.permissionless_token_in_account,
        &accounts.boss_token_in_account,
        &relay,
        Some(relay_seeds),
        token_in_amount,
    )?;

    // 3. mint or vault -> relay(token_out)
    let minted = distribute_token_out(DistributeTokenOutParams {
        token_out_program: &accounts.token_out_program,
        token_out_mint: &accounts.token_out_mint,
        token_out_amount: quote.token_out_amount,
        destination_account: &accounts.permissionless_token_out_account,
        vault_authority: &accounts.vault_authority,
        vault_authority_bump: ctx.bumps.vault_authority,
        vault_token_out_account: accounts.vault_token_out_account.as_deref(),
        mint_authority_pda: &accounts.mint_authority_pda,
        mint_authority_bump: ctx.bumps.mint_authority_pda,
    })?;

    // 4. relay(token_out) -> user
    transfer_tokens(
        &accounts.token_out_mint,
        &accounts.token_out_program,
        &accounts.permissionless_token_out_account,
        &accounts.user_token_out_account,
        &relay,
        Some(relay_seeds),
        quote.token_out_amount,
    )?;

    OfferTakenEvent::record(offer_id, &quote, minted, true, user);
    Ok(())
}
