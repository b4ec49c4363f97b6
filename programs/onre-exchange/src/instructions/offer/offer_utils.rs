use super::offer_state::{Offer, OfferAccount};
use super::pricing::calculate_offer_price_at;
use crate::utils::{calculate_fees, calculate_token_out_amount, mint_tokens, transfer_tokens};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Common error codes shared by the offer instructions
#[error_code]
pub enum OfferCoreError {
    #[msg("Offer not found")]
    OfferNotFound,
    #[msg("No active vector")]
    NoActiveVector,
    #[msg("No active segment")]
    NoActiveSegment,
    #[msg("Overflow error")]
    OverflowError,
    #[msg("Invalid token in mint")]
    InvalidTokenInMint,
    #[msg("Invalid token out mint")]
    InvalidTokenOutMint,
    #[msg("Token out amount rounds down to zero")]
    ZeroOutputAmount,
    #[msg("Offer uses a different pricing model")]
    WrongPricingModel,
    #[msg("Reserve token account is required when the program cannot mint")]
    MissingReserveAccount,
}

/// Result structure for the core offer processing
pub struct OfferProcessResult {
    pub current_price: u64,
    /// token_in used to size token_out (gross minus fee)
    pub token_in_amount: u64,
    pub token_out_amount: u64,
    pub fee_amount: u64,
}

/// Core processing logic shared between both take_offer instructions
///
/// 1. Validate the mints against the offer
/// 2. Select the active curve element and price it at `now`
/// 3. Split the fee off the gross amount
/// 4. Convert the net amount into token_out at the mints' decimals
pub fn process_offer_core(
    offer: &Offer,
    token_in_amount: u64,
    token_in_mint: &InterfaceAccount<Mint>,
    token_out_mint: &InterfaceAccount<Mint>,
    now: u64,
) -> Result<OfferProcessResult> {
    require!(
        offer.token_in_mint == token_in_mint.key(),
        OfferCoreError::InvalidTokenInMint
    );
    require!(
        offer.token_out_mint == token_out_mint.key(),
        OfferCoreError::InvalidTokenOutMint
    );

    let current_price = calculate_offer_price_at(offer, now)?;

    let fee_amounts = calculate_fees(token_in_amount, offer.fee_basis_points)?;

    let token_out_amount = calculate_token_out_amount(
        fee_amounts.remaining_token_in_amount,
        current_price,
        token_in_mint.decimals,
        token_out_mint.decimals,
    )?;
    require!(token_out_amount > 0, OfferCoreError::ZeroOutputAmount);

    Ok(OfferProcessResult {
        current_price,
        token_in_amount: fee_amounts.remaining_token_in_amount,
        token_out_amount,
        fee_amount: fee_amounts.fee_amount,
    })
}

/// Finds an offer by ID in the offer account
pub fn find_offer(offer_account: &OfferAccount, offer_id: u64) -> Result<Offer> {
    if offer_id == 0 {
        return Err(error!(OfferCoreError::OfferNotFound));
    }

    let offer = offer_account
        .offers
        .iter()
        .find(|offer| offer.offer_id == offer_id)
        .ok_or(OfferCoreError::OfferNotFound)?;

    Ok(*offer)
}

/// Finds a mutable reference to an offer by ID in the offer account
pub fn find_offer_mut(offer_account: &mut OfferAccount, offer_id: u64) -> Result<&mut Offer> {
    if offer_id == 0 {
        return Err(error!(OfferCoreError::OfferNotFound));
    }

    let offer = offer_account
        .offers
        .iter_mut()
        .find(|offer| offer.offer_id == offer_id)
        .ok_or(OfferCoreError::OfferNotFound)?;

    Ok(offer)
}

/// True when the program's mint authority PDA currently controls `mint`
///
/// Read from the mint on every call so authority transfers take effect immediately.
pub fn program_controls_mint(mint: &InterfaceAccount<Mint>, mint_authority_pda: &Pubkey) -> bool {
    Option::<Pubkey>::from(mint.mint_authority) == Some(*mint_authority_pda)
}

/// Accounts needed to deliver token_out, by minting or from the reserve
pub struct DistributeTokenOutParams<'a, 'info> {
    pub token_out_program: &'a Interface<'info, TokenInterface>,
    pub token_out_mint: &'a InterfaceAccount<'info, Mint>,
    pub token_out_amount: u64,
    pub destination_account: &'a InterfaceAccount<'info, TokenAccount>,
    pub vault_authority: &'a AccountInfo<'info>,
    pub vault_authority_bump: u8,
    pub vault_token_out_account: Option<&'a InterfaceAccount<'info, TokenAccount>>,
    pub mint_authority_pda: &'a AccountInfo<'info>,
    pub mint_authority_bump: u8,
}

/// Delivers token_out to `destination_account`
///
/// Mints directly when the program holds the mint authority, otherwise
/// transfers from the reserve, which then has to be supplied. A reserve
/// shortfall fails inside the token program.
///
/// Returns true when the tokens were minted.
pub fn distribute_token_out(params: DistributeTokenOutParams) -> Result<bool> {
    if program_controls_mint(params.token_out_mint, params.mint_authority_pda.key) {
        mint_tokens(
            params.token_out_program,
            params.token_out_mint,
            params.destination_account,
            params.mint_authority_pda,
            &[&[crate::constants::seeds::MINT_AUTHORITY, &[params.mint_authority_bump]]],
            params.token_out_amount,
        )?;
        return Ok(true);
    }

    let reserve = params
        .vault_token_out_account
        .ok_or(OfferCoreError::MissingReserveAccount)?;

    transfer_tokens(
        params.token_out_mint,
        params.token_out_program,
        reserve,
        params.destination_account,
        params.vault_authority,
        Some(&[&[
            crate::constants::seeds::OFFER_VAULT_AUTHORITY,
            &[params.vault_authority_bump],
        ]]),
        params.token_out_amount,
    )?;

    Ok(false)
}
