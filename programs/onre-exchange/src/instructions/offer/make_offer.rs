use super::offer_state::{Offer, OfferAccount, PricingModel};
use crate::constants::{seeds, MAX_BASIS_POINTS};
use crate::state::State;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use bytemuck::Zeroable;

#[error_code]
pub enum MakeOfferErrorCode {
    /// Every registry slot holds a live offer, or the ID counter is exhausted
    #[msg("Offer account is full, cannot create more offers")]
    AccountFull,
    #[msg("Invalid fee: fee_basis_points must be <= 10000")]
    InvalidFee,
    #[msg("token_in and token_out mints must differ")]
    SameMint,
}

#[event]
pub struct OfferMadeEvent {
    pub offer_id: u64,
    pub token_in_mint: Pubkey,
    pub token_out_mint: Pubkey,
    pub fee_basis_points: u16,
    pub needs_approval: bool,
    pub pricing_model: PricingModel,
    pub boss: Pubkey,
}

/// Opens a new offer trading `token_in_mint` for `token_out_mint`.
#[derive(Accounts)]
pub struct MakeOffer<'info> {
    #[account(mut, seeds = [seeds::OFFERS], bump)]
    pub offer_account: AccountLoader<'info, OfferAccount>,

    pub token_in_mint: InterfaceAccount<'info, Mint>,
    pub token_out_mint: InterfaceAccount<'info, Mint>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Account<'info, State>,

    pub boss: Signer<'info>,
}

/// Registers an offer with no curve attached.
///
/// The offer is untakeable until `add_offer_vector` or `add_offer_segment`
/// (whichever matches `pricing_model`) gives it a price.
///
/// # Errors
/// - [`MakeOfferErrorCode::InvalidFee`] above 10_000 bps.
/// - [`MakeOfferErrorCode::SameMint`] when both sides are the same mint.
/// - [`MakeOfferErrorCode::AccountFull`] with no free slot.
pub fn make_offer(
    ctx: Context<MakeOffer>,
    fee_basis_points: u16,
    needs_approval: bool,
    pricing_model: PricingModel,
) -> Result<()> {
    let token_in_mint = ctx.accounts.token_in_mint.key();
    let token_out_mint = ctx.accounts.token_out_mint.key();

    require!(
        fee_basis_points <= MAX_BASIS_POINTS,
        MakeOfferErrorCode::InvalidFee
    );
    require_keys_neq!(token_in_mint, token_out_mint, MakeOfferErrorCode::SameMint);

    let mut registry = ctx.accounts.offer_account.load_mut()?;
    let offer = claim_slot(&mut registry)?;
    offer.token_in_mint = token_in_mint;
    offer.token_out_mint = token_out_mint;
    offer.fee_basis_points = fee_basis_points;
    offer.needs_approval = needs_approval.into();
    offer.pricing_model = pricing_model.into();
    let offer_id = offer.offer_id;

    msg!(
        "Offer {} opened: {} -> {}, {} bps, {:?}, approval {}",
        offer_id,
        token_in_mint,
        token_out_mint,
        fee_basis_points,
        pricing_model,
        needs_approval
    );
    emit!(OfferMadeEvent {
        offer_id,
        token_in_mint,
        token_out_mint,
        fee_basis_points,
        needs_approval,
        pricing_model,
        boss: ctx.accounts.boss.key(),
    });

    Ok(())
}

/// Takes the lowest empty slot and stamps it with the next ID.
///
/// The counter only moves forward, so a closed offer's ID never comes back.
fn claim_slot(registry: &mut OfferAccount) -> Result<&mut Offer> {
    let next_id = registry
        .counter
        .checked_add(1)
        .ok_or(MakeOfferErrorCode::AccountFull)?;

    let offer = registry
        .offers
        .iter_mut()
        .find(|offer| offer.offer_id == 0)
        .ok_or(MakeOfferErrorCode::AccountFull)?;

    *offer = Offer::zeroed();
    offer.offer_id = next_id;
    registry.counter = next_id;

    Ok(offer)
}
