//! Boss edits to offers that already exist in the registry.

use super::offer_state::{OfferAccount, OfferVector};
use super::offer_utils::find_offer_mut;
use crate::constants::{seeds, MAX_BASIS_POINTS};
use crate::state::State;
use anchor_lang::prelude::*;
use bytemuck::Zeroable;

#[error_code]
pub enum ManageOfferErrorCode {
    #[msg("Invalid fee: fee_basis_points must be <= 10000")]
    InvalidFee,
    #[msg("Vector with the specified ID was not found in the offer")]
    VectorNotFound,
}

#[event]
pub struct CloseOfferEvent {
    pub offer_id: u64,
    pub boss: Pubkey,
}

#[event]
pub struct OfferFeeUpdatedEvent {
    pub offer_id: u64,
    pub old_fee_basis_points: u16,
    pub new_fee_basis_points: u16,
    pub boss: Pubkey,
}

#[event]
pub struct OfferVectorDeletedEvent {
    pub offer_id: u64,
    pub vector_id: u64,
}

#[derive(Accounts)]
pub struct ManageOffer<'info> {
    #[account(mut, seeds = [seeds::OFFERS], bump)]
    pub offer_account: AccountLoader<'info, OfferAccount>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Account<'info, State>,

    pub boss: Signer<'info>,
}

/// Zeroes the offer's slot. Its ID stays retired.
pub fn close_offer(ctx: Context<ManageOffer>, offer_id: u64) -> Result<()> {
    let mut registry = ctx.accounts.offer_account.load_mut()?;
    *find_offer_mut(&mut registry, offer_id)? = Zeroable::zeroed();

    msg!("Offer {} closed", offer_id);
    emit!(CloseOfferEvent {
        offer_id,
        boss: ctx.accounts.boss.key(),
    });

    Ok(())
}

/// Applies to takes from the next transaction on; 10_000 takes everything.
pub fn update_offer_fee(
    ctx: Context<ManageOffer>,
    offer_id: u64,
    new_fee_basis_points: u16,
) -> Result<()> {
    require!(
        new_fee_basis_points <= MAX_BASIS_POINTS,
        ManageOfferErrorCode::InvalidFee
    );

    let mut registry = ctx.accounts.offer_account.load_mut()?;
    let offer = find_offer_mut(&mut registry, offer_id)?;
    let old_fee_basis_points = std::mem::replace(&mut offer.fee_basis_points, new_fee_basis_points);

    msg!(
        "Offer {} fee {} -> {} bps",
        offer_id,
        old_fee_basis_points,
        new_fee_basis_points
    );
    emit!(OfferFeeUpdatedEvent {
        offer_id,
        old_fee_basis_points,
        new_fee_basis_points,
        boss: ctx.accounts.boss.key(),
    });

    Ok(())
}

/// Frees the vector's slot without touching the others. Prices fall back to
/// whichever remaining vector is latest among those already started.
pub fn delete_offer_vector(ctx: Context<ManageOffer>, offer_id: u64, vector_id: u64) -> Result<()> {
    require!(vector_id != 0, ManageOfferErrorCode::VectorNotFound);

    let mut registry = ctx.accounts.offer_account.load_mut()?;
    let offer = find_offer_mut(&mut registry, offer_id)?;

    let slot = offer
        .vectors
        .iter_mut()
        .find(|vector| vector.vector_id == vector_id)
        .ok_or(ManageOfferErrorCode::VectorNotFound)?;
    *slot = OfferVector::default();

    msg!("Vector {} removed from offer {}", vector_id, offer_id);
    emit!(OfferVectorDeletedEvent {
        offer_id,
        vector_id,
    });

    Ok(())
}
