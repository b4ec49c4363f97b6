use super::offer_state::{OfferAccount, OfferVector, PricingModel};
use super::offer_utils::{find_offer_mut, OfferCoreError};
use crate::constants::seeds;
use crate::state::State;
use crate::utils::u64_to_dec9;
use anchor_lang::prelude::*;

#[error_code]
pub enum AddOfferVectorErrorCode {
    #[msg("Invalid time range: start_time must be after the latest existing vector")]
    InvalidTimeRange,
    #[msg("Invalid input: values cannot be zero")]
    ZeroValue,
    #[msg("Offer already has the maximum number of vectors")]
    TooManyVectors,
}

#[event]
pub struct OfferVectorAddedEvent {
    pub offer_id: u64,
    pub vector_id: u64,
    pub start_time: u64,
    pub valid_from: u64,
    pub base_price: u64,
    pub apr: u64,
    pub price_fix_duration: u64,
}

#[derive(Accounts)]
pub struct AddOfferVector<'info> {
    #[account(mut, seeds = [seeds::OFFERS], bump)]
    pub offer_account: AccountLoader<'info, OfferAccount>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Account<'info, State>,

    pub boss: Signer<'info>,
}

/// Appends a growth vector to a `GrowthVector` offer.
///
/// Vectors are append-only in time: `start_time` has to be strictly later
/// than every vector still stored. Interval counting is anchored at
/// `valid_from = max(start_time, now)`, so a back-dated vector starts at its
/// base price instead of catching up on past intervals.
///
/// `apr` is scaled by 1_000_000 (36_500 = 3.65%); 0 pins the price at
/// `base_price`.
///
/// # Errors
/// - [`AddOfferVectorErrorCode::ZeroValue`] for a zero start, price or duration.
/// - [`AddOfferVectorErrorCode::InvalidTimeRange`] when `start_time` does not
///   move past the latest stored vector.
/// - [`AddOfferVectorErrorCode::TooManyVectors`] with no free slot.
/// - `WrongPricingModel` on a `BoundedSegment` offer.
pub fn add_offer_vector(
    ctx: Context<AddOfferVector>,
    offer_id: u64,
    start_time: u64,
    base_price: u64,
    apr: u64,
    price_fix_duration: u64,
) -> Result<()> {
    require!(
        start_time != 0 && base_price != 0 && price_fix_duration != 0,
        AddOfferVectorErrorCode::ZeroValue
    );

    let mut registry = ctx.accounts.offer_account.load_mut()?;
    let offer = find_offer_mut(&mut registry, offer_id)?;
    require!(
        offer.pricing_model()? == PricingModel::GrowthVector,
        OfferCoreError::WrongPricingModel
    );

    let latest_start = offer
        .vectors
        .iter()
        .filter(|vector| vector.vector_id != 0)
        .map(|vector| vector.start_time)
        .max();
    require!(
        latest_start.map_or(true, |latest| start_time > latest),
        AddOfferVectorErrorCode::InvalidTimeRange
    );

    let slot = offer
        .vectors
        .iter()
        .position(|vector| vector.vector_id == 0)
        .ok_or(AddOfferVectorErrorCode::TooManyVectors)?;

    let vector_id = offer
        .vectors_counter
        .checked_add(1)
        .ok_or(OfferCoreError::OverflowError)?;
    let valid_from = start_time.max(Clock::get()?.unix_timestamp as u64);

    offer.vectors_counter = vector_id;
    offer.vectors[slot] = OfferVector {
        vector_id,
        start_time,
        valid_from,
        base_price,
        apr,
        price_fix_duration,
    };

    msg!(
        "Offer {} vector {}: from {} at {}, apr {}",
        offer_id,
        vector_id,
        valid_from,
        u64_to_dec9(base_price),
        apr
    );
    emit!(OfferVectorAddedEvent {
        offer_id,
        vector_id,
        start_time,
        valid_from,
        base_price,
        apr,
        price_fix_duration,
    });

    Ok(())
}
