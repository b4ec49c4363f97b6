use super::offer_state::{OfferAccount, OfferSegment, PricingModel};
use super::offer_utils::{find_offer_mut, OfferCoreError};
use crate::constants::seeds;
use crate::state::State;
use crate::utils::u64_to_dec9;
use anchor_lang::prelude::*;

/// Event emitted when a bounded segment is added to an offer.
#[event]
pub struct OfferSegmentAddedEvent {
    pub offer_id: u64,
    pub segment_id: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub start_price: u64,
    pub end_price: u64,
    pub price_fix_duration: u64,
}

/// Account structure for adding a bounded segment to an offer.
#[derive(Accounts)]
pub struct AddOfferSegment<'info> {
    /// The offer registry containing all offers
    #[account(mut, seeds = [seeds::OFFERS], bump)]
    pub offer_account: AccountLoader<'info, OfferAccount>,

    /// Program state, ensures `boss` is authorized.
    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Account<'info, State>,

    /// The signer authorizing the segment addition (must be boss).
    pub boss: Signer<'info>,
}

/// Adds a bounded pricing segment `[start_time, end_time)` to an offer.
///
/// Segments of one offer never overlap; adjacent windows are allowed.
/// Within the window the price rises from `start_price` to `end_price` in
/// steps of `price_fix_duration` seconds.
///
/// # Errors
/// - [`AddOfferSegmentErrorCode::ZeroValue`] if any argument is zero.
/// - [`AddOfferSegmentErrorCode::InvalidTimeRange`] if start_time >= end_time.
/// - [`AddOfferSegmentErrorCode::InvalidPriceRange`] if start_price >= end_price.
/// - [`AddOfferSegmentErrorCode::OverlappingSegment`] if the window intersects an existing segment.
/// - [`AddOfferSegmentErrorCode::TooManySegments`] if every segment slot is taken.
/// - `WrongPricingModel` if the offer is priced by growth vectors.
pub fn add_offer_segment(
    ctx: Context<AddOfferSegment>,
    offer_id: u64,
    start_time: u64,
    end_time: u64,
    start_price: u64,
    end_price: u64,
    price_fix_duration: u64,
) -> Result<()> {
    for value in [start_time, end_time, start_price, end_price, price_fix_duration] {
        require!(value > 0, AddOfferSegmentErrorCode::ZeroValue);
    }
    require!(
        start_time < end_time,
        AddOfferSegmentErrorCode::InvalidTimeRange
    );
    require!(
        start_price < end_price,
        AddOfferSegmentErrorCode::InvalidPriceRange
    );

    let offer_account = &mut ctx.accounts.offer_account.load_mut()?;
    let offer = find_offer_mut(offer_account, offer_id)?;

    require!(
        offer.pricing_model()? == PricingModel::BoundedSegment,
        OfferCoreError::WrongPricingModel
    );

    require!(
        !offer
            .segments
            .iter()
            .filter(|segment| segment.segment_id != 0)
            .any(|segment| segment.overlaps(start_time, end_time)),
        AddOfferSegmentErrorCode::OverlappingSegment
    );

    let empty_slot_index = offer
        .segments
        .iter()
        .position(|segment| segment.segment_id == 0)
        .ok_or(AddOfferSegmentErrorCode::TooManySegments)?;

    let segment_id = offer
        .segments_counter
        .checked_add(1)
        .ok_or(OfferCoreError::OverflowError)?;
    offer.segments_counter = segment_id;

    offer.segments[empty_slot_index] = OfferSegment {
        segment_id,
        start_time,
        end_time,
        start_price,
        end_price,
        price_fix_duration,
    };

    msg!(
        "Segment {} added to offer {}: [{}, {}) price {} -> {}",
        segment_id,
        offer_id,
        start_time,
        end_time,
        u64_to_dec9(start_price),
        u64_to_dec9(end_price)
    );

    emit!(OfferSegmentAddedEvent {
        offer_id,
        segment_id,
        start_time,
        end_time,
        start_price,
        end_price,
        price_fix_duration,
    });

    Ok(())
}

#[error_code]
pub enum AddOfferSegmentErrorCode {
    #[msg("Invalid input: values cannot be zero")]
    ZeroValue,
    #[msg("Invalid time range: start_time must be before end_time")]
    InvalidTimeRange,
    #[msg("Invalid price range: start_price must be below end_price")]
    InvalidPriceRange,
    #[msg("Segment overlaps an existing segment")]
    OverlappingSegment,
    #[msg("Offer already has the maximum number of segments")]
    TooManySegments,
}
