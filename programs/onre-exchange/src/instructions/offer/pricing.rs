//! Price curve selection and price formulas.
//!
//! Everything here is a pure function of the offer and a timestamp so the
//! take instructions, the NAV query and the unit tests share one code path.

use super::offer_state::{Offer, OfferSegment, OfferVector, PricingModel};
use super::offer_utils::OfferCoreError;
use crate::constants::{APR_SCALE, SECONDS_PER_YEAR};
use crate::utils::math_utils::{mul_div_floor, to_u64};
use anchor_lang::prelude::*;

/// Finds the growth vector active at `time`
///
/// Among non-empty vectors with `start_time <= time` the latest start wins;
/// equal start times resolve to the most recently inserted vector.
pub fn find_active_vector_at(offer: &Offer, time: u64) -> Result<OfferVector> {
    let active_vector = offer
        .vectors
        .iter()
        .filter(|vector| vector.vector_id != 0)
        .filter(|vector| vector.start_time <= time)
        .max_by_key(|vector| (vector.start_time, vector.vector_id))
        .ok_or(OfferCoreError::NoActiveVector)?;

    Ok(*active_vector)
}

/// Finds the segment whose `[start_time, end_time)` window contains `time`
pub fn find_active_segment_at(offer: &Offer, time: u64) -> Result<OfferSegment> {
    let active_segment = offer
        .segments
        .iter()
        .filter(|segment| segment.segment_id != 0)
        .find(|segment| segment.start_time <= time && time < segment.end_time)
        .ok_or(OfferCoreError::NoActiveSegment)?;

    Ok(*active_segment)
}

/// Calculates the price for a growth vector after `elapsed_time` seconds.
///
/// Formula: P = P0 * (1 + apr * elapsed_time / (APR_SCALE * SECONDS_PER_YEAR))
///
/// Computed as `P0 * (S + apr * t) / S` with `S = APR_SCALE * SECONDS_PER_YEAR`
/// in `u128`, truncating.
pub fn calculate_vector_price(apr: u64, base_price: u64, elapsed_time: u64) -> Result<u64> {
    let factor_den = APR_SCALE * SECONDS_PER_YEAR;
    let factor_num = (apr as u128)
        .checked_mul(elapsed_time as u128)
        .and_then(|growth| growth.checked_add(factor_den))
        .ok_or(OfferCoreError::OverflowError)?;

    mul_div_floor(base_price as u128, factor_num, factor_den)
        .and_then(to_u64)
        .ok_or_else(|| error!(OfferCoreError::OverflowError))
}

/// Price of a growth vector at `time` using discrete price-fix windows.
///
/// The price snaps to the END of the current window:
///   n = floor((time - valid_from) / price_fix_duration) + 1
///   P(time) = calculate_vector_price(apr, base_price, n * price_fix_duration)
///
/// `time` earlier than `valid_from` is treated as the first window.
pub fn calculate_step_price_at(
    apr: u64,
    base_price: u64,
    valid_from: u64,
    price_fix_duration: u64,
    time: u64,
) -> Result<u64> {
    require!(price_fix_duration > 0, OfferCoreError::OverflowError);

    let elapsed_since_start = time.saturating_sub(valid_from);
    let current_step = elapsed_since_start / price_fix_duration;

    let step_end_time = current_step
        .checked_add(1)
        .and_then(|steps| steps.checked_mul(price_fix_duration))
        .ok_or(OfferCoreError::OverflowError)?;

    calculate_vector_price(apr, base_price, step_end_time)
}

/// Price of a bounded segment at `time`.
///
/// Linear from `start_price` at `start_time` towards `end_price` at
/// `end_time`, held constant within each `price_fix_duration` step:
///   k = floor((time - start_time) / D)
///   P = start_price + (end_price - start_price) * k * D / (end_time - start_time)
pub fn calculate_segment_price_at(segment: &OfferSegment, time: u64) -> Result<u64> {
    require!(
        segment.start_time <= time && time < segment.end_time,
        OfferCoreError::NoActiveSegment
    );
    require!(segment.price_fix_duration > 0, OfferCoreError::OverflowError);

    let step = (time - segment.start_time) / segment.price_fix_duration;
    let step_start = (step as u128) * (segment.price_fix_duration as u128);
    let duration = (segment.end_time - segment.start_time) as u128;
    let price_range = segment
        .end_price
        .checked_sub(segment.start_price)
        .ok_or(OfferCoreError::OverflowError)? as u128;

    let increment =
        mul_div_floor(price_range, step_start, duration).ok_or(OfferCoreError::OverflowError)?;

    (segment.start_price as u128)
        .checked_add(increment)
        .and_then(to_u64)
        .ok_or_else(|| error!(OfferCoreError::OverflowError))
}

/// Current price of `offer` at `time` with 9 decimals, dispatching on its pricing model
pub fn calculate_offer_price_at(offer: &Offer, time: u64) -> Result<u64> {
    match offer.pricing_model()? {
        PricingModel::GrowthVector => {
            let vector = find_active_vector_at(offer, time)?;
            calculate_step_price_at(
                vector.apr,
                vector.base_price,
                vector.valid_from,
                vector.price_fix_duration,
                time,
            )
        }
        PricingModel::BoundedSegment => {
            let segment = find_active_segment_at(offer, time)?;
            calculate_segment_price_at(&segment, time)
        }
    }
}
