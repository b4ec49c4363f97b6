use crate::constants::{MAX_OFFERS, MAX_SEGMENTS, MAX_VECTORS};
use anchor_lang::prelude::*;

/// Registry of all offers, a single PDA with fixed offer slots
///
/// Empty slots have `offer_id == 0`. `counter` holds the last issued ID so
/// IDs are never reused after an offer is closed.
#[account(zero_copy)]
#[repr(C)]
pub struct OfferAccount {
    pub offers: [Offer; MAX_OFFERS],
    pub counter: u64,
}

/// Offer struct for token exchange with time-based pricing
#[zero_copy]
#[repr(C)]
pub struct Offer {
    /// Unique identifier, 0 marks an empty slot
    pub offer_id: u64,
    pub token_in_mint: Pubkey,
    pub token_out_mint: Pubkey,
    /// Growth vectors, used when `pricing_model` is `GrowthVector`
    pub vectors: [OfferVector; MAX_VECTORS],
    /// Bounded segments, used when `pricing_model` is `BoundedSegment`
    pub segments: [OfferSegment; MAX_SEGMENTS],
    /// Last issued vector ID
    pub vectors_counter: u64,
    /// Last issued segment ID
    pub segments_counter: u64,
    /// Fee in basis points (10000 = 100%)
    pub fee_basis_points: u16,
    /// Non-zero when takers must present a signed approval
    pub needs_approval: u8,
    /// `PricingModel` discriminant, fixed at creation
    pub pricing_model: u8,
    pub reserved: [u8; 124],
}

impl Offer {
    pub fn needs_approval(&self) -> bool {
        self.needs_approval != 0
    }

    pub fn pricing_model(&self) -> Result<PricingModel> {
        PricingModel::try_from(self.pricing_model)
    }
}

/// Growth vector: open-ended APR driven price rule
#[zero_copy]
#[repr(C)]
#[derive(Default)]
pub struct OfferVector {
    /// 1-based ID, 0 marks an empty slot
    pub vector_id: u64,
    /// Unix timestamp from which the vector may be selected
    pub start_time: u64,
    /// Anchor for interval counting, `max(start_time, now)` at insertion
    pub valid_from: u64,
    /// Price at `valid_from` with 9 decimals
    pub base_price: u64,
    /// Annual Percentage Rate scaled by 1_000_000
    ///
    /// - 0 = 0% APR (fixed price)
    /// - 36_500 = 3.65% APR
    /// - 1_000_000 = 100% APR
    pub apr: u64,
    /// Length in seconds of each fixed-price interval
    pub price_fix_duration: u64,
}

/// Bounded segment: price rule valid inside `[start_time, end_time)`
#[zero_copy]
#[repr(C)]
#[derive(Default)]
pub struct OfferSegment {
    /// 1-based ID, 0 marks an empty slot
    pub segment_id: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub start_price: u64,
    pub end_price: u64,
    pub price_fix_duration: u64,
}

impl OfferSegment {
    /// Half-open interval intersection
    pub fn overlaps(&self, start_time: u64, end_time: u64) -> bool {
        self.start_time < end_time && start_time < self.end_time
    }
}

/// Price curve variant attached to an offer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PricingModel {
    GrowthVector,
    BoundedSegment,
}

impl From<PricingModel> for u8 {
    fn from(model: PricingModel) -> u8 {
        match model {
            PricingModel::GrowthVector => 0,
            PricingModel::BoundedSegment => 1,
        }
    }
}

impl TryFrom<u8> for PricingModel {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(PricingModel::GrowthVector),
            1 => Ok(PricingModel::BoundedSegment),
            _ => err!(OfferStateErrorCode::UnknownPricingModel),
        }
    }
}

#[error_code]
pub enum OfferStateErrorCode {
    #[msg("Unknown pricing model")]
    UnknownPricingModel,
}
