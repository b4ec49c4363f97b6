use crate::constants::seeds;
use crate::instructions::offer::{calculate_offer_price_at, find_offer, OfferAccount};
use crate::utils::u64_to_dec9;
use anchor_lang::prelude::*;

#[event]
pub struct NavQueriedEvent {
    pub offer_id: u64,
    /// 9 decimals
    pub price: u64,
    pub at: u64,
}

/// Read-only access to the offer registry; open to any caller.
#[derive(Accounts)]
pub struct GetNAV<'info> {
    #[account(seeds = [seeds::OFFERS], bump)]
    pub offer_account: AccountLoader<'info, OfferAccount>,
}

/// Price a take of `offer_id` would be sized at in this slot.
///
/// The value is returned through Anchor return data with 9 decimals
/// (1_000_000_000 = 1.0). Fails like a take would when no vector or segment
/// covers the current time.
pub fn get_nav(ctx: Context<GetNAV>, offer_id: u64) -> Result<u64> {
    let offer = find_offer(&*ctx.accounts.offer_account.load()?, offer_id)?;
    let at = Clock::get()?.unix_timestamp as u64;
    let price = calculate_offer_price_at(&offer, at)?;

    msg!("Offer {} NAV {} at {}", offer_id, u64_to_dec9(price), at);
    emit!(NavQueriedEvent {
        offer_id,
        price,
        at,
    });

    Ok(price)
}
