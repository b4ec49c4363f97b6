use crate::constants::seeds;
use crate::instructions::offer::OfferAccount;
use crate::state::State;
use anchor_lang::prelude::*;

#[event]
pub struct OfferRegistryInitializedEvent {
    pub boss: Pubkey,
    /// Number of offer slots
    pub capacity: u8,
}

/// Creates the zero-copy offer registry PDA.
///
/// The account is allocated zeroed, which already means every slot is empty
/// and no offer ID has been issued yet.
#[derive(Accounts)]
pub struct InitializeOffers<'info> {
    #[account(
        init,
        payer = boss,
        space = 8 + std::mem::size_of::<OfferAccount>(),
        seeds = [seeds::OFFERS],
        bump
    )]
    pub offer_account: AccountLoader<'info, OfferAccount>,

    #[account(mut)]
    pub boss: Signer<'info>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Box<Account<'info, State>>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_offers(ctx: Context<InitializeOffers>) -> Result<()> {
    let registry = ctx.accounts.offer_account.load_init()?;
    let capacity = registry.offers.len() as u8;

    msg!("Offer registry created with {} slots", capacity);
    emit!(OfferRegistryInitializedEvent {
        boss: ctx.accounts.boss.key(),
        capacity,
    });

    Ok(())
}
