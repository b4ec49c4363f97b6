use anchor_lang::prelude::*;
use instructions::*;
use utils::ApprovalMessage;

cfg_if::cfg_if! {
    if #[cfg(any(feature = "devnet-test", feature = "devnet-dev"))] {
        declare_id!("7YSHBCtjGVR8Jiv42kNibAmVWwFqRbiEUPgNyshAddHd");
    } else {
        declare_id!("7DRDmxEAnqRoRqhmZwNFJuMBLRNa1ZMZfy1oLZErKhEj");
    }
}

pub mod constants;
pub mod instructions;
pub mod state;
pub mod utils;

/// The main program module for the Onre exchange.
///
/// The boss publishes offers that swap token_in for token_out at a price that
/// moves over time. Takers pay token_in to the boss and receive token_out,
/// minted directly when the program holds the mint authority or drawn from
/// the offer vault otherwise.
///
/// # Pricing models
/// - Growth vector: an open-ended rule that grows `base_price` by `apr` per year
///   in discrete `price_fix_duration` steps. The latest started vector applies.
/// - Bounded segment: a `[start_time, end_time)` window stepping linearly from
///   `start_price` to `end_price`.
///
/// # Security
/// - Boss-only instructions are gated with `has_one = boss` on the state account.
/// - Offer execution stops while the kill switch is enabled.
/// - Offers can require an Ed25519 approval from the configured approver.
/// - Events are emitted for every state change for off-chain traceability.
#[program]
pub mod onre_exchange {
    use super::*;

    /// Initializes the program state.
    ///
    /// The signer must be the program's upgrade authority and becomes the boss.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::initialize(ctx)
    }

    /// Initializes the offer registry.
    ///
    /// Delegates to `initialization::initialize_offers`.
    /// Only the boss can call this instruction.
    pub fn initialize_offers(ctx: Context<InitializeOffers>) -> Result<()> {
        initialize_offers::initialize_offers(ctx)
    }

    /// Creates the relay authority used by `take_offer_permissionless`.
    ///
    /// # Arguments
    /// - `ctx`: Context for `InitializePermissionlessAccount`.
    /// - `name`: Label stored in the account, trimmed, 1 to 50 characters.
    pub fn initialize_permissionless_account(
        ctx: Context<InitializePermissionlessAccount>,
        name: String,
    ) -> Result<()> {
        initialize_permissionless::initialize_permissionless_account(ctx, name)
    }

    /// Deposits tokens into the reserve.
    ///
    /// Delegates to `vault_operations::reserve`.
    /// Creates the reserve token account if it doesn't exist.
    /// Only the boss can call this instruction.
    ///
    /// # Arguments
    /// - `ctx`: Context for `OfferVaultDeposit`.
    /// - `amount`: Amount of tokens to deposit.
    pub fn offer_vault_deposit(ctx: Context<OfferVaultDeposit>, amount: u64) -> Result<()> {
        reserve::offer_vault_deposit(ctx, amount)
    }

    /// Withdraws tokens from the reserve.
    ///
    /// Delegates to `vault_operations::reserve`.
    /// Only the boss can call this instruction.
    ///
    /// # Arguments
    /// - `ctx`: Context for `OfferVaultWithdraw`.
    /// - `amount`: Amount of tokens to withdraw.
    pub fn offer_vault_withdraw(ctx: Context<OfferVaultWithdraw>, amount: u64) -> Result<()> {
        reserve::offer_vault_withdraw(ctx, amount)
    }

    /// Creates an offer.
    ///
    /// Delegates to `offer::make_offer`.
    /// Emits a `OfferMadeEvent` upon success.
    ///
    /// # Arguments
    /// - `ctx`: Context for `MakeOffer`.
    /// - `fee_basis_points`: Fee in basis points (e.g., 500 = 5%) charged when taking the offer.
    /// - `needs_approval`: Whether takers must present an approval signed by the approver.
    /// - `pricing_model`: Growth vectors or bounded segments.
    pub fn make_offer(
        ctx: Context<MakeOffer>,
        fee_basis_points: u16,
        needs_approval: bool,
        pricing_model: PricingModel,
    ) -> Result<()> {
        make_offer::make_offer(ctx, fee_basis_points, needs_approval, pricing_model)
    }

    /// Closes an offer, clearing its slot in the registry.
    pub fn close_offer(ctx: Context<ManageOffer>, offer_id: u64) -> Result<()> {
        manage_offer::close_offer(ctx, offer_id)
    }

    /// Adds a growth vector to an existing offer.
    ///
    /// Delegates to `offer::add_offer_vector`.
    /// Emits a `OfferVectorAddedEvent` upon success.
    ///
    /// # Arguments
    /// - `ctx`: Context for `AddOfferVector`.
    /// - `offer_id`: ID of the offer to add the vector to.
    /// - `start_time`: Unix timestamp when the vector becomes active.
    /// - `base_price`: Price at the start of the vector, 9 decimals.
    /// - `apr`: Annual Percentage Rate scaled by 1_000_000.
    /// - `price_fix_duration`: Duration in seconds of each price interval.
    pub fn add_offer_vector(
        ctx: Context<AddOfferVector>,
        offer_id: u64,
        start_time: u64,
        base_price: u64,
        apr: u64,
        price_fix_duration: u64,
    ) -> Result<()> {
        add_offer_vector::add_offer_vector(
            ctx,
            offer_id,
            start_time,
            base_price,
            apr,
            price_fix_duration,
        )
    }

    /// Deletes a growth vector from an offer.
    pub fn delete_offer_vector(
        ctx: Context<ManageOffer>,
        offer_id: u64,
        vector_id: u64,
    ) -> Result<()> {
        manage_offer::delete_offer_vector(ctx, offer_id, vector_id)
    }

    /// Adds a bounded segment to an existing offer.
    ///
    /// Delegates to `offer::add_offer_segment`.
    /// Emits a `OfferSegmentAddedEvent` upon success.
    pub fn add_offer_segment(
        ctx: Context<AddOfferSegment>,
        offer_id: u64,
        start_time: u64,
        end_time: u64,
        start_price: u64,
        end_price: u64,
        price_fix_duration: u64,
    ) -> Result<()> {
        add_offer_segment::add_offer_segment(
            ctx,
            offer_id,
            start_time,
            end_time,
            start_price,
            end_price,
            price_fix_duration,
        )
    }

    /// Updates the fee of an offer.
    pub fn update_offer_fee(
        ctx: Context<ManageOffer>,
        offer_id: u64,
        new_fee_basis_points: u16,
    ) -> Result<()> {
        manage_offer::update_offer_fee(ctx, offer_id, new_fee_basis_points)
    }

    /// Takes an offer.
    ///
    /// Delegates to `offer::take_offer`.
    /// The user pays `token_in_amount` (fee included) to the boss and receives
    /// token_out at the current price.
    ///
    /// # Arguments
    /// - `ctx`: Context for `TakeOffer`.
    /// - `offer_id`: ID of the offer to take.
    /// - `token_in_amount`: Gross amount of token_in paid.
    /// - `approval_message`: Required when the offer needs approval.
    pub fn take_offer(
        ctx: Context<TakeOffer>,
        offer_id: u64,
        token_in_amount: u64,
        approval_message: Option<ApprovalMessage>,
    ) -> Result<()> {
        take_offer::take_offer(ctx, offer_id, token_in_amount, approval_message)
    }

    /// Takes an offer through the program-owned relay accounts.
    ///
    /// Delegates to `offer::take_offer_permissionless`.
    /// Same pricing and amounts as `take_offer`.
    pub fn take_offer_permissionless(
        ctx: Context<TakeOfferPermissionless>,
        offer_id: u64,
        token_in_amount: u64,
        approval_message: Option<ApprovalMessage>,
    ) -> Result<()> {
        take_offer_permissionless::take_offer_permissionless(
            ctx,
            offer_id,
            token_in_amount,
            approval_message,
        )
    }

    /// Transfers the mint authority of a token from the boss to the program PDA.
    pub fn transfer_mint_authority_to_program(
        ctx: Context<TransferMintAuthorityToProgram>,
    ) -> Result<()> {
        handover::transfer_mint_authority_to_program(ctx)
    }

    /// Transfers the mint authority of a token from the program PDA back to the boss.
    pub fn transfer_mint_authority_to_boss(ctx: Context<TransferMintAuthorityToBoss>) -> Result<()> {
        handover::transfer_mint_authority_to_boss(ctx)
    }

    /// Adds an admin. Only the boss can call this instruction.
    pub fn add_admin(ctx: Context<ManageAdmins>, new_admin: Pubkey) -> Result<()> {
        admins::add_admin(ctx, new_admin)
    }

    /// Removes an admin. Only the boss can call this instruction.
    pub fn remove_admin(ctx: Context<ManageAdmins>, admin_to_remove: Pubkey) -> Result<()> {
        admins::remove_admin(ctx, admin_to_remove)
    }

    /// Removes every admin. Only the boss can call this instruction.
    pub fn clear_admins(ctx: Context<ManageAdmins>) -> Result<()> {
        admins::clear_admins(ctx)
    }

    /// Enables or disables the kill switch.
    ///
    /// Boss or admins may enable it; only the boss may disable it.
    pub fn set_kill_switch(ctx: Context<SetKillSwitch>, enable: bool) -> Result<()> {
        governance::set_kill_switch(ctx, enable)
    }

    /// Sets the trusted approver key.
    pub fn set_approver(ctx: Context<BossOnly>, approver: Pubkey) -> Result<()> {
        governance::set_approver(ctx, approver)
    }

    /// Transfers boss authority to a new account.
    pub fn set_boss(ctx: Context<BossOnly>, new_boss: Pubkey) -> Result<()> {
        governance::set_boss(ctx, new_boss)
    }

    /// Returns the current price of an offer with 9 decimals.
    pub fn get_nav(ctx: Context<GetNAV>, offer_id: u64) -> Result<u64> {
        get_nav::get_nav(ctx, offer_id)
    }
}
