use crate::constants::seeds;
use crate::state::State;
use crate::utils::transfer_tokens;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

#[error_code]
pub enum ReserveErrorCode {
    #[msg("Reserve movements must move a non-zero amount")]
    ZeroAmount,
}

/// Direction of a boss-initiated reserve movement
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReserveDirection {
    Deposit,
    Withdraw,
}

/// Emitted after every deposit into or withdrawal from the reserve
#[event]
pub struct ReserveMovedEvent {
    pub mint: Pubkey,
    pub direction: ReserveDirection,
    pub amount: u64,
    /// Reserve balance for `mint` once the movement settled
    pub reserve_balance: u64,
    pub boss: Pubkey,
}

/// Boss funds the reserve. The reserve token account is opened on first use.
#[derive(Accounts)]
pub struct OfferVaultDeposit<'info> {
    /// CHECK: PDA owning every reserve token account
    #[account(seeds = [seeds::OFFER_VAULT_AUTHORITY], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = boss,
        associated_token::token_program = token_program
    )]
    pub boss_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = boss,
        associated_token::mint = token_mint,
        associated_token::authority = vault_authority,
        associated_token::token_program = token_program
    )]
    pub vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub boss: Signer<'info>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Box<Account<'info, State>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Boss drains the reserve. The boss token account is opened on first use.
#[derive(Accounts)]
pub struct OfferVaultWithdraw<'info> {
    /// CHECK: PDA owning every reserve token account, signs the transfer
    #[account(seeds = [seeds::OFFER_VAULT_AUTHORITY], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = boss,
        associated_token::mint = token_mint,
        associated_token::authority = boss,
        associated_token::token_program = token_program
    )]
    pub boss_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = vault_authority,
        associated_token::token_program = token_program
    )]
    pub vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub boss: Signer<'info>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Box<Account<'info, State>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Moves `amount` of the boss's tokens into the reserve.
///
/// Reserve balances back `take_offer` whenever the program does not hold
/// the token_out mint authority.
pub fn offer_vault_deposit(ctx: Context<OfferVaultDeposit>, amount: u64) -> Result<()> {
    require!(amount > 0, ReserveErrorCode::ZeroAmount);

    transfer_tokens(
        &ctx.accounts.token_mint,
        &ctx.accounts.token_program,
        &ctx.accounts.boss_token_account,
        &ctx.accounts.vault_token_account,
        &ctx.accounts.boss,
        None,
        amount,
    )?;

    ctx.accounts.vault_token_account.reload()?;
    record_movement(
        ctx.accounts.token_mint.key(),
        ReserveDirection::Deposit,
        amount,
        ctx.accounts.vault_token_account.amount,
        ctx.accounts.boss.key(),
    );

    Ok(())
}

/// Moves `amount` from the reserve back to the boss.
///
/// A reserve holding less than `amount` fails inside the token program.
pub fn offer_vault_withdraw(ctx: Context<OfferVaultWithdraw>, amount: u64) -> Result<()> {
    require!(amount > 0, ReserveErrorCode::ZeroAmount);

    let vault_signer: &[&[&[u8]]] =
        &[&[seeds::OFFER_VAULT_AUTHORITY, &[ctx.bumps.vault_authority]]];
    transfer_tokens(
        &ctx.accounts.token_mint,
        &ctx.accounts.token_program,
        &ctx.accounts.vault_token_account,
        &ctx.accounts.boss_token_account,
        &ctx.accounts.vault_authority,
        Some(vault_signer),
        amount,
    )?;

    ctx.accounts.vault_token_account.reload()?;
    record_movement(
        ctx.accounts.token_mint.key(),
        ReserveDirection::Withdraw,
        amount,
        ctx.accounts.vault_token_account.amount,
        ctx.accounts.boss.key(),
    );

    Ok(())
}

fn record_movement(
    mint: Pubkey,
    direction: ReserveDirection,
    amount: u64,
    reserve_balance: u64,
    boss: Pubkey,
) {
    msg!(
        "Reserve {:?} of {} for mint {}, balance now {}",
        direction,
        amount,
        mint,
        reserve_balance
    );

    emit!(ReserveMovedEvent {
        mint,
        direction,
        amount,
        reserve_balance,
        boss,
    });
}
