//! Moves a mint's `MintTokens` authority between the boss and the program's
//! mint authority PDA. `take_offer` reads the mint on every call, so a move
//! switches fulfillment between minting and the reserve immediately.

use crate::constants::seeds;
use crate::state::State;
use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::instruction::AuthorityType;
use anchor_spl::token_interface::{set_authority, Mint, SetAuthority, TokenInterface};

#[error_code]
pub enum MintAuthorityErrorCode {
    #[msg("Boss must be the current mint authority")]
    BossNotMintAuthority,
    #[msg("Program must be the current mint authority")]
    ProgramNotMintAuthority,
}

#[event]
pub struct MintAuthorityMovedEvent {
    pub mint: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

#[derive(Accounts)]
pub struct TransferMintAuthorityToProgram<'info> {
    pub boss: Signer<'info>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Box<Account<'info, State>>,

    #[account(
        mut,
        constraint = Option::<Pubkey>::from(mint.mint_authority) == Some(boss.key())
            @ MintAuthorityErrorCode::BossNotMintAuthority
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: seeds constraint pins the PDA
    #[account(seeds = [seeds::MINT_AUTHORITY], bump)]
    pub mint_authority_pda: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct TransferMintAuthorityToBoss<'info> {
    pub boss: Signer<'info>,

    #[account(seeds = [seeds::STATE], bump = state.bump, has_one = boss)]
    pub state: Box<Account<'info, State>>,

    #[account(
        mut,
        constraint = Option::<Pubkey>::from(mint.mint_authority) == Some(mint_authority_pda.key())
            @ MintAuthorityErrorCode::ProgramNotMintAuthority
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: seeds constraint pins the PDA
    #[account(seeds = [seeds::MINT_AUTHORITY], bump)]
    pub mint_authority_pda: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Boss signs the authority over to the PDA; takes of this mint start minting.
pub fn transfer_mint_authority_to_program(
    ctx: Context<TransferMintAuthorityToProgram>,
) -> Result<()> {
    let accounts = &ctx.accounts;
    hand_over(
        &accounts.token_program,
        &accounts.mint,
        accounts.boss.to_account_info(),
        accounts.mint_authority_pda.key(),
        &[],
    )
}

/// PDA signs the authority back to the boss; takes of this mint draw on the
/// reserve again.
pub fn transfer_mint_authority_to_boss(ctx: Context<TransferMintAuthorityToBoss>) -> Result<()> {
    let accounts = &ctx.accounts;
    hand_over(
        &accounts.token_program,
        &accounts.mint,
        accounts.mint_authority_pda.to_account_info(),
        accounts.boss.key(),
        &[&[seeds::MINT_AUTHORITY, &[ctx.bumps.mint_authority_pda]]],
    )
}

fn hand_over<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    current_authority: AccountInfo<'info>,
    new_authority: Pubkey,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let old_authority = current_authority.key();

    set_authority(
        CpiContext::new_with_signer(
            token_program.key(),
            SetAuthority {
                current_authority,
                account_or_mint: mint.to_account_info(),
            },
            signer_seeds,
        ),
        AuthorityType::MintTokens,
        Some(new_authority),
    )?;

    msg!(
        "Mint authority of {} moved from {} to {}",
        mint.key(),
        old_authority,
        new_authority
    );
    emit!(MintAuthorityMovedEvent {
        mint: mint.key(),
        old_authority,
        new_authority,
    });

    Ok(())
}
