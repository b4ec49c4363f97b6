use crate::constants::{MAX_BASIS_POINTS, PRICE_DECIMALS};
use crate::utils::math_utils::{ceil_div_u128, mul_div_floor, pow10, to_u64};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    self, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
};

#[error_code]
pub enum TokenUtilsErrorCode {
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Price must be greater than zero")]
    InvalidPrice,
    #[msg("Fee basis points exceed 10000")]
    InvalidFee,
}

/// Fee split of a gross token_in amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeAmounts {
    /// Portion of the gross amount retained as fee
    pub fee_amount: u64,
    /// Portion used to size token_out
    pub remaining_token_in_amount: u64,
}

/// Generic token transfer that handles both user-signed and PDA-signed transfers
///
/// Uses `transfer_checked` so the same code path serves SPL Token and Token-2022 mints.
///
/// # Arguments
/// * `mint` - Mint of the transferred token
/// * `token_program` - Token program owning the mint
/// * `from_account` - Source token account
/// * `to_account` - Destination token account
/// * `authority` - Authority over the source account
/// * `signer_seeds` - PDA seeds for program-signed transfers (None for user-signed)
/// * `amount` - Amount of tokens to transfer
pub fn transfer_tokens<'info>(
    mint: &InterfaceAccount<'info, Mint>,
    token_program: &Interface<'info, TokenInterface>,
    from_account: &InterfaceAccount<'info, TokenAccount>,
    to_account: &InterfaceAccount<'info, TokenAccount>,
    authority: &AccountInfo<'info>,
    signer_seeds: Option<&[&[&[u8]]]>,
    amount: u64,
) -> Result<()> {
    let transfer_accounts = TransferChecked {
        from: from_account.to_account_info(),
        mint: mint.to_account_info(),
        to: to_account.to_account_info(),
        authority: authority.clone(),
    };

    let transfer_ctx = match signer_seeds {
        Some(seeds) => CpiContext::new_with_signer(
            token_program.key(),
            transfer_accounts,
            seeds,
        ),
        None => CpiContext::new(token_program.key(), transfer_accounts),
    };

    token_interface::transfer_checked(transfer_ctx, amount, mint.decimals)
}

/// Mints `amount` tokens to `to_account` signed by a program-derived mint authority
pub fn mint_tokens<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    to_account: &InterfaceAccount<'info, TokenAccount>,
    mint_authority: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    token_interface::mint_to(
        CpiContext::new_with_signer(
            token_program.key(),
            MintTo {
                mint: mint.to_account_info(),
                to: to_account.to_account_info(),
                authority: mint_authority.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Splits a gross amount into fee and remainder.
///
/// The fee is rounded up so rounding never favors the taker.
pub fn calculate_fees(token_in_amount: u64, fee_basis_points: u16) -> Result<FeeAmounts> {
    require!(
        fee_basis_points <= MAX_BASIS_POINTS,
        TokenUtilsErrorCode::InvalidFee
    );

    let fee = ceil_div_u128(
        (token_in_amount as u128)
            .checked_mul(fee_basis_points as u128)
            .ok_or(TokenUtilsErrorCode::MathOverflow)?,
        MAX_BASIS_POINTS as u128,
    )
    .and_then(to_u64)
    .ok_or(TokenUtilsErrorCode::MathOverflow)?;

    Ok(FeeAmounts {
        fee_amount: fee,
        remaining_token_in_amount: token_in_amount
            .checked_sub(fee)
            .ok_or(TokenUtilsErrorCode::MathOverflow)?,
    })
}

/// Calculates token_out_amount from token_in_amount, price and mint decimals.
///
/// Formula: token_out = token_in * 10^(token_out_decimals + 9) / (price * 10^token_in_decimals)
///
/// The decimal difference is folded into a single power of ten before the
/// multiplication so 18-decimal mints stay within `u128`. Truncates.
///
/// # Arguments
/// * `token_in_amount` - Amount of input tokens (net of fee)
/// * `price` - token_in per token_out with 9 decimal precision (1.0 = 1_000_000_000)
/// * `token_in_decimals` - Decimal places of input token
/// * `token_out_decimals` - Decimal places of output token
pub fn calculate_token_out_amount(
    token_in_amount: u64,
    price: u64,
    token_in_decimals: u8,
    token_out_decimals: u8,
) -> Result<u64> {
    require!(price > 0, TokenUtilsErrorCode::InvalidPrice);

    let scale_up = token_out_decimals as u32 + PRICE_DECIMALS as u32;
    let scale_down = token_in_decimals as u32;

    let amount = if scale_up >= scale_down {
        let factor = pow10(scale_up - scale_down).ok_or(TokenUtilsErrorCode::MathOverflow)?;
        mul_div_floor(token_in_amount as u128, factor, price as u128)
    } else {
        pow10(scale_down - scale_up)
            .and_then(|factor| (price as u128).checked_mul(factor))
            .and_then(|denominator| (token_in_amount as u128).checked_div(denominator))
    }
    .ok_or(TokenUtilsErrorCode::MathOverflow)?;

    Ok(to_u64(amount).ok_or(TokenUtilsErrorCode::MathOverflow)?)
}

/// Formats an u64 number as a decimal string where the last 9 digits are the fraction
pub fn u64_to_dec9(n: u64) -> String {
    let int_part = n / 1_000_000_000;
    let frac_part = n % 1_000_000_000;

    if frac_part == 0 {
        return int_part.to_string();
    }
    let mut frac = format!("{:09}", frac_part);
    while frac.ends_with('0') {
        frac.pop();
    }

    format!("{}.{}", int_part, frac)
}
