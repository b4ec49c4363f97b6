//! Fixed-point helpers shared by the pricing and exchange math.
//!
//! Every helper works in `u128` and reports overflow or division by zero as
//! `None`; callers map that to their own error code.

/// Integer ceil division for `u128`.
///
/// Returns `None` on division by zero or overflow.
pub fn ceil_div_u128(numerator: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }

    numerator
        .checked_add(denominator.checked_sub(1)?)
        .and_then(|adjusted| adjusted.checked_div(denominator))
}

/// `a * b / c` truncated toward zero, computed in `u128`.
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Option<u128> {
    a.checked_mul(b)?.checked_div(c)
}

/// `10^exp` as `u128`, `None` once it no longer fits.
pub fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// Narrows a `u128` result back to `u64`.
pub fn to_u64(value: u128) -> Option<u64> {
    u64::try_from(value).ok()
}
