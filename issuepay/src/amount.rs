//! Conversion of human-readable token amounts into raw on-chain units.
//!
//! Callers state reward amounts in human units (`1.5` tokens); the chain
//! wants raw integer units scaled by the token's decimal precision. The
//! conversion is exact: amounts that cannot be represented in the token's
//! precision are rejected rather than rounded, since a silently rounded
//! permit would authorize a different amount than the caller approved.

use alloy_primitives::U256;
use rust_decimal::Decimal;

/// Errors from converting a human amount into raw token units.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// Reward amounts are never negative.
    #[error("amount must not be negative, got {0}")]
    Negative(Decimal),

    /// The amount carries more fractional digits than the token supports.
    #[error("amount {amount} has more fractional digits than the token's {decimals} decimals")]
    ExcessPrecision {
        /// The offending amount.
        amount: Decimal,
        /// The token's decimal precision.
        decimals: u8,
    },

    /// The scaled amount does not fit in 256 bits.
    #[error("amount {0} does not fit the token's raw unit range")]
    Overflow(Decimal),
}

/// Scales `amount` by `10^decimals` into raw token units.
///
/// `1.5` with 6 decimals becomes `1_500_000`; `0` stays `0`.
///
/// # Errors
///
/// Returns [`AmountError`] when the amount is negative, has fractional
/// digits beyond the token's precision, or overflows 256 bits.
pub fn to_raw_units(amount: Decimal, decimals: u8) -> Result<U256, AmountError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative(amount));
    }

    // normalize() strips trailing zeros, so "1.50" and "1.5" scale alike.
    let normalized = amount.normalize();
    let fractional_digits = normalized.scale();
    if fractional_digits > u32::from(decimals) {
        return Err(AmountError::ExcessPrecision { amount, decimals });
    }

    let shift = u32::from(decimals) - fractional_digits;
    let factor = U256::from(10u8)
        .checked_pow(U256::from(shift))
        .ok_or(AmountError::Overflow(amount))?;
    U256::from(normalized.mantissa().unsigned_abs())
        .checked_mul(factor)
        .ok_or(AmountError::Overflow(amount))
}
