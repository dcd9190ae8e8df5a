//! Decimal ⇄ base-unit conversion
//!
//! Amounts inside the bot are `rust_decimal::Decimal` (ether / token units),
//! amounts on the wire are `U256` base units (wei). Converting through the
//! decimal mantissa keeps the arithmetic exact; binary floats never touch a
//! currency amount.

use crate::error::{Result, VolumeBotError};
use alloy::primitives::U256;
use rust_decimal::Decimal;

/// Native currency precision (1 ether = 10^18 wei)
pub const ETHER_DECIMALS: u8 = 18;

/// Largest scale a `Decimal` can carry
const MAX_DECIMAL_SCALE: u32 = 28;

/// Largest mantissa a `Decimal` can carry (2^96 - 1)
const MAX_DECIMAL_MANTISSA: u128 = (1u128 << 96) - 1;

fn pow10(exp: u32) -> Result<U256> {
    U256::from(10u64)
        .checked_pow(U256::from(exp))
        .ok_or_else(|| VolumeBotError::external("units", format!("10^{} overflows U256", exp)))
}

/// Convert a decimal amount to base units. Digits beyond `decimals` are
/// truncated. Negative amounts have no base-unit representation and are
/// rejected.
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<U256> {
    if amount < Decimal::ZERO {
        return Err(VolumeBotError::external(
            "to_base_units",
            format!("negative amount {} cannot be sent", amount),
        ));
    }

    let mantissa = U256::from(amount.mantissa().unsigned_abs());
    let scale = amount.scale();
    let decimals = decimals as u32;

    if scale <= decimals {
        mantissa
            .checked_mul(pow10(decimals - scale)?)
            .ok_or_else(|| VolumeBotError::external("to_base_units", format!("{} overflows U256", amount)))
    } else {
        Ok(mantissa / pow10(scale - decimals)?)
    }
}

/// Ether amount → wei
pub fn to_wei(amount: Decimal) -> Result<U256> {
    to_base_units(amount, ETHER_DECIMALS)
}

/// Convert base units to a normalized decimal amount. Values whose full
/// precision does not fit a `Decimal` lose their lowest fractional digits;
/// only an integer part wider than 96 bits is an error.
pub fn from_base_units(value: U256, decimals: u8) -> Result<Decimal> {
    let decimals = decimals as u32;

    // Precision past 28 places cannot be represented; drop it up front
    let (mut value, mut scale) = if decimals > MAX_DECIMAL_SCALE {
        (value / pow10(decimals - MAX_DECIMAL_SCALE)?, MAX_DECIMAL_SCALE)
    } else {
        (value, decimals)
    };

    let max_mantissa = U256::from(MAX_DECIMAL_MANTISSA);
    let ten = U256::from(10u64);
    while value > max_mantissa && scale > 0 {
        value /= ten;
        scale -= 1;
    }

    let raw = u128::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_DECIMAL_MANTISSA)
        .map(|v| v as i128)
        .ok_or_else(|| VolumeBotError::external("from_base_units", format!("{} too large for Decimal", value)))?;

    Decimal::try_from_i128_with_scale(raw, scale)
        .map(|d| d.normalize())
        .map_err(|e| VolumeBotError::external("from_base_units", e))
}

/// Wei → ether amount
pub fn from_wei(value: U256) -> Result<Decimal> {
    from_base_units(value, ETHER_DECIMALS)
}
