//! Range Sampler
//!
//! Uniform draws over inclusive `[min, max]` ranges: trade count and wait
//! interval as integers, loan amount as a decimal. Decimal draws are taken
//! over integer steps of 10^-18 (one wei for ether amounts) so both
//! endpoints are reachable and the result stays exact.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use crate::error::{Result, VolumeBotError};
use crate::types::RangeConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Resolution of decimal draws
const REAL_SCALE: u32 = 18;

pub struct RangeSampler<R: Rng = StdRng> {
    rng: R,
}

impl RangeSampler<StdRng> {
    /// Sampler seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic sampler (tests, replays)
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RangeSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn sample_int(&mut self, range: &RangeConfig<u64>) -> Result<u64> {
        range.validate()?;
        Ok(self.rng.gen_range(range.min..=range.max))
    }

    pub fn sample_real(&mut self, range: &RangeConfig<Decimal>) -> Result<Decimal> {
        range.validate()?;
        if range.is_degenerate() {
            return Ok(range.min);
        }

        let lo = scaled(range.min, Rounding::Up).ok_or_else(|| invalid(range))?;
        let hi = scaled(range.max, Rounding::Down).ok_or_else(|| invalid(range))?;
        if lo > hi {
            // No 10^-18 step lies inside the range
            return Err(invalid(range));
        }
        let drawn = self.rng.gen_range(lo..=hi);

        Decimal::try_from_i128_with_scale(drawn, REAL_SCALE)
            .map(|d| d.normalize())
            .map_err(|_| invalid(range))
    }
}

#[derive(Clone, Copy)]
enum Rounding {
    Up,
    Down,
}

/// `value * 10^REAL_SCALE` as an integer. Finer digits are rounded inward
/// so the scaled bound never leaves the original range.
fn scaled(value: Decimal, rounding: Rounding) -> Option<i128> {
    let mantissa = value.mantissa();
    let scale = value.scale();
    if scale <= REAL_SCALE {
        return mantissa.checked_mul(10i128.checked_pow(REAL_SCALE - scale)?);
    }

    let divisor = 10i128.checked_pow(scale - REAL_SCALE)?;
    let (quotient, remainder) = (mantissa / divisor, mantissa % divisor);
    match rounding {
        Rounding::Up if remainder > 0 => Some(quotient + 1),
        Rounding::Down if remainder < 0 => Some(quotient - 1),
        _ => Some(quotient),
    }
}

/// Bounds too large (or too fine) to sample at wei resolution
fn invalid(range: &RangeConfig<Decimal>) -> VolumeBotError {
    VolumeBotError::InvalidRange {
        min: range.min.to_string(),
        max: range.max.to_string(),
    }
}
