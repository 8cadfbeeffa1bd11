#![deny(warnings)]

//! Yield and buyback economics.
//!
//! This crate provides:
//! - The yield/buyback calculator mapping [`CalculatorInput`] to [`CalculatorResult`]
//! - A 30-day buyback schedule simulator driven by an injectable uniform source
//! - Seeded helpers so that every simulated schedule can be replayed

use buyback_core::{
    Allocation, CalculatorInput, CalculatorResult, BURN_RATE_VOLUME_USD, MONTHS_PER_YEAR,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

mod schedule;
mod uniform;

pub use schedule::{
    simulate_schedule, simulate_seeded, simulate_with_entropy, ScheduleStats, JITTER_SPREAD,
};
pub use uniform::{ScriptedUniform, UniformSource};

/// Errors produced by economic helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Scripted draws must lie in [0, 1).
    #[error("invalid uniform draw: {0}")]
    InvalidDraw(f64),
    /// A scripted source needs at least one draw.
    #[error("scripted uniform source is empty")]
    EmptyScript,
}

/// Compute every derived figure for one set of calculator parameters.
///
/// Order matters: the platform fee comes off monthly yield before the buyback
/// share is taken, and the pool is split before per-buyback division.
/// Nothing is rejected; zero or negative inputs propagate arithmetically and
/// results that overflow saturate at `Decimal::MAX` / `Decimal::MIN`.
///
/// Example:
/// let r = calculate(&CalculatorInput::default());
/// assert_eq!(r.annual_yield, Decimal::new(2_000_000, 0));
pub fn calculate(input: &CalculatorInput) -> CalculatorResult {
    let annual_yield = div(
        input.locked_value_usd.saturating_mul(input.apr_percent),
        Decimal::ONE_HUNDRED,
    );
    let monthly_yield = div(annual_yield, Decimal::from(MONTHS_PER_YEAR));
    let yield_after_platform_fee =
        monthly_yield.saturating_mul(Decimal::ONE.saturating_sub(input.platform_fee_fraction));
    let buyback_pool = yield_after_platform_fee.saturating_mul(input.buyback_allocation_fraction);
    let per_buyback = div(buyback_pool, Decimal::from(input.buyback_divisor()));
    let allocation = split_pool(input, buyback_pool);
    let burned_units = div(buyback_pool, Decimal::from(BURN_RATE_VOLUME_USD))
        .saturating_mul(input.lq_burn_rate_per_hundred_k);

    debug!(
        %annual_yield,
        %buyback_pool,
        %per_buyback,
        %burned_units,
        "calculated buyback figures"
    );

    CalculatorResult {
        annual_yield,
        monthly_yield,
        yield_after_platform_fee,
        buyback_pool,
        per_buyback,
        allocation,
        burned_units,
    }
}

fn split_pool(input: &CalculatorInput, pool: Decimal) -> Allocation {
    let w = &input.allocation_weights;
    let norm = w.normalizer();
    Allocation {
        a: div(w.a, norm).saturating_mul(pool),
        b: div(w.b, norm).saturating_mul(pool),
        c: div(w.c, norm).saturating_mul(pool),
    }
}

/// Division saturating on overflow. Every divisor used here is at least one.
fn div(num: Decimal, den: Decimal) -> Decimal {
    num.checked_div(den).unwrap_or_else(|| {
        if num.is_sign_negative() == den.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}
