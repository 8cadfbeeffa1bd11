#![deny(warnings)]

//! Core domain models and invariants for the buyback calculator.
//!
//! This crate defines the serializable parameter and result records shared by
//! the calculator, the schedule simulator and the report layer, together with
//! opt-in validation helpers. Calculation itself never rejects input; callers
//! that want stricter behavior run [`validate_input`] first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of days covered by one simulated buyback schedule.
pub const SCHEDULE_DAYS: u8 = 30;

/// Months per year used to derive monthly yield.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Buyback volume (USD) that one unit of `lq_burn_rate_per_hundred_k` refers to.
pub const BURN_RATE_VOLUME_USD: u32 = 100_000;

/// Relative vote shares splitting the buyback pool across three targets.
///
/// Weights need not sum to one; they are normalized by their sum, which is
/// floored at one so that all-zero weights produce an all-zero split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationWeights {
    pub a: Decimal,
    pub b: Decimal,
    pub c: Decimal,
}

impl Default for AllocationWeights {
    fn default() -> Self {
        Self {
            a: Decimal::new(60, 0),
            b: Decimal::new(30, 0),
            c: Decimal::new(10, 0),
        }
    }
}

impl AllocationWeights {
    pub fn new(a: Decimal, b: Decimal, c: Decimal) -> Self {
        Self { a, b, c }
    }

    /// Raw sum of the three weights, saturating on overflow.
    pub fn sum(&self) -> Decimal {
        self.a.saturating_add(self.b).saturating_add(self.c)
    }

    /// Divisor used for normalization: the weight sum, never below one.
    pub fn normalizer(&self) -> Decimal {
        self.sum().max(Decimal::ONE)
    }
}

/// User-supplied calculator parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInput {
    /// Total value locked, in USD.
    pub locked_value_usd: Decimal,
    /// Annual percentage rate, e.g. 20 for 20%.
    pub apr_percent: Decimal,
    /// Target number of buybacks per month. Zero is accepted.
    pub buybacks_per_month: u32,
    /// Share of post-fee yield routed to buybacks, in [0, 1].
    pub buyback_allocation_fraction: Decimal,
    /// Platform fee taken from monthly yield, in [0, 1].
    pub platform_fee_fraction: Decimal,
    /// Units burned per $100,000 of buyback volume.
    pub lq_burn_rate_per_hundred_k: Decimal,
    /// Split of the buyback pool across targets A, B and C.
    pub allocation_weights: AllocationWeights,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            locked_value_usd: Decimal::new(10_000_000, 0),
            apr_percent: Decimal::new(20, 0),
            buybacks_per_month: 15,
            buyback_allocation_fraction: Decimal::new(9, 1),
            platform_fee_fraction: Decimal::new(2, 2),
            lq_burn_rate_per_hundred_k: Decimal::ONE,
            allocation_weights: AllocationWeights::default(),
        }
    }
}

impl CalculatorInput {
    /// Buyback count used as a divisor: never below one.
    pub fn buyback_divisor(&self) -> u32 {
        self.buybacks_per_month.max(1)
    }
}

/// Pool split across the three allocation targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub a: Decimal,
    pub b: Decimal,
    pub c: Decimal,
}

impl Allocation {
    pub fn total(&self) -> Decimal {
        self.a.saturating_add(self.b).saturating_add(self.c)
    }
}

/// Derived calculator output. Has no lifecycle of its own; it is recomputed
/// whenever the input changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub annual_yield: Decimal,
    pub monthly_yield: Decimal,
    pub yield_after_platform_fee: Decimal,
    pub buyback_pool: Decimal,
    pub per_buyback: Decimal,
    pub allocation: Allocation,
    pub burned_units: Decimal,
}

/// One day of a simulated buyback schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Day of month, 1-based.
    pub day: u8,
    /// Whole units bought back on this day (>= 0).
    pub amount: Decimal,
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for deterministic RNG. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

/// Validation errors for calculator parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Monetary amount must be non-negative.
    #[error("{0} must not be negative")]
    NegativeMoney(&'static str),
    /// Rates (APR, burn rate) must be non-negative.
    #[error("{0} must not be negative")]
    NegativeRate(&'static str),
    /// Fractions must lie within [0, 1].
    #[error("{field} must be within [0,1], got {value}")]
    FractionOutOfRange { field: &'static str, value: Decimal },
    /// Allocation weights must be non-negative.
    #[error("allocation weight {0} must not be negative")]
    NegativeWeight(char),
}

fn check_fraction(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ValidationError::FractionOutOfRange { field, value });
    }
    Ok(())
}

/// Validate allocation weights.
pub fn validate_weights(w: &AllocationWeights) -> Result<(), ValidationError> {
    for (name, value) in [('A', w.a), ('B', w.b), ('C', w.c)] {
        if value < Decimal::ZERO {
            return Err(ValidationError::NegativeWeight(name));
        }
    }
    Ok(())
}

/// Validate calculator input against the documented ranges.
///
/// This is a hardening step only: the calculator accepts any input and lets
/// out-of-range values propagate arithmetically.
pub fn validate_input(input: &CalculatorInput) -> Result<(), ValidationError> {
    if input.locked_value_usd < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("locked_value_usd"));
    }
    if input.apr_percent < Decimal::ZERO {
        return Err(ValidationError::NegativeRate("apr_percent"));
    }
    if input.lq_burn_rate_per_hundred_k < Decimal::ZERO {
        return Err(ValidationError::NegativeRate("lq_burn_rate_per_hundred_k"));
    }
    check_fraction(
        "buyback_allocation_fraction",
        input.buyback_allocation_fraction,
    )?;
    check_fraction("platform_fee_fraction", input.platform_fee_fraction)?;
    validate_weights(&input.allocation_weights)
}
