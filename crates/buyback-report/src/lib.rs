#![deny(warnings)]

//! Presentation layer: number formatting, summary text and export sinks.
//!
//! The numeric core returns exact `Decimal`s; everything that turns them into
//! human-readable text lives here.

use buyback_core::{Allocation, CalculatorInput, CalculatorResult, ScheduleEntry};
use buyback_econ::ScheduleStats;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

mod format;
mod sink;

pub use format::format_amount;
pub use sink::{export_summary, ExportError, ExportFormat, ExportSink, FileSink, WriterSink};

/// Figures shared with the outside world when a user exports their numbers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub locked_value_usd: Decimal,
    pub apr_percent: Decimal,
    pub monthly_yield: Decimal,
    pub buyback_pool: Decimal,
    pub per_buyback: Decimal,
    pub allocation: Allocation,
    pub burned_units: Decimal,
}

impl Summary {
    pub fn new(input: &CalculatorInput, result: &CalculatorResult) -> Self {
        Self {
            locked_value_usd: input.locked_value_usd,
            apr_percent: input.apr_percent,
            monthly_yield: result.monthly_yield,
            buyback_pool: result.buyback_pool,
            per_buyback: result.per_buyback,
            allocation: result.allocation,
            burned_units: result.burned_units,
        }
    }
}

/// Render the summary as the plain-text block that goes to an export sink.
pub fn render_summary(s: &Summary) -> String {
    let mut out = String::new();
    let lines = [
        ("Locked value", format!("${}", format_amount(s.locked_value_usd))),
        ("APR", format!("{}%", format_amount(s.apr_percent))),
        ("Monthly yield", format!("${}", format_amount(s.monthly_yield))),
        ("Buyback pool", format!("${}", format_amount(s.buyback_pool))),
        ("Per buyback", format!("${}", format_amount(s.per_buyback))),
        ("Allocation A", format!("${}", format_amount(s.allocation.a))),
        ("Allocation B", format!("${}", format_amount(s.allocation.b))),
        ("Allocation C", format!("${}", format_amount(s.allocation.c))),
        ("LQ burned", format_amount(s.burned_units)),
    ];
    for (label, value) in lines {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out
}

const BAR_WIDTH: usize = 40;

/// Render a schedule as a day-by-day table with proportional bars, followed
/// by a one-line recap of [`ScheduleStats`].
pub fn render_schedule(entries: &[ScheduleEntry]) -> String {
    let stats = ScheduleStats::from_entries(entries);
    let peak = stats.largest.map(|e| e.amount).unwrap_or(Decimal::ZERO);
    let mut out = String::new();
    for e in entries {
        let bar = if peak.is_zero() {
            0
        } else {
            (e.amount / peak * Decimal::from(BAR_WIDTH))
                .floor()
                .to_usize()
                .unwrap_or(0)
        };
        out.push_str(&format!(
            "day {:>2} | {:>14} | {}\n",
            e.day,
            format_amount(e.amount),
            "#".repeat(bar)
        ));
    }
    out.push_str(&format!(
        "active days: {} | total: {}",
        stats.active_days,
        format_amount(stats.total)
    ));
    if let Some(top) = stats.largest {
        out.push_str(&format!(
            " | largest: day {} ({})",
            top.day,
            format_amount(top.amount)
        ));
    }
    out.push('\n');
    out
}
