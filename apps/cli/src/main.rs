#![deny(warnings)]

//! Headless CLI: runs the buyback calculator and a 30-day schedule simulation
//! for one scenario, then prints or exports the results.

use anyhow::{bail, Context, Result};
use buyback_core::{CalculatorInput, CalculatorResult, ScheduleEntry};
use buyback_econ::{calculate, simulate_seeded, simulate_with_entropy, ScheduleStats};
use buyback_report::{
    export_summary, render_schedule, render_summary, ExportFormat, ExportSink, FileSink,
    Summary, WriterSink,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod scenario;

const USAGE: &str = "usage: buyback-sim [--scenario PATH] [--seed N] [--json] [--export PATH|-] [--strict] [--version]";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    scenario: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
    export: Option<String>,
    strict: bool,
    version: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => {
                out.scenario = Some(PathBuf::from(
                    it.next().context("--scenario needs a path")?,
                ))
            }
            "--seed" => {
                let raw = it.next().context("--seed needs a value")?;
                out.seed = Some(raw.parse().with_context(|| format!("bad seed {raw:?}"))?);
            }
            "--json" => out.json = true,
            "--export" => out.export = Some(it.next().context("--export needs a path")?),
            "--strict" => out.strict = true,
            "--version" => out.version = true,
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct RunReport<'a> {
    input: &'a CalculatorInput,
    result: &'a CalculatorResult,
    seed: u64,
    schedule: &'a [ScheduleEntry],
    stats: ScheduleStats,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable with --json.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.version {
        println!(
            "buyback-sim {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("BUYBACK_GIT_SHA"),
            env!("BUYBACK_BUILD_DATE")
        );
        return Ok(());
    }
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())?;
    Ok(())
}

/// Load, validate, calculate, simulate, then report to `out` and export.
/// Returns the seed used for the schedule.
fn run<W: Write>(args: &CliArgs, out: &mut W) -> Result<u64> {
    info!(scenario = ?args.scenario, seed = ?args.seed, "starting run");

    let mut scn = match &args.scenario {
        Some(path) => scenario::load_scenario(path)?,
        None => scenario::ScenarioFile::default(),
    };
    if args.seed.is_some() {
        scn.sim.rng_seed = args.seed;
    }

    if let Err(e) = buyback_core::validate_input(&scn.input) {
        if args.strict {
            return Err(e).context("scenario failed validation");
        }
        warn!(error = %e, "scenario outside documented ranges; computing anyway");
    }

    let result = calculate(&scn.input);
    let (seed, schedule) = match scn.sim.rng_seed {
        Some(seed) => (
            seed,
            simulate_seeded(result.buyback_pool, scn.input.buybacks_per_month, seed),
        ),
        None => simulate_with_entropy(result.buyback_pool, scn.input.buybacks_per_month),
    };
    let stats = ScheduleStats::from_entries(&schedule);
    info!(seed, active_days = stats.active_days, total = %stats.total, "schedule ready");

    let summary = Summary::new(&scn.input, &result);
    let format = if args.json {
        ExportFormat::Json
    } else {
        ExportFormat::Text
    };

    if args.json {
        let report = RunReport {
            input: &scn.input,
            result: &result,
            seed,
            schedule: &schedule,
            stats,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", render_summary(&summary))?;
        writeln!(out)?;
        write!(out, "{}", render_schedule(&schedule))?;
        writeln!(out, "seed: {seed}")?;
    }

    if let Some(target) = &args.export {
        let mut sink: Box<dyn ExportSink + '_> = if target == "-" {
            Box::new(WriterSink::new(&mut *out))
        } else {
            Box::new(FileSink::new(target))
        };
        export_summary(sink.as_mut(), &summary, format).context("exporting summary")?;
    }

    Ok(seed)
}
