//! YAML scenario files.
//!
//! ```yaml
//! input:
//!   locked_value_usd: 10000000
//!   apr_percent: 20
//!   buybacks_per_month: 15
//!   allocation_weights: { a: 60, b: 30, c: 10 }
//! sim:
//!   rng_seed: 42
//! ```
//!
//! Every field is optional and falls back to the reference scenario.

use anyhow::{Context, Result};
use buyback_core::{CalculatorInput, SimConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub input: CalculatorInput,
    pub sim: SimConfig,
}

pub fn parse_scenario(text: &str) -> Result<ScenarioFile> {
    serde_yaml::from_str(text).context("invalid scenario yaml")
}

pub fn load_scenario(path: &Path) -> Result<ScenarioFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    parse_scenario(&text).with_context(|| format!("parsing scenario {}", path.display()))
}
