//! Uniform random draws for the schedule simulator.

use crate::EconError;
use rand::{Rng, RngCore};

/// Source of uniform values in [0, 1).
///
/// Every `rand` generator is a source; tests and replays can use
/// [`ScriptedUniform`] instead.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedUniform {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedUniform {
    /// Build a scripted source. Every draw must lie in [0, 1).
    pub fn new(draws: Vec<f64>) -> Result<Self, EconError> {
        if draws.is_empty() {
            return Err(EconError::EmptyScript);
        }
        if let Some(&bad) = draws.iter().find(|d| !(0.0..1.0).contains(*d)) {
            return Err(EconError::InvalidDraw(bad));
        }
        Ok(Self { draws, cursor: 0 })
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedUniform {
    fn next_unit(&mut self) -> f64 {
        let v = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        v
    }
}
