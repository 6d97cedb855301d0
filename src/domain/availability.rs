//! Pluggable disponibility sampling
//!
//! Provides the random availability sources the façade handlers read. Every
//! source must be safe for concurrent sampling; both implementations draw
//! from the thread-local generator and hold no mutable state.

use std::sync::Arc;

use rand::Rng;
use rand_distr::{Distribution, Normal};

pub const NORMAL_MEAN: f64 = 0.95;
pub const NORMAL_SPREAD: f64 = 0.2;

pub trait AvailabilitySource: Send + Sync {
    /// Instantaneous disponibility, in [0, 1].
    fn sample(&self) -> f64;
}

/// Which sampling policy a server process runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Uniform,
    Normal,
}

impl SourceKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uniform" => Some(Self::Uniform),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }
}

pub fn build_source(kind: SourceKind) -> Arc<dyn AvailabilitySource> {
    match kind {
        SourceKind::Uniform => Arc::new(UniformSource),
        SourceKind::Normal => Arc::new(ClampedNormalSource::standard()),
    }
}

#[derive(Debug, Default)]
pub struct UniformSource;

impl AvailabilitySource for UniformSource {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// Normal-distributed disponibility, folded positive and capped at 1.0.
#[derive(Debug, Clone, Copy)]
pub struct ClampedNormalSource {
    normal: Normal<f64>,
}

impl ClampedNormalSource {
    pub fn new(mean: f64, spread: f64) -> Self {
        Self {
            normal: Normal::new(mean, spread).expect("finite mean and positive spread"),
        }
    }

    pub fn standard() -> Self {
        Self::new(NORMAL_MEAN, NORMAL_SPREAD)
    }
}

impl AvailabilitySource for ClampedNormalSource {
    fn sample(&self) -> f64 {
        // Fold negatives positive, then cap the upper bound only.
        self.normal.sample(&mut rand::thread_rng()).abs().min(1.0)
    }
}

/// Deterministic source for tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub f64);

#[cfg(test)]
impl AvailabilitySource for FixedSource {
    fn sample(&self) -> f64 {
        self.0
    }
}
