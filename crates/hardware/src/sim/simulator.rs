//! Simulator: owns every cache description and drives the reference stream through them.

use tracing::{debug, info};

use super::description::CacheDescription;
use crate::common::{ConfigError, MemoryReference, SimError, TraceError};
use crate::config::SimConfig;
use crate::stats::SimReport;

/// Feeds `stream` through every description in order.
///
/// Each reference is seen by all descriptions, in declaration order, before the next
/// reference is pulled from the stream.
///
/// # Returns
///
/// Number of references consumed.
///
/// # Errors
///
/// The first error produced by the stream. Processing stops there; descriptions keep
/// whatever state they reached, so callers must not report them.
pub fn simulate<I>(descriptions: &mut [CacheDescription], stream: I) -> Result<u64, TraceError>
where
    I: IntoIterator<Item = Result<MemoryReference, TraceError>>,
{
    let mut count = 0;
    for reference in stream {
        let reference = reference?;
        for description in descriptions.iter_mut() {
            description.simulate_reference(&reference);
        }
        count += 1;
    }
    Ok(count)
}

/// Top-level simulator: the ordered list of cache descriptions.
#[derive(Clone, Debug)]
pub struct Simulator {
    descriptions: Vec<CacheDescription>,
}

impl Simulator {
    /// Validates `config` and builds one empty description per cache.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`SimConfig::validate`].
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            descriptions: config.caches.iter().map(CacheDescription::new).collect(),
        })
    }

    /// Descriptions in declaration order.
    pub fn descriptions(&self) -> &[CacheDescription] {
        &self.descriptions
    }

    /// Looks up a description by cache name.
    pub fn description(&self, name: &str) -> Option<&CacheDescription> {
        self.descriptions.iter().find(|d| d.name() == name)
    }

    /// Processes a single top-level reference in every cache.
    pub fn step(&mut self, reference: &MemoryReference) {
        for description in &mut self.descriptions {
            description.simulate_reference(reference);
        }
    }

    /// Runs the whole stream and returns the final report.
    ///
    /// Consumes the simulator: if the stream fails, the partial statistics are dropped
    /// with it.
    ///
    /// # Errors
    ///
    /// [`SimError::Trace`] on the first stream error.
    pub fn run<I>(mut self, stream: I) -> Result<SimReport, SimError>
    where
        I: IntoIterator<Item = Result<MemoryReference, TraceError>>,
    {
        let count = simulate(&mut self.descriptions, stream)?;
        info!(references = count, caches = self.descriptions.len(), "trace complete");
        Ok(self.report())
    }

    /// Snapshot of every description's counters.
    pub fn report(&self) -> SimReport {
        debug!(caches = self.descriptions.len(), "building report");
        SimReport {
            caches: self.descriptions.iter().map(CacheDescription::report).collect(),
        }
    }
}
