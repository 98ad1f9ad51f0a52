//! Configuration system for the cache simulator.
//!
//! This module defines the configuration record for each simulated cache. It provides:
//! 1. **Defaults:** Baseline geometry and policy values used when a field is omitted.
//! 2. **Structures:** A per-cache record and the ordered list of caches to simulate.
//! 3. **Validation:** Geometry checks performed once, before any reference is simulated.
//!
//! Configuration is supplied as JSON (see [`crate::sim::loader::load_config`]) or built in code.

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define a cache when a field is not given in the description file.
mod defaults {
    /// Default cache name.
    pub const NAME: &str = "cache";

    /// Default cache line size in bytes (64 bytes).
    pub const LINE_SIZE: u64 = 64;

    /// Default number of cache entries (1024 lines).
    pub const ENTRIES: usize = 1024;

    /// Default associativity (2 ways).
    pub const WAYS: usize = 2;

    /// Caches are write-back unless configured otherwise.
    pub const WRITE_BACK: bool = true;

    /// Default LFU decay interval in references.
    ///
    /// Every time a description's reference count reaches a multiple of this value,
    /// all LFU counters of its primary cache are halved.
    pub const DECAY_INTERVAL: u64 = 200_000;

    /// Victim cache is disabled by default.
    pub const VICTIM_ENTRIES: usize = 0;

    /// Seed for the Random policy's xorshift generator.
    pub const RANDOM_SEED: u64 = 123_456_789;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new line must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// First In First Out replacement policy.
    ///
    /// Evicts the line installed earliest; hits do not refresh its position.
    #[default]
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the cache line that was touched least recently.
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Least Frequently Used replacement policy.
    ///
    /// Evicts the line with the lowest (periodically halved) hit count.
    #[serde(alias = "Lfu", alias = "lfu")]
    Lfu,
    /// Random replacement policy.
    ///
    /// Evicts a pseudo-randomly selected line from the set.
    #[serde(alias = "Random", alias = "random")]
    Random,
}

impl ReplacementPolicy {
    /// Upper-case policy name as used in description files and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Lfu => "LFU",
            Self::Random => "RANDOM",
        }
    }
}

/// Individual cache configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{ "name": "L1", "line_size": 32, "entries": 256, "ways": 4, "policy": "LRU" }"#;
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Lru);
/// assert_eq!(config.victim_entries, 0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Name used in reports and debug output
    #[serde(default = "CacheConfig::default_name")]
    pub name: String,

    /// Cache line size in bytes (power of two)
    #[serde(default = "CacheConfig::default_line_size", alias = "line")]
    pub line_size: u64,

    /// Total number of cache lines
    #[serde(default = "CacheConfig::default_entries")]
    pub entries: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Write-back (true) or write-through (false)
    #[serde(default = "CacheConfig::default_write_back")]
    pub write_back: bool,

    /// Replacement policy
    #[serde(default, alias = "replacement")]
    pub policy: ReplacementPolicy,

    /// LFU decay interval in references
    #[serde(default = "CacheConfig::default_decay_interval")]
    pub decay_interval: u64,

    /// Victim cache size in lines (0 disables it)
    #[serde(default = "CacheConfig::default_victim_entries", alias = "victim")]
    pub victim_entries: usize,

    /// Seed for the Random replacement policy
    #[serde(default = "CacheConfig::default_random_seed")]
    pub random_seed: u64,
}

impl CacheConfig {
    /// Returns the default cache name.
    fn default_name() -> String {
        defaults::NAME.to_string()
    }

    /// Returns the default cache line size in bytes.
    fn default_line_size() -> u64 {
        defaults::LINE_SIZE
    }

    /// Returns the default number of cache entries.
    fn default_entries() -> usize {
        defaults::ENTRIES
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default write policy.
    fn default_write_back() -> bool {
        defaults::WRITE_BACK
    }

    /// Returns the default LFU decay interval.
    fn default_decay_interval() -> u64 {
        defaults::DECAY_INTERVAL
    }

    /// Returns the default victim cache size.
    fn default_victim_entries() -> usize {
        defaults::VICTIM_ENTRIES
    }

    /// Returns the default Random policy seed.
    fn default_random_seed() -> u64 {
        defaults::RANDOM_SEED
    }

    /// Number of sets implied by `entries / ways`.
    ///
    /// Only meaningful once [`validate`](Self::validate) has succeeded.
    pub const fn sets(&self) -> usize {
        if self.ways == 0 { 0 } else { self.entries / self.ways }
    }

    /// Checks that this description can be simulated.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: a zero or non-power-of-two line size,
    /// zero ways or entries, entries not divisible by ways, a non-power-of-two set
    /// count, or a zero LFU decay interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = || self.name.clone();
        if !self.line_size.is_power_of_two() {
            return Err(ConfigError::LineSizeNotPowerOfTwo {
                name: name(),
                line_size: self.line_size,
            });
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays { name: name() });
        }
        if self.entries == 0 {
            return Err(ConfigError::ZeroEntries { name: name() });
        }
        if self.entries % self.ways != 0 {
            return Err(ConfigError::EntriesNotMultipleOfWays {
                name: name(),
                entries: self.entries,
                ways: self.ways,
            });
        }
        if !self.sets().is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo {
                name: name(),
                sets: self.sets(),
            });
        }
        if self.decay_interval == 0 {
            return Err(ConfigError::ZeroDecayInterval { name: name() });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 64-byte lines, 1024 entries, 2-way set-associative, write-back, FIFO
    /// replacement and no victim cache.
    fn default() -> Self {
        Self {
            name: defaults::NAME.to_string(),
            line_size: defaults::LINE_SIZE,
            entries: defaults::ENTRIES,
            ways: defaults::WAYS,
            write_back: defaults::WRITE_BACK,
            policy: ReplacementPolicy::default(),
            decay_interval: defaults::DECAY_INTERVAL,
            victim_entries: defaults::VICTIM_ENTRIES,
            random_seed: defaults::RANDOM_SEED,
        }
    }
}

/// Ordered list of caches driven by the same reference stream.
///
/// Accepts either `{ "caches": [ ... ] }` or a bare JSON array of cache records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "SimConfigRepr")]
pub struct SimConfig {
    /// Caches in declaration order
    pub caches: Vec<CacheConfig>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SimConfigRepr {
    List(Vec<CacheConfig>),
    Table { caches: Vec<CacheConfig> },
}

impl From<SimConfigRepr> for SimConfig {
    fn from(repr: SimConfigRepr) -> Self {
        match repr {
            SimConfigRepr::List(caches) | SimConfigRepr::Table { caches } => Self { caches },
        }
    }
}

impl SimConfig {
    /// Validates every cache in declaration order.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoCaches`] for an empty list, otherwise the first per-cache error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.caches.is_empty() {
            return Err(ConfigError::NoCaches);
        }
        self.caches.iter().try_for_each(CacheConfig::validate)
    }
}
