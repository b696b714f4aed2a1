//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** The reset state of the modeled kernel (vector table, partitions, init process).
//! 2. **Structures:** Hierarchical config for input limits, memory, init process, vectors, and snapshots.
//! 3. **Loading:** JSON deserialization and validation.
//!
//! Every field has a default, so an empty JSON object (`{}`) and `Config::default()` are equivalent.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;
use crate::common::constants::{PARTITION_COUNT, VECTOR_TABLE_SIZE};

/// Default configuration values.
///
/// Re-exported from `common::constants` so every default lives in one place.
mod defaults {
    pub use crate::common::constants::{
        DEFAULT_PARTITION_CAPACITIES as PARTITIONS, DEFAULT_VECTOR_ADDRESSES as VECTORS,
        INIT_PARTITION, INIT_PID, INIT_PROGRAM, INIT_SIZE, MAX_EXTERNAL_FILES, MAX_TRACE_EVENTS,
    };
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Caps on input record counts.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Partition layout.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// The process present at reset.
    #[serde(default)]
    pub init: InitProcessConfig,
    /// Interrupt vector table contents.
    #[serde(default)]
    pub vectors: VectorConfig,
    /// Status snapshot options.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ResourceUnavailable {
            what: "config file",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks cross-field invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.limits.max_trace_events == 0 {
            return Err(SimError::Config("limits.max_trace_events must be > 0".into()));
        }
        if self.limits.max_external_files == 0 {
            return Err(SimError::Config(
                "limits.max_external_files must be > 0".into(),
            ));
        }
        if self.init.pid == 0 {
            return Err(SimError::Config("init.pid must be > 0".into()));
        }
        // Every trace event may fork, and the PID after the last child must still fit.
        let last_pid = u64::from(self.init.pid).checked_add(self.limits.max_trace_events as u64);
        if last_pid.is_none_or(|pid| pid >= u64::from(u32::MAX)) {
            return Err(SimError::Config(format!(
                "init.pid {} leaves no room for {} forked PIDs",
                self.init.pid, self.limits.max_trace_events
            )));
        }
        if !(1..=PARTITION_COUNT as u32).contains(&self.init.partition) {
            return Err(SimError::Config(format!(
                "init.partition must be in 1..={PARTITION_COUNT}, got {}",
                self.init.partition
            )));
        }
        Ok(())
    }
}

/// Input record caps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    /// Maximum trace events read from one trace; extra events are dropped with a warning.
    #[serde(default = "LimitsConfig::default_max_trace_events")]
    pub max_trace_events: usize,

    /// Maximum external program records; extra records are dropped with a warning.
    #[serde(default = "LimitsConfig::default_max_external_files")]
    pub max_external_files: usize,
}

impl LimitsConfig {
    /// Returns the default trace event cap.
    const fn default_max_trace_events() -> usize {
        defaults::MAX_TRACE_EVENTS
    }

    /// Returns the default external file cap.
    const fn default_max_external_files() -> usize {
        defaults::MAX_EXTERNAL_FILES
    }

    /// Upper bound on live PCBs: init plus one fork per trace event.
    pub const fn max_processes(&self) -> usize {
        self.max_trace_events.saturating_add(1)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_trace_events: defaults::MAX_TRACE_EVENTS,
            max_external_files: defaults::MAX_EXTERNAL_FILES,
        }
    }
}

/// Fixed partition layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Capacity in Mb of partitions 1 through 6.
    #[serde(default = "MemoryConfig::default_partitions")]
    pub partitions: [u32; PARTITION_COUNT],
}

impl MemoryConfig {
    /// Returns the default partition capacities.
    const fn default_partitions() -> [u32; PARTITION_COUNT] {
        defaults::PARTITIONS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            partitions: defaults::PARTITIONS,
        }
    }
}

/// The init process that exists before the first event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InitProcessConfig {
    /// PID of init; forked children are numbered from `pid + 1`.
    #[serde(default = "InitProcessConfig::default_pid")]
    pub pid: u32,

    /// Program name shown in snapshots.
    #[serde(default = "InitProcessConfig::default_program")]
    pub program: String,

    /// Partition init occupies at reset (1-based).
    #[serde(default = "InitProcessConfig::default_partition")]
    pub partition: u32,

    /// Memory footprint in Mb.
    #[serde(default = "InitProcessConfig::default_size")]
    pub size: u32,
}

impl InitProcessConfig {
    /// Returns the default init PID.
    const fn default_pid() -> u32 {
        defaults::INIT_PID
    }

    /// Returns the default init program name.
    fn default_program() -> String {
        defaults::INIT_PROGRAM.to_string()
    }

    /// Returns the default init partition.
    const fn default_partition() -> u32 {
        defaults::INIT_PARTITION
    }

    /// Returns the default init footprint.
    const fn default_size() -> u32 {
        defaults::INIT_SIZE
    }
}

impl Default for InitProcessConfig {
    fn default() -> Self {
        Self {
            pid: defaults::INIT_PID,
            program: defaults::INIT_PROGRAM.to_string(),
            partition: defaults::INIT_PARTITION,
            size: defaults::INIT_SIZE,
        }
    }
}

/// Interrupt vector table contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VectorConfig {
    /// ISR address for each interrupt number 0 through 25.
    #[serde(default = "VectorConfig::default_addresses")]
    pub addresses: [u16; VECTOR_TABLE_SIZE],
}

impl VectorConfig {
    /// Returns the default ISR addresses.
    const fn default_addresses() -> [u16; VECTOR_TABLE_SIZE] {
        defaults::VECTORS
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            addresses: defaults::VECTORS,
        }
    }
}

/// Status snapshot options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotConfig {
    /// Append the partition table below the process table in every snapshot.
    #[serde(default)]
    pub include_partitions: bool,
}
