//! Mutable simulation state.

use crate::config::Config;
use crate::kernel::{PartitionTable, ProcessIndex, ProcessRecord, ProcessTable};

use super::clock::Clock;

/// Everything a handler may mutate.
///
/// Owned by the [`Simulator`](super::Simulator) and lent to one handler at a time.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Simulated time.
    pub clock: Clock,
    /// Live PCBs.
    pub processes: ProcessTable,
    /// Memory partitions.
    pub partitions: PartitionTable,
    /// Record the next `EXEC` loads into: the last forked child, or init before any fork.
    pub exec_target: ProcessIndex,
}

impl SimulationState {
    /// Builds the reset state described by `config`.
    pub fn new(config: &Config) -> Self {
        let init = ProcessRecord::init(&config.init);
        let partitions = PartitionTable::new(
            &config.memory.partitions,
            init.partition_number,
            &init.program_name,
        );
        let processes = ProcessTable::new(init, config.limits.max_processes());
        Self {
            clock: Clock::new(),
            exec_target: processes.last_index(),
            processes,
            partitions,
        }
    }
}
