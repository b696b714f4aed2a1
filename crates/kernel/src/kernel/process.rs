//! Process Table.
//!
//! Holds one PCB per process. The table starts with the init process and only
//! ever grows: `FORK` appends a copy of init under a fresh PID, `EXEC` rewrites
//! the placement fields of an existing record. No termination is modeled.

use crate::common::{Bounded, SimError};
use crate::config::InitProcessConfig;

/// Position of a record in the process table.
///
/// Handed from `FORK` to the next `EXEC` so the exec target is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ProcessIndex(pub usize);

/// Process control block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Process identifier.
    pub pid: u32,
    /// Program the process was created from.
    pub program_name: String,
    /// Partition holding the process image; 0 means unassigned.
    pub partition_number: u32,
    /// Image size in Mb.
    pub size: u32,
    /// CPU time still owed to the process.
    pub remaining_cpu_time: u64,
    /// Whether the process is ready to run.
    pub is_ready: bool,
    /// PID of the parent; 0 for none.
    pub parent_pid: u32,
}

impl ProcessRecord {
    /// Builds the init PCB from configuration.
    pub fn init(config: &InitProcessConfig) -> Self {
        Self {
            pid: config.pid,
            program_name: config.program.clone(),
            partition_number: config.partition,
            size: config.size,
            remaining_cpu_time: 0,
            is_ready: true,
            parent_pid: 0,
        }
    }
}

/// Bounded, append-only table of PCBs.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    records: Bounded<ProcessRecord>,
    next_pid: u32,
}

impl ProcessTable {
    /// Creates a table holding only `init`.
    ///
    /// # Arguments
    ///
    /// * `init` - The record present at reset; it is also the template for every fork.
    /// * `limit` - Maximum number of records, init included (at least 1).
    pub fn new(init: ProcessRecord, limit: usize) -> Self {
        let next_pid = init.pid.saturating_add(1);
        let records = Bounded::with_first("process", limit, init);
        Self { records, next_pid }
    }

    /// Appends a copy of the first record under the next free PID.
    ///
    /// # Returns
    ///
    /// The child's index and PID, or `CapacityExceeded` if the table is full.
    /// A failed fork consumes no PID. Running out of PIDs is reported the same way.
    pub fn fork(&mut self) -> Result<(ProcessIndex, u32), SimError> {
        let exhausted = SimError::CapacityExceeded {
            what: "process",
            limit: self.records.limit(),
        };
        let Some(template) = self.records.first() else {
            return Err(exhausted);
        };
        let pid = self.next_pid;
        let Some(next_pid) = pid.checked_add(1) else {
            return Err(exhausted);
        };
        let child = ProcessRecord {
            pid,
            ..template.clone()
        };
        self.records.push(child)?;
        self.next_pid = next_pid;
        Ok((ProcessIndex(self.records.len() - 1), pid))
    }

    /// Records where `EXEC` placed the image of the process at `index`.
    ///
    /// # Returns
    ///
    /// `false` if no record exists at `index`.
    pub fn exec_update(&mut self, index: ProcessIndex, partition: u32, size: u32) -> bool {
        match self.records.get_mut(index.0) {
            Some(record) => {
                record.partition_number = partition;
                record.size = size;
                true
            }
            None => false,
        }
    }

    /// Returns the record at `index`.
    pub fn get(&self, index: ProcessIndex) -> Option<&ProcessRecord> {
        self.records.get(index.0)
    }

    /// Index of the most recently created record.
    pub fn last_index(&self) -> ProcessIndex {
        ProcessIndex(self.records.len().saturating_sub(1))
    }

    /// PID the next fork will receive.
    pub const fn next_pid(&self) -> u32 {
        self.next_pid
    }

    /// All live records in creation order.
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: init is never removed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
