//! Fixed Memory Partitions.
//!
//! This module models main memory as six fixed partitions. It provides:
//! 1. **Layout:** Partitions numbered 1 to 6 with fixed capacities.
//! 2. **Allocation:** First-fit placement in ascending id order.
//! 3. **Monotonicity:** Nothing unloads a program, so an occupied partition stays occupied.

use crate::common::constants::{FREE_PARTITION_LABEL, PARTITION_COUNT};

/// One memory partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Partition number, 1-based.
    pub id: u32,
    /// Capacity in Mb.
    pub capacity: u32,
    /// Whether a program has been placed here.
    pub occupied: bool,
    /// Name of the resident program, or `"free"`.
    pub resident_label: String,
}

/// Where `allocate` put a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Partition number, 1-based.
    pub partition: u32,
    /// Capacity of that partition in Mb.
    pub capacity: u32,
}

/// The six partitions of main memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTable {
    partitions: Vec<Partition>,
}

impl PartitionTable {
    /// Builds the partition table at reset.
    ///
    /// # Arguments
    ///
    /// * `capacities` - Capacity of partitions 1 through 6, in order.
    /// * `reserved` - Partition pre-occupied by the init process (1-based).
    /// * `reserved_label` - Label placed on the reserved partition.
    pub fn new(capacities: &[u32; PARTITION_COUNT], reserved: u32, reserved_label: &str) -> Self {
        let partitions = (1..)
            .zip(capacities)
            .map(|(id, &capacity)| {
                let occupied = id == reserved;
                Partition {
                    id,
                    capacity,
                    occupied,
                    resident_label: if occupied {
                        reserved_label.to_string()
                    } else {
                        FREE_PARTITION_LABEL.to_string()
                    },
                }
            })
            .collect();
        Self { partitions }
    }

    /// Places `program` in the first free partition whose capacity is at least `size`.
    ///
    /// On success the partition is marked occupied and labelled with the program name.
    /// Returns `None` and leaves the table untouched when nothing fits.
    pub fn allocate(&mut self, program: &str, size: u32) -> Option<Placement> {
        let partition = self
            .partitions
            .iter_mut()
            .find(|p| !p.occupied && p.capacity >= size)?;
        partition.occupied = true;
        partition.resident_label = program.to_string();
        Some(Placement {
            partition: partition.id,
            capacity: partition.capacity,
        })
    }

    /// Looks up a partition by its 1-based id.
    pub fn get(&self, id: u32) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.id == id)
    }

    /// All partitions in id order.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Number of occupied partitions.
    pub fn occupied_count(&self) -> usize {
        self.partitions.iter().filter(|p| p.occupied).count()
    }
}
