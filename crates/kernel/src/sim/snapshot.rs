//! Process table snapshots.
//!
//! After every event the driver renders the process table as a fixed-width
//! block and appends it to the snapshot sink:
//!
//! ```text
//! !-----------------------------------------------------------!
//! Save Time: 24 ms
//! +--------------------------------------------+
//! | PID | Program Name | Partition Number | Size |
//! +--------------------------------------------+
//! |  11 |        init |               6 |    1 |
//! +--------------------------------------------+
//! !-----------------------------------------------------------!
//! ```

use std::fmt;

use crate::kernel::{Partition, ProcessRecord};

const BANNER: &str = "!-----------------------------------------------------------!";
const RULE: &str = "+--------------------------------------------+";

/// A point-in-time view of the kernel tables, rendered via `Display`.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Clock value when the snapshot was taken.
    pub time: u64,
    /// Live PCBs in creation order.
    pub processes: &'a [ProcessRecord],
    /// Partition table, when it should be included.
    pub partitions: Option<&'a [Partition]>,
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "Save Time: {} ms", self.time)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "| PID | Program Name | Partition Number | Size |")?;
        writeln!(f, "{RULE}")?;
        for p in self.processes {
            writeln!(
                f,
                "| {:3} | {:>11} | {:15} | {:4} |",
                p.pid, p.program_name, p.partition_number, p.size
            )?;
        }
        writeln!(f, "{RULE}")?;

        if let Some(partitions) = self.partitions {
            writeln!(f, "| Partition | Capacity | Occupied | Resident    |")?;
            writeln!(f, "{RULE}")?;
            for p in partitions {
                writeln!(
                    f,
                    "| {:9} | {:8} | {:>8} | {:<11} |",
                    p.id,
                    p.capacity,
                    if p.occupied { "yes" } else { "no" },
                    p.resident_label
                )?;
            }
            writeln!(f, "{RULE}")?;
        }

        writeln!(f, "{BANNER}")
    }
}
