//! Kernel data model.
//!
//! The three tables the simulated kernel consults and mutates while servicing events:
//! 1. **Vector Table:** Interrupt number to ISR address, read-only.
//! 2. **Partition Table:** Six fixed partitions with first-fit allocation.
//! 3. **Process Table:** Bounded list of PCBs, grown by `FORK` and updated by `EXEC`.

/// Fixed memory partitions.
pub mod partition;

/// Process control blocks.
pub mod process;

/// Interrupt vector table.
pub mod vector;

pub use partition::{Partition, PartitionTable, Placement};
pub use process::{ProcessIndex, ProcessRecord, ProcessTable};
pub use vector::{VectorEntry, VectorTable};
