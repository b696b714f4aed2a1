//! Global Simulation Constants.
//!
//! This module defines the fixed parameters of the simulated kernel. It includes:
//! 1. **Table Sizes:** Vector table length and partition count.
//! 2. **Reset State:** Default ISR addresses, partition capacities, and the init process.
//! 3. **Step Costs:** Per-micro-step durations (in simulated milliseconds) for every handler.
//! 4. **Input Limits:** Default caps on trace and external-file records.

/// Number of entries in the interrupt vector table.
pub const VECTOR_TABLE_SIZE: usize = 26;

/// Number of fixed memory partitions.
pub const PARTITION_COUNT: usize = 6;

/// Size in bytes of one vector table entry; vector `n` lives at `n * VECTOR_ENTRY_BYTES`.
pub const VECTOR_ENTRY_BYTES: usize = 2;

/// Vector used by the `FORK` system call.
pub const FORK_VECTOR: usize = 2;

/// Vector used by the `EXEC` system call.
pub const EXEC_VECTOR: usize = 3;

/// ISR addresses loaded into the vector table at reset, indexed by interrupt number.
pub const DEFAULT_VECTOR_ADDRESSES: [u16; VECTOR_TABLE_SIZE] = [
    0x01E3, 0x029C, 0x0695, 0x042B, 0x0292, 0x048B, 0x0639, 0x00BD, 0x06EF, 0x036C, 0x07B0,
    0x01F8, 0x03B9, 0x06C7, 0x0165, 0x0584, 0x02DF, 0x05B3, 0x060A, 0x0765, 0x07B7, 0x0523,
    0x03B7, 0x028C, 0x05E8, 0x05D3,
];

/// Partition capacities in Mb, partition 1 first.
pub const DEFAULT_PARTITION_CAPACITIES: [u32; PARTITION_COUNT] = [40, 25, 15, 10, 8, 2];

/// Label carried by a partition nobody has loaded into.
pub const FREE_PARTITION_LABEL: &str = "free";

/// PID of the init process present at reset.
pub const INIT_PID: u32 = 11;

/// Program name of the init process.
pub const INIT_PROGRAM: &str = "init";

/// Partition reserved for the init process (pre-occupied at reset).
pub const INIT_PARTITION: u32 = 6;

/// Memory footprint of the init process in Mb.
pub const INIT_SIZE: u32 = 1;

/// Default maximum number of trace events accepted from one trace.
pub const MAX_TRACE_EVENTS: usize = 100;

/// Default maximum number of external program records.
pub const MAX_EXTERNAL_FILES: usize = 10;

/// Step costs shared by the interrupt-style handlers.
pub mod cost {
    /// Switching the CPU into kernel mode.
    pub const KERNEL_MODE: u64 = 1;
    /// Saving the interrupted context.
    pub const CONTEXT_SAVE: u64 = 3;
    /// Locating the vector in memory.
    pub const FIND_VECTOR: u64 = 1;
    /// Loading the ISR address into the PC.
    pub const LOAD_PC: u64 = 1;
    /// Returning from the interrupt.
    pub const IRET: u64 = 1;

    /// `FORK`: copying the parent PCB into the child PCB.
    pub const FORK_COPY_PCB: u64 = 4;
    /// `FORK`: scheduler invocation.
    pub const FORK_SCHEDULER: u64 = 16;

    /// `EXEC`: loading the program image.
    pub const EXEC_LOAD: u64 = 12;
    /// `EXEC`: locating a partition that fits.
    pub const EXEC_FIND_PARTITION: u64 = 22;
    /// `EXEC`: marking the partition occupied.
    pub const EXEC_MARK_PARTITION: u64 = 6;
    /// `EXEC`: writing the new placement into the PCB.
    pub const EXEC_UPDATE_PCB: u64 = 17;
    /// `EXEC`: scheduler invocation.
    pub const EXEC_SCHEDULER: u64 = 3;

    /// `SYSCALL`: running the ISR, as logged.
    pub const SYSCALL_RUN_ISR_LOGGED: u64 = 230;
    /// `SYSCALL`: running the ISR, as charged to the clock.
    pub const SYSCALL_RUN_ISR_ADVANCE: u64 = 47;
    /// `SYSCALL`: transferring data, as logged.
    pub const SYSCALL_TRANSFER_LOGGED: u64 = 110;
    /// `SYSCALL`: transferring data, as charged to the clock.
    pub const SYSCALL_TRANSFER_ADVANCE: u64 = 57;
    /// `SYSCALL`: checking for errors, as logged.
    pub const SYSCALL_CHECK_LOGGED: u64 = 50;
    /// `SYSCALL`: checking for errors, as charged to the clock.
    pub const SYSCALL_CHECK_ADVANCE: u64 = 15;

    /// `END_IO`: checking interrupt priority.
    pub const END_IO_PRIORITY: u64 = 1;
    /// `END_IO`: checking the interrupt mask.
    pub const END_IO_MASK: u64 = 1;
    /// `END_IO`: the device completion routine.
    pub const END_IO_ISR: u64 = 248;
}
