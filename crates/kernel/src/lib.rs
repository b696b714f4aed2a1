//! Trace-driven kernel interrupt simulator library.
//!
//! This crate replays a scripted workload against a model of a small kernel and
//! reports, step by step, what the kernel does and how long it takes:
//! 1. **Kernel tables:** Interrupt vector table, fixed memory partitions, and the process table.
//! 2. **Events:** Trace events decoded once into a closed enum (`FORK`, `EXEC`, `CPU`, `SYSCALL`, `END_IO`).
//! 3. **Dispatch:** Per-event handlers emitting timestamped micro-steps and advancing the simulated clock.
//! 4. **Simulation:** The driver loop, process table snapshots, output sinks, and input loading.
//! 5. **Statistics:** Per-run counters and a printable summary.

/// Common types and constants (errors, bounded containers, step costs).
pub mod common;
/// Simulator configuration (defaults, limits, vector table, partitions).
pub mod config;
/// Kernel data model (vector table, partition table, process table).
pub mod kernel;
/// Event decoding, dispatch, the driver loop, snapshots, sinks, and loading.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Error type shared by every fallible operation in the crate.
pub use crate::common::SimError;
/// Top-level simulation driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
