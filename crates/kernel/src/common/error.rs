//! Simulation error definitions.
//!
//! Every fallible operation in the crate reports a [`SimError`]. The variants
//! split into two groups:
//! 1. **Fatal:** Inputs that cannot be opened, invalid configuration, and sink write failures.
//! 2. **Per-record:** Capacity overflow, invalid interrupt numbers, and failed program loads.
//!    These are reported as diagnostics and the run continues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading inputs or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// An input file is missing or unreadable. Aborts the run before any output.
    #[error("cannot open {what} '{}': {source}", .path.display())]
    ResourceUnavailable {
        /// Which input failed (e.g. `"trace file"`).
        what: &'static str,
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A bounded container refused a record because it is full.
    #[error("maximum {what} count of {limit} reached; further records dropped")]
    CapacityExceeded {
        /// What was being collected (e.g. `"trace event"`).
        what: &'static str,
        /// The configured cap.
        limit: usize,
    },

    /// A `SYSCALL`/`END_IO` argument is outside the vector table.
    #[error("Invalid {kind} interrupt number: {number}")]
    InvalidInterruptNumber {
        /// Event tag that carried the number (`"SYSCALL"` or `"END_IO"`).
        kind: &'static str,
        /// The offending number.
        number: i64,
    },

    /// `EXEC` found no free partition large enough for the program.
    #[error("no free partition can hold {program} ({size}Mb)")]
    NoFittingPartition {
        /// Program that failed to load.
        program: String,
        /// Its size in Mb.
        size: u32,
    },

    /// Writing the execution log or a snapshot failed.
    #[error("failed to write simulation output: {0}")]
    Sink(#[from] io::Error),

    /// The configuration is malformed or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SimError {
    /// Returns `true` for errors that must abort the run.
    ///
    /// Per-record errors are logged as diagnostics and the simulation moves on.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ResourceUnavailable { .. } | Self::Sink(_) | Self::Config(_)
        )
    }
}
