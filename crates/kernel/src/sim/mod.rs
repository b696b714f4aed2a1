//! Simulation engine.
//!
//! Everything between parsed input and written output:
//! 1. **Events:** [`TraceEvent`]/[`EventKind`], decoded once at load time.
//! 2. **Dispatch:** [`Dispatcher`] and the per-event handler scripts.
//! 3. **Driver:** [`Simulator`], which owns the [`SimulationState`] and snapshots after each event.
//! 4. **I/O seams:** [`LogSink`]/[`SnapshotSink`] and the text [`loader`].

/// External program catalog.
pub mod catalog;

/// Simulated clock.
pub mod clock;

/// Event dispatch and handlers.
pub mod dispatch;

/// Trace event decoding.
pub mod event;

/// Trace and external-file loading.
pub mod loader;

/// The driver loop.
pub mod simulator;

/// Output sinks.
pub mod sink;

/// Process table snapshots.
pub mod snapshot;

/// Mutable simulation state.
pub mod state;

pub use catalog::{ExternalFileRecord, ProgramCatalog};
pub use clock::Clock;
pub use dispatch::{DispatchReport, Dispatcher, Outcome};
pub use event::{EventKind, TraceEvent};
pub use simulator::Simulator;
pub use sink::{
    AppendFileSnapshot, LogLine, LogSink, MemoryLog, MemorySnapshot, SnapshotSink, WriterLog,
};
pub use snapshot::Snapshot;
pub use state::SimulationState;
