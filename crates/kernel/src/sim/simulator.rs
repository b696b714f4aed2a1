//! Simulator: the driver loop.
//!
//! Owns the read-only kernel context (vector table, program catalog), the
//! mutable [`SimulationState`], and the run statistics. Events are processed
//! strictly in trace order; each one is dispatched to completion and then a
//! snapshot is appended, whether or not the event changed anything.

use tracing::{debug, info};

use crate::common::SimError;
use crate::config::Config;
use crate::kernel::VectorTable;
use crate::stats::SimStats;

use super::catalog::ProgramCatalog;
use super::dispatch::{DispatchReport, Dispatcher};
use super::event::TraceEvent;
use super::sink::{LogSink, SnapshotSink};
use super::snapshot::Snapshot;
use super::state::SimulationState;

/// Top-level simulator.
#[derive(Debug, Clone)]
pub struct Simulator {
    vectors: VectorTable,
    catalog: ProgramCatalog,
    state: SimulationState,
    stats: SimStats,
    include_partitions: bool,
}

impl Simulator {
    /// Creates a simulator in the reset state described by `config`.
    pub fn new(config: &Config, catalog: ProgramCatalog) -> Self {
        Self {
            vectors: VectorTable::new(&config.vectors.addresses),
            catalog,
            state: SimulationState::new(config),
            stats: SimStats::default(),
            include_partitions: config.snapshot.include_partitions,
        }
    }

    /// Processes one event: dispatch, then snapshot.
    ///
    /// # Errors
    ///
    /// Only sink write failures; per-event problems are absorbed into the
    /// returned report.
    pub fn step(
        &mut self,
        event: &TraceEvent,
        log: &mut dyn LogSink,
        snapshots: &mut dyn SnapshotSink,
    ) -> Result<DispatchReport, SimError> {
        let before = self.state.clock.now();
        let dispatcher = Dispatcher::new(&self.vectors, &self.catalog);
        let report = dispatcher.dispatch(event, &mut self.state, log)?;
        let elapsed = self.state.clock.now() - before;
        debug!(event = %event.kind, elapsed, lines = report.lines, "event dispatched");

        self.stats
            .record(&event.kind, &report.outcome, report.lines, elapsed);
        snapshots.append(&self.snapshot().to_string())?;
        self.stats.snapshots += 1;
        Ok(report)
    }

    /// Replays `events` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first sink write failure.
    pub fn run(
        &mut self,
        events: &[TraceEvent],
        log: &mut dyn LogSink,
        snapshots: &mut dyn SnapshotSink,
    ) -> Result<(), SimError> {
        info!(events = events.len(), programs = self.catalog.len(), "simulation started");
        for event in events {
            let _ = self.step(event, log, snapshots)?;
        }
        info!(time = self.now(), "simulation finished");
        Ok(())
    }

    /// Current view of the process (and optionally partition) table.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            time: self.state.clock.now(),
            processes: self.state.processes.records(),
            partitions: self
                .include_partitions
                .then(|| self.state.partitions.partitions()),
        }
    }

    /// Current simulated time.
    pub const fn now(&self) -> u64 {
        self.state.clock.now()
    }

    /// Kernel state.
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Vector table in use.
    pub const fn vectors(&self) -> &VectorTable {
        &self.vectors
    }

    /// Program catalog in use.
    pub const fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }
}
