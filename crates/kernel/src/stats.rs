//! Simulation statistics collection and reporting.
//!
//! This module tracks per-run counters for the simulator. It provides:
//! 1. **Event mix:** Counts by event kind, including ignored tags.
//! 2. **Time breakdown:** Simulated time spent in CPU bursts versus kernel handlers.
//! 3. **Degradations:** Rejected interrupts, failed forks, and programs that found no partition.
//! 4. **Output volume:** Log lines and snapshots written.

use std::fmt;

use crate::sim::{EventKind, Outcome};

/// Per-run counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Events processed, ignored ones included.
    pub events: u64,
    /// `FORK` events.
    pub forks: u64,
    /// `EXEC` events.
    pub execs: u64,
    /// `CPU` events.
    pub cpu_bursts: u64,
    /// `SYSCALL` events.
    pub syscalls: u64,
    /// `END_IO` events.
    pub end_ios: u64,
    /// Events whose tag matched no handler.
    pub ignored: u64,

    /// `SYSCALL`/`END_IO` events refused for an out-of-range interrupt number.
    pub rejected_interrupts: u64,
    /// `FORK` events that could not append a PCB.
    pub failed_forks: u64,
    /// `EXEC` events that found no fitting partition.
    pub failed_loads: u64,

    /// Simulated time charged to `CPU` bursts.
    pub cpu_time: u64,
    /// Simulated time charged to kernel handlers.
    pub kernel_time: u64,

    /// Execution log lines written.
    pub log_lines: u64,
    /// Snapshots appended.
    pub snapshots: u64,
}

impl SimStats {
    /// Accounts for one dispatched event.
    ///
    /// # Arguments
    ///
    /// * `kind` - The event that was dispatched.
    /// * `outcome` - What its handler reported.
    /// * `lines` - Log lines the handler wrote.
    /// * `elapsed` - Clock advance caused by the handler.
    pub fn record(&mut self, kind: &EventKind, outcome: &Outcome, lines: u64, elapsed: u64) {
        self.events += 1;
        self.log_lines += lines;
        match kind {
            EventKind::Fork => self.forks += 1,
            EventKind::Exec { .. } => self.execs += 1,
            EventKind::Cpu => self.cpu_bursts += 1,
            EventKind::Syscall { .. } => self.syscalls += 1,
            EventKind::EndIo { .. } => self.end_ios += 1,
            EventKind::Unknown { .. } => self.ignored += 1,
        }
        match outcome {
            Outcome::Ran => self.cpu_time += elapsed,
            Outcome::Rejected(_) if matches!(kind, EventKind::Fork) => {
                self.failed_forks += 1;
                self.kernel_time += elapsed;
            }
            Outcome::Rejected(_) => self.rejected_interrupts += 1,
            Outcome::Loaded {
                placement: None, ..
            } => {
                self.failed_loads += 1;
                self.kernel_time += elapsed;
            }
            _ => self.kernel_time += elapsed,
        }
    }

    /// Total simulated time.
    pub const fn total_time(&self) -> u64 {
        self.cpu_time + self.kernel_time
    }

    /// Prints the summary to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_time().max(1) as f64;
        writeln!(f, "==========================================================")?;
        writeln!(f, "KERNEL SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_events               {}", self.events)?;
        writeln!(f, "sim_time                 {} ms", self.total_time())?;
        writeln!(
            f,
            "  time.cpu               {} ({:.2}%)",
            self.cpu_time,
            self.cpu_time as f64 / total * 100.0
        )?;
        writeln!(
            f,
            "  time.kernel            {} ({:.2}%)",
            self.kernel_time,
            self.kernel_time as f64 / total * 100.0
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "EVENT MIX")?;
        writeln!(f, "  ev.fork                {}", self.forks)?;
        writeln!(f, "  ev.exec                {}", self.execs)?;
        writeln!(f, "  ev.cpu                 {}", self.cpu_bursts)?;
        writeln!(f, "  ev.syscall             {}", self.syscalls)?;
        writeln!(f, "  ev.end_io              {}", self.end_ios)?;
        writeln!(f, "  ev.ignored             {}", self.ignored)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "DEGRADATIONS")?;
        writeln!(f, "  irq.rejected           {}", self.rejected_interrupts)?;
        writeln!(f, "  fork.failed            {}", self.failed_forks)?;
        writeln!(f, "  exec.no_partition      {}", self.failed_loads)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "OUTPUT")?;
        writeln!(f, "  log.lines              {}", self.log_lines)?;
        writeln!(f, "  snapshots              {}", self.snapshots)?;
        write!(f, "==========================================================")
    }
}
