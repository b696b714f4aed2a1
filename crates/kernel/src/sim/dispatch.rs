//! Event Dispatch and Handlers.
//!
//! This module is the kernel's state machine. For each decoded event it:
//! 1. **Selects:** Matches the [`EventKind`] to exactly one handler.
//! 2. **Emits:** Writes the handler's fixed micro-step script to the log sink.
//! 3. **Accrues:** Advances the clock after every step.
//! 4. **Mutates:** Forks PCBs, allocates partitions, and records placements.
//!
//! Step costs are fixed (see [`cost`]); only `CPU` takes its duration from the
//! trace. Three `SYSCALL` steps log a nominal duration but charge the clock a
//! smaller amount.

use tracing::{debug, warn};

use crate::common::SimError;
use crate::common::constants::{EXEC_VECTOR, FORK_VECTOR, cost};
use crate::kernel::{PartitionTable, Placement, ProcessIndex, ProcessTable, VectorTable};

use super::catalog::ProgramCatalog;
use super::clock::Clock;
use super::event::{EventKind, TraceEvent};
use super::sink::LogSink;
use super::state::SimulationState;

/// What a handler did to the kernel state.
#[derive(Debug)]
pub enum Outcome {
    /// `FORK` appended a child with this PID.
    Forked {
        /// PID of the new child.
        pid: u32,
    },
    /// `EXEC` ran; `placement` is `None` when no partition fit.
    Loaded {
        /// Program that was loaded.
        program: String,
        /// Resolved size in Mb (0 when the program is not in the catalog).
        size: u32,
        /// Partition chosen by first-fit, if any.
        placement: Option<Placement>,
    },
    /// `CPU` burst completed.
    Ran,
    /// `SYSCALL` or `END_IO` was serviced through this vector.
    Serviced {
        /// Vector table index.
        vector: usize,
    },
    /// The event was refused; nothing (or only part of the script) was applied.
    Rejected(SimError),
    /// No handler matched the event tag.
    Ignored,
}

/// Result of dispatching one event.
#[derive(Debug)]
pub struct DispatchReport {
    /// What changed.
    pub outcome: Outcome,
    /// Number of log lines written.
    pub lines: u64,
}

/// Writes steps to the log and charges them to the clock.
struct Emitter<'a> {
    clock: &'a mut Clock,
    log: &'a mut dyn LogSink,
    lines: u64,
}

impl<'a> Emitter<'a> {
    fn new(clock: &'a mut Clock, log: &'a mut dyn LogSink) -> Self {
        Self {
            clock,
            log,
            lines: 0,
        }
    }

    /// Emits a step whose logged and charged durations agree.
    fn step(&mut self, duration: u64, message: &str) -> Result<(), SimError> {
        self.split_step(duration, duration, message)
    }

    /// Emits a step that logs `logged` but advances the clock by `advance`.
    fn split_step(&mut self, logged: u64, advance: u64, message: &str) -> Result<(), SimError> {
        self.log.append(self.clock.now(), logged, message)?;
        self.clock.advance(advance);
        self.lines += 1;
        Ok(())
    }

    /// Mode switch and context save shared by every interrupt-style handler.
    fn enter_kernel(&mut self) -> Result<(), SimError> {
        self.step(cost::KERNEL_MODE, "switch to kernel mode")?;
        self.step(cost::CONTEXT_SAVE, "context saved")
    }

    /// Vector lookup; `pc_prefix` is the hex prefix printed before the ISR address.
    fn vector(
        &mut self,
        vectors: &VectorTable,
        vector: usize,
        pc_prefix: &str,
    ) -> Result<(), SimError> {
        self.step(
            cost::FIND_VECTOR,
            &format!(
                "find vector {vector} in memory position 0x{:04X}",
                VectorTable::memory_position(vector)
            ),
        )?;
        self.step(
            cost::LOAD_PC,
            &format!(
                "load address {pc_prefix}{:04X} into the PC",
                vectors.lookup(vector)
            ),
        )
    }

    fn iret(&mut self) -> Result<(), SimError> {
        self.step(cost::IRET, "IRET")
    }
}

/// Routes events to their handlers.
///
/// Holds only read-only context; all mutable state is passed in per call.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    vectors: &'a VectorTable,
    catalog: &'a ProgramCatalog,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over the vector table and program catalog.
    pub const fn new(vectors: &'a VectorTable, catalog: &'a ProgramCatalog) -> Self {
        Self { vectors, catalog }
    }

    /// Runs the handler for `event`.
    ///
    /// # Returns
    ///
    /// The handler's outcome and the number of lines it logged. Per-event
    /// problems (bad interrupt number, full process table) come back as
    /// [`Outcome::Rejected`]; only sink failures are returned as `Err`.
    pub fn dispatch(
        &self,
        event: &TraceEvent,
        state: &mut SimulationState,
        log: &mut dyn LogSink,
    ) -> Result<DispatchReport, SimError> {
        let mut out = Emitter::new(&mut state.clock, log);
        let outcome = match &event.kind {
            EventKind::Fork => {
                let (outcome, child) = self.fork(&mut out, &mut state.processes)?;
                if let Some(index) = child {
                    state.exec_target = index;
                }
                outcome
            }
            EventKind::Exec { program } => self.exec(
                &mut out,
                program,
                state.exec_target,
                &mut state.partitions,
                &mut state.processes,
            )?,
            EventKind::Cpu => Self::cpu(&mut out, event.duration)?,
            EventKind::Syscall { number } => self.syscall(&mut out, *number)?,
            EventKind::EndIo { number } => self.end_io(&mut out, *number)?,
            EventKind::Unknown { raw } => {
                debug!(tag = %raw, "unrecognized trace event ignored");
                Outcome::Ignored
            }
        };
        Ok(DispatchReport {
            outcome,
            lines: out.lines,
        })
    }

    /// `FORK`: copy the init PCB into a new child.
    ///
    /// Returns the child's index so the caller can aim the next `EXEC` at it.
    fn fork(
        &self,
        out: &mut Emitter<'_>,
        processes: &mut ProcessTable,
    ) -> Result<(Outcome, Option<ProcessIndex>), SimError> {
        out.enter_kernel()?;
        out.vector(self.vectors, FORK_VECTOR, "0X")?;
        let forked = processes.fork();
        out.step(cost::FORK_COPY_PCB, "FORK: copy parent PCB to child PCB")?;
        out.step(cost::FORK_SCHEDULER, "scheduler called")?;
        out.iret()?;

        Ok(match forked {
            Ok((index, pid)) => (Outcome::Forked { pid }, Some(index)),
            Err(e) => {
                warn!("FORK: {e}");
                (Outcome::Rejected(e), None)
            }
        })
    }

    /// `EXEC`: load `program` into the first partition that fits and point
    /// the PCB at `target` to it.
    fn exec(
        &self,
        out: &mut Emitter<'_>,
        program: &str,
        target: ProcessIndex,
        partitions: &mut PartitionTable,
        processes: &mut ProcessTable,
    ) -> Result<Outcome, SimError> {
        let size = self.catalog.size_of(program).unwrap_or(0);

        out.enter_kernel()?;
        out.vector(self.vectors, EXEC_VECTOR, "0X")?;
        out.step(
            cost::EXEC_LOAD,
            &format!("EXEC: load {program} of size {size}Mb"),
        )?;

        let placement = partitions.allocate(program, size);
        match placement {
            Some(p) => {
                if !processes.exec_update(target, p.partition, size) {
                    debug!(index = target.0, "EXEC target has no PCB");
                }
                out.step(
                    cost::EXEC_FIND_PARTITION,
                    &format!(
                        "found partition {} with {}Mb of space",
                        p.partition, p.capacity
                    ),
                )?;
                out.step(
                    cost::EXEC_MARK_PARTITION,
                    &format!("partition {} marked as occupied", p.partition),
                )?;
                out.step(cost::EXEC_UPDATE_PCB, "updating PCB with new information")?;
            }
            None => {
                let e = SimError::NoFittingPartition {
                    program: program.to_string(),
                    size,
                };
                debug!("EXEC: {e}");
            }
        }

        out.step(cost::EXEC_SCHEDULER, "scheduler called")?;
        out.iret()?;
        Ok(Outcome::Loaded {
            program: program.to_string(),
            size,
            placement,
        })
    }

    /// `CPU`: a user-mode burst charged at the trace's duration.
    fn cpu(out: &mut Emitter<'_>, duration: u64) -> Result<Outcome, SimError> {
        out.step(duration, "CPU execution")?;
        Ok(Outcome::Ran)
    }

    /// `SYSCALL n`: software interrupt through vector `n`.
    fn syscall(&self, out: &mut Emitter<'_>, number: i64) -> Result<Outcome, SimError> {
        let Some(vector) = VectorTable::checked(number) else {
            return Ok(reject_interrupt("SYSCALL", number));
        };
        out.enter_kernel()?;
        out.vector(self.vectors, vector, "0x")?;
        out.split_step(
            cost::SYSCALL_RUN_ISR_LOGGED,
            cost::SYSCALL_RUN_ISR_ADVANCE,
            "SYSCALL: run the ISR",
        )?;
        out.split_step(
            cost::SYSCALL_TRANSFER_LOGGED,
            cost::SYSCALL_TRANSFER_ADVANCE,
            "transfer data",
        )?;
        out.split_step(
            cost::SYSCALL_CHECK_LOGGED,
            cost::SYSCALL_CHECK_ADVANCE,
            "check for errors",
        )?;
        out.iret()?;
        Ok(Outcome::Serviced { vector })
    }

    /// `END_IO n`: device completion interrupt through vector `n`.
    fn end_io(&self, out: &mut Emitter<'_>, number: i64) -> Result<Outcome, SimError> {
        let Some(vector) = VectorTable::checked(number) else {
            return Ok(reject_interrupt("END_IO", number));
        };
        out.step(cost::END_IO_PRIORITY, "check priority of interrupt")?;
        out.step(cost::END_IO_MASK, "check if masked")?;
        out.enter_kernel()?;
        out.vector(self.vectors, vector, "0x")?;
        out.step(cost::END_IO_ISR, "END_IO")?;
        out.iret()?;
        Ok(Outcome::Serviced { vector })
    }
}

fn reject_interrupt(kind: &'static str, number: i64) -> Outcome {
    let e = SimError::InvalidInterruptNumber { kind, number };
    warn!("{e}");
    Outcome::Rejected(e)
}
