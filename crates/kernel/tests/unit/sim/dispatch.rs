//! # Dispatch Tests
//!
//! Exact micro-step scripts for every handler, plus the state each one leaves behind.

use intsim_core::SimError;
use intsim_core::config::Config;
use intsim_core::kernel::{Placement, ProcessIndex};
use intsim_core::sim::{
    Dispatcher, LogLine, MemoryLog, Outcome, ProgramCatalog, SimulationState, TraceEvent,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;

fn line(time: u64, duration: u64, message: &str) -> LogLine {
    LogLine {
        time,
        duration,
        message: message.to_string(),
    }
}

fn fork_script(t: u64) -> Vec<LogLine> {
    vec![
        line(t, 1, "switch to kernel mode"),
        line(t + 1, 3, "context saved"),
        line(t + 4, 1, "find vector 2 in memory position 0x0004"),
        line(t + 5, 1, "load address 0X0695 into the PC"),
        line(t + 6, 4, "FORK: copy parent PCB to child PCB"),
        line(t + 10, 16, "scheduler called"),
        line(t + 26, 1, "IRET"),
    ]
}

fn pcb(ctx: &TestContext, index: usize) -> (u32, String, u32, u32) {
    let r = &ctx.sim.state().processes.records()[index];
    (r.pid, r.program_name.clone(), r.partition_number, r.size)
}

#[test]
fn fork_script_and_child() {
    let mut ctx = TestContext::new();
    let report = ctx.step("FORK", 10);

    assert_eq!(ctx.lines(), fork_script(0).as_slice());
    assert_eq!(ctx.now(), 27);
    assert_eq!(report.lines, 7);
    assert!(matches!(report.outcome, Outcome::Forked { pid: 12 }));

    let processes = &ctx.sim.state().processes;
    assert_eq!(processes.len(), 2);
    assert_eq!(pcb(&ctx, 1), (12, "init".to_string(), 6, 1));
    assert_eq!(ctx.sim.state().exec_target, ProcessIndex(1));
}

#[test]
fn fork_ignores_trace_duration() {
    let mut ctx = TestContext::new();
    let _ = ctx.step("FORK", 10_000);
    assert_eq!(ctx.now(), 27);
}

#[test]
fn exec_after_fork_loads_into_child() {
    let mut ctx = TestContext::new().with_program("progA", 20);
    let _ = ctx.step("FORK", 10);
    let report = ctx.step("EXEC progA", 50);

    let expected = vec![
        line(27, 1, "switch to kernel mode"),
        line(28, 3, "context saved"),
        line(31, 1, "find vector 3 in memory position 0x0006"),
        line(32, 1, "load address 0X042B into the PC"),
        line(33, 12, "EXEC: load progA of size 20Mb"),
        line(45, 22, "found partition 1 with 40Mb of space"),
        line(67, 6, "partition 1 marked as occupied"),
        line(73, 17, "updating PCB with new information"),
        line(90, 3, "scheduler called"),
        line(93, 1, "IRET"),
    ];
    assert_eq!(&ctx.lines()[7..], expected.as_slice());
    assert_eq!(ctx.now(), 94);
    assert_eq!(report.lines, 10);

    match report.outcome {
        Outcome::Loaded {
            program,
            size,
            placement,
        } => {
            assert_eq!(program, "progA");
            assert_eq!(size, 20);
            assert_eq!(
                placement,
                Some(Placement {
                    partition: 1,
                    capacity: 40
                })
            );
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    assert_eq!(pcb(&ctx, 0), (11, "init".to_string(), 6, 1));
    assert_eq!(pcb(&ctx, 1), (12, "init".to_string(), 1, 20));

    let p1 = ctx.sim.state().partitions.get(1).unwrap();
    assert!(p1.occupied);
    assert_eq!(p1.resident_label, "progA");
}

#[test]
fn exec_without_fit_skips_placement_steps() {
    let mut ctx = TestContext::new().with_program("big", 100);
    let _ = ctx.step("FORK", 0);
    let report = ctx.step("EXEC big", 0);

    assert_eq!(
        ctx.messages()[7..].to_vec(),
        vec![
            "switch to kernel mode",
            "context saved",
            "find vector 3 in memory position 0x0006",
            "load address 0X042B into the PC",
            "EXEC: load big of size 100Mb",
            "scheduler called",
            "IRET",
        ]
    );
    assert_eq!(ctx.now(), 27 + 22);
    assert!(matches!(
        report.outcome,
        Outcome::Loaded {
            placement: None,
            size: 100,
            ..
        }
    ));

    // The child keeps what it copied from init.
    assert_eq!(pcb(&ctx, 1), (12, "init".to_string(), 6, 1));
    assert_eq!(ctx.sim.state().partitions.occupied_count(), 1);
}

#[test]
fn exec_unknown_program_has_size_zero() {
    let mut ctx = TestContext::new();
    let _ = ctx.step("FORK", 0);
    let _ = ctx.step("EXEC ghost", 0);

    assert!(ctx.messages().contains(&"EXEC: load ghost of size 0Mb"));
    assert!(
        ctx.messages()
            .contains(&"found partition 1 with 40Mb of space")
    );
    assert_eq!(pcb(&ctx, 1), (12, "init".to_string(), 1, 0));
}

#[test]
fn bare_exec_loads_empty_name() {
    let mut ctx = TestContext::new();
    let _ = ctx.step("FORK", 0);
    let report = ctx.step("EXEC", 0);

    assert_eq!(report.lines, 10);
    assert_eq!(ctx.messages()[11], "EXEC: load  of size 0Mb");
    assert_eq!(ctx.now(), 27 + 67);
    assert_eq!(pcb(&ctx, 1), (12, "init".to_string(), 1, 0));
    assert_eq!(
        ctx.sim.state().partitions.get(1).unwrap().resident_label,
        ""
    );
}

#[test]
fn exec_targets_most_recent_fork() {
    let mut ctx = TestContext::new().with_program("progA", 20);
    ctx.run(&[("FORK", 0), ("FORK", 0), ("EXEC progA", 0)]);

    assert_eq!(pcb(&ctx, 1), (12, "init".to_string(), 6, 1));
    assert_eq!(pcb(&ctx, 2), (13, "init".to_string(), 1, 20));
}

#[test]
fn exec_before_any_fork_targets_init() {
    let mut ctx = TestContext::new().with_program("progA", 20);
    let _ = ctx.step("EXEC progA", 0);

    assert_eq!(ctx.sim.state().processes.len(), 1);
    assert_eq!(pcb(&ctx, 0), (11, "init".to_string(), 1, 20));
    assert_eq!(ctx.now(), 67);
}

#[test]
fn repeated_exec_fills_partitions_first_fit() {
    let mut ctx = TestContext::new()
        .with_program("a", 30)
        .with_program("b", 20)
        .with_program("c", 12);
    ctx.run(&[
        ("FORK", 0),
        ("EXEC a", 0),
        ("FORK", 0),
        ("EXEC b", 0),
        ("FORK", 0),
        ("EXEC c", 0),
    ]);

    let placed: Vec<u32> = ctx.sim.state().processes.records()[1..]
        .iter()
        .map(|r| r.partition_number)
        .collect();
    assert_eq!(placed, vec![1, 2, 3]);
}

#[test]
fn cpu_burst_uses_trace_duration() {
    let mut ctx = TestContext::new();
    let report = ctx.step("CPU", 5);

    assert_eq!(ctx.lines(), [line(0, 5, "CPU execution")].as_slice());
    assert_eq!(ctx.now(), 5);
    assert!(matches!(report.outcome, Outcome::Ran));
}

#[test]
fn cpu_burst_of_zero() {
    let mut ctx = TestContext::new();
    let _ = ctx.step("CPU", 0);
    assert_eq!(ctx.lines(), [line(0, 0, "CPU execution")].as_slice());
    assert_eq!(ctx.now(), 0);
}

#[test]
fn syscall_logs_nominal_but_charges_less() {
    let mut ctx = TestContext::new();
    let report = ctx.step("SYSCALL 7", 0);

    let expected = vec![
        line(0, 1, "switch to kernel mode"),
        line(1, 3, "context saved"),
        line(4, 1, "find vector 7 in memory position 0x000E"),
        line(5, 1, "load address 0x00BD into the PC"),
        line(6, 230, "SYSCALL: run the ISR"),
        line(53, 110, "transfer data"),
        line(110, 50, "check for errors"),
        line(125, 1, "IRET"),
    ];
    assert_eq!(ctx.lines(), expected.as_slice());
    assert_eq!(ctx.now(), 126);
    assert!(matches!(report.outcome, Outcome::Serviced { vector: 7 }));
}

#[test]
fn end_io_script() {
    let mut ctx = TestContext::new();
    let report = ctx.step("END_IO 5", 0);

    let expected = vec![
        line(0, 1, "check priority of interrupt"),
        line(1, 1, "check if masked"),
        line(2, 1, "switch to kernel mode"),
        line(3, 3, "context saved"),
        line(6, 1, "find vector 5 in memory position 0x000A"),
        line(7, 1, "load address 0x048B into the PC"),
        line(8, 248, "END_IO"),
        line(256, 1, "IRET"),
    ];
    assert_eq!(ctx.lines(), expected.as_slice());
    assert_eq!(ctx.now(), 257);
    assert!(matches!(report.outcome, Outcome::Serviced { vector: 5 }));
}

#[rstest]
#[case("SYSCALL 99", "SYSCALL", 99)]
#[case("SYSCALL 26", "SYSCALL", 26)]
#[case("SYSCALL -1", "SYSCALL", -1)]
#[case("END_IO 30", "END_IO", 30)]
fn out_of_range_interrupt_is_rejected(
    #[case] tag: &str,
    #[case] kind: &'static str,
    #[case] number: i64,
) {
    let mut ctx = TestContext::new();
    let report = ctx.step(tag, 0);

    assert!(ctx.lines().is_empty());
    assert_eq!(ctx.now(), 0);
    assert_eq!(report.lines, 0);
    match report.outcome {
        Outcome::Rejected(SimError::InvalidInterruptNumber { kind: k, number: n }) => {
            assert_eq!(k, kind);
            assert_eq!(n, number);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    // A snapshot is still taken.
    assert_eq!(ctx.snapshots.blocks().len(), 1);
}

#[rstest]
#[case("HALT")]
#[case("SYSCALLS 3")]
#[case("END_IO")]
fn unknown_tag_is_ignored(#[case] tag: &str) {
    let mut ctx = TestContext::new();
    let report = ctx.step(tag, 40);

    assert!(ctx.lines().is_empty());
    assert_eq!(ctx.now(), 0);
    assert!(matches!(report.outcome, Outcome::Ignored));
    assert_eq!(ctx.snapshots.blocks().len(), 1);
}

#[test]
fn fork_on_full_table_still_logs() {
    let mut config = Config::default();
    config.limits.max_trace_events = 1;
    let mut ctx = TestContext::new().with_config(config);

    let _ = ctx.step("FORK", 0);
    let report = ctx.step("FORK", 0);

    assert_eq!(&ctx.lines()[7..], fork_script(27).as_slice());
    assert_eq!(ctx.now(), 54);
    assert!(matches!(
        report.outcome,
        Outcome::Rejected(SimError::CapacityExceeded { .. })
    ));
    assert_eq!(ctx.sim.state().processes.len(), 2);
    assert_eq!(ctx.sim.state().exec_target, ProcessIndex(1));
}

#[test]
fn dispatcher_works_on_borrowed_state() {
    let config = Config::default();
    let catalog = ProgramCatalog::default();
    let vectors = intsim_core::kernel::VectorTable::default();
    let dispatcher = Dispatcher::new(&vectors, &catalog);
    let mut state = SimulationState::new(&config);
    let mut log = MemoryLog::new();

    let report = dispatcher
        .dispatch(&TraceEvent::decode("CPU", 9), &mut state, &mut log)
        .unwrap();
    assert_eq!(report.lines, 1);
    assert_eq!(state.clock.now(), 9);
    assert_eq!(log.render(), "0, 9, CPU execution\n");
}
