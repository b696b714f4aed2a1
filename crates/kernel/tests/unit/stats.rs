//! # Statistics Tests

use intsim_core::SimError;
use intsim_core::config::Config;
use intsim_core::sim::{EventKind, Outcome};
use intsim_core::stats::SimStats;

use crate::common::harness::TestContext;

#[test]
fn record_classifies_outcomes() {
    let mut stats = SimStats::default();
    stats.record(&EventKind::Cpu, &Outcome::Ran, 1, 40);
    stats.record(&EventKind::Fork, &Outcome::Forked { pid: 12 }, 7, 27);
    stats.record(
        &EventKind::Syscall { number: 99 },
        &Outcome::Rejected(SimError::InvalidInterruptNumber {
            kind: "SYSCALL",
            number: 99,
        }),
        0,
        0,
    );
    stats.record(
        &EventKind::Unknown { raw: "HALT".into() },
        &Outcome::Ignored,
        0,
        0,
    );

    assert_eq!(stats.events, 4);
    assert_eq!(stats.cpu_bursts, 1);
    assert_eq!(stats.forks, 1);
    assert_eq!(stats.syscalls, 1);
    assert_eq!(stats.ignored, 1);
    assert_eq!(stats.rejected_interrupts, 1);
    assert_eq!(stats.cpu_time, 40);
    assert_eq!(stats.kernel_time, 27);
    assert_eq!(stats.total_time(), 67);
    assert_eq!(stats.log_lines, 8);
}

#[test]
fn degradations_are_counted() {
    let mut config = Config::default();
    config.limits.max_trace_events = 1;
    let mut ctx = TestContext::new()
        .with_config(config)
        .with_program("huge", 100);
    ctx.run(&[
        ("FORK", 0),
        ("FORK", 0),
        ("EXEC huge", 0),
        ("END_IO 42", 0),
    ]);

    let stats = ctx.sim.stats();
    assert_eq!(stats.failed_forks, 1);
    assert_eq!(stats.failed_loads, 1);
    assert_eq!(stats.rejected_interrupts, 1);
    assert_eq!(stats.end_ios, 1);
    assert_eq!(stats.kernel_time, 27 + 27 + 22);
    assert_eq!(stats.total_time(), ctx.now());
}

#[test]
fn report_lists_every_counter() {
    let mut ctx = TestContext::new();
    ctx.run(&[("CPU", 10), ("SYSCALL 1", 0)]);
    let text = ctx.sim.stats().to_string();

    assert!(text.contains("KERNEL SIMULATION STATISTICS"));
    assert!(text.contains("sim_events               2"));
    assert!(text.contains("sim_time                 136 ms"));
    assert!(text.contains("time.cpu               10 (7.35%)"));
    assert!(text.contains("ev.syscall             1"));
    assert!(text.contains("log.lines              9"));
    assert!(text.contains("snapshots              2"));
}

#[test]
fn empty_report_does_not_divide_by_zero() {
    let text = SimStats::default().to_string();
    assert!(text.contains("time.cpu               0 (0.00%)"));
}
