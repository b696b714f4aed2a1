//! # Partition Table Tests
//!
//! First-fit allocation order and monotonic occupancy.

use intsim_core::common::constants::DEFAULT_PARTITION_CAPACITIES;
use intsim_core::kernel::{PartitionTable, Placement};
use rstest::rstest;

fn table() -> PartitionTable {
    PartitionTable::new(&DEFAULT_PARTITION_CAPACITIES, 6, "init")
}

#[test]
fn reset_layout() {
    let t = table();
    let ids: Vec<u32> = t.partitions().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

    let caps: Vec<u32> = t.partitions().iter().map(|p| p.capacity).collect();
    assert_eq!(caps, vec![40, 25, 15, 10, 8, 2]);

    assert_eq!(t.occupied_count(), 1);
    let six = t.get(6).unwrap();
    assert!(six.occupied);
    assert_eq!(six.resident_label, "init");
    assert_eq!(t.get(1).unwrap().resident_label, "free");
    assert!(t.get(7).is_none());
}

#[test]
fn first_fit_not_best_fit() {
    let mut t = table();
    // Best fit for 9 would be partition 4 (10Mb); first fit takes partition 1.
    let placed = t.allocate("small", 9);
    assert_eq!(
        placed,
        Some(Placement {
            partition: 1,
            capacity: 40
        })
    );
    let p1 = t.get(1).unwrap();
    assert!(p1.occupied);
    assert_eq!(p1.resident_label, "small");
}

#[rstest]
#[case(&[20, 20, 20], &[Some(1), Some(2), None])]
#[case(&[20, 20, 15], &[Some(1), Some(2), Some(3)])]
#[case(&[30, 30, 20], &[Some(1), None, Some(2)])]
#[case(&[41], &[None])]
#[case(&[0, 0, 0, 0, 0, 0], &[Some(1), Some(2), Some(3), Some(4), Some(5), None])]
#[case(&[8, 8, 8, 8, 8, 8], &[Some(1), Some(2), Some(3), Some(4), Some(5), None])]
fn allocation_sequence(#[case] sizes: &[u32], #[case] expected: &[Option<u32>]) {
    let mut t = table();
    let got: Vec<Option<u32>> = sizes
        .iter()
        .map(|&s| t.allocate("p", s).map(|p| p.partition))
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn failed_allocation_leaves_table_untouched() {
    let mut t = table();
    let before = t.clone();
    assert!(t.allocate("huge", 1000).is_none());
    assert_eq!(t, before);
}

#[test]
fn occupied_partitions_never_free() {
    let mut t = table();
    for _ in 0..10 {
        let _ = t.allocate("x", 1);
    }
    assert_eq!(t.occupied_count(), 6);
    assert!(t.allocate("x", 0).is_none());
    assert!(t.partitions().iter().all(|p| p.occupied));
}

#[test]
fn exact_capacity_fits() {
    let mut t = table();
    let _ = t.allocate("a", 40);
    assert_eq!(t.allocate("b", 25).map(|p| p.partition), Some(2));
}
