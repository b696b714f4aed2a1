//! Interrupt Vector Table.
//!
//! Maps each interrupt number to the address of its service routine. The table
//! has exactly [`VECTOR_TABLE_SIZE`] entries and is read-only once built. Entry
//! `n` lives at memory position `2 * n`.

use crate::common::constants::{DEFAULT_VECTOR_ADDRESSES, VECTOR_ENTRY_BYTES, VECTOR_TABLE_SIZE};

/// One vector table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorEntry {
    /// Interrupt number; always equal to the entry's index.
    pub interrupt_number: usize,
    /// Address of the interrupt service routine.
    pub isr_address: u16,
}

/// Fixed-size interrupt vector table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorTable {
    entries: [VectorEntry; VECTOR_TABLE_SIZE],
}

impl VectorTable {
    /// Builds a table from ISR addresses indexed by interrupt number.
    pub fn new(addresses: &[u16; VECTOR_TABLE_SIZE]) -> Self {
        Self {
            entries: std::array::from_fn(|i| VectorEntry {
                interrupt_number: i,
                isr_address: addresses[i],
            }),
        }
    }

    /// Validates a raw interrupt number from a trace.
    ///
    /// # Returns
    ///
    /// The number as a table index if `0 <= number < 26`, otherwise `None`.
    pub fn checked(number: i64) -> Option<usize> {
        usize::try_from(number)
            .ok()
            .filter(|&n| n < VECTOR_TABLE_SIZE)
    }

    /// Returns the ISR address for `interrupt_number`.
    ///
    /// Callers validate the number first with [`VectorTable::checked`]; this
    /// lookup has no error path.
    pub fn lookup(&self, interrupt_number: usize) -> u16 {
        self.entries[interrupt_number].isr_address
    }

    /// Memory position of the vector for `interrupt_number`.
    pub const fn memory_position(interrupt_number: usize) -> usize {
        interrupt_number * VECTOR_ENTRY_BYTES
    }

    /// All entries in interrupt-number order.
    pub fn entries(&self) -> &[VectorEntry] {
        &self.entries
    }
}

impl Default for VectorTable {
    fn default() -> Self {
        Self::new(&DEFAULT_VECTOR_ADDRESSES)
    }
}
