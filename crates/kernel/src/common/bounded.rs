//! Growable container with a hard upper bound.
//!
//! Trace events, external program records, and PCBs are all capped. Instead of
//! fixed arrays that silently stop accepting entries, [`Bounded`] grows on
//! demand and reports [`SimError::CapacityExceeded`] once its limit is hit.

use std::ops::Deref;

use super::error::SimError;

/// A `Vec` that refuses to grow past `limit` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounded<T> {
    items: Vec<T>,
    limit: usize,
    what: &'static str,
}

impl<T> Bounded<T> {
    /// Creates an empty container.
    ///
    /// # Arguments
    ///
    /// * `what` - Singular name of the element kind, used in the overflow diagnostic.
    /// * `limit` - Maximum number of elements.
    pub const fn new(what: &'static str, limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit,
            what,
        }
    }

    /// Creates a container holding `first`.
    ///
    /// The limit is raised to 1 if smaller, so `first` always fits.
    pub fn with_first(what: &'static str, limit: usize, first: T) -> Self {
        Self {
            items: vec![first],
            limit: limit.max(1),
            what,
        }
    }

    /// Appends `item`, or returns `CapacityExceeded` and drops it when full.
    pub fn push(&mut self, item: T) -> Result<(), SimError> {
        if self.is_full() {
            return Err(SimError::CapacityExceeded {
                what: self.what,
                limit: self.limit,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Returns `true` when no more elements fit.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }

    /// Maximum number of elements.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Mutable access to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Consumes the container and returns the collected elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for Bounded<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}
