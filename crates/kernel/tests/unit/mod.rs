//! # Unit Tests
//!
//! Organized to mirror the crate: shared building blocks, configuration,
//! kernel tables, the simulation engine, and statistics.





/// Run statistics tests.
pub mod stats;
