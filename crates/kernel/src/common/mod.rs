//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every other module:
//! 1. **Constants:** Table sizes, reset state, and per-step costs.
//! 2. **Error Handling:** The crate-wide [`SimError`] type.
//! 3. **Containers:** [`Bounded`], a growable vector with an explicit cap.

/// Growable container with a hard upper bound.
pub mod bounded;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use bounded::Bounded;
pub use error::SimError;
