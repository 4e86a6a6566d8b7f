//! Driver abstraction traits
//!
//! These traits define the interface between the test harness and the
//! per-CPU driver implementations.

pub mod bus_master;

pub use bus_master::{BusMaster, Interrupt};
