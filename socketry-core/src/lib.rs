//! Board-agnostic core abstractions for the Socketry in-circuit tester
//!
//! This crate contains everything the CPU drivers share that does not
//! depend on a specific host board or target chip:
//!
//! - Pin and bus handles over the board pin map
//! - The bus-master driver trait (one implementation per target CPU)
//! - The structured fault/outcome taxonomy
//! - Injected read-only configuration types (pin maps, game descriptors)

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod config;
pub mod fault;
pub mod pin;
pub mod traits;

// Re-export key items at crate root for convenience
pub use bus::Bus;
pub use config::PinMap;
pub use fault::{Fault, Outcome};
pub use pin::{Connection, Pin};
pub use traits::{BusMaster, Interrupt};
