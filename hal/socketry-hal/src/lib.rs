//! Socketry Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the tester core drives. Board
//! support crates (one per probe board revision) implement them against
//! the actual MCU registers; the core and CPU drivers stay board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  CPU drivers (socketry-drivers)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  socketry-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Board support crate (external)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioPort`] - Numbered digital I/O lines
//! - [`irq::IrqControl`] - Host preemption gating for timed bus sequences

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod irq;

// Re-export key items at crate root for convenience
pub use gpio::{Direction, GpioPort, Level};
pub use irq::{IrqControl, IrqGuard};
