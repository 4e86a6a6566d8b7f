//! CPU driver implementations
//!
//! Concrete bus-master drivers, one per supported target chip. Each
//! driver implements [`socketry_core::BusMaster`] over the shared
//! pin/bus abstractions; nothing here talks to host registers directly.
//!
//! Currently supported:
//!
//! - DEC T-11 (DCT11), as socketed on Atari System 2 boards

#![no_std]
#![deny(unsafe_code)]

pub mod cpu;
