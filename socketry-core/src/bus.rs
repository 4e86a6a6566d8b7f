//! Multi-bit bus handle
//!
//! An ordered group of connections treated as one value. Grouping keeps
//! per-bit indexing out of the timing-critical bus-cycle path and gives
//! one place to enforce the bit order, which is fixed at construction:
//! element 0 of the connection table carries bit 0.

use socketry_hal::gpio::{Direction, GpioPort, Level};

use crate::config::PinMap;
use crate::fault::{Fault, Outcome};
use crate::pin::Connection;

/// Widest bus a single [`Bus`] value can compose
pub const MAX_BUS_WIDTH: usize = 16;

/// Ordered group of socket pins forming one electrical bus
///
/// The logical width is the number of member connections, commonly 8.
/// Like [`crate::pin::Pin`] this is a handle: it owns no hardware and
/// all I/O goes through the caller's port.
#[derive(Debug, Clone, Copy)]
pub struct Bus {
    name: &'static str,
    conns: &'static [Connection],
    map: &'static PinMap,
}

impl Bus {
    /// Bind an ordered connection table to a board pin map
    ///
    /// Element 0 carries bit 0; the order never changes afterwards.
    pub const fn new(name: &'static str, conns: &'static [Connection], map: &'static PinMap) -> Self {
        Self { name, conns, map }
    }

    /// Name of the bus, as it appears in faults
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of member pins
    pub fn width(&self) -> usize {
        self.conns.len()
    }

    /// Configure every member pin's direction
    pub fn set_direction(&self, port: &mut impl GpioPort, direction: Direction) {
        for conn in self.conns {
            port.set_direction(self.map.host_line(conn.socket_pin), direction);
        }
    }

    /// Drive the bus with a value, one bit per member pin
    ///
    /// All member pins must already be configured as outputs.
    pub fn write(&self, port: &mut impl GpioPort, value: u16) {
        debug_assert!(self.conns.len() <= MAX_BUS_WIDTH);

        for (bit, conn) in self.conns.iter().enumerate() {
            let level = Level::from(value & (1 << bit) != 0);
            port.write_level(self.map.host_line(conn.socket_pin), level);
        }
    }

    /// Sample every member pin and compose the bus value
    ///
    /// All member pins must already be configured as inputs.
    pub fn read(&self, port: &mut impl GpioPort) -> u16 {
        debug_assert!(self.conns.len() <= MAX_BUS_WIDTH);

        let mut value = 0u16;

        for (bit, conn) in self.conns.iter().enumerate() {
            if port.read_level(self.map.host_line(conn.socket_pin)).is_high() {
                value |= 1 << bit;
            }
        }

        value
    }

    /// Sample the bus and fail with a [`Fault::BusValue`] on mismatch
    pub fn expect(&self, port: &mut impl GpioPort, expected: u16) -> Outcome {
        let observed = self.read(port);

        if observed == expected {
            Ok(())
        } else {
            Err(Fault::BusValue {
                bus: self.name,
                expected,
                observed,
            })
        }
    }
}
