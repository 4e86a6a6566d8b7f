//! Single-pin handle
//!
//! A [`Pin`] binds one named socket connection to the board pin map. It
//! owns no hardware; every operation goes through the caller's
//! [`GpioPort`], so the same handles work against real registers and
//! against the simulated targets the tests use.

use socketry_hal::gpio::{Direction, GpioPort, Level};

use crate::config::PinMap;
use crate::fault::{Fault, Outcome};

/// One socket connection: pin number plus human-readable name
///
/// Chip pinout tables are `static` arrays of these. The name appears in
/// faults, so it should match the label a schematic would carry. A
/// leading underscore marks an active-low line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Connection {
    /// Pin number in the package's own numbering (1-based for DIL)
    pub socket_pin: u8,
    /// Schematic label for the line
    pub name: &'static str,
}

impl Connection {
    /// Create a connection entry
    pub const fn new(socket_pin: u8, name: &'static str) -> Self {
        Self { socket_pin, name }
    }
}

/// Handle for one socket pin routed through the board pin map
///
/// Constructed once at driver startup and never destroyed during
/// operation; copies are cheap and carry no state beyond identity.
#[derive(Debug, Clone, Copy)]
pub struct Pin {
    conn: &'static Connection,
    map: &'static PinMap,
}

impl Pin {
    /// Bind a connection to a board pin map
    pub const fn new(conn: &'static Connection, map: &'static PinMap) -> Self {
        Self { conn, map }
    }

    /// Schematic name of the pin
    pub fn name(&self) -> &'static str {
        self.conn.name
    }

    fn line(&self) -> u8 {
        self.map.host_line(self.conn.socket_pin)
    }

    /// Configure the pin's electrical direction
    pub fn set_direction(&self, port: &mut impl GpioPort, direction: Direction) {
        port.set_direction(self.line(), direction);
    }

    /// Drive the pin to a level
    pub fn write(&self, port: &mut impl GpioPort, level: Level) {
        port.write_level(self.line(), level);
    }

    /// Sample the pin's current level
    pub fn read(&self, port: &mut impl GpioPort) -> Level {
        port.read_level(self.line())
    }

    /// Sample the pin and fail with a [`Fault::PinState`] on mismatch
    pub fn expect(&self, port: &mut impl GpioPort, expected: Level) -> Outcome {
        let observed = self.read(port);

        if observed == expected {
            Ok(())
        } else {
            Err(Fault::PinState {
                pin: self.conn.name,
                expected,
                observed,
            })
        }
    }
}
