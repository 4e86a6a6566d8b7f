//! GPIO port abstraction
//!
//! The tester addresses host GPIO lines by number, because which line
//! serves which socket pin is decided by a per-board lookup table at
//! runtime. Board support crates implement [`GpioPort`] over the chip's
//! pad registers.

/// Logic level on a GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if the level is low
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

// Bridges to embedded-hal so boards built on its digital traits can
// adapt without conversion glue of their own.
impl From<embedded_hal::digital::PinState> for Level {
    fn from(state: embedded_hal::digital::PinState) -> Self {
        match state {
            embedded_hal::digital::PinState::Low => Level::Low,
            embedded_hal::digital::PinState::High => Level::High,
        }
    }
}

impl From<Level> for embedded_hal::digital::PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => embedded_hal::digital::PinState::Low,
            Level::High => embedded_hal::digital::PinState::High,
        }
    }
}

/// Electrical direction of a GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// High-impedance input
    Input,
    /// Input with the internal pull resistor to Vcc enabled
    ///
    /// An unexpected low reading on a pulled-up line reveals a short
    /// to ground rather than a floating line.
    InputPullup,
    /// Push-pull output
    Output,
}

/// Port of numbered GPIO lines
///
/// Implementations handle the register manipulation for the specific
/// host MCU. Line numbers are host GPIO numbers, not socket pins;
/// translation between the two lives in the core's pin map.
pub trait GpioPort {
    /// Configure the electrical direction of a line
    fn set_direction(&mut self, line: u8, direction: Direction);

    /// Drive a line to a level
    ///
    /// The line must be configured as [`Direction::Output`].
    fn write_level(&mut self, line: u8, level: Level);

    /// Sample the current level of a line
    fn read_level(&mut self, line: u8) -> Level;
}
