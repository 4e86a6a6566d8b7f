//! Fault taxonomy
//!
//! Every driver operation returns a structured value; nothing panics and
//! nothing is heap-allocated. A fault carries enough context (the named
//! pin or bus, expected vs. observed) for the harness to report it and
//! for a technician to probe the board, which is left in the failing
//! state on purpose.

use socketry_hal::gpio::Level;

/// Outcome of a driver operation that produces no data
pub type Outcome = Result<(), Fault>;

/// Specific failure raised by a driver operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// A named pin did not read the level the sequence requires
    PinState {
        /// Name of the pin involved
        pin: &'static str,
        /// Level the sequence requires
        expected: Level,
        /// Level actually sampled
        observed: Level,
    },
    /// A named bus did not read the value the sequence requires
    BusValue {
        /// Name of the bus involved
        bus: &'static str,
        /// Value the sequence requires
        expected: u16,
        /// Value actually composed from the sampled lines
        observed: u16,
    },
    /// The operation is a contract placeholder on this target profile
    NotImplemented,
    /// A bounded wait elapsed without the awaited line asserting
    Timeout,
}
