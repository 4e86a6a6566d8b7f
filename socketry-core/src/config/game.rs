//! Per-game descriptor types
//!
//! Pure data consumed by the external test harness: where each ROM sits
//! on the target bus and what its contents should hash to. Verification
//! logic lives in the harness, not here.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of a game or board label
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum ROM regions per game
pub const MAX_ROM_REGIONS: usize = 8;

/// Maximum power-of-two sample bytes per region (covers 64 KiB parts)
pub const MAX_DATA2N: usize = 16;

/// One ROM region on the target bus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RomRegion {
    /// Bus-cycle base address, byte-lane flags included
    pub base: u32,
    /// Region length in bytes
    pub length: u32,
    /// Expected data byte at each power-of-two offset (1, 2, 4, ...)
    ///
    /// A quick seating check the harness runs before the full CRC pass.
    pub data2n: Vec<u8, MAX_DATA2N>,
    /// CRC over the full region contents
    pub crc: u32,
    /// Board location label, e.g. "c7L"
    pub label: String<MAX_LABEL_LEN>,
}

/// Everything the harness needs to exercise one game board
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    /// Game name shown in reports
    pub name: String<MAX_LABEL_LEN>,
    /// ROM regions, in the order the harness verifies them
    pub regions: Vec<RomRegion, MAX_ROM_REGIONS>,
}
