//! Injected read-only configuration
//!
//! Process-wide immutable tables constructed once before any driver
//! call: the board pin map and the per-game descriptor data consumed by
//! the external test harness. Nothing here contains protocol logic.

pub mod game;
pub mod pinmap;

pub use game::{GameConfig, RomRegion};
pub use pinmap::PinMap;
