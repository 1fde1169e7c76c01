//! Platform abstraction layer
//!
//! Handles everything between the outside world and the simulation:
//! - Input events to per-tick commands
//! - Fixed-cadence frame pacing

pub mod input;
pub mod time;

pub use input::{HoldWindow, InputEvent, InputTranslator, Key};
pub use time::FrameClock;
