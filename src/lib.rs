//! thermoview library
//!
//! CPU and battery temperature readouts with tiered fallback sources and a
//! visibility-driven refresh loop.

pub mod collectors;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod poll;
pub mod reader;
pub mod utils;

pub use config::Config;
pub use data::{BatterySnapshot, Reading, SensorTarget};
pub use display::{DisplaySurface, OutputSlots, TemperatureFormatter, TerminalSurface};
pub use error::{Result, ThermoError};
pub use poll::{PollState, PollingDisplay};
pub use reader::{ReadTemperature, TemperatureReader};
