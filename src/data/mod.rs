//! Value types shared by the readers and the display

pub mod battery;
pub mod reading;

pub use battery::BatterySnapshot;
pub use reading::{Reading, SensorTarget};
