//! Temperature sources, one per fallback tier

pub mod battery;
pub mod hardware_properties;
pub mod thermal_zone;

pub use battery::BatteryStatusSource;
pub use hardware_properties::HardwarePropertiesSource;
pub use thermal_zone::ThermalZoneSource;

use crate::data::SensorTarget;
use crate::error::Result;
use std::rc::Rc;

/// One way of obtaining a temperature.
///
/// A source either produces a raw Celsius value or says why it could not.
/// It never decides whether the caller should give up; the reader walks its
/// tiers and keeps going on any error.
pub trait TemperatureSource {
    /// Short name used in log lines
    fn name(&self) -> &str;

    fn read_celsius(&self, target: SensorTarget) -> Result<f32>;
}

/// Lets one source serve several targets' tier lists
impl<S: TemperatureSource + ?Sized> TemperatureSource for Rc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_celsius(&self, target: SensorTarget) -> Result<f32> {
        (**self).read_celsius(target)
    }
}
