//! Tiered temperature reader

use crate::collectors::{
    BatteryStatusSource, HardwarePropertiesSource, TemperatureSource, ThermalZoneSource,
};
use crate::config::SourcesConfig;
use crate::data::{Reading, SensorTarget};
use log::{debug, trace};
use std::rc::Rc;

/// Anything that can produce a reading per target
pub trait ReadTemperature {
    fn read(&self, target: SensorTarget) -> Reading;
}

/// Holds an ordered list of fallback sources per target; the first source
/// returning a strictly positive value wins.
#[derive(Default)]
pub struct TemperatureReader {
    cpu: Vec<Box<dyn TemperatureSource>>,
    battery: Vec<Box<dyn TemperatureSource>>,
}

impl TemperatureReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard tiers: privileged query, then thermal zones for the CPU or
    /// the battery status snapshot for the battery.
    pub fn from_config(config: &SourcesConfig) -> Self {
        // Shared so both targets parse the same thermalservice output
        let privileged = Rc::new(
            HardwarePropertiesSource::new(config.dumpsys.clone())
                .enabled(config.hardware_properties),
        );

        Self::new()
            .with_source(SensorTarget::Cpu, Rc::clone(&privileged))
            .with_source(SensorTarget::Cpu, ThermalZoneSource::new(config.thermal_root()))
            .with_source(SensorTarget::Battery, privileged)
            .with_source(
                SensorTarget::Battery,
                BatteryStatusSource::new(config.power_supply_root()),
            )
    }

    /// Append a tier after the existing ones for `target`
    pub fn with_source<S>(mut self, target: SensorTarget, source: S) -> Self
    where
        S: TemperatureSource + 'static,
    {
        self.tiers_mut(target).push(Box::new(source));
        self
    }

    pub fn tiers(&self, target: SensorTarget) -> &[Box<dyn TemperatureSource>] {
        match target {
            SensorTarget::Cpu => &self.cpu,
            SensorTarget::Battery => &self.battery,
        }
    }

    fn tiers_mut(&mut self, target: SensorTarget) -> &mut Vec<Box<dyn TemperatureSource>> {
        match target {
            SensorTarget::Cpu => &mut self.cpu,
            SensorTarget::Battery => &mut self.battery,
        }
    }
}

impl ReadTemperature for TemperatureReader {
    fn read(&self, target: SensorTarget) -> Reading {
        for source in self.tiers(target) {
            match source.read_celsius(target) {
                Ok(value) if value > 0.0 && value.is_finite() => {
                    trace!("{} temperature {:.1} from {}", target, value, source.name());
                    return Reading::from_celsius(value);
                }
                Ok(value) => debug!("{}: ignoring {} value {}", source.name(), target, value),
                Err(err) => debug!("{}: {} unavailable: {}", source.name(), target, err),
            }
        }
        Reading::UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ThermoError};
    use std::cell::Cell;

    struct Fixed {
        value: Result<f32>,
        calls: Rc<Cell<usize>>,
    }

    impl Fixed {
        fn ok(value: f32, calls: &Rc<Cell<usize>>) -> Self {
            Self { value: Ok(value), calls: Rc::clone(calls) }
        }

        fn denied(calls: &Rc<Cell<usize>>) -> Self {
            Self {
                value: Err(ThermoError::PermissionDenied("no DUMP".into())),
                calls: Rc::clone(calls),
            }
        }
    }

    impl TemperatureSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn read_celsius(&self, _target: SensorTarget) -> Result<f32> {
            self.calls.set(self.calls.get() + 1);
            match &self.value {
                Ok(v) => Ok(*v),
                Err(_) => Err(ThermoError::PermissionDenied("no DUMP".into())),
            }
        }
    }

    #[test]
    fn first_positive_tier_short_circuits() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let reader = TemperatureReader::new()
            .with_source(SensorTarget::Cpu, Fixed::ok(41.2, &first))
            .with_source(SensorTarget::Cpu, Fixed::ok(99.0, &second));

        assert_eq!(reader.read(SensorTarget::Cpu).celsius(), Some(41.2));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn denial_and_non_positive_values_fall_through() {
        let calls = Rc::new(Cell::new(0));
        let reader = TemperatureReader::new()
            .with_source(SensorTarget::Battery, Fixed::denied(&calls))
            .with_source(SensorTarget::Battery, Fixed::ok(0.0, &calls))
            .with_source(SensorTarget::Battery, Fixed::ok(36.5, &calls));

        assert_eq!(reader.read(SensorTarget::Battery).celsius(), Some(36.5));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn all_tiers_failing_gives_sentinel() {
        let calls = Rc::new(Cell::new(0));
        let reader = TemperatureReader::new()
            .with_source(SensorTarget::Cpu, Fixed::denied(&calls))
            .with_source(SensorTarget::Cpu, Fixed::ok(-5.0, &calls));

        assert!(!reader.read(SensorTarget::Cpu).is_available());
    }

    #[test]
    fn targets_have_independent_tiers() {
        let calls = Rc::new(Cell::new(0));
        let reader = TemperatureReader::new().with_source(SensorTarget::Cpu, Fixed::ok(50.0, &calls));

        assert!(!reader.read(SensorTarget::Battery).is_available());
        assert_eq!(calls.get(), 0);
        assert!(reader.tiers(SensorTarget::Battery).is_empty());
    }

    #[test]
    fn config_builds_two_tiers_per_target() {
        let reader = TemperatureReader::from_config(&SourcesConfig::default());
        let names: Vec<&str> = reader.tiers(SensorTarget::Cpu).iter().map(|s| s.name()).collect();
        assert_eq!(names, ["hardware-properties", "thermal-zone"]);
        let names: Vec<&str> = reader.tiers(SensorTarget::Battery).iter().map(|s| s.name()).collect();
        assert_eq!(names, ["hardware-properties", "battery-status"]);
    }
}
