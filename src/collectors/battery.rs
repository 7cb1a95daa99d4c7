//! Battery status snapshot from the power-supply class
//!
//! The battery's `uevent` attribute carries the same extras the platform
//! broadcasts on every battery change, temperature included in tenths of a
//! degree.

use super::TemperatureSource;
use crate::data::{BatterySnapshot, SensorTarget};
use crate::error::{Result, ThermoError};
use crate::utils::{file::*, parsing::*};
use std::path::{Path, PathBuf};

pub const DEFAULT_POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

#[derive(Debug, Clone)]
pub struct BatteryStatusSource {
    root: PathBuf,
}

impl BatteryStatusSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_battery(supply: &Path) -> bool {
        match read_first_line(supply.join("type")) {
            Ok(kind) => kind.eq_ignore_ascii_case("battery"),
            Err(_) => supply
                .file_name()
                .map(|name| {
                    let name = name.to_string_lossy();
                    name.starts_with("BAT") || name.starts_with("battery")
                })
                .unwrap_or(false),
        }
    }

    /// Current snapshot, `None` when no battery supply has ever reported
    pub fn snapshot(&self) -> Option<BatterySnapshot> {
        let supplies = sorted_entries(&self.root).ok()?;
        let supply = supplies.iter().find(|s| Self::is_battery(s))?;

        let mut snapshot = read_file_safe(supply.join("uevent"))
            .map(|content| BatterySnapshot::from_uevent(&content))
            .unwrap_or_default();

        if !snapshot.contains(BatterySnapshot::TEMPERATURE) {
            if let Ok(temp) = read_first_line(supply.join("temp")) {
                snapshot.insert(BatterySnapshot::TEMPERATURE, &temp);
            }
        }

        Some(snapshot)
    }
}

impl TemperatureSource for BatteryStatusSource {
    fn name(&self) -> &str {
        "battery-status"
    }

    fn read_celsius(&self, _target: SensorTarget) -> Result<f32> {
        let tenths = self
            .snapshot()
            .map(|s| s.int_extra(BatterySnapshot::TEMPERATURE, -1))
            .unwrap_or(-1);

        tenths_to_celsius(tenths).ok_or_else(|| {
            ThermoError::NoData(format!(
                "no battery temperature under {} (raw {})",
                self.root.display(),
                tenths
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_temperature_from_uevent() {
        let root = tempfile::tempdir().unwrap();
        let bat = root.path().join("battery");
        fs::create_dir(&bat).unwrap();
        fs::write(bat.join("type"), "Battery\n").unwrap();
        fs::write(bat.join("uevent"), "POWER_SUPPLY_NAME=battery\nPOWER_SUPPLY_TEMP=365\n").unwrap();

        let source = BatteryStatusSource::new(root.path());
        assert_eq!(source.read_celsius(SensorTarget::Battery).unwrap(), 36.5);
    }

    #[test]
    fn falls_back_to_temp_attribute() {
        let root = tempfile::tempdir().unwrap();
        let bat = root.path().join("BAT0");
        fs::create_dir(&bat).unwrap();
        fs::write(bat.join("temp"), "298\n").unwrap();

        let source = BatteryStatusSource::new(root.path());
        assert_eq!(source.read_celsius(SensorTarget::Battery).unwrap(), 29.8);
    }

    #[test]
    fn mains_supply_is_not_a_battery() {
        let root = tempfile::tempdir().unwrap();
        let ac = root.path().join("AC");
        fs::create_dir(&ac).unwrap();
        fs::write(ac.join("type"), "Mains\n").unwrap();
        fs::write(ac.join("uevent"), "POWER_SUPPLY_TEMP=400\n").unwrap();

        let source = BatteryStatusSource::new(root.path());
        assert!(source.snapshot().is_none());
        assert!(matches!(
            source.read_celsius(SensorTarget::Battery),
            Err(ThermoError::NoData(_))
        ));
    }

    #[test]
    fn zero_temperature_is_no_data() {
        let root = tempfile::tempdir().unwrap();
        let bat = root.path().join("battery");
        fs::create_dir(&bat).unwrap();
        fs::write(bat.join("type"), "Battery\n").unwrap();
        fs::write(bat.join("uevent"), "POWER_SUPPLY_TEMP=0\n").unwrap();

        let source = BatteryStatusSource::new(root.path());
        assert!(source.read_celsius(SensorTarget::Battery).is_err());
    }
}
