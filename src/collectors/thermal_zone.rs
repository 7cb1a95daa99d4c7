//! Thermal-zone hierarchy scan (`/sys/class/thermal` by default)

use super::TemperatureSource;
use crate::data::SensorTarget;
use crate::error::{Result, ThermoError};
use crate::utils::{file::*, parsing::*};
use log::trace;
use std::path::{Path, PathBuf};

pub const DEFAULT_THERMAL_ROOT: &str = "/sys/class/thermal";

/// Scans zones whose `type` label contains a keyword and returns the first
/// one with a readable temperature.
#[derive(Debug, Clone)]
pub struct ThermalZoneSource {
    root: PathBuf,
    keyword: String,
}

impl ThermalZoneSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_keyword(root, "cpu")
    }

    pub fn with_keyword(root: impl Into<PathBuf>, keyword: &str) -> Self {
        Self {
            root: root.into(),
            keyword: keyword.to_lowercase(),
        }
    }

    /// Read one zone; `Ok(None)` when its label does not match
    fn read_zone(&self, zone: &Path) -> Result<Option<f32>> {
        let label = read_first_line(zone.join("type"))?;
        if !label.to_lowercase().contains(&self.keyword) {
            return Ok(None);
        }
        let raw = parse_raw_temperature(&read_first_line(zone.join("temp"))?)?;
        Ok(Some(normalize_zone_temperature(raw)))
    }

    /// Celsius value of the first matching zone
    pub fn scan(&self) -> Result<f32> {
        if !dir_readable(&self.root) {
            return Err(ThermoError::SourceUnavailable(format!(
                "{} is missing or unreadable",
                self.root.display()
            )));
        }

        let zones = sorted_entries(&self.root)?;
        if zones.is_empty() {
            return Err(ThermoError::NoData(format!(
                "no thermal zones under {}",
                self.root.display()
            )));
        }

        for zone in &zones {
            match self.read_zone(zone) {
                Ok(Some(celsius)) => return Ok(celsius),
                Ok(None) => {}
                Err(err) => trace!("skipping {}: {}", zone.display(), err),
            }
        }

        Err(ThermoError::NoData(format!(
            "no readable '{}' zone under {}",
            self.keyword,
            self.root.display()
        )))
    }
}

impl TemperatureSource for ThermalZoneSource {
    fn name(&self) -> &str {
        "thermal-zone"
    }

    fn read_celsius(&self, _target: SensorTarget) -> Result<f32> {
        self.scan()
    }
}
