//! Privileged hardware-properties query through `dumpsys thermalservice`
//!
//! The thermal service only answers callers holding the `DUMP` permission;
//! everyone else gets a "Permission Denial" line instead of temperatures.

use super::TemperatureSource;
use crate::data::SensorTarget;
use crate::error::{Result, ThermoError};
use crate::utils::{command::*, parsing::*};
use std::cell::{OnceCell, RefCell};
use std::time::{Duration, Instant};

const SECTION_HEADER: &str = "Current temperatures from HAL:";
const DENIAL_MARKER: &str = "Permission Denial";

/// Device temperature classes reported by the thermal HAL
pub fn hal_type(target: SensorTarget) -> i32 {
    match target {
        SensorTarget::Cpu => 0,
        SensorTarget::Battery => 2,
    }
}

/// How long one `dumpsys` output serves further reads; long enough for the
/// battery read to reuse what the CPU read fetched in the same cycle
pub const OUTPUT_REUSE_WINDOW: Duration = Duration::from_millis(4);

#[derive(Debug, Clone)]
pub struct HardwarePropertiesSource {
    program: String,
    enabled: bool,
    reuse_window: Duration,
    supported: OnceCell<bool>,
    last_output: RefCell<Option<(Instant, CommandOutput)>>,
}

impl HardwarePropertiesSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            enabled: true,
            reuse_window: OUTPUT_REUSE_WINDOW,
            supported: OnceCell::new(),
            last_output: RefCell::new(None),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn reuse_window(mut self, window: Duration) -> Self {
        self.reuse_window = window;
        self
    }

    /// The query is only attempted where the service program exists.
    /// The PATH lookup happens once per source.
    pub fn is_supported(&self) -> bool {
        self.enabled && *self.supported.get_or_init(|| command_exists(&self.program))
    }

    fn query(&self) -> Result<CommandOutput> {
        if let Some((fetched, output)) = self.last_output.borrow().as_ref() {
            if fetched.elapsed() < self.reuse_window {
                return Ok(output.clone());
            }
        }

        let output = run_command_capture(&self.program, &["thermalservice"])?;
        *self.last_output.borrow_mut() = Some((Instant::now(), output.clone()));
        Ok(output)
    }

    /// Current temperatures for the target, in the order the HAL lists them
    pub fn device_temperatures(&self, target: SensorTarget) -> Result<Vec<f32>> {
        if !self.is_supported() {
            return Err(ThermoError::SourceUnavailable(format!(
                "{} is not available on this platform",
                self.program
            )));
        }

        let output = self.query()?;
        if output.stdout.contains(DENIAL_MARKER) || output.stderr.contains(DENIAL_MARKER) {
            return Err(ThermoError::PermissionDenied(format!(
                "{} thermalservice refused the query",
                self.program
            )));
        }
        require_success(&self.program, &output)?;

        parse_thermal_service(&output.stdout, target)
    }
}

impl TemperatureSource for HardwarePropertiesSource {
    fn name(&self) -> &str {
        "hardware-properties"
    }

    fn read_celsius(&self, target: SensorTarget) -> Result<f32> {
        let temperatures = self.device_temperatures(target)?;
        match temperatures.first() {
            Some(&value) if value > 0.0 => Ok(value),
            Some(&value) => Err(ThermoError::NoData(format!(
                "{} reported a non-positive {} temperature ({})",
                self.program, target, value
            ))),
            None => Err(ThermoError::NoData(format!(
                "{} reported no {} temperature",
                self.program, target
            ))),
        }
    }
}

/// Parse the HAL section of `dumpsys thermalservice` output.
///
/// Only the records under `Current temperatures from HAL:` count; the cached
/// section that some builds print alongside may be stale.
pub fn parse_thermal_service(output: &str, target: SensorTarget) -> Result<Vec<f32>> {
    let wanted = hal_type(target);
    let mut lines = output.lines();

    if !lines.any(|line| line.trim() == SECTION_HEADER) {
        return Err(ThermoError::NoData(
            "thermalservice output has no HAL temperature section".to_string(),
        ));
    }

    let mut values = Vec::new();
    for line in lines {
        let record = line.trim();
        if !record.starts_with("Temperature{") {
            break;
        }
        let kind = extract_field(record, "mType").and_then(|t| t.parse::<i32>().ok());
        if kind != Some(wanted) {
            continue;
        }
        // A garbled record is skipped like any other unusable entry
        if let Some(value) = extract_field(record, "mValue").and_then(|v| v.parse::<f32>().ok()) {
            values.push(value);
        }
    }
    Ok(values)
}
