//! String parsing utilities

use crate::error::{Result, ThermoError};

/// Raw thermal-zone values above this are taken to be milli-degrees
pub const MILLI_DEGREE_THRESHOLD: f32 = 1000.0;

/// Parse a raw sysfs temperature value
pub fn parse_raw_temperature(raw: &str) -> Result<f32> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| ThermoError::ParseFailure(format!("Invalid temperature value: {:?}", raw)))
}

/// Convert a thermal-zone value to Celsius, guessing milli-degrees for large values
pub fn normalize_zone_temperature(raw: f32) -> f32 {
    if raw > MILLI_DEGREE_THRESHOLD {
        raw / 1000.0
    } else {
        raw
    }
}

/// Tenths of a degree to Celsius; non-positive values mean "no reading"
pub fn tenths_to_celsius(tenths: i32) -> Option<f32> {
    (tenths > 0).then(|| tenths as f32 / 10.0)
}

/// Extract `value` from a `key=value` pair inside a comma separated record
/// such as `Temperature{mValue=41.2, mType=0, mName=cpu0}`
pub fn extract_field<'a>(record: &'a str, key: &str) -> Option<&'a str> {
    let start = record.find('{').map(|i| i + 1).unwrap_or(0);
    let end = record.rfind('}').unwrap_or(record.len());
    record
        .get(start..end)?
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim())
}
