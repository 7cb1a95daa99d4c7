//! Privileged tier against a stand-in `dumpsys` script

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use thermoview::collectors::{HardwarePropertiesSource, TemperatureSource};
use thermoview::config::SourcesConfig;
use thermoview::{ReadTemperature, SensorTarget, TemperatureReader, ThermoError};

// Writing an executable while another test thread forks can leave the file
// busy (ETXTBSY), so script setup and execution are serialized.
static EXEC_LOCK: Mutex<()> = Mutex::new(());

const HAL_OUTPUT: &str = "\
IsStatusOverride: false
Current temperatures from HAL:
\tTemperature{mValue=31.0, mType=2, mName=battery, mStatus=0}
\tTemperature{mValue=52.3, mType=0, mName=cpu0-silver-usr, mStatus=0}
Current cooling devices from HAL:
";

const DENIED_OUTPUT: &str = "Permission Denial: can't dump thermalservice from pid=4242, uid=10123 due to missing android.permission.DUMP permission\n";

/// Script printing `output` and appending a line to `calls` on every run
fn fake_dumpsys(dir: &Path, output: &str) -> PathBuf {
    let script = dir.join("dumpsys");
    let calls = dir.join("calls");
    fs::write(dir.join("output"), output).unwrap();
    fs::write(
        &script,
        format!(
            "#!/bin/sh\necho run >> '{}'\ncat '{}'\n",
            calls.display(),
            dir.join("output").display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn call_count(dir: &Path) -> usize {
    fs::read_to_string(dir.join("calls"))
        .map(|c| c.lines().count())
        .unwrap_or(0)
}

fn cpu_zone(root: &Path, temp: &str) {
    let zone = root.join("thermal_zone0");
    fs::create_dir_all(&zone).unwrap();
    fs::write(zone.join("type"), "cpu-thermal\n").unwrap();
    fs::write(zone.join("temp"), format!("{}\n", temp)).unwrap();
}

fn reader(dir: &TempDir, dumpsys: &Path) -> TemperatureReader {
    TemperatureReader::from_config(&SourcesConfig {
        thermal_root: dir.path().join("thermal").to_string_lossy().into_owned(),
        power_supply_root: dir.path().join("power_supply").to_string_lossy().into_owned(),
        hardware_properties: true,
        dumpsys: dumpsys.to_string_lossy().into_owned(),
    })
}

#[test]
fn permission_denial_falls_back_to_thermal_zone() {
    let _guard = EXEC_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let dumpsys = fake_dumpsys(dir.path(), DENIED_OUTPUT);
    cpu_zone(&dir.path().join("thermal"), "45000");

    let source = HardwarePropertiesSource::new(dumpsys.to_string_lossy().into_owned());
    assert!(matches!(
        source.read_celsius(SensorTarget::Cpu),
        Err(ThermoError::PermissionDenied(_))
    ));

    let reader = reader(&dir, &dumpsys);
    assert_eq!(reader.read(SensorTarget::Cpu).celsius(), Some(45.0));
    assert!(!reader.read(SensorTarget::Battery).is_available());
}

#[test]
fn hal_values_short_circuit_the_filesystem() {
    let _guard = EXEC_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let dumpsys = fake_dumpsys(dir.path(), HAL_OUTPUT);
    cpu_zone(&dir.path().join("thermal"), "45000");

    let reader = reader(&dir, &dumpsys);
    assert_eq!(reader.read(SensorTarget::Cpu).celsius(), Some(52.3));
    assert_eq!(reader.read(SensorTarget::Battery).celsius(), Some(31.0));
}

#[test]
fn one_query_serves_both_targets() {
    let _guard = EXEC_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let dumpsys = fake_dumpsys(dir.path(), HAL_OUTPUT);

    let source = HardwarePropertiesSource::new(dumpsys.to_string_lossy().into_owned())
        .reuse_window(Duration::from_secs(60));
    assert_eq!(source.read_celsius(SensorTarget::Cpu).unwrap(), 52.3);
    assert_eq!(source.read_celsius(SensorTarget::Battery).unwrap(), 31.0);
    assert_eq!(call_count(dir.path()), 1);

    let fresh = HardwarePropertiesSource::new(dumpsys.to_string_lossy().into_owned())
        .reuse_window(Duration::ZERO);
    fresh.read_celsius(SensorTarget::Cpu).unwrap();
    fresh.read_celsius(SensorTarget::Cpu).unwrap();
    assert_eq!(call_count(dir.path()), 3);
}
