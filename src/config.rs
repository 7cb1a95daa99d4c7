use crate::collectors::battery::DEFAULT_POWER_SUPPLY_ROOT;
use crate::collectors::thermal_zone::DEFAULT_THERMAL_ROOT;
use crate::error::{Result, ThermoError};
use dirs::config_dir;
use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}, time::Duration};

pub const SYSTEM_CONFIG_PATH: &str = "/usr/share/thermoview/config.toml";
pub const DEFAULT_CONFIG: &str = include_str!("../config/config.toml");

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub poll: PollConfig,
    pub sources: SourcesConfig,
    pub display: DisplayConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PollConfig {
    pub refresh_hz: f64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
    pub thermal_root: String,
    pub power_supply_root: String,
    pub hardware_properties: bool,
    pub dumpsys: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub cpu_label: String,
    pub battery_label: String,
    pub decimal_separator: Option<char>,
    pub label_color: Option<String>,
    pub value_color: Option<String>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { refresh_hz: 120.0 }
    }
}

impl PollConfig {
    /// Delay between cycles, truncated to whole milliseconds (8 ms at 120 Hz)
    pub fn refresh_delay(&self) -> Duration {
        let hz = if self.refresh_hz > 0.0 { self.refresh_hz } else { PollConfig::default().refresh_hz };
        Duration::from_millis((1000.0 / hz) as u64)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            thermal_root: DEFAULT_THERMAL_ROOT.to_string(),
            power_supply_root: DEFAULT_POWER_SUPPLY_ROOT.to_string(),
            hardware_properties: true,
            dumpsys: "dumpsys".to_string(),
        }
    }
}

impl SourcesConfig {
    pub fn thermal_root(&self) -> PathBuf {
        expand(&self.thermal_root)
    }

    pub fn power_supply_root(&self) -> PathBuf {
        expand(&self.power_supply_root)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cpu_label: "CPU".to_string(),
            battery_label: "Batterie".to_string(),
            decimal_separator: None,
            label_color: None,
            value_color: None,
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("thermoview/config.toml"))
}

/// Write the bundled default config to the user config dir if none exists.
/// Returns the path when a file was created.
pub fn ensure_user_config_exists() -> Result<Option<PathBuf>> {
    let user_config_path = user_config_path()
        .ok_or_else(|| ThermoError::Config("Could not determine config dir".to_string()))?;

    if user_config_path.exists() {
        return Ok(None);
    }

    if let Some(parent) = user_config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    if Path::new(SYSTEM_CONFIG_PATH).exists() {
        fs::copy(SYSTEM_CONFIG_PATH, &user_config_path)?;
    } else {
        fs::write(&user_config_path, DEFAULT_CONFIG)?;
    }
    Ok(Some(user_config_path))
}

pub fn parse_config(data: &str) -> Result<Config> {
    toml::de::from_str(data).map_err(|e| ThermoError::Config(e.to_string()))
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let config_data = fs::read_to_string(path)
        .map_err(|e| ThermoError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_config(&config_data)
}

/// Load the user config, then the system-wide one, else built-in defaults
pub fn load_config() -> Result<Config> {
    let candidates = user_config_path()
        .into_iter()
        .chain(std::iter::once(PathBuf::from(SYSTEM_CONFIG_PATH)));

    for path in candidates {
        if path.exists() {
            log::debug!("loading config from {}", path.display());
            return load_config_from(&path);
        }
    }

    log::debug!("no config file found, using defaults");
    Ok(Config::default())
}
