//! Battery status snapshot

use std::collections::HashMap;

/// Key/value extras describing the battery at one instant.
///
/// Keys are upper-case without the `POWER_SUPPLY_` prefix, so the battery
/// temperature (tenths of a degree) lives under [`BatterySnapshot::TEMPERATURE`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatterySnapshot {
    extras: HashMap<String, String>,
}

impl BatterySnapshot {
    pub const TEMPERATURE: &'static str = "TEMP";

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `uevent` style content (`POWER_SUPPLY_KEY=value` per line)
    pub fn from_uevent(content: &str) -> Self {
        let mut snapshot = Self::new();
        for line in content.lines() {
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let key = key.strip_prefix("POWER_SUPPLY_").unwrap_or(key);
                snapshot.insert(key, value.trim());
            }
        }
        snapshot
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.extras.insert(key.to_ascii_uppercase(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.extras.contains_key(&key.to_ascii_uppercase())
    }

    /// Integer extra, or `default` when the key is absent or not an integer
    pub fn int_extra(&self, key: &str, default: i32) -> i32 {
        self.extras
            .get(&key.to_ascii_uppercase())
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
