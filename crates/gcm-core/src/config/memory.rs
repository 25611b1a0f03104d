//! In-memory Git configuration, for tests and embedders that do not want
//! to touch the user's files.

use std::sync::{Mutex, MutexGuard};

use super::store::{keys_match, ConfigEntry, ConfigKey, ConfigurationLevel, GitConfiguration};
use crate::error::{GcmError, Result};

#[derive(Debug, Default)]
pub struct MemoryConfiguration {
    entries: Mutex<Vec<ConfigEntry>>,
}

impl MemoryConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value without replacing existing ones (multi-valued keys).
    pub fn add(&self, level: ConfigurationLevel, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(ConfigEntry {
                key: key.to_string(),
                value: value.to_string(),
                level: concrete(level),
            });
        }
    }

    /// Builder form of [`MemoryConfiguration::add`].
    pub fn with(self, level: ConfigurationLevel, key: &str, value: &str) -> Self {
        self.add(level, key, value);
        self
    }

    /// Snapshot of the values stored for `key` at exactly `level`.
    pub fn values(&self, level: ConfigurationLevel, key: &str) -> Vec<String> {
        self.get_all(level, key).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ConfigEntry>>> {
        self.entries
            .lock()
            .map_err(|_| GcmError::Config("configuration lock poisoned".to_string()))
    }

    fn visible(&self, level: ConfigurationLevel) -> Result<Vec<ConfigEntry>> {
        let mut visible: Vec<ConfigEntry> = self
            .lock()?
            .iter()
            .filter(|entry| level.includes(entry.level))
            .cloned()
            .collect();
        // Stable: insertion order is kept within a level
        visible.sort_by_key(|entry| entry.level);
        Ok(visible)
    }
}

fn concrete(level: ConfigurationLevel) -> ConfigurationLevel {
    match level {
        ConfigurationLevel::All => ConfigurationLevel::Local,
        other => other,
    }
}

impl GitConfiguration for MemoryConfiguration {
    fn enumerate(
        &self,
        level: ConfigurationLevel,
        section: &str,
        property: &str,
    ) -> Result<Vec<ConfigEntry>> {
        Ok(self
            .visible(level)?
            .into_iter()
            .filter(|entry| {
                ConfigKey::parse(&entry.key)
                    .map(|key| key.is_in(section, property))
                    .unwrap_or(false)
            })
            .collect())
    }

    fn get(&self, level: ConfigurationLevel, key: &str) -> Result<Option<String>> {
        Ok(self.get_all(level, key)?.pop())
    }

    fn get_all(&self, level: ConfigurationLevel, key: &str) -> Result<Vec<String>> {
        Ok(self
            .visible(level)?
            .into_iter()
            .filter(|entry| keys_match(&entry.key, key))
            .map(|entry| entry.value)
            .collect())
    }

    fn set(&self, level: ConfigurationLevel, key: &str, value: &str) -> Result<()> {
        let level = concrete(level);
        let mut entries = self.lock()?;
        entries.retain(|entry| !(entry.level == level && keys_match(&entry.key, key)));
        entries.push(ConfigEntry {
            key: key.to_string(),
            value: value.to_string(),
            level,
        });
        Ok(())
    }

    fn unset(&self, level: ConfigurationLevel, key: &str) -> Result<()> {
        let mut entries = self.lock()?;
        entries.retain(|entry| !(level.includes(entry.level) && keys_match(&entry.key, key)));
        Ok(())
    }
}
