//! Git configuration backed by libgit2.
//!
//! Files are opened per call so the store can be shared freely; a credential
//! helper makes only a handful of lookups per invocation.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Config, ConfigLevel, ErrorCode, Repository};

use super::store::{ConfigEntry, ConfigKey, ConfigurationLevel, GitConfiguration};
use crate::error::{GcmError, Result};

#[derive(Debug, Clone, Default)]
pub struct Git2Configuration {
    /// Configuration files from lowest to highest precedence.
    files: Vec<(ConfigurationLevel, PathBuf)>,
}

impl Git2Configuration {
    /// Locate the system, XDG, global and (if `repo_dir` is inside a
    /// repository) local configuration files.
    pub fn discover(repo_dir: Option<&Path>) -> Result<Self> {
        let mut files = Vec::new();

        if let Ok(path) = Config::find_system() {
            files.push((ConfigurationLevel::System, path));
        }
        if let Ok(path) = Config::find_xdg() {
            files.push((ConfigurationLevel::Global, path));
        }
        files.push((ConfigurationLevel::Global, global_config_path()?));

        if let Some(dir) = repo_dir {
            match Repository::discover(dir) {
                Ok(repo) => files.push((ConfigurationLevel::Local, repo.path().join("config"))),
                Err(e) if e.code() == ErrorCode::NotFound => {
                    log::debug!("No repository found at {}", dir.display());
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { files })
    }

    /// Use an explicit set of files, lowest precedence first.
    pub fn with_files(files: Vec<(ConfigurationLevel, PathBuf)>) -> Self {
        Self { files }
    }

    fn open(&self, level: ConfigurationLevel) -> Result<Config> {
        let mut config = Config::new()?;
        for (idx, (file_level, path)) in self.files.iter().enumerate() {
            if !level.includes(*file_level) || !path.exists() {
                continue;
            }
            // libgit2 allows one file per level: an earlier global file
            // (the XDG one) goes in the XDG slot.
            let shadowed = self.files[idx + 1..]
                .iter()
                .any(|(later, _)| later == file_level);
            config.add_file(path, to_git2_level(*file_level, shadowed), false)?;
        }
        Ok(config)
    }

    /// File that receives writes for `level`; the last file of that level wins.
    fn writable_path(&self, level: ConfigurationLevel) -> Result<&Path> {
        let level = match level {
            ConfigurationLevel::All => ConfigurationLevel::Global,
            other => other,
        };

        self.files
            .iter()
            .rev()
            .find(|(file_level, _)| *file_level == level)
            .map(|(_, path)| path.as_path())
            .ok_or_else(|| {
                GcmError::Config(format!("no {} configuration file available", level.as_str()))
            })
    }
}

fn to_git2_level(level: ConfigurationLevel, shadowed: bool) -> ConfigLevel {
    match level {
        ConfigurationLevel::System if shadowed => ConfigLevel::ProgramData,
        ConfigurationLevel::System => ConfigLevel::System,
        ConfigurationLevel::Global if shadowed => ConfigLevel::XDG,
        ConfigurationLevel::Global => ConfigLevel::Global,
        ConfigurationLevel::Local | ConfigurationLevel::All => ConfigLevel::Local,
    }
}

fn from_git2_level(level: ConfigLevel) -> ConfigurationLevel {
    match level {
        ConfigLevel::ProgramData | ConfigLevel::System => ConfigurationLevel::System,
        ConfigLevel::XDG | ConfigLevel::Global => ConfigurationLevel::Global,
        _ => ConfigurationLevel::Local,
    }
}

fn global_config_path() -> Result<PathBuf> {
    if let Ok(path) = Config::find_global() {
        return Ok(path);
    }

    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".gitconfig"))
        .ok_or_else(|| GcmError::Config("unable to locate home directory".to_string()))
}

fn not_found(e: &git2::Error) -> bool {
    e.code() == ErrorCode::NotFound
}

impl GitConfiguration for Git2Configuration {
    fn enumerate(
        &self,
        level: ConfigurationLevel,
        section: &str,
        property: &str,
    ) -> Result<Vec<ConfigEntry>> {
        let config = self.open(level)?;
        let mut result = Vec::new();

        config.entries(None)?.for_each(|entry| {
            let (Some(name), Some(value)) = (entry.name(), entry.value()) else {
                return;
            };
            let matched = ConfigKey::parse(name)
                .map(|key| key.is_in(section, property))
                .unwrap_or(false);
            if matched {
                result.push(ConfigEntry {
                    key: name.to_string(),
                    value: value.to_string(),
                    level: from_git2_level(entry.level()),
                });
            }
        })?;

        Ok(result)
    }

    fn get(&self, level: ConfigurationLevel, key: &str) -> Result<Option<String>> {
        let config = self.open(level)?;
        match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_all(&self, level: ConfigurationLevel, key: &str) -> Result<Vec<String>> {
        let config = self.open(level)?;
        let mut values = Vec::new();

        let entries = match config.multivar(key, None) {
            Ok(entries) => entries,
            Err(e) if not_found(&e) => return Ok(values),
            Err(e) => return Err(e.into()),
        };

        entries.for_each(|entry| {
            if let Some(value) = entry.value() {
                values.push(value.to_string());
            }
        })?;

        Ok(values)
    }

    fn set(&self, level: ConfigurationLevel, key: &str, value: &str) -> Result<()> {
        let path = self.writable_path(level)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        log::debug!("git config --file {} {} {}", path.display(), key, value);
        let mut config = Config::open(path)?;
        config.set_str(key, value)?;
        Ok(())
    }

    fn unset(&self, level: ConfigurationLevel, key: &str) -> Result<()> {
        let path = self.writable_path(level)?;
        if !path.exists() {
            return Ok(());
        }

        let mut config = Config::open(path)?;
        match config.remove_multivar(key, ".*") {
            Ok(()) => Ok(()),
            Err(e) if not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
