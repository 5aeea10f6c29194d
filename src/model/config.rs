use super::host::Host;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;

pub const DEFAULT_CYCLE_TIME: u64 = 60;
pub const DEFAULT_PING_COUNT: u64 = 3;

/// A settings-dialog apply rejected by validation. The message text is shown
/// to the user verbatim in the error popup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("specified cycle time is not an integer")]
    CycleTimeNotInteger,
    #[error("specified cycle time is not a positive integer")]
    CycleTimeNotPositive,
    #[error("specified ping count is not an integer")]
    PingCountNotInteger,
    #[error("specified ping count is not a positive integer")]
    PingCountNotPositive,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not write configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// On-disk representation. Hosts must stay last so the `[[hosts]]` tables
/// serialize after the scalar fields.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    cycle_time: Option<i64>,
    ping_count: Option<i64>,
    quiet: Option<bool>,
    #[serde(default)]
    hosts: Vec<Host>,
}

/// Process-wide configuration store, shared between the settings dialog and
/// the background checker. Each tunable field is read and written as a whole
/// through an atomic, so the checker sees either the old or the new value,
/// never a torn one. The host list and file path are fixed after load.
#[derive(Debug)]
pub struct Config {
    cycle_time: AtomicU64,
    ping_count: AtomicU64,
    quiet: AtomicBool,
    hosts: Vec<Host>,
    path: PathBuf,
}

impl Config {
    /// Loads the configuration from `path`. Recoverable problems (missing
    /// fields, bad values, unreadable file) fall back to defaults and are
    /// returned as human-readable strings for the deferred startup dialog.
    /// A missing file is not an error.
    pub fn load(path: &Path) -> (Self, Vec<String>) {
        let mut errors = Vec::new();

        let file = match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<ConfigFile>(&text) {
                Ok(file) => file,
                Err(err) => {
                    errors.push(format!("Configuration file could not be parsed: {err}"));
                    ConfigFile::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => ConfigFile::default(),
            Err(err) => {
                errors.push(format!("Configuration file could not be read: {err}"));
                ConfigFile::default()
            }
        };

        let cycle_time = match file.cycle_time {
            Some(value) if value > 0 => value as u64,
            Some(_) => {
                errors.push(format!(
                    "cycle_time must be a positive integer, using default of {DEFAULT_CYCLE_TIME}."
                ));
                DEFAULT_CYCLE_TIME
            }
            None => DEFAULT_CYCLE_TIME,
        };

        let ping_count = match file.ping_count {
            Some(value) if value > 0 => value as u64,
            Some(_) => {
                errors.push(format!(
                    "ping_count must be a positive integer, using default of {DEFAULT_PING_COUNT}."
                ));
                DEFAULT_PING_COUNT
            }
            None => DEFAULT_PING_COUNT,
        };

        let mut hosts = Vec::new();
        for host in file.hosts {
            if host.address.trim().is_empty() {
                errors.push(format!(
                    "Host \"{}\" has an empty address and was skipped.",
                    host.label
                ));
            } else {
                hosts.push(host);
            }
        }

        let config = Self {
            cycle_time: AtomicU64::new(cycle_time),
            ping_count: AtomicU64::new(ping_count),
            quiet: AtomicBool::new(file.quiet.unwrap_or(false)),
            hosts,
            path: path.to_path_buf(),
        };
        (config, errors)
    }

    pub fn cycle_time(&self) -> u64 {
        self.cycle_time.load(Ordering::Relaxed)
    }

    pub fn ping_count(&self) -> u64 {
        self.ping_count.load(Ordering::Relaxed)
    }

    pub fn quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// Validates and commits settings-dialog input, field by field in entry
    /// order. Note the commit order: `cycle_time` is committed before
    /// `ping_count` is even parsed, so a rejected ping count leaves an
    /// already-updated cycle time behind. This mirrors the long-standing
    /// apply behavior; callers keep the dialog open on any error so the user
    /// can correct and re-apply.
    pub fn apply_settings(
        &self,
        cycle_entry: &str,
        count_entry: &str,
        quiet: bool,
    ) -> Result<(), SettingsError> {
        let cycle_time: i64 = cycle_entry
            .trim()
            .parse()
            .map_err(|_| SettingsError::CycleTimeNotInteger)?;
        if cycle_time <= 0 {
            return Err(SettingsError::CycleTimeNotPositive);
        }
        self.cycle_time.store(cycle_time as u64, Ordering::Relaxed);

        let ping_count: i64 = count_entry
            .trim()
            .parse()
            .map_err(|_| SettingsError::PingCountNotInteger)?;
        if ping_count <= 0 {
            return Err(SettingsError::PingCountNotPositive);
        }
        self.ping_count.store(ping_count as u64, Ordering::Relaxed);
        self.quiet.store(quiet, Ordering::Relaxed);
        Ok(())
    }

    /// Writes the full configuration (settings and hosts) back to disk.
    /// Runs on a detached worker after a successful apply; failures are
    /// logged by the caller and never roll back the in-memory values.
    pub fn persist(&self) -> Result<(), ConfigError> {
        let file = ConfigFile {
            cycle_time: Some(self.cycle_time() as i64),
            ping_count: Some(self.ping_count() as i64),
            quiet: Some(self.quiet()),
            hosts: self.hosts.clone(),
        };
        let text = toml::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
