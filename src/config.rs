// src/config.rs
//! Configuration stored as JSON under the user's config directory

use crate::{
    error::{Result, WnbError},
    gps::GpsSource,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_REFRESH_SECS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WnbConfig {
    pub source_type: String, // "none", "gpsd", "serial"
    pub serial_port: Option<String>,
    pub serial_baudrate: Option<u32>,
    pub gpsd_host: Option<String>,
    pub gpsd_port: Option<u16>,
    /// Where named user profiles are kept; defaults next to the config file
    #[serde(default)]
    pub profile_store: Option<PathBuf>,
    #[serde(default)]
    pub refresh_interval: Option<u64>,
    /// Profile shown when the watch view starts without one
    #[serde(default)]
    pub startup_profile: Option<String>,
}

impl Default for WnbConfig {
    fn default() -> Self {
        Self {
            source_type: "none".to_string(),
            serial_port: None,
            serial_baudrate: Some(9600),
            gpsd_host: Some("localhost".to_string()),
            gpsd_port: Some(2947),
            profile_store: None,
            refresh_interval: Some(DEFAULT_REFRESH_SECS),
            startup_profile: None,
        }
    }
}

impl WnbConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| WnbError::Config(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| WnbError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WnbError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| WnbError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// `$HOME/.config/wnb-calc`
    pub fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| WnbError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("wnb-calc"))
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn profile_store_path(&self) -> Result<PathBuf> {
        match &self.profile_store {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("profiles.json")),
        }
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval.filter(|&s| s > 0).unwrap_or(DEFAULT_REFRESH_SECS)
    }

    /// Resolve the GPS source to keep alive
    pub fn gps_source(&self) -> Result<GpsSource> {
        match self.source_type.as_str() {
            "none" | "" => Ok(GpsSource::None),
            "serial" => {
                let port = self
                    .serial_port
                    .clone()
                    .ok_or_else(|| WnbError::Config("serial source needs serial_port".to_string()))?;
                Ok(GpsSource::Serial {
                    port,
                    baudrate: self.serial_baudrate.unwrap_or(9600),
                })
            }
            "gpsd" => Ok(GpsSource::Gpsd {
                host: self.gpsd_host.clone().unwrap_or_else(|| "localhost".to_string()),
                port: self.gpsd_port.unwrap_or(2947),
            }),
            other => Err(WnbError::Config(format!("unknown GPS source type '{}'", other))),
        }
    }

    pub fn update_source(&mut self, source_type: &str) {
        self.source_type = source_type.to_string();
    }

    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.source_type = "serial".to_string();
        self.serial_port = Some(port);
        self.serial_baudrate = Some(baudrate);
    }

    pub fn update_gpsd(&mut self, host: String, port: u16) {
        self.source_type = "gpsd".to_string();
        self.gpsd_host = Some(host);
        self.gpsd_port = Some(port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WnbConfig::default();
        assert_eq!(config.source_type, "none");
        assert_eq!(config.gps_source().unwrap(), GpsSource::None);
        assert_eq!(config.refresh_interval_secs(), 1);
    }

    #[test]
    fn test_update_serial() {
        let mut config = WnbConfig::default();
        config.update_serial("/dev/ttyUSB0".to_string(), 4800);
        assert_eq!(
            config.gps_source().unwrap(),
            GpsSource::Serial {
                port: "/dev/ttyUSB0".to_string(),
                baudrate: 4800
            }
        );
    }

    #[test]
    fn test_serial_without_port() {
        let mut config = WnbConfig::default();
        config.update_source("serial");
        assert!(matches!(config.gps_source(), Err(WnbError::Config(_))));
    }

    #[test]
    fn test_unknown_source() {
        let mut config = WnbConfig::default();
        config.update_source("bluetooth");
        assert!(config.gps_source().is_err());
    }

    #[test]
    fn test_zero_refresh_falls_back() {
        let config = WnbConfig {
            refresh_interval: Some(0),
            ..WnbConfig::default()
        };
        assert_eq!(config.refresh_interval_secs(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert_eq!(WnbConfig::load_from(&path).unwrap(), WnbConfig::default());

        let mut config = WnbConfig::default();
        config.update_gpsd("gps.local".to_string(), 2948);
        config.startup_profile = Some("C172R".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(WnbConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(WnbConfig::load_from(&path), Err(WnbError::Config(_))));
    }
}
