//! Application configuration management.
//!
//! Configuration lives in the user's config directory (typically
//! ~/.config/twindeck/config.toml). A missing file means defaults. The output
//! format is left to the device unless `sample_rate` or `channels` is set.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::constants::DEFAULT_LOG_FILE;

const CONFIG_KEYS: &[&str] = &[
    "music_dir",
    "sample_rate",
    "channels",
    "log_file",
    "log_level",
    "show_hidden",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<u16>,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub show_hidden: bool,
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            music_dir: None,
            sample_rate: None,
            channels: None,
            log_file: default_log_file(),
            log_level: default_log_level(),
            show_hidden: false,
        }
    }

    /// Keys accepted by `set_value`
    pub fn keys() -> &'static [&'static str] {
        CONFIG_KEYS
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("twindeck")
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join("twindeck")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        config.log_level_filter()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    /// Music directory with `~` expanded, if one is configured
    pub fn music_dir_path(&self) -> Option<PathBuf> {
        self.music_dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
    }

    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.log_file).as_ref())
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, Box<dyn Error>> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| format!("Invalid log_level '{}'", self.log_level).into())
    }

    /// Set a key from its string form. An empty value clears optional keys.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        match key {
            "music_dir" => {
                self.music_dir = (!value.is_empty()).then(|| value.to_string());
            }
            "sample_rate" => {
                let sample_rate = parse_optional(value, "sample_rate")?;
                if sample_rate == Some(0) {
                    return Err("sample_rate must be greater than 0".into());
                }
                self.sample_rate = sample_rate;
            }
            "channels" => {
                let channels = parse_optional(value, "channels")?;
                if channels == Some(0) {
                    return Err("channels must be greater than 0".into());
                }
                self.channels = channels;
            }
            "log_file" => {
                if value.is_empty() {
                    return Err("log_file cannot be empty".into());
                }
                self.log_file = value.to_string();
            }
            "log_level" => {
                value
                    .parse::<LevelFilter>()
                    .map_err(|_| "Value must be one of off, error, warn, info, debug, trace")?;
                self.log_level = value.to_lowercase();
            }
            "show_hidden" => {
                self.show_hidden = value
                    .parse::<bool>()
                    .map_err(|_| "Value must be 'true' or 'false'")?;
            }
            _ => return Err(format!("Unknown configuration key: {key}").into()),
        }
        Ok(())
    }
}

fn parse_optional<T: std::str::FromStr>(
    value: &str,
    key: &str,
) -> Result<Option<T>, Box<dyn Error>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| format!("Value for {key} must be a positive number").into())
}
