//! Configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `TICKDO_DATA_DIR` | No | `~/.tickdo` | Directory holding the durable slot |
//! | `TICKDO_TICK_MS` | No | 1000 | Countdown tick interval in milliseconds |
//! | `TICKDO_NOTIFY` | No | `desktop` | Notification mode: `desktop`, `bell`, or `off` |
//!
//! The tick interval exists so tests and demos can run countdowns faster
//! than real time; the countdown semantics always treat one tick as one
//! second.
//!
//! # Example
//!
//! ```no_run
//! use tickdo::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Data dir: {}", config.data_dir.display());
//! ```

use std::env;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Default data directory name relative to home.
const DEFAULT_DATA_DIR: &str = ".tickdo";

/// Default countdown tick interval in milliseconds.
const DEFAULT_TICK_MS: u64 = 1000;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// How notifications are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// OS desktop notifications.
    #[default]
    Desktop,
    /// Terminal bell.
    Bell,
    /// No notifications.
    Off,
}

/// Configuration for the tickdo binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the durable slot file.
    pub data_dir: PathBuf,

    /// Countdown tick interval in milliseconds.
    pub tick_ms: u64,

    /// Notification delivery mode.
    pub notify: NotifyMode,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `TICKDO_TICK_MS` is set but is not a positive integer
    /// - `TICKDO_NOTIFY` is set to an unrecognized mode
    /// - The home directory cannot be determined (needed for the default
    ///   data directory)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Optional: TICKDO_DATA_DIR (default: ~/.tickdo)
        let data_dir = match env::var("TICKDO_DATA_DIR") {
            Ok(val) => PathBuf::from(val),
            Err(_) => {
                let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
                base_dirs.home_dir().join(DEFAULT_DATA_DIR)
            }
        };

        // Optional: TICKDO_TICK_MS (default: 1000, must be > 0)
        let tick_ms = match env::var("TICKDO_TICK_MS") {
            Ok(val) => {
                let ms = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "TICKDO_TICK_MS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if ms == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "TICKDO_TICK_MS".to_string(),
                        message: "tick interval must be greater than 0".to_string(),
                    });
                }
                ms
            }
            Err(_) => DEFAULT_TICK_MS,
        };

        // Optional: TICKDO_NOTIFY (default: desktop)
        let notify = match env::var("TICKDO_NOTIFY") {
            Ok(val) => match val.as_str() {
                "desktop" => NotifyMode::Desktop,
                "bell" => NotifyMode::Bell,
                "off" => NotifyMode::Off,
                other => {
                    return Err(ConfigError::InvalidValue {
                        key: "TICKDO_NOTIFY".to_string(),
                        message: format!("expected desktop, bell, or off, got '{other}'"),
                    })
                }
            },
            Err(_) => NotifyMode::Desktop,
        };

        Ok(Self {
            data_dir,
            tick_ms,
            notify,
        })
    }
}
