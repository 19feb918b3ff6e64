//! Configuration for geofix.
//!
//! Settings live in `~/.geofix/config.ini`. A missing file means defaults,
//! so a fresh install resolves positions without any setup.
//!
//! ```ini
//! [resolver]
//! fallback_timeout = 15
//! platform = auto
//!
//! [ip]
//! endpoint = https://ipapi.co/json/
//!
//! [logging]
//! directory = ~/.geofix/logs
//! file = geofix.log
//! ```
//!
//! # Example
//!
//! ```
//! use geofix::config::ConfigFile;
//! use std::time::Duration;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.fallback_timeout(), Duration::from_secs(15));
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_FALLBACK_TIMEOUT_SECS, DEFAULT_LOG_FILE};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use parser::validate_ip_endpoint;
pub use settings::{ConfigFile, IpSettings, LoggingSettings, PlatformSetting, ResolverSettings};
