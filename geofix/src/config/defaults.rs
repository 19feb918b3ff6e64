//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::file::config_directory;
use super::settings::*;
use crate::location::ip::DEFAULT_IP_ENDPOINT;
use crate::location::DEFAULT_FALLBACK_TIMEOUT;

/// Default hard per-provider timeout in seconds.
pub const DEFAULT_FALLBACK_TIMEOUT_SECS: u64 = DEFAULT_FALLBACK_TIMEOUT.as_secs();

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "geofix.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            resolver: ResolverSettings {
                fallback_timeout: DEFAULT_FALLBACK_TIMEOUT_SECS,
                platform: PlatformSetting::Auto,
            },
            ip: IpSettings {
                endpoint: DEFAULT_IP_ENDPOINT.to_string(),
            },
            logging: LoggingSettings {
                directory: config_directory().join("logs"),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
