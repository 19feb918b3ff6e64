//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;
use std::time::Duration;

use crate::location::Platform;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Resolution race settings
    pub resolver: ResolverSettings,
    /// IP geolocation settings
    pub ip: IpSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Resolution race configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Hard per-provider timeout in seconds
    pub fallback_timeout: u64,
    /// Platform used to derive acquisition options
    pub platform: PlatformSetting,
}

/// How the platform is determined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformSetting {
    /// Detect from the running OS.
    #[default]
    Auto,
    /// Classify the given user-agent string or OS name.
    Hint(String),
}

impl PlatformSetting {
    /// Resolve to a concrete platform.
    pub fn resolve(&self) -> Platform {
        match self {
            Self::Auto => Platform::current(),
            Self::Hint(hint) => Platform::from_hint(hint),
        }
    }

    /// Value as written in the INI file.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Hint(hint) => hint,
        }
    }
}

/// IP geolocation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpSettings {
    /// Lookup endpoint returning JSON with `latitude` and `longitude`
    pub endpoint: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}

impl ConfigFile {
    /// Platform the resolver should derive options for.
    pub fn platform(&self) -> Platform {
        self.resolver.platform.resolve()
    }

    /// Hard per-provider timeout.
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.resolver.fallback_timeout)
    }
}
