//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::{ConfigFile, PlatformSetting};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [resolver] section
    if let Some(section) = ini.section(Some("resolver")) {
        if let Some(v) = section.get("fallback_timeout") {
            config.resolver.fallback_timeout = v
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "resolver".to_string(),
                    key: "fallback_timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
        }
        if let Some(v) = section.get("platform") {
            config.resolver.platform = parse_platform(v);
        }
    }

    // [ip] section
    if let Some(section) = ini.section(Some("ip")) {
        if let Some(v) = section.get("endpoint") {
            let v = v.trim();
            if !v.is_empty() {
                validate_ip_endpoint(v)?;
                config.ip.endpoint = v.to_string();
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Check that an IP geolocation endpoint is an http(s) URL.
///
/// Shared by the INI parser and command-line overrides.
pub fn validate_ip_endpoint(value: &str) -> Result<(), ConfigFileError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigFileError::InvalidValue {
            section: "ip".to_string(),
            key: "endpoint".to_string(),
            value: value.to_string(),
            reason: "must be an http:// or https:// URL".to_string(),
        })
    }
}

/// Parse the platform setting. `auto` (or empty) means detect at runtime.
fn parse_platform(value: &str) -> PlatformSetting {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        PlatformSetting::Auto
    } else {
        PlatformSetting::Hint(value.to_string())
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
