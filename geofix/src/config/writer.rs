//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[resolver]
; Hard upper bound, in seconds, on any single position source (default: 15).
; Each source also has its own platform timeout; whichever fires first applies.
fallback_timeout = {}
; Platform used to pick acquisition timeouts and cache tolerances:
;   auto    - detect from the running OS (default)
;   android - Android-like device (20s timeout)
;   ios     - iOS-like device (high accuracy is an explicit power switch)
;   other   - anything else
; A full user-agent string is also accepted and classified.
platform = {}

[ip]
; IP geolocation endpoint. Must answer JSON with numeric latitude/longitude.
endpoint = {}

[logging]
; Directory for log files
directory = {}
; Log file name (cleared at the start of each session)
file = {}
"#,
        config.resolver.fallback_timeout,
        config.resolver.platform.as_str(),
        config.ip.endpoint,
        config.logging.directory.display(),
        config.logging.file,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ini::Ini;

    #[test]
    fn test_output_is_valid_ini() {
        let content = to_config_string(&ConfigFile::default());
        let ini = Ini::load_from_str(&content).unwrap();

        let resolver = ini.section(Some("resolver")).unwrap();
        assert_eq!(resolver.get("fallback_timeout"), Some("15"));
        assert_eq!(resolver.get("platform"), Some("auto"));
        assert!(ini.section(Some("ip")).unwrap().get("endpoint").is_some());
    }
}
