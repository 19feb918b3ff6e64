//! Platform-specific acquisition options.
//!
//! Device location subsystems behave differently per platform: Android fixes
//! take longer to arrive, iOS charges a real power cost for high accuracy.
//! [`Platform::acquisition_options`] encodes those differences as a lookup
//! table. It reads no ambient state, so the same inputs always give the same
//! options.

use std::fmt;
use std::time::Duration;

/// Runtime platform family, as far as location acquisition cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    Android,
    Ios,
    #[default]
    Other,
}

impl Platform {
    /// Classify a user-agent string or OS hint.
    ///
    /// Matching is case-insensitive. Anything not recognisably Android or iOS
    /// (including macOS and empty hints) is [`Platform::Other`].
    pub fn from_hint(hint: &str) -> Self {
        let hint = hint.to_ascii_lowercase();

        if hint.contains("android") {
            return Self::Android;
        }

        let apple_mobile = ["iphone", "ipad", "ipod"]
            .iter()
            .any(|device| hint.contains(device));
        let ios_word = hint
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word == "ios");

        if apple_mobile || ios_word {
            Self::Ios
        } else {
            Self::Other
        }
    }

    /// Platform of the running process.
    pub fn current() -> Self {
        Self::from_hint(std::env::consts::OS)
    }

    /// Derive acquisition options for this platform.
    ///
    /// | Platform | timeout | max age (high) | max age (standard) |
    /// |----------|---------|----------------|--------------------|
    /// | Android  | 20 s    | 5 s            | 15 s               |
    /// | iOS      | 15 s    | 3 s            | 10 s               |
    /// | Other    | 15 s    | 10 s           | 10 s               |
    pub fn acquisition_options(self, high_accuracy: bool) -> AcquisitionOptions {
        let (timeout_secs, high_max_age_secs, standard_max_age_secs) = match self {
            Self::Android => (20, 5, 15),
            Self::Ios => (15, 3, 10),
            Self::Other => (15, 10, 10),
        };

        let max_age_secs = if high_accuracy {
            high_max_age_secs
        } else {
            standard_max_age_secs
        };

        // iOS treats the flag as a binary power switch, so standard mode
        // must turn it off explicitly rather than inherit a default.
        let enable_high_accuracy = match self {
            Self::Ios if !high_accuracy => false,
            _ => high_accuracy,
        };

        AcquisitionOptions {
            enable_high_accuracy,
            timeout: Duration::from_secs(timeout_secs),
            max_cached_age: Duration::from_secs(max_age_secs),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Android => write!(f, "android"),
            Self::Ios => write!(f, "ios"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Per-request parameters passed to a position source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionOptions {
    /// Ask the device for its most precise (and most power-hungry) fix.
    pub enable_high_accuracy: bool,

    /// How long the source may take before giving up on its own.
    pub timeout: Duration,

    /// Oldest cached fix the source may return instead of a fresh one.
    pub max_cached_age: Duration,
}

/// Derive options from an accuracy mode and a platform hint.
///
/// Shorthand for `Platform::from_hint(platform_hint).acquisition_options(high_accuracy)`.
pub fn options_for(high_accuracy: bool, platform_hint: &str) -> AcquisitionOptions {
    Platform::from_hint(platform_hint).acquisition_options(high_accuracy)
}
