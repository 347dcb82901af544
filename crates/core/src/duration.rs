//! Duration parsing utilities.

use crate::error::ConfigError;
use std::time::Duration;

/// Parse a duration string like "250ms", "1s", "5m", "1h" or "1000".
///
/// Supports:
/// - Plain numbers (interpreted as milliseconds): "1000"
/// - Milliseconds suffix: "250ms"
/// - Seconds suffix: "1s"
/// - Minutes suffix: "5m"
/// - Hours suffix: "1h"
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let trimmed = s.trim();
    let invalid = || ConfigError::InvalidDuration(s.to_string());

    if trimmed.is_empty() {
        return Err(invalid());
    }

    // "ms" must be checked before "m" and "s"
    let (number, millis_per_unit) = if let Some(n) = trimmed.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = trimmed.strip_suffix('h') {
        (n, 3_600_000)
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 60_000)
    } else if let Some(n) = trimmed.strip_suffix('s') {
        (n, 1_000)
    } else {
        (trimmed, 1)
    };

    let value: u64 = number.trim().parse().map_err(|_| invalid())?;
    let millis = value.checked_mul(millis_per_unit).ok_or_else(invalid)?;

    Ok(Duration::from_millis(millis))
}

/// Render a duration in the shortest unit that represents it exactly.
///
/// The output always round-trips through [`parse_duration`] for whole
/// milliseconds.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis == 0 {
        "0ms".to_string()
    } else if millis % 3_600_000 == 0 {
        format!("{}h", millis / 3_600_000)
    } else if millis % 60_000 == 0 {
        format!("{}m", millis / 60_000)
    } else if millis % 1_000 == 0 {
        format!("{}s", millis / 1_000)
    } else {
        format!("{millis}ms")
    }
}

/// Serde adapter for human-readable duration fields.
pub mod serde_duration {
    use super::{format_duration, parse_duration};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_duration(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module for `Option<Duration>` fields.
    pub mod option {
        use super::{format_duration, parse_duration};
        use serde::{Deserialize, Deserializer, Serializer};
        use std::time::Duration;

        pub fn serialize<S: Serializer>(
            duration: &Option<Duration>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match duration {
                Some(d) => serializer.serialize_str(&format_duration(*d)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Duration>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| parse_duration(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
