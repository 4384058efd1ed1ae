use chrono::DateTime;
use chrono_tz::Tz;
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::utils::{self, DATETIME_FORMAT};

/// Helper function to deserialize and trim strings
fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// A zone-projected instant as reported to the caller
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeResult {
    /// IANA timezone name the instant is projected into
    pub timezone: String,
    /// RFC 3339 datetime with a numeric UTC offset (a zero offset renders +00:00)
    pub datetime: String,
    /// Whether daylight saving time is active at that instant
    pub is_dst: bool,
}

impl TimeResult {
    /// Build a result from a zone-projected datetime. `timezone_name` is the
    /// identifier the caller supplied (or the defaulted local zone), echoed
    /// back without canonicalization.
    pub fn from_datetime(dt: &DateTime<Tz>, timezone_name: &str) -> TimeResult {
        TimeResult {
            timezone: timezone_name.to_string(),
            datetime: dt.format(DATETIME_FORMAT).to_string(),
            is_dst: utils::is_dst(dt),
        }
    }
}

/// One wall-clock time interpreted in two zones
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeConversionResult {
    /// The wall-clock time interpreted in the source zone
    pub source: TimeResult,
    /// The same instant projected into the target zone
    pub target: TimeResult,
    /// Signed offset difference in fractional hours, e.g. "+9h" or "+5.75h"
    pub time_difference: String,
}

/// Request to get current time in a timezone
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCurrentTimeRequest {
    /// IANA timezone name, e.g. 'America/New_York' (optional; empty uses the
    /// server's local timezone)
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub timezone: String,
}

/// Request to convert an HH:MM time between timezones
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertTimeRequest {
    /// Source IANA timezone name (empty falls back to the server's local timezone)
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub source_timezone: String,
    /// Time to convert in 24-hour format (HH:MM)
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub time: String,
    /// Target IANA timezone name (empty falls back to the server's local timezone)
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub target_timezone: String,
}

/// Request to resolve a natural-language time expression
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseNaturalTimeRequest {
    /// Expression to resolve, e.g. "next Friday at noon" or "tomorrow at 8pm"
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub expression: String,
    /// IANA timezone name the expression is interpreted in (optional; empty
    /// uses the server's local timezone)
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub timezone: String,
}
