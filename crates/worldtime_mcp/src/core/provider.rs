use std::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, NaiveTime, TimeZone};
use chrono_tz::Tz;
use interim::{Dialect, parse_date_string};

use crate::core::{
    clock::Clock,
    error::{TimeServerError, TimeServerResult},
    models::{TimeConversionResult, TimeResult},
    utils::{self, TIME_INPUT_FORMAT},
};

/// Time-resolution engine behind the three tools.
///
/// Holds the only shared state: the local timezone used when a request
/// omits one, and the clock supplying "now". Both are fixed at
/// construction, so concurrent calls never observe a mutation.
#[derive(Clone)]
pub struct TimeServer {
    pub(crate) local_timezone: Tz,
    clock: Clock,
}

impl TimeServer {
    pub fn new() -> Self {
        Self {
            local_timezone: Self::detect_local_timezone(),
            clock: Clock::system(),
        }
    }

    /// Server with an explicit local timezone instead of the detected one.
    pub fn with_local_timezone(timezone_name: &str) -> TimeServerResult<Self> {
        let local_timezone =
            Tz::from_str(timezone_name).map_err(|_| TimeServerError::InvalidTimezone {
                timezone: timezone_name.to_string(),
            })?;
        Ok(Self {
            local_timezone,
            clock: Clock::system(),
        })
    }

    /// Replace the clock. Construction-time only; used by tests that need a
    /// deterministic "now".
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn detect_local_timezone() -> Tz {
        match iana_time_zone::get_timezone() {
            Ok(tz_name) => match tz_name.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    tracing::warn!("Could not parse timezone '{}', defaulting to UTC", tz_name);
                    chrono_tz::UTC
                }
            },
            Err(_) => {
                tracing::warn!("Could not detect system timezone, defaulting to UTC");
                chrono_tz::UTC
            }
        }
    }

    pub(crate) fn parse_timezone(&self, timezone_name: &str) -> TimeServerResult<Tz> {
        Tz::from_str(timezone_name).map_err(|_| TimeServerError::InvalidTimezone {
            timezone: timezone_name.to_string(),
        })
    }

    /// Resolve an identifier, substituting the local zone for an empty one.
    /// Returns the zone together with the identifier reported back to the
    /// caller.
    fn resolve_timezone(&self, timezone_name: &str) -> TimeServerResult<(Tz, String)> {
        if timezone_name.is_empty() {
            Ok((self.local_timezone, self.local_timezone.name().to_string()))
        } else {
            Ok((self.parse_timezone(timezone_name)?, timezone_name.to_string()))
        }
    }

    pub fn get_current_time(&self, timezone_name: &str) -> TimeServerResult<TimeResult> {
        let (timezone, reported_name) = self.resolve_timezone(timezone_name)?;
        let current_time = self.clock.now().with_timezone(&timezone);

        Ok(TimeResult::from_datetime(&current_time, &reported_name))
    }

    pub fn convert_time(
        &self,
        source_tz: &str,
        time_str: &str,
        target_tz: &str,
    ) -> TimeServerResult<TimeConversionResult> {
        let (source_timezone, source_name) = self.resolve_timezone(source_tz)?;
        let (target_timezone, target_name) = self.resolve_timezone(target_tz)?;

        let (source_time, target_time) =
            self.perform_time_conversion(&source_timezone, time_str, &target_timezone)?;

        let time_difference = utils::calculate_time_difference(&source_time, &target_time);

        Ok(TimeConversionResult {
            source: TimeResult::from_datetime(&source_time, &source_name),
            target: TimeResult::from_datetime(&target_time, &target_name),
            time_difference,
        })
    }

    fn perform_time_conversion(
        &self,
        source_tz: &Tz,
        time_str: &str,
        target_tz: &Tz,
    ) -> TimeServerResult<(DateTime<Tz>, DateTime<Tz>)> {
        let parsed_time = NaiveTime::parse_from_str(time_str, TIME_INPUT_FORMAT).map_err(|_| {
            TimeServerError::InvalidTimeFormat {
                time: time_str.to_string(),
            }
        })?;

        // The calendar date comes from "now" on the server's own local
        // calendar, not the source zone's. Near midnight the two can
        // disagree by a day.
        let today = self
            .clock
            .now()
            .with_timezone(&self.local_timezone)
            .date_naive();
        let wall_clock = today.and_time(parsed_time);

        let source_time = match source_tz.from_local_datetime(&wall_clock) {
            LocalResult::Single(dt) => dt,
            // fall-back repeats the hour; take the earlier instant
            LocalResult::Ambiguous(earliest, _) => earliest,
            // spring-forward gap; shift past the missing hour
            LocalResult::None => source_tz
                .from_local_datetime(&(wall_clock + Duration::hours(1)))
                .earliest()
                .ok_or_else(|| TimeServerError::InvalidTimeFormat {
                    time: time_str.to_string(),
                })?,
        };

        let target_time = source_time.with_timezone(target_tz);
        Ok((source_time, target_time))
    }

    pub fn parse_natural_time(
        &self,
        expression: &str,
        timezone_name: &str,
    ) -> TimeServerResult<TimeResult> {
        let (timezone, reported_name) = self.resolve_timezone(timezone_name)?;

        // Relative phrases ("tomorrow", "next friday") resolve against the
        // calendar implied by "now" in the requested zone.
        let reference = self.clock.now().with_timezone(&timezone);
        let parsed = parse_date_string(expression, reference, Dialect::Us).map_err(|err| {
            TimeServerError::UnparseableExpression {
                expression: expression.to_string(),
                reason: err.to_string(),
            }
        })?;

        // The grammar engine may answer on a different zone basis
        let resolved = parsed.with_timezone(&timezone);
        Ok(TimeResult::from_datetime(&resolved, &reported_name))
    }
}

impl Default for TimeServer {
    fn default() -> Self {
        Self::new()
    }
}
