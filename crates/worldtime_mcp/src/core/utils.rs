use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;

// Constants for format strings
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
pub const TIME_INPUT_FORMAT: &str = "%H:%M";

/// Available resource URIs for the Worldtime MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &["time://status", "time://help", "time://timezones"];

/// Signed UTC offset, in seconds, in effect at `dt` in its zone.
pub fn offset_seconds(dt: &DateTime<Tz>) -> i32 {
    dt.offset().fix().local_minus_utc()
}

/// Whether daylight-saving rules are active at `dt`.
///
/// The standard offset for a year is the offset in effect at local midnight
/// on January 1; DST is declared whenever the actual offset differs from
/// that baseline. Known limitation: zones whose January baseline is itself
/// a DST offset (southern hemisphere) report their summer as standard time.
pub fn is_dst(dt: &DateTime<Tz>) -> bool {
    match standard_offset_seconds(dt.timezone(), dt.year()) {
        Some(standard) => offset_seconds(dt) != standard,
        None => false,
    }
}

fn standard_offset_seconds(timezone: Tz, year: i32) -> Option<i32> {
    let midnight = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let jan_first = timezone.from_local_datetime(&midnight).earliest()?;
    Some(offset_seconds(&jan_first))
}

/// Format an offset difference in hours.
///
/// Whole hours render as a sign-prefixed integer (`+9h`, `+0h`); fractional
/// differences keep at most two decimals with trailing zeros and the
/// trailing point stripped (`+5.75h`).
pub fn format_time_difference(hours_difference: f64) -> String {
    match hours_difference.fract() {
        0.0 => format!("{:+.0}h", hours_difference),
        _ => {
            let formatted = format!("{:+.2}", hours_difference);
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            format!("{}h", trimmed)
        }
    }
}

/// Offset difference between two projections of the same instant,
/// `(target - source)` in fractional hours.
pub fn calculate_time_difference(source_time: &DateTime<Tz>, target_time: &DateTime<Tz>) -> String {
    let seconds = offset_seconds(target_time) - offset_seconds(source_time);
    format_time_difference(f64::from(seconds) / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoned(zone: &str, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        let tz: Tz = zone.parse().unwrap();
        tz.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_format_time_difference() {
        // Whole hours are formatted without a decimal part
        assert_eq!(format_time_difference(0.0), "+0h");
        assert_eq!(format_time_difference(5.0), "+5h");
        assert_eq!(format_time_difference(-3.0), "-3h");

        // Fractional hours
        assert_eq!(format_time_difference(5.5), "+5.5h");
        assert_eq!(format_time_difference(-2.75), "-2.75h");

        // Nepal timezone (UTC+5:45) against UTC
        assert_eq!(format_time_difference(5.75), "+5.75h");
    }

    #[test]
    fn offset_seconds_tracks_dst_transitions() {
        assert_eq!(
            offset_seconds(&zoned("America/New_York", 2025, 1, 15, 12, 0)),
            -5 * 3600
        );
        assert_eq!(
            offset_seconds(&zoned("America/New_York", 2025, 7, 15, 12, 0)),
            -4 * 3600
        );
    }

    #[test]
    fn dst_flag_follows_the_january_baseline() {
        assert!(!is_dst(&zoned("America/New_York", 2025, 1, 15, 12, 0)));
        assert!(is_dst(&zoned("America/New_York", 2025, 7, 15, 12, 0)));
        assert!(!is_dst(&zoned("Asia/Tokyo", 2025, 7, 15, 12, 0)));
    }

    #[test]
    fn spring_forward_boundary_flips_the_flag() {
        let before = zoned("America/New_York", 2025, 3, 9, 1, 59);
        let after = zoned("America/New_York", 2025, 3, 9, 3, 1);
        assert!(!is_dst(&before));
        assert!(is_dst(&after));
        assert_eq!(offset_seconds(&after) - offset_seconds(&before), 3600);
    }

    #[test]
    fn southern_hemisphere_summer_reads_as_standard_time() {
        // Sydney observes DST in January, so the January-1 baseline is the
        // DST offset and its summer is reported as not-DST. Documented
        // limitation of the baseline policy, preserved on purpose.
        let summer = zoned("Australia/Sydney", 2025, 1, 15, 12, 0);
        assert_eq!(offset_seconds(&summer), 11 * 3600);
        assert!(!is_dst(&summer));
    }

    #[test]
    fn fractional_zone_difference() {
        let kathmandu: Tz = "Asia/Kathmandu".parse().unwrap();
        let source = zoned("UTC", 2025, 5, 17, 12, 0);
        let target = source.with_timezone(&kathmandu);
        assert_eq!(calculate_time_difference(&source, &target), "+5.75h");
        assert_eq!(calculate_time_difference(&target, &source), "-5.75h");
    }
}
