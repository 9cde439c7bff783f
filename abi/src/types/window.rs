use std::fmt;

use chrono::NaiveDateTime;

use crate::{convert_to_canonical, convert_to_transport, parse_datetime, WindowError};

/// Upper bound on a single reservation, in minutes.
pub const DEFAULT_MAX_MINUTES: i64 = 180;

/// A validated `[start, end)` reservation window, zone-naive local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// whole minutes between start and end, rounded to nearest
    pub fn duration_minutes(&self) -> i64 {
        round_minutes(self.end - self.start)
    }

    pub fn start_canonical(&self) -> String {
        convert_to_canonical(&self.start)
    }

    pub fn end_canonical(&self) -> String {
        convert_to_canonical(&self.end)
    }

    /// `(start_at, end_at)` ready for the request body
    pub fn to_transport(&self) -> (String, String) {
        (
            convert_to_transport(&self.start),
            convert_to_transport(&self.end),
        )
    }

    /// half-open overlap: touching windows do not overlap
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_canonical(), self.end_canonical())
    }
}

fn round_minutes(delta: chrono::Duration) -> i64 {
    (delta.num_milliseconds() as f64 / 60_000.0).round() as i64
}

/// Validate a proposed window.
///
/// Checks run in a fixed order and the first failure is returned:
/// 1. both endpoints parse
/// 2. end strictly after start
/// 3. start not before `now`
/// 4. `0 < duration <= max_minutes`
pub fn validate_window(
    start_raw: &str,
    end_raw: &str,
    now: NaiveDateTime,
    max_minutes: i64,
) -> Result<TimeWindow, WindowError> {
    let start = parse_datetime(start_raw)?;
    let end = parse_datetime(end_raw)?;

    if end <= start {
        return Err(WindowError::EndBeforeStart);
    }

    if start < now {
        return Err(WindowError::StartInPast);
    }

    let window = TimeWindow { start, end };
    let minutes = window.duration_minutes();
    if minutes <= 0 || minutes > max_minutes {
        return Err(WindowError::DurationOutOfRange(minutes, max_minutes));
    }

    Ok(window)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn fmt(dt: NaiveDateTime) -> String {
        convert_to_canonical(&dt)
    }

    #[test]
    fn end_before_start_should_reject() {
        let now = at(2025, 1, 1, 0, 0);
        let err = validate_window("2025-06-01 10:00", "2025-06-01 09:00", now, 180).unwrap_err();
        assert_eq!(err, WindowError::EndBeforeStart);
    }

    #[test]
    fn equal_endpoints_should_reject_as_end_before_start() {
        let now = at(2025, 1, 1, 0, 0);
        let err = validate_window("2025-06-01 10:00", "01/06/2025 10:00", now, 180).unwrap_err();
        assert_eq!(err, WindowError::EndBeforeStart);
    }

    #[test]
    fn ordering_should_compare_instants_not_text() {
        // "01/06/2025" sorts before "31/05/2025" as text
        let now = at(2025, 1, 1, 0, 0);
        let window = validate_window("31/05/2025 23:00", "01/06/2025 01:00", now, 180).unwrap();
        assert_eq!(window.duration_minutes(), 120);
    }

    #[test]
    fn invalid_date_should_win_over_other_failures() {
        let now = at(2030, 1, 1, 0, 0);
        let err = validate_window("2025-06-01 10:00", "garbage", now, 180).unwrap_err();
        assert_eq!(err, WindowError::InvalidDate);
    }

    #[test]
    fn end_before_start_should_win_over_past_start() {
        let now = at(2030, 1, 1, 0, 0);
        let err = validate_window("2025-06-01 10:00", "2025-06-01 09:00", now, 180).unwrap_err();
        assert_eq!(err, WindowError::EndBeforeStart);
    }

    #[test]
    fn past_start_should_reject() {
        let now = at(2025, 6, 1, 10, 1);
        let err = validate_window("2025-06-01 10:00", "2025-06-01 11:00", now, 180).unwrap_err();
        assert_eq!(err, WindowError::StartInPast);
    }

    #[test]
    fn start_earlier_in_current_minute_should_reject() {
        let now = at(2025, 6, 1, 10, 0) + Duration::seconds(30);
        let err = validate_window("2025-06-01 10:00", "2025-06-01 11:00", now, 180).unwrap_err();
        assert_eq!(err, WindowError::StartInPast);
    }

    #[test]
    fn start_equal_to_now_should_be_accepted() {
        let now = at(2025, 6, 1, 10, 0);
        let window = validate_window("2025-06-01 10:00", "2025-06-01 11:00", now, 180).unwrap();
        assert_eq!(window.duration_minutes(), 60);
    }

    #[test]
    fn past_start_should_win_over_duration() {
        let now = at(2025, 6, 1, 12, 0);
        let err = validate_window("2025-06-01 10:00", "2025-06-01 23:00", now, 180).unwrap_err();
        assert_eq!(err, WindowError::StartInPast);
    }

    #[test]
    fn too_long_window_should_reject() {
        let now = at(2025, 6, 1, 8, 0);
        let start = now + Duration::minutes(1);
        let end = start + Duration::minutes(181);
        let err = validate_window(&fmt(start), &fmt(end), now, 180).unwrap_err();
        assert_eq!(err, WindowError::DurationOutOfRange(181, 180));
    }

    #[test]
    fn max_length_window_should_be_accepted() {
        let now = at(2025, 6, 1, 8, 0);
        let start = now + Duration::minutes(1);
        let end = start + Duration::minutes(180);
        let window = validate_window(&fmt(start), &fmt(end), now, 180).unwrap();
        assert_eq!(window.duration_minutes(), 180);
    }

    #[test]
    fn valid_window_should_work() {
        let now = at(2025, 6, 1, 8, 0);
        let start = now + Duration::minutes(5);
        let end = start + Duration::minutes(30);
        let window = validate_window(&fmt(start), &fmt(end), now, 180).unwrap();
        assert_eq!(window.duration_minutes(), 30);
        assert_eq!(window.start_canonical(), "2025-06-01 08:05");
        assert_eq!(window.end_canonical(), "2025-06-01 08:35");
        assert_eq!(
            window.to_transport(),
            (
                "2025-06-01T08:05:00".to_string(),
                "2025-06-01T08:35:00".to_string()
            )
        );
    }

    #[test]
    fn smaller_policy_should_apply() {
        let now = at(2025, 6, 1, 8, 0);
        let err = validate_window("2025-06-01 09:00", "2025-06-01 10:00", now, 45).unwrap_err();
        assert_eq!(err, WindowError::DurationOutOfRange(60, 45));
    }

    #[test]
    fn duration_should_round_to_nearest_minute() {
        let start = at(2025, 6, 1, 8, 0);
        let window = TimeWindow {
            start,
            end: start + Duration::seconds(180 * 60 + 54),
        };
        assert_eq!(window.duration_minutes(), 181);

        let window = TimeWindow {
            start,
            end: start + Duration::seconds(30 * 60 + 29),
        };
        assert_eq!(window.duration_minutes(), 30);
    }

    #[test]
    fn overlaps_should_be_half_open() {
        let a = TimeWindow {
            start: at(2025, 6, 1, 9, 0),
            end: at(2025, 6, 1, 10, 0),
        };
        let b = TimeWindow {
            start: at(2025, 6, 1, 10, 0),
            end: at(2025, 6, 1, 11, 0),
        };
        let c = TimeWindow {
            start: at(2025, 6, 1, 9, 30),
            end: at(2025, 6, 1, 10, 30),
        };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn display_should_use_canonical_form() {
        let window = TimeWindow {
            start: at(2025, 6, 1, 9, 0),
            end: at(2025, 6, 1, 10, 0),
        };
        assert_eq!(window.to_string(), "[2025-06-01 09:00, 2025-06-01 10:00)");
    }
}
