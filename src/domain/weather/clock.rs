//! Wall-clock time at a city identified only by its UTC offset.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};

pub const NIGHT_STARTS_HOUR: u32 = 18;
pub const DAY_STARTS_HOUR: u32 = 6;

// chrono rejects fixed offsets of a full day or more.
const MAX_OFFSET_SECS: i32 = 86_399;

/// Current wall-clock time at a location `offset_secs` east of UTC.
#[must_use]
pub fn local_time(offset_secs: i32) -> NaiveDateTime {
    local_time_at(Utc::now(), offset_secs)
}

#[must_use]
pub fn local_time_at(now: DateTime<Utc>, offset_secs: i32) -> NaiveDateTime {
    let offset = Duration::seconds(i64::from(
        offset_secs.clamp(-MAX_OFFSET_SECS, MAX_OFFSET_SECS),
    ));
    let utc = now.naive_utc();
    utc.checked_add_signed(offset).unwrap_or(utc)
}

#[must_use]
pub fn is_night(offset_secs: i32) -> bool {
    is_night_at(Utc::now(), offset_secs)
}

#[must_use]
pub fn is_night_at(now: DateTime<Utc>, offset_secs: i32) -> bool {
    is_night_hour(local_time_at(now, offset_secs).hour())
}

/// Night spans `[18:00, 06:00)`.
#[must_use]
pub fn is_night_hour(hour: u32) -> bool {
    hour >= NIGHT_STARTS_HOUR || hour < DAY_STARTS_HOUR
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, s).unwrap()
    }

    #[test]
    fn applies_positive_and_negative_offsets() {
        let now = utc(12, 0, 0);
        assert_eq!(
            local_time_at(now, 3_600).format("%H:%M").to_string(),
            "13:00"
        );
        assert_eq!(
            local_time_at(now, -5 * 3_600).format("%H:%M").to_string(),
            "07:00"
        );
        assert_eq!(
            local_time_at(now, 19_800).format("%H:%M").to_string(),
            "17:30"
        );
    }

    #[test]
    fn offset_can_roll_the_calendar_date() {
        let local = local_time_at(utc(22, 0, 0), 10 * 3_600);
        assert_eq!(local.format("%Y-%m-%d %H").to_string(), "2026-03-15 08");
    }

    #[test]
    fn night_boundaries_are_half_open() {
        assert!(!is_night_at(utc(17, 59, 59), 0));
        assert!(is_night_at(utc(18, 0, 0), 0));
        assert!(is_night_at(utc(5, 59, 59), 0));
        assert!(!is_night_at(utc(6, 0, 0), 0));
    }

    #[test]
    fn utc_midday_and_late_evening() {
        assert!(is_night_at(utc(23, 0, 0), 0));
        assert!(!is_night_at(utc(12, 0, 0), 0));
    }

    #[test]
    fn absurd_offsets_are_clamped() {
        let now = utc(12, 0, 0);
        assert_eq!(local_time_at(now, i32::MAX), local_time_at(now, 86_399));
        assert_eq!(local_time_at(now, i32::MIN), local_time_at(now, -86_399));
    }
}
