//! Canonical platform calendar.
//!
//! Day-scoped rules (enrollment-relative unlocks, fixed dates and deadlines)
//! are truncated to the start of day in one fixed platform offset, never in
//! the server's local zone.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

/// Largest offset accepted by `FixedOffset`, in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Day-boundary arithmetic in the platform time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCalendar {
    offset: FixedOffset,
}

impl Default for PlatformCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl PlatformCalendar {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Build a calendar from an offset east of UTC. Returns `None` when the
    /// offset is outside ±18 hours.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return None;
        }
        FixedOffset::east_opt(minutes * 60).map(|offset| Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// The platform-local calendar day containing `instant`.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Start of the platform-local day containing `instant`.
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.day_start(self.local_date(instant))
    }

    /// The instant a platform-local calendar day begins.
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let local_midnight = date.and_time(NaiveTime::MIN);
        (local_midnight - Duration::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }
}

/// `instant + days`, or `None` past the representable range.
pub fn checked_add_days(instant: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    instant.checked_add_signed(Duration::try_days(i64::from(days))?)
}

/// `instant + hours`, or `None` past the representable range.
pub fn checked_add_hours(instant: DateTime<Utc>, hours: u32) -> Option<DateTime<Utc>> {
    instant.checked_add_signed(Duration::try_hours(i64::from(hours))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_utc_start_of_day() {
        let calendar = PlatformCalendar::utc();
        let instant = Utc.with_ymd_and_hms(2024, 1, 5, 17, 30, 0).unwrap();
        assert_eq!(
            calendar.start_of_day(instant),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_offset_start_of_day_crosses_utc_date() {
        // UTC+3: 2024-01-05T22:00Z is already 2024-01-06 locally.
        let calendar = PlatformCalendar::from_offset_minutes(180).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 1, 5, 22, 0, 0).unwrap();
        assert_eq!(
            calendar.start_of_day(instant),
            Utc.with_ymd_and_hms(2024, 1, 5, 21, 0, 0).unwrap()
        );
        assert_eq!(calendar.offset_minutes(), 180);
    }

    #[test]
    fn test_negative_offset_day_start() {
        let calendar = PlatformCalendar::from_offset_minutes(-300).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(
            calendar.day_start(date),
            Utc.with_ymd_and_hms(2024, 2, 1, 5, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(PlatformCalendar::from_offset_minutes(19 * 60).is_none());
        assert!(PlatformCalendar::from_offset_minutes(-19 * 60).is_none());
        assert!(PlatformCalendar::from_offset_minutes(0).is_some());
    }

    #[test]
    fn test_checked_addition() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            checked_add_days(instant, 5),
            Some(Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap())
        );
        assert_eq!(
            checked_add_hours(instant, 36),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap())
        );
        assert_eq!(checked_add_days(instant, u32::MAX), None);
    }
}
