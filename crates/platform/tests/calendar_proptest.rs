//! Property-based tests for calendar arithmetic.
//! The date editors and the uptime clock both lean on these rules.

use platform::{days_in_month, validate_date, DateTime};

proptest::proptest! {
    /// Converting a valid date-time to seconds and back is lossless.
    #[test]
    fn unix_seconds_round_trip(
        year in 1970u16..=2199,
        month in 1u8..=12,
        day_seed in 0u8..31,
        hour in 0u8..24,
        minute in 0u8..60,
        second in 0u8..60,
    ) {
        let day = day_seed % days_in_month(year, month) + 1;
        let dt = DateTime { year, month, day, hour, minute, second };
        assert_eq!(DateTime::from_unix_secs(dt.to_unix_secs()), dt);
    }

    /// One second after the last second of a month is the first of the next.
    #[test]
    fn month_rollover(year in 2000u16..=2098, month in 1u8..=12) {
        let last = DateTime {
            year,
            month,
            day: days_in_month(year, month),
            hour: 23,
            minute: 59,
            second: 59,
        };
        let next = DateTime::from_unix_secs(last.to_unix_secs() + 1);
        assert_eq!(next.day, 1);
        assert_eq!(next.hour, 0);
        if month == 12 {
            assert_eq!((next.year, next.month), (year + 1, 1));
        } else {
            assert_eq!((next.year, next.month), (year, month + 1));
        }
    }

    /// Consecutive days advance the weekday by exactly one.
    #[test]
    fn weekday_advances_daily(days in 10_950i64..47_000) {
        let a = DateTime::from_unix_secs(days * 86_400);
        let b = DateTime::from_unix_secs((days + 1) * 86_400);
        let idx = |d: &DateTime| ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .iter()
            .position(|n| *n == d.weekday().short_name())
            .unwrap();
        assert_eq!((idx(&a) + 1) % 7, idx(&b));
    }

    /// Every day reported by days_in_month validates, the next one does not.
    #[test]
    fn days_in_month_matches_validation(year in 2000u16..=2099, month in 1u8..=12) {
        let last = days_in_month(year, month);
        assert!(validate_date(year, month, last).is_ok());
        assert!(validate_date(year, month, last + 1).is_err());
    }
}
