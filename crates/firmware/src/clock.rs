//! Wall clock kept as an offset over the monotonic uptime counter.
//!
//! The Blue Pill has no battery-backed RTC wired up, so the wall clock starts
//! at [`BOOT_TIME`] and is corrected by the date/time editors or a network
//! time sync. All conversions go through Unix seconds.

use platform::{validate_date, validate_time, DateTime, RtcClock, RtcError};

/// Wall-clock time assumed at power-on.
pub const BOOT_TIME: DateTime = DateTime {
    year: 2024,
    month: 1,
    day: 1,
    hour: 0,
    minute: 0,
    second: 0,
};

/// Whole seconds of uptime.
fn uptime_secs(uptime_ms: u64) -> i64 {
    i64::try_from(uptime_ms / 1000).unwrap_or(i64::MAX)
}

/// Wall clock derived from uptime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UptimeClock {
    /// Unix seconds at uptime zero.
    offset_s: i64,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    /// Clock reading [`BOOT_TIME`] at uptime zero.
    pub fn new() -> Self {
        Self {
            offset_s: BOOT_TIME.to_unix_secs(),
        }
    }

    /// Wall-clock time at `uptime_ms`.
    pub fn time_at(&self, uptime_ms: u64) -> DateTime {
        DateTime::from_unix_secs(self.offset_s.saturating_add(uptime_secs(uptime_ms)))
    }

    /// Make the clock read `now` at `uptime_ms`.
    pub fn set_at(&mut self, uptime_ms: u64, now: &DateTime) {
        self.offset_s = now.to_unix_secs().saturating_sub(uptime_secs(uptime_ms));
    }

    /// Replace the date, keeping the time of day.
    pub fn set_date_at(&mut self, uptime_ms: u64, year: u16, month: u8, day: u8) -> Result<(), RtcError> {
        validate_date(year, month, day)?;
        let now = DateTime {
            year,
            month,
            day,
            ..self.time_at(uptime_ms)
        };
        self.set_at(uptime_ms, &now);
        Ok(())
    }

    /// Replace the time of day, keeping the date.
    pub fn set_time_at(&mut self, uptime_ms: u64, hour: u8, minute: u8, second: u8) -> Result<(), RtcError> {
        validate_time(hour, minute, second)?;
        let now = DateTime {
            hour,
            minute,
            second,
            ..self.time_at(uptime_ms)
        };
        self.set_at(uptime_ms, &now);
        Ok(())
    }
}

/// Milliseconds since the embassy time driver started.
pub fn uptime_ms() -> u64 {
    embassy_time::Instant::now().as_millis()
}

impl RtcClock for UptimeClock {
    fn read_time(&self) -> DateTime {
        self.time_at(uptime_ms())
    }

    fn set_date(&mut self, year: u16, month: u8, day: u8) -> Result<(), RtcError> {
        self.set_date_at(uptime_ms(), year, month, day)
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), RtcError> {
        self.set_time_at(uptime_ms(), hour, minute, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_boot_time_and_ticks_with_uptime() {
        let clock = UptimeClock::new();
        assert_eq!(clock.time_at(0), BOOT_TIME);
        let later = clock.time_at(90_061_500);
        assert_eq!((later.day, later.hour, later.minute, later.second), (2, 1, 1, 1));
    }

    #[test]
    fn setting_the_date_keeps_the_time_of_day() {
        let mut clock = UptimeClock::new();
        clock.set_time_at(5_000, 12, 30, 45).unwrap();
        clock.set_date_at(5_000, 2024, 2, 29).unwrap();
        let now = clock.time_at(6_000);
        assert_eq!(
            (now.year, now.month, now.day, now.hour, now.minute, now.second),
            (2024, 2, 29, 12, 30, 46)
        );
    }

    #[test]
    fn invalid_writes_leave_the_clock_alone() {
        let mut clock = UptimeClock::new();
        assert_eq!(clock.set_date_at(0, 2023, 2, 29), Err(RtcError::InvalidDate));
        assert_eq!(clock.set_time_at(0, 24, 0, 0), Err(RtcError::InvalidTime));
        assert_eq!(clock.time_at(0), BOOT_TIME);
    }
}
