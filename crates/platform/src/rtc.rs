//! Real-time clock contract and calendar arithmetic
//!
//! Calendar rules are proleptic Gregorian. Conversions to and from a seconds
//! count use the 1970-01-01 epoch and the days-from-civil algorithm, so they
//! are exact for every year the device can display (2000..=2099) and well
//! beyond.

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Three-letter name.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }
}

/// Calendar date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2024.
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=days_in_month
    pub day: u8,
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
}

/// Rejected RTC writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Month or day out of range for the given year.
    InvalidDate,
    /// Hour, minute or second out of range.
    InvalidTime,
}

#[cfg(feature = "std")]
impl std::error::Error for RtcError {}

impl core::fmt::Display for RtcError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDate => write!(f, "invalid calendar date"),
            Self::InvalidTime => write!(f, "invalid time of day"),
        }
    }
}

/// Real-time clock collaborator.
pub trait RtcClock {
    /// Current wall-clock time.
    fn read_time(&self) -> DateTime;

    /// Set the date, keeping the time of day.
    fn set_date(&mut self, year: u16, month: u8, day: u8) -> Result<(), RtcError>;

    /// Set the time of day, keeping the date.
    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), RtcError>;
}

/// Gregorian leap-year rule.
#[must_use]
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`; 0 for an invalid month.
#[must_use]
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Check a date.
pub const fn validate_date(year: u16, month: u8, day: u8) -> Result<(), RtcError> {
    if day >= 1 && day <= days_in_month(year, month) {
        Ok(())
    } else {
        Err(RtcError::InvalidDate)
    }
}

/// Check a time of day.
pub const fn validate_time(hour: u8, minute: u8, second: u8) -> Result<(), RtcError> {
    if hour < 24 && minute < 60 && second < 60 {
        Ok(())
    } else {
        Err(RtcError::InvalidTime)
    }
}

const SECS_PER_DAY: i64 = 86_400;

/// Days since 1970-01-01 for a civil date.
#[allow(clippy::arithmetic_side_effects)] // bounded: year <= u16::MAX
fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let m = i64::from(month);
    let y = i64::from(year) - i64::from(m <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Civil date of a day count since 1970-01-01.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> (u16, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year.clamp(0, i64::from(u16::MAX)) as u16, month as u8, day as u8)
}

impl DateTime {
    /// Midnight on 2000-01-01, the earliest date the editors offer.
    pub const EPOCH_2000: Self = Self {
        year: 2000,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Seconds since 1970-01-01T00:00:00.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // bounded by the u16 year range
    pub fn to_unix_secs(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day) * SECS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Inverse of [`DateTime::to_unix_secs`].
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix_secs(secs: i64) -> Self {
        let days = secs.div_euclid(SECS_PER_DAY);
        let rem = secs.rem_euclid(SECS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// Day of the week.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday (index 3 from Monday).
        let index = days_from_civil(self.year, self.month, self.day)
            .saturating_add(3)
            .rem_euclid(7) as usize;
        Weekday::ALL.get(index).copied().unwrap_or(Weekday::Monday)
    }
}
