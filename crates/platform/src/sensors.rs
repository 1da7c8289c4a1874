//! Sensor readings published by the acquisition tasks
//!
//! Pages read a [`SensorSnapshot`] once per frame. The snapshot is a plain
//! copy, so a page never holds a borrow into state another task is writing.

/// One sensor value with its enable/error flags.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading<T> {
    /// Last value read. Meaningless unless [`Reading::available`] is `Some`.
    pub value: T,
    /// Sensor switched on by the user.
    pub enabled: bool,
    /// Last read failed.
    pub error: bool,
}

impl<T: Copy> Reading<T> {
    /// Enabled sensor with a good value.
    pub const fn ok(value: T) -> Self {
        Self {
            value,
            enabled: true,
            error: false,
        }
    }

    /// The value, if the sensor is enabled and the last read succeeded.
    pub fn available(&self) -> Option<T> {
        (self.enabled && !self.error).then_some(self.value)
    }
}

/// DHT11 temperature and humidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Climate {
    /// Temperature in tenths of a degree Celsius (235 = 23.5 °C).
    pub temperature_tenths: i16,
    /// Relative humidity in percent.
    pub humidity_pct: u8,
}

/// Latest value of every sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    /// Temperature and humidity.
    pub climate: Reading<Climate>,
    /// Illuminance in lux.
    pub light: Reading<u16>,
    /// PM2.5 concentration in µg/m³.
    pub pm25: Reading<f32>,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            climate: Reading::ok(Climate::default()),
            light: Reading::ok(0),
            pm25: Reading::ok(0.0),
        }
    }
}

/// Sensor selector used for enable/disable requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sensor {
    /// DHT11.
    Climate,
    /// Photoresistor.
    Light,
    /// Dust sensor.
    Pm25,
}

/// Source of sensor readings.
pub trait SensorHub {
    /// Copy of the latest readings.
    fn snapshot(&self) -> SensorSnapshot;

    /// Switch a sensor on or off.
    fn set_enabled(&mut self, sensor: Sensor, enabled: bool);
}

/// Air-quality band of a PM2.5 concentration (level 0..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pm25Level {
    /// 0..35
    Good = 0,
    /// 35..75
    Moderate = 1,
    /// 75..115
    UnhealthySensitive = 2,
    /// 115..150
    Unhealthy = 3,
    /// 150..250
    VeryUnhealthy = 4,
    /// 250 and above
    Hazardous = 5,
}

impl Pm25Level {
    /// Band of a concentration in µg/m³.
    #[must_use]
    pub fn from_concentration(ugm3: f32) -> Self {
        if ugm3 < 35.0 {
            Self::Good
        } else if ugm3 < 75.0 {
            Self::Moderate
        } else if ugm3 < 115.0 {
            Self::UnhealthySensitive
        } else if ugm3 < 150.0 {
            Self::Unhealthy
        } else if ugm3 < 250.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }

    /// Numeric level 0..=5.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Short name that fits one display line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy(S)",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unh",
            Self::Hazardous => "Hazardous",
        }
    }
}

/// Qualitative brightness band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightLevel {
    /// Below 50 lux.
    Dark,
    /// 50..200 lux.
    Dim,
    /// 200..500 lux.
    Normal,
    /// 500..2000 lux.
    Bright,
    /// 2000 lux and above.
    VeryBright,
}

impl LightLevel {
    /// Band of an illuminance value.
    #[must_use]
    pub const fn from_lux(lux: u16) -> Self {
        match lux {
            0..=49 => Self::Dark,
            50..=199 => Self::Dim,
            200..=499 => Self::Normal,
            500..=1999 => Self::Bright,
            _ => Self::VeryBright,
        }
    }

    /// Whether the night icon should be shown.
    #[must_use]
    pub const fn is_night(self) -> bool {
        matches!(self, Self::Dark | Self::Dim)
    }

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Dim => "Dim",
            Self::Normal => "Normal",
            Self::Bright => "Bright",
            Self::VeryBright => "Very Bright",
        }
    }
}
