//! Eased display values.
//!
//! Bars on the sensor pages do not jump to a new reading. Every frame the
//! shown value moves towards the reading by a small step, or a larger one
//! when the gap is wide, and never overshoots.

/// Per-frame step sizes for one quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepPolicy {
    /// Gap from which the fast steps apply (inclusive).
    pub threshold: i32,
    /// Rising step when the gap is at least `threshold`.
    pub fast_rise: i32,
    /// Rising step otherwise.
    pub slow_rise: i32,
    /// Falling step when the gap is at least `threshold`.
    pub fast_fall: i32,
    /// Falling step otherwise.
    pub slow_fall: i32,
}

/// Temperature in tenths of a degree.
pub const TEMPERATURE: StepPolicy = StepPolicy::symmetric(30, 10);

/// Relative humidity in percent; rises faster than it falls.
pub const HUMIDITY: StepPolicy = StepPolicy {
    threshold: 10,
    fast_rise: 4,
    slow_rise: 1,
    fast_fall: 3,
    slow_fall: 1,
};

/// Illuminance in lux.
pub const LIGHT: StepPolicy = StepPolicy::symmetric(100, 20);

/// PM2.5 in whole µg/m³.
pub const PM25: StepPolicy = StepPolicy::symmetric(30, 10);

impl StepPolicy {
    /// Same steps up and down, slow step of one.
    #[must_use]
    pub const fn symmetric(threshold: i32, fast: i32) -> Self {
        Self {
            threshold,
            fast_rise: fast,
            slow_rise: 1,
            fast_fall: fast,
            slow_fall: 1,
        }
    }

    /// Next shown value when `shown` approaches `target`.
    #[must_use]
    pub fn step(&self, shown: i32, target: i32) -> i32 {
        let gap = target.saturating_sub(shown);
        if gap > 0 {
            let step = if gap >= self.threshold { self.fast_rise } else { self.slow_rise };
            shown.saturating_add(step.clamp(1, gap))
        } else if gap < 0 {
            let distance = gap.saturating_neg();
            let step = if distance >= self.threshold { self.fast_fall } else { self.slow_fall };
            shown.saturating_sub(step.clamp(1, distance))
        } else {
            shown
        }
    }
}

/// A shown value easing towards the latest reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Smoothed {
    shown: i32,
}

impl Smoothed {
    /// Start at `value`.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self { shown: value }
    }

    /// Value currently on screen.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.shown
    }

    /// Take one step towards `target` and return the new shown value.
    pub fn advance(&mut self, target: i32, policy: &StepPolicy) -> i32 {
        self.shown = policy.step(self.shown, target);
        self.shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_takes_big_steps_only_across_wide_gaps() {
        assert_eq!(TEMPERATURE.step(0, 255), 10);
        assert_eq!(TEMPERATURE.step(230, 255), 231);
        assert_eq!(TEMPERATURE.step(255, 200), 245);
        assert_eq!(TEMPERATURE.step(255, 250), 254);
    }

    #[test]
    fn humidity_rises_faster_than_it_falls() {
        assert_eq!(HUMIDITY.step(20, 60), 24);
        assert_eq!(HUMIDITY.step(60, 20), 57);
        assert_eq!(HUMIDITY.step(55, 60), 56);
    }

    #[test]
    fn never_overshoots_a_close_target() {
        let policy = StepPolicy::symmetric(1, 50);
        assert_eq!(policy.step(0, 7), 7);
        assert_eq!(policy.step(7, 0), 0);
    }

    #[test]
    fn settled_value_stays_put() {
        let mut s = Smoothed::new(42);
        assert_eq!(s.advance(42, &LIGHT), 42);
    }
}
