//! PM2.5 air-quality page.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::{Pm25Level, Sensor};

use crate::smoothing::{Smoothed, PM25};
use crate::widgets::{labeled_bar, line, sensor_fault, sensor_off};
use crate::Environment;

/// Full scale of the concentration bar, µg/m³.
pub const PM25_BAR_MAX: i32 = 300;

/// Whole µg/m³ for the bar, saturating outside the drawable range.
#[allow(clippy::cast_possible_truncation)] // clamped into i32 range first
fn whole_ugm3(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 10_000.0) as i32
}

/// Concentration, eased bar and air-quality band.
#[derive(Debug, Default)]
pub struct Pm25Page {
    view: Option<Smoothed>,
}

impl Pm25Page {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self { view: None }
    }

    /// Bar value while on screen.
    #[must_use]
    pub fn shown(&self) -> Option<i32> {
        self.view.map(|v| v.value())
    }
}

impl<E: Environment> PageBehavior<E> for Pm25Page {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = Some(Smoothed::default());
        cx.display.clear();
    }

    fn on_exit(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = None;
        cx.display.clear();
    }

    fn on_key(&mut self, event: &MenuEvent, cx: &mut PageCx<'_, E>) -> KeyResponse {
        match event.kind {
            EventKind::Previous => {
                cx.env.set_enabled(Sensor::Pm25, true);
                KeyResponse::Handled
            }
            EventKind::Next => {
                cx.display.clear();
                cx.env.set_enabled(Sensor::Pm25, false);
                KeyResponse::Handled
            }
            EventKind::Confirm => KeyResponse::Back,
            EventKind::Activate => KeyResponse::Handled,
            _ => KeyResponse::Unhandled,
        }
    }

    fn draw(&mut self, cx: &mut PageCx<'_, E>) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let reading = cx.env.snapshot().pm25;
        if !reading.enabled {
            sensor_off(cx.display, "pm2.5");
            return;
        }
        if reading.error {
            sensor_fault(cx.display, "pm2.5");
            return;
        }
        let value = reading.value;
        let level = Pm25Level::from_concentration(value);

        cx.display
            .print_line(0, &line(format_args!("PM2.5: {value:.1} ug/m3")));
        let shown = view.advance(whole_ugm3(value), &PM25);
        labeled_bar(cx.display, 1, "0", "300", shown, (0, PM25_BAR_MAX));
        cx.display
            .print_line(2, &line(format_args!("Level {}: {}", level.index(), level.label())));
        cx.display.clear_line(3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_value_truncates_and_saturates() {
        assert_eq!(whole_ugm3(12.9), 12);
        assert_eq!(whole_ugm3(-3.0), 0);
        assert_eq!(whole_ugm3(f32::NAN), 0);
        assert_eq!(whole_ugm3(1.0e9), 10_000);
    }
}
