//! Ambient light page.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::{LightLevel, Sensor};

use crate::icons;
use crate::smoothing::{Smoothed, LIGHT};
use crate::widgets::{labeled_bar, line, sensor_fault, sensor_off};
use crate::Environment;

/// Full scale of the lux bar.
pub const LUX_BAR_MAX: i32 = 987;

/// Lux reading with an eased bar, the brightness band and a sun or moon.
#[derive(Debug, Default)]
pub struct LightPage {
    view: Option<Smoothed>,
}

impl LightPage {
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

impl<E: Environment> PageBehavior<E> for LightPage {
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
                cx.env.set_enabled(Sensor::Light, true);
                KeyResponse::Handled
            }
            EventKind::Next => {
                cx.display.clear();
                cx.env.set_enabled(Sensor::Light, false);
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
        let reading = cx.env.snapshot().light;
        if !reading.enabled {
            sensor_off(cx.display, "light");
            return;
        }
        if reading.error {
            sensor_fault(cx.display, "light");
            return;
        }
        let lux = reading.value;
        let level = LightLevel::from_lux(lux);

        cx.display.print_line(0, &line(format_args!("Light: {lux} lux")));
        let shown = view.advance(i32::from(lux), &LIGHT);
        labeled_bar(cx.display, 1, "0", "987", shown, (0, LUX_BAR_MAX));
        cx.display.print_line(2, level.label());
        cx.display.clear_line(3);
        let icon = if level.is_night() { &icons::MOON } else { &icons::SUN };
        cx.display.draw_bitmap(96, 32, 32, 32, icon, false);
    }
}
