//! Temperature and humidity page.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::Sensor;

use crate::smoothing::{Smoothed, HUMIDITY, TEMPERATURE};
use crate::widgets::{labeled_bar, line, sensor_fault, sensor_off, tenths};
use crate::Environment;

/// Full scale of the temperature bar, in tenths of a degree.
pub const TEMPERATURE_BAR_MAX: i32 = 500;

/// Bars shown while the page is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClimateView {
    /// Temperature bar, tenths of a degree.
    pub temperature: Smoothed,
    /// Humidity bar, percent.
    pub humidity: Smoothed,
}

/// Temperature and humidity from the DHT11, with eased bars.
///
/// Previous switches the sensor on, Next switches it off, Confirm goes back.
#[derive(Debug, Default)]
pub struct TandhPage {
    view: Option<ClimateView>,
}

impl TandhPage {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self { view: None }
    }

    /// Bar state while on screen.
    #[must_use]
    pub fn view(&self) -> Option<ClimateView> {
        self.view
    }
}

impl<E: Environment> PageBehavior<E> for TandhPage {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = Some(ClimateView::default());
        cx.display.clear();
    }

    fn on_exit(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = None;
        cx.display.clear();
    }

    fn on_key(&mut self, event: &MenuEvent, cx: &mut PageCx<'_, E>) -> KeyResponse {
        match event.kind {
            EventKind::Previous => {
                cx.env.set_enabled(Sensor::Climate, true);
                KeyResponse::Handled
            }
            EventKind::Next => {
                cx.display.clear();
                cx.env.set_enabled(Sensor::Climate, false);
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
        let reading = cx.env.snapshot().climate;
        if !reading.enabled {
            sensor_off(cx.display, "dht11");
            return;
        }
        if reading.error {
            sensor_fault(cx.display, "dht11");
            return;
        }
        let climate = reading.value;

        let temperature = tenths(climate.temperature_tenths);
        cx.display
            .print_line(0, &line(format_args!("Temperature:{temperature}C")));
        let shown = view
            .temperature
            .advance(i32::from(climate.temperature_tenths), &TEMPERATURE);
        labeled_bar(cx.display, 1, "0", "50", shown, (0, TEMPERATURE_BAR_MAX));

        cx.display
            .print_line(2, &line(format_args!("Humidity: {}%", climate.humidity_pct)));
        let shown = view
            .humidity
            .advance(i32::from(climate.humidity_pct), &HUMIDITY);
        labeled_bar(cx.display, 3, "0", "100", shown, (0, 100));
    }
}
