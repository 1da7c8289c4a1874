//! Home screen: clock panel that slides aside to reveal sensor status.
//!
//! At offset 0 the clock sits on the left and live readings fill the right
//! half. At offset 64 the clock sits on the right and the left half shows an
//! icon for every healthy data source. Previous and Next slide between the
//! two in [`SLIDE_STEPS`] frames of [`SLIDE_STEP_PX`] pixels.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::{DateTime, Display, LinkStatus, ProgressBar, Reading, SensorSnapshot};

use crate::icons::{self, ICON_BYTES};
use crate::widgets::{line, ok_no, tenths, Line};
use crate::Environment;

/// Offset of the right-hand resting position.
pub const SLIDE_WIDTH: u8 = 64;
/// Frames per slide.
pub const SLIDE_STEPS: u8 = 8;
/// Pixels moved per frame.
pub const SLIDE_STEP_PX: u8 = 8;

/// Slide animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slide {
    offset: u8,
    target: u8,
}

impl Slide {
    /// Current horizontal offset of the clock panel.
    #[must_use]
    pub const fn offset(&self) -> u8 {
        self.offset
    }

    /// Whether the panel is still moving.
    #[must_use]
    pub const fn moving(&self) -> bool {
        self.offset != self.target
    }

    /// Start moving towards `target` (0 or [`SLIDE_WIDTH`]).
    pub fn slide_to(&mut self, target: u8) {
        self.target = target.min(SLIDE_WIDTH);
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.offset = if self.target > self.offset {
            self.offset.saturating_add(SLIDE_STEP_PX).min(self.target)
        } else {
            self.offset.saturating_sub(SLIDE_STEP_PX).max(self.target)
        };
    }
}

/// Home page at the root of the tree.
///
/// Activate opens the main menu. Confirm does nothing here.
#[derive(Debug, Default)]
pub struct IndexPage {
    slide: Option<Slide>,
}

impl IndexPage {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self { slide: None }
    }

    /// Slide state while on screen.
    #[must_use]
    pub fn slide(&self) -> Option<Slide> {
        self.slide
    }
}

impl<E: Environment> PageBehavior<E> for IndexPage {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.slide = Some(Slide::default());
        cx.display.clear();
    }

    fn on_exit(&mut self, cx: &mut PageCx<'_, E>) {
        self.slide = None;
        cx.display.clear();
    }

    fn on_key(&mut self, event: &MenuEvent, _cx: &mut PageCx<'_, E>) -> KeyResponse {
        let Some(slide) = self.slide.as_mut() else {
            return KeyResponse::Unhandled;
        };
        match event.kind {
            EventKind::Previous => slide.slide_to(0),
            EventKind::Next => slide.slide_to(SLIDE_WIDTH),
            EventKind::Activate => return KeyResponse::EnterSelected,
            EventKind::Confirm => {}
            _ => return KeyResponse::Unhandled,
        }
        KeyResponse::Handled
    }

    fn draw(&mut self, cx: &mut PageCx<'_, E>) {
        let Some(slide) = self.slide.as_mut() else {
            return;
        };
        if slide.moving() {
            slide.tick();
        }
        let offset = slide.offset();
        let settled = !slide.moving();

        let now = cx.env.read_time();
        let link = cx.env.link_status();
        let sensors = cx.env.snapshot();
        let display = &mut *cx.display;
        display.clear();

        let x = i32::from(offset);
        draw_clock(display, x, &now, &link);
        if settled && offset == 0 {
            draw_readings(display, &sensors);
        }
        if settled && offset == SLIDE_WIDTH {
            draw_status_icons(display, &sensors, &link);
        }
        display.draw_progress_bar(&ProgressBar {
            x: x.saturating_add(60),
            y: 0,
            width: 4,
            height: 64,
            value: i32::from(now.second),
            min: 0,
            max: 60,
        });
    }
}

fn draw_clock(display: &mut dyn Display, x: i32, now: &DateTime, link: &LinkStatus) {
    let yy = now.year.checked_rem(100).unwrap_or(0);
    display.draw_text(x, 0, &line(format_args!("{yy:02}/{:02}/{:02}", now.month, now.day)));
    display.draw_text(
        x,
        16,
        &line(format_args!("{:02}:{:02}:{:02}", now.hour, now.minute, now.second)),
    );
    display.draw_text(
        x,
        32,
        &line(format_args!(
            "{} W:{}",
            now.weekday().short_name(),
            ok_no(link.wifi_connected)
        )),
    );
    display.draw_text(x, 48, &line(format_args!("Server:{}", ok_no(link.server_connected))));
}

/// `value` when the sensor is usable, otherwise `OFF` or `ERR`.
fn reading_or_state<T: Copy>(reading: &Reading<T>, show: impl FnOnce(T) -> Line) -> Line {
    if reading.error {
        line(format_args!("ERR"))
    } else if !reading.enabled {
        line(format_args!("OFF"))
    } else {
        show(reading.value)
    }
}

fn draw_readings(display: &mut dyn Display, sensors: &SensorSnapshot) {
    let t = reading_or_state(&sensors.climate, |c| tenths(c.temperature_tenths));
    let h = reading_or_state(&sensors.climate, |c| line(format_args!("{}", c.humidity_pct)));
    let l = reading_or_state(&sensors.light, |lux| line(format_args!("{lux}")));
    let p = reading_or_state(&sensors.pm25, |v| line(format_args!("{v:.1}")));
    display.draw_text(64, 0, &line(format_args!(" T : {t}")));
    display.draw_text(64, 16, &line(format_args!(" H : {h}")));
    display.draw_text(64, 32, &line(format_args!(" L : {l}")));
    display.draw_text(64, 48, &line(format_args!(" P : {p}")));
}

fn draw_status_icons(display: &mut dyn Display, sensors: &SensorSnapshot, link: &LinkStatus) {
    let tiles: [(bool, i32, i32, &[u8; ICON_BYTES]); 4] = [
        (link.wifi_connected, 0, 0, &icons::WIFI),
        (sensors.light.available().is_some(), 32, 0, &icons::LIGHT),
        (sensors.climate.available().is_some(), 0, 32, &icons::CLIMATE),
        (sensors.pm25.available().is_some(), 32, 32, &icons::PM25),
    ];
    for (show, x, y, icon) in tiles {
        if show {
            display.draw_bitmap(x, y, 32, 32, icon, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_takes_eight_frames_each_way() {
        let mut slide = Slide::default();
        slide.slide_to(SLIDE_WIDTH);
        let mut frames = 0;
        while slide.moving() {
            slide.tick();
            frames += 1;
        }
        assert_eq!((frames, slide.offset()), (8, 64));
        slide.slide_to(0);
        slide.tick();
        assert_eq!(slide.offset(), 56);
    }

    #[test]
    fn sliding_to_the_current_side_does_nothing() {
        let mut slide = Slide::default();
        slide.slide_to(0);
        assert!(!slide.moving());
    }
}
