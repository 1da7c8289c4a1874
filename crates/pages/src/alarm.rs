//! Alarm page, shown on top of whatever was active when an alarm fires.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::config::ICON_SIZE;

use crate::icons;
use crate::widgets::line;
use crate::Environment;

/// Bell blink half-period.
pub const BLINK_MS: u64 = 500;

/// Left edge of the bell, centred on a 128 px panel.
const BELL_X: i32 = 48;

/// Alarm being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmView {
    /// Index of the alarm that fired.
    pub index: u8,
    /// When the page came on screen.
    pub since_ms: u64,
}

/// Blinking bell with the alarm number. Confirm or Activate dismisses it.
///
/// Alarm events reach this page before it is entered, so the fired index is
/// kept outside the on-screen state.
#[derive(Debug, Default)]
pub struct AlarmPage {
    fired: Option<u8>,
    view: Option<AlarmView>,
}

impl AlarmPage {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fired: None,
            view: None,
        }
    }

    /// State while on screen.
    #[must_use]
    pub fn view(&self) -> Option<AlarmView> {
        self.view
    }
}

impl<E: Environment> PageBehavior<E> for AlarmPage {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = Some(AlarmView {
            index: self.fired.unwrap_or(0),
            since_ms: cx.now_ms,
        });
        cx.display.clear();
    }

    fn on_exit(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = None;
        self.fired = None;
        cx.display.clear();
    }

    fn on_key(&mut self, event: &MenuEvent, _cx: &mut PageCx<'_, E>) -> KeyResponse {
        match event.kind {
            EventKind::Alarm => {
                self.fired = Some(event.param);
                if let Some(view) = self.view.as_mut() {
                    view.index = event.param;
                }
                KeyResponse::Handled
            }
            EventKind::Confirm | EventKind::Activate => KeyResponse::Back,
            EventKind::Refresh => KeyResponse::Unhandled,
            // Arrow keys must not navigate away underneath the alarm.
            _ => KeyResponse::Handled,
        }
    }

    fn draw(&mut self, cx: &mut PageCx<'_, E>) {
        let Some(view) = self.view else {
            return;
        };
        let elapsed = cx.now_ms.saturating_sub(view.since_ms);
        let inverted = elapsed.checked_div(BLINK_MS).and_then(|n| n.checked_rem(2)) == Some(1);
        cx.display.clear_region(0, 0, 128, ICON_SIZE);
        cx.display
            .draw_bitmap(BELL_X, 0, ICON_SIZE, ICON_SIZE, &icons::BELL, inverted);
        cx.display
            .print_line(2, &line(format_args!("  ALARM {}", view.index)));
        cx.display.print_line(3, "  OK: dismiss");
    }
}
