//! Time-of-day editor.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::DateTime;

use crate::widgets::line;
use crate::Environment;

/// Field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    /// Hour.
    #[default]
    Hour,
    /// Minute.
    Minute,
    /// Second.
    Second,
}

impl TimeField {
    /// Field after this one, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Hour => Self::Minute,
            Self::Minute => Self::Second,
            Self::Second => Self::Hour,
        }
    }
}

/// Time being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDraft {
    /// 0..24
    pub hour: u8,
    /// 0..60
    pub minute: u8,
    /// 0..60
    pub second: u8,
    /// Field the arrow keys change.
    pub field: TimeField,
}

impl TimeDraft {
    /// Start from the clock's time of day.
    #[must_use]
    pub fn from_clock(now: &DateTime) -> Self {
        Self {
            hour: now.hour.min(23),
            minute: now.minute.min(59),
            second: now.second.min(59),
            field: TimeField::Hour,
        }
    }

    /// Step the selected field up (`true`) or down, modulo its range.
    pub fn step(&mut self, up: bool) {
        let (value, modulus) = match self.field {
            TimeField::Hour => (&mut self.hour, 24),
            TimeField::Minute => (&mut self.minute, 60),
            TimeField::Second => (&mut self.second, 60),
        };
        *value = if up {
            value.saturating_add(1).checked_rem(modulus).unwrap_or(0)
        } else {
            value.checked_sub(1).unwrap_or(modulus.saturating_sub(1))
        };
    }
}

/// Edits hour, minute and second and writes them to the RTC on Confirm.
#[derive(Debug, Default)]
pub struct SetTimePage {
    draft: Option<TimeDraft>,
}

impl SetTimePage {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self { draft: None }
    }

    /// Draft while on screen.
    #[must_use]
    pub fn draft(&self) -> Option<TimeDraft> {
        self.draft
    }
}

impl<E: Environment> PageBehavior<E> for SetTimePage {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.draft = Some(TimeDraft::from_clock(&cx.env.read_time()));
        cx.display.clear();
    }

    fn on_exit(&mut self, cx: &mut PageCx<'_, E>) {
        self.draft = None;
        cx.display.clear();
    }

    fn on_key(&mut self, event: &MenuEvent, cx: &mut PageCx<'_, E>) -> KeyResponse {
        let Some(draft) = self.draft.as_mut() else {
            return KeyResponse::Unhandled;
        };
        match event.kind {
            EventKind::Previous => draft.step(true),
            EventKind::Next => draft.step(false),
            EventKind::Activate => draft.field = draft.field.next(),
            EventKind::Confirm => {
                if let Err(_e) = cx.env.set_time(draft.hour, draft.minute, draft.second) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("set time rejected: {}", _e);
                }
                return KeyResponse::Back;
            }
            _ => return KeyResponse::Unhandled,
        }
        KeyResponse::Handled
    }

    fn draw(&mut self, cx: &mut PageCx<'_, E>) {
        let Some(draft) = self.draft else {
            return;
        };
        let (h, m, s) = (draft.hour, draft.minute, draft.second);
        let (text, title) = match draft.field {
            TimeField::Hour => (line(format_args!("[{h:02}]:{m:02}:{s:02}")), "Set Hour"),
            TimeField::Minute => (line(format_args!("{h:02}:[{m:02}]:{s:02}")), "Set Minute"),
            TimeField::Second => (line(format_args!("{h:02}:{m:02}:[{s:02}]")), "Set Second"),
        };
        cx.display.print_line(0, &text);
        cx.display.clear_line(1);
        cx.display.print_line(2, title);
        cx.display.print_line(3, "Up:+ Dn:- OK:Save");
    }
}
