//! Date editor.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::{days_in_month, DateTime};

use crate::widgets::line;
use crate::Environment;

/// First year the editor offers.
pub const YEAR_MIN: u16 = 2000;
/// Last year the editor offers.
pub const YEAR_MAX: u16 = 2099;

/// Field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateField {
    /// Year.
    #[default]
    Year,
    /// Month.
    Month,
    /// Day of month.
    Day,
}

impl DateField {
    /// Field after this one, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Year => Self::Month,
            Self::Month => Self::Day,
            Self::Day => Self::Year,
        }
    }
}

/// Date being edited. Always a valid calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDraft {
    /// 2000..=2099
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=days in month
    pub day: u8,
    /// Field the arrow keys change.
    pub field: DateField,
}

impl DateDraft {
    /// Start from the clock's date, pulled into the editable range.
    #[must_use]
    pub fn from_clock(now: &DateTime) -> Self {
        let mut draft = Self {
            year: now.year.clamp(YEAR_MIN, YEAR_MAX),
            month: now.month.clamp(1, 12),
            day: now.day.max(1),
            field: DateField::Year,
        };
        draft.clamp_day();
        draft
    }

    /// Step the selected field up (`true`) or down, wrapping within its range.
    pub fn step(&mut self, up: bool) {
        match self.field {
            DateField::Year => {
                self.year = wrap_u16(self.year, up, YEAR_MIN, YEAR_MAX);
                self.clamp_day();
            }
            DateField::Month => {
                self.month = wrap_u8(self.month, up, 1, 12);
                self.clamp_day();
            }
            DateField::Day => {
                let last = days_in_month(self.year, self.month);
                self.day = wrap_u8(self.day, up, 1, last);
            }
        }
    }

    fn clamp_day(&mut self) {
        self.day = self.day.min(days_in_month(self.year, self.month));
    }
}

fn wrap_u8(value: u8, up: bool, min: u8, max: u8) -> u8 {
    match (up, value) {
        (true, v) if v >= max => min,
        (true, v) => v.saturating_add(1),
        (false, v) if v <= min => max,
        (false, v) => v.saturating_sub(1),
    }
}

fn wrap_u16(value: u16, up: bool, min: u16, max: u16) -> u16 {
    match (up, value) {
        (true, v) if v >= max => min,
        (true, v) => v.saturating_add(1),
        (false, v) if v <= min => max,
        (false, v) => v.saturating_sub(1),
    }
}

/// Edits year, month and day and writes them to the RTC on Confirm.
///
/// Previous/Next change the selected field, Activate moves to the next field.
#[derive(Debug, Default)]
pub struct SetDatePage {
    draft: Option<DateDraft>,
}

impl SetDatePage {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self { draft: None }
    }

    /// Draft while on screen.
    #[must_use]
    pub fn draft(&self) -> Option<DateDraft> {
        self.draft
    }
}

impl<E: Environment> PageBehavior<E> for SetDatePage {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.draft = Some(DateDraft::from_clock(&cx.env.read_time()));
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
                if let Err(_e) = cx.env.set_date(draft.year, draft.month, draft.day) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("set date rejected: {}", _e);
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
        let yy = draft.year.saturating_sub(YEAR_MIN);
        let (mm, dd) = (draft.month, draft.day);
        let (text, title) = match draft.field {
            DateField::Year => (line(format_args!("[{yy:02}]/{mm:02}/{dd:02}")), "Set Year"),
            DateField::Month => (line(format_args!("{yy:02}/[{mm:02}]/{dd:02}")), "Set Month"),
            DateField::Day => (line(format_args!("{yy:02}/{mm:02}/[{dd:02}]")), "Set Day"),
        };
        cx.display.print_line(0, &text);
        cx.display.clear_line(1);
        cx.display.print_line(2, title);
        cx.display.print_line(3, "Up:+ Dn:- OK:Save");
    }
}
