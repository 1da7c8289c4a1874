//! Runtime parameter editor.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::RuntimeParams;

use crate::widgets::{labeled_bar, line};
use crate::Environment;

/// Field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamField {
    /// Seconds between uploads.
    #[default]
    PublishInterval,
    /// Seconds between sensor reads.
    SensorInterval,
}

impl ParamField {
    /// The other field.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::PublishInterval => Self::SensorInterval,
            Self::SensorInterval => Self::PublishInterval,
        }
    }
}

/// Draft parameters while the page is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDraft {
    /// Values being edited.
    pub params: RuntimeParams,
    /// Field the arrow keys change.
    pub field: ParamField,
}

impl ParamDraft {
    /// Start editing `params` at the first field.
    #[must_use]
    pub fn new(params: RuntimeParams) -> Self {
        Self {
            params: params.clamped(),
            field: ParamField::default(),
        }
    }

    /// Raise the selected field by one, stopping at its maximum.
    pub fn increment(&mut self) {
        let (value, (_, max)) = self.selected_mut();
        if *value < max {
            *value = value.saturating_add(1);
        }
    }

    /// Lower the selected field by one, stopping at its minimum.
    pub fn decrement(&mut self) {
        let (value, (min, _)) = self.selected_mut();
        if *value > min {
            *value = value.saturating_sub(1);
        }
    }

    fn selected_mut(&mut self) -> (&mut u8, (u8, u8)) {
        match self.field {
            ParamField::PublishInterval => {
                (&mut self.params.publish_interval_s, RuntimeParams::PUBLISH_RANGE)
            }
            ParamField::SensorInterval => {
                (&mut self.params.sensor_interval_s, RuntimeParams::SENSOR_RANGE)
            }
        }
    }
}

/// Edits the publish and sensor intervals.
///
/// Previous and Next change the selected field within its range, Activate
/// switches fields, Confirm stores the draft and goes back.
#[derive(Debug, Default)]
pub struct ParamSettingPage {
    draft: Option<ParamDraft>,
}

impl ParamSettingPage {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self { draft: None }
    }

    /// Draft while on screen.
    #[must_use]
    pub fn draft(&self) -> Option<ParamDraft> {
        self.draft
    }
}

impl<E: Environment> PageBehavior<E> for ParamSettingPage {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.draft = Some(ParamDraft::new(cx.env.params()));
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
            EventKind::Previous => draft.increment(),
            EventKind::Next => draft.decrement(),
            EventKind::Activate => draft.field = draft.field.toggled(),
            EventKind::Confirm => {
                cx.env.store_params(draft.params);
                #[cfg(feature = "defmt")]
                defmt::info!("params stored: {}", draft.params);
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
        let RuntimeParams {
            publish_interval_s: publish,
            sensor_interval_s: sensor,
        } = draft.params;
        let (summary, title) = match draft.field {
            ParamField::PublishInterval => (
                line(format_args!("[{publish:2}]s/{sensor:2}s")),
                "Set Publish Delay",
            ),
            ParamField::SensorInterval => (
                line(format_args!("{publish:2}s/[{sensor:2}]s")),
                "Set Sensor Delay",
            ),
        };
        cx.display.print_line(0, &summary);
        let (lo, hi) = RuntimeParams::PUBLISH_RANGE;
        labeled_bar(cx.display, 1, "5", "60", i32::from(publish), (i32::from(lo), i32::from(hi)));
        cx.display.print_line(2, title);
        let (lo, hi) = RuntimeParams::SENSOR_RANGE;
        labeled_bar(cx.display, 3, "1", "10", i32::from(sensor), (i32::from(lo), i32::from(hi)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_stop_at_their_range_ends() {
        let mut draft = ParamDraft::new(RuntimeParams {
            publish_interval_s: 60,
            sensor_interval_s: 1,
        });
        draft.increment();
        assert_eq!(draft.params.publish_interval_s, 60);
        draft.field = draft.field.toggled();
        draft.decrement();
        assert_eq!(draft.params.sensor_interval_s, 1);
        draft.increment();
        assert_eq!(draft.params.sensor_interval_s, 2);
    }

    #[test]
    fn draft_starts_from_clamped_params() {
        let draft = ParamDraft::new(RuntimeParams {
            publish_interval_s: 200,
            sensor_interval_s: 0,
        });
        assert_eq!(draft.params.publish_interval_s, 60);
        assert_eq!(draft.params.sensor_interval_s, 1);
    }
}
