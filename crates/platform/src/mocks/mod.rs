//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use heapless::{Deque, String, Vec};

use crate::*;

/// Maximum number of primitives a [`RecordingDisplay`] keeps.
pub const MAX_RECORDED_OPS: usize = 256;

/// One recorded display primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// `draw_bitmap` call (pixel data omitted).
    Bitmap {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Width.
        width: u32,
        /// Height.
        height: u32,
        /// Drawn inverted.
        inverted: bool,
    },
    /// `draw_text` call.
    Text {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Text, truncated to 32 bytes.
        text: String<32>,
    },
    /// `draw_progress_bar` call.
    Progress(ProgressBar),
    /// `clear` call.
    Clear,
    /// `clear_region` call.
    ClearRegion {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Width.
        width: u32,
        /// Height.
        height: u32,
    },
    /// `clear_line` call.
    ClearLine(u8),
    /// `present` call.
    Present,
    /// `present_dirty` call.
    PresentDirty,
}

/// Display that records every primitive instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    ops: Vec<DrawOp, MAX_RECORDED_OPS>,
}

impl RecordingDisplay {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded primitives, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// All text drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether any drawn text contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// All bitmaps drawn, as `(x, y, inverted)`.
    pub fn bitmaps(&self) -> impl Iterator<Item = (i32, i32, bool)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Bitmap { x, y, inverted, .. } => Some((*x, *y, *inverted)),
            _ => None,
        })
    }

    /// All progress bars drawn.
    pub fn progress_bars(&self) -> impl Iterator<Item = &ProgressBar> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Progress(bar) => Some(bar),
            _ => None,
        })
    }

    /// Number of full-screen clears recorded.
    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Clear).count()
    }

    fn record(&mut self, op: DrawOp) {
        // A full recorder silently stops recording; tests reset between frames.
        let _ = self.ops.push(op);
    }
}

impl Display for RecordingDisplay {
    fn draw_bitmap(&mut self, x: i32, y: i32, width: u32, height: u32, _data: &[u8], inverted: bool) {
        self.record(DrawOp::Bitmap {
            x,
            y,
            width,
            height,
            inverted,
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let mut owned = String::new();
        for c in text.chars() {
            if owned.push(c).is_err() {
                break;
            }
        }
        self.record(DrawOp::Text { x, y, text: owned });
    }

    fn draw_progress_bar(&mut self, bar: &ProgressBar) {
        self.record(DrawOp::Progress(*bar));
    }

    fn clear(&mut self) {
        self.record(DrawOp::Clear);
    }

    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.record(DrawOp::ClearRegion {
            x,
            y,
            width,
            height,
        });
    }

    fn clear_line(&mut self, line: u8) {
        self.record(DrawOp::ClearLine(line));
    }

    fn present(&mut self) {
        self.record(DrawOp::Present);
    }

    fn present_dirty(&mut self) {
        self.record(DrawOp::PresentDirty);
    }
}

/// Mock key scanner fed from a queue of raw codes.
#[derive(Debug, Default)]
pub struct MockKeys {
    codes: Deque<u8, 16>,
}

impl MockKeys {
    /// Create an idle scanner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw key code for a later poll.
    pub fn press(&mut self, code: u8) -> Result<(), u8> {
        self.codes.push_back(code)
    }
}

impl KeyScanner for MockKeys {
    fn get_key(&mut self) -> u8 {
        self.codes.pop_front().unwrap_or(0)
    }
}

/// Every non-display collaborator in one struct.
#[derive(Debug, Clone)]
pub struct MockBoard {
    /// Readings returned by [`SensorHub::snapshot`].
    pub sensors: SensorSnapshot,
    /// Flags returned by [`Connectivity::link_status`].
    pub link: LinkStatus,
    /// Number of accepted `sync_time` requests.
    pub sync_requests: u32,
    /// Clock value returned by [`RtcClock::read_time`].
    pub now: DateTime,
    /// Parameters held by the [`ParamStore`].
    pub params: RuntimeParams,
}

impl MockBoard {
    /// Board with good readings, links down and the clock at 2024-06-15 12:30:45.
    pub fn new() -> Self {
        Self {
            sensors: SensorSnapshot::default(),
            link: LinkStatus::default(),
            sync_requests: 0,
            now: DateTime {
                year: 2024,
                month: 6,
                day: 15,
                hour: 12,
                minute: 30,
                second: 45,
            },
            params: RuntimeParams::default(),
        }
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorHub for MockBoard {
    fn snapshot(&self) -> SensorSnapshot {
        self.sensors
    }

    fn set_enabled(&mut self, sensor: Sensor, enabled: bool) {
        match sensor {
            Sensor::Climate => self.sensors.climate.enabled = enabled,
            Sensor::Light => self.sensors.light.enabled = enabled,
            Sensor::Pm25 => self.sensors.pm25.enabled = enabled,
        }
    }
}

impl Connectivity for MockBoard {
    fn link_status(&self) -> LinkStatus {
        self.link
    }

    fn sync_time(&mut self) -> bool {
        if !self.link.online() {
            return false;
        }
        self.sync_requests = self.sync_requests.saturating_add(1);
        self.link.sync = SyncStatus::Pending;
        true
    }
}

impl RtcClock for MockBoard {
    fn read_time(&self) -> DateTime {
        self.now
    }

    fn set_date(&mut self, year: u16, month: u8, day: u8) -> Result<(), RtcError> {
        validate_date(year, month, day)?;
        self.now.year = year;
        self.now.month = month;
        self.now.day = day;
        Ok(())
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), RtcError> {
        validate_time(hour, minute, second)?;
        self.now.hour = hour;
        self.now.minute = minute;
        self.now.second = second;
        Ok(())
    }
}

impl ParamStore for MockBoard {
    fn params(&self) -> RuntimeParams {
        self.params
    }

    fn store_params(&mut self, params: RuntimeParams) {
        self.params = params.clamped();
    }
}
