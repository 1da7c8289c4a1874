//! Application configuration and constants
//!
//! Timing, geometry and capacity values shared by the menu core, the pages and
//! the firmware tasks. Everything tunable lives here rather than being
//! hardcoded at the use site.

/// The application name
pub const APP_NAME: &str = "Sensor Panel";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Timing ──────────────────────────────────────────────────────────────────

/// Depth of the key-event queue between the key-scan and menu tasks.
pub const EVENT_QUEUE_DEPTH: usize = 10;

/// Minimum spacing between accepted physical key events.
pub const DEBOUNCE_WINDOW_MS: u64 = 500;

/// Key-scan task polling period.
pub const KEY_SCAN_PERIOD_MS: u64 = 10;

/// Menu task sleep between iterations.
pub const MENU_TICK_MS: u64 = 20;

/// Longest wait of the menu task for a queued event before it moves on to
/// rendering.
pub const EVENT_WAIT_MS: u64 = 10;

const _: () = assert!(EVENT_WAIT_MS < REFRESH_INTERVAL_MS);

/// A clean frame is still redrawn once this much time has passed, so that
/// animated pages keep moving.
pub const REFRESH_INTERVAL_MS: u64 = 50;

/// Longest wait for the display lock before a render is skipped.
pub const RENDER_LOCK_TIMEOUT_MS: u64 = 50;

/// Longest wait for the display lock before a subtree deletion gives up.
pub const DELETE_LOCK_TIMEOUT_MS: u64 = 100;

// ── Geometry ────────────────────────────────────────────────────────────────

/// Panel width in pixels (SSD1306 128x64).
pub const SCREEN_WIDTH: u32 = 128;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Height of one text line.
pub const LINE_HEIGHT: u32 = 16;

/// Number of text lines on the panel.
pub const TEXT_LINES: u8 = 4;

/// Width of one glyph of the menu font.
pub const GLYPH_WIDTH: u32 = 6;

/// Side length of a carousel icon.
pub const ICON_SIZE: u32 = 32;

// ── Layout defaults ─────────────────────────────────────────────────────────

/// Items per page of a vertical list.
pub const LIST_ITEMS_PER_PAGE: u8 = 4;

/// Items visible in a carousel (left, center, right).
pub const CAROUSEL_VISIBLE_COUNT: u8 = 3;

// ── Capacities ──────────────────────────────────────────────────────────────

/// Node pool capacity.
pub const MAX_NODES: usize = 32;

/// Maximum children per node.
pub const MAX_CHILDREN: usize = 16;

/// Maximum label length in bytes.
pub const MAX_LABEL_LEN: usize = 16;

// ── Runtime parameters ──────────────────────────────────────────────────────

/// Parameters the user can edit on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeParams {
    /// Seconds between cloud publishes.
    pub publish_interval_s: u8,
    /// Seconds between sensor polls.
    pub sensor_interval_s: u8,
}

impl RuntimeParams {
    /// Allowed publish interval range.
    pub const PUBLISH_RANGE: (u8, u8) = (5, 60);
    /// Allowed sensor interval range.
    pub const SENSOR_RANGE: (u8, u8) = (1, 10);

    /// Clamp both fields into their allowed ranges.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            publish_interval_s: self
                .publish_interval_s
                .clamp(Self::PUBLISH_RANGE.0, Self::PUBLISH_RANGE.1),
            sensor_interval_s: self
                .sensor_interval_s
                .clamp(Self::SENSOR_RANGE.0, Self::SENSOR_RANGE.1),
        }
    }
}

impl Default for RuntimeParams {
    fn default() -> Self {
        Self {
            publish_interval_s: 10,
            sensor_interval_s: 2,
        }
    }
}

/// Storage for [`RuntimeParams`].
pub trait ParamStore {
    /// Current parameters.
    fn params(&self) -> RuntimeParams;

    /// Replace the parameters. Implementations clamp out-of-range values.
    fn store_params(&mut self, params: RuntimeParams);
}
