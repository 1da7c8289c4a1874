//! Semantic menu events and key debouncing.

use platform::config::DEBOUNCE_WINDOW_MS;
use platform::Key;

/// Semantic event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// No event.
    None,
    /// Key 1.
    Previous,
    /// Key 2.
    Next,
    /// Key 3: confirm / back.
    Confirm,
    /// Key 4: activate / enter.
    Activate,
    /// Internal redraw request.
    Refresh,
    /// Alarm fired; `param` carries the alarm index.
    Alarm,
}

impl EventKind {
    /// Physical key presses are subject to debouncing.
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::Previous | Self::Next | Self::Confirm | Self::Activate)
    }
}

impl From<Key> for EventKind {
    fn from(key: Key) -> Self {
        match key {
            Key::Previous => Self::Previous,
            Key::Next => Self::Next,
            Key::Confirm => Self::Confirm,
            Key::Activate => Self::Activate,
        }
    }
}

/// Event as queued between the key-scan and menu tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuEvent {
    /// Event type.
    pub kind: EventKind,
    /// Type-specific argument (alarm index).
    pub param: u8,
    /// Monotonic timestamp in milliseconds.
    pub at_ms: u64,
}

impl MenuEvent {
    /// Event without a parameter.
    #[must_use]
    pub const fn new(kind: EventKind, at_ms: u64) -> Self {
        Self {
            kind,
            param: 0,
            at_ms,
        }
    }

    /// Map a raw key code (1..=4). Any other code yields `None` and is
    /// never queued.
    #[must_use]
    pub fn from_key_code(code: u8, at_ms: u64) -> Option<Self> {
        Key::from_code(code).map(|key| Self::new(key.into(), at_ms))
    }

    /// Internal redraw request.
    #[must_use]
    pub const fn refresh(at_ms: u64) -> Self {
        Self::new(EventKind::Refresh, at_ms)
    }

    /// Alarm `index` fired.
    #[must_use]
    pub const fn alarm(index: u8, at_ms: u64) -> Self {
        Self {
            kind: EventKind::Alarm,
            param: index,
            at_ms,
        }
    }
}

/// Drops key events that follow the last accepted one too closely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u64,
    last_key_ms: Option<u64>,
}

impl Debouncer {
    /// Debouncer with the given window.
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_key_ms: None,
        }
    }

    /// Window in milliseconds.
    #[must_use]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Whether `event` should be dispatched. Non-key events always pass and
    /// do not move the window.
    pub fn accept(&mut self, event: &MenuEvent) -> bool {
        if !event.kind.is_key() {
            return true;
        }
        if let Some(last) = self.last_key_ms {
            if event.at_ms.saturating_sub(last) < self.window_ms {
                return false;
            }
        }
        self.last_key_ms = Some(event.at_ms);
        true
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW_MS)
    }
}
