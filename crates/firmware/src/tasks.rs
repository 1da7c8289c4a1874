//! Bodies of the key-scan and menu tasks.
//!
//! The embassy task wrappers in `main.rs` only loop over these functions with
//! their tick period, so everything here can be driven from host tests with a
//! local channel.
//!
//! # Backpressure
//!
//! The key-scan side never waits on the queue. When the menu task falls
//! behind and [`EVENT_QUEUE_DEPTH`] events are already queued, further keys are
//! dropped with a warning. A missed key press is preferable to a stalled scan
//! loop.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{with_timeout, Duration};
use menu::shared::RENDER_LOCK_TIMEOUT;
use menu::{MenuError, MenuEvent, MenuSystem, SharedMenu};
use platform::config::{EVENT_QUEUE_DEPTH, EVENT_WAIT_MS};
use platform::{Key, KeyScanner};

use crate::oled::{OledCanvas, Panel};

/// Queue between the key-scan task and the menu task.
pub type EventChannel<M> = Channel<M, MenuEvent, EVENT_QUEUE_DEPTH>;

/// Sending half of an [`EventChannel`].
pub type EventSender<'ch, M> = Sender<'ch, M, MenuEvent, EVENT_QUEUE_DEPTH>;

/// Receiving half of an [`EventChannel`].
pub type EventReceiver<'ch, M> = Receiver<'ch, M, MenuEvent, EVENT_QUEUE_DEPTH>;

/// Global event queue used on hardware.
pub static EVENT_CHANNEL: EventChannel<CriticalSectionRawMutex> = Channel::new();

/// Try to send a menu event without blocking.
///
/// Returns `true` if the event was queued, `false` if the channel was full.
/// Use this from scan loops that must not stall on a slow consumer.
pub fn try_send_event<M: RawMutex>(tx: &EventSender<'_, M>, event: MenuEvent) -> bool {
    tx.try_send(event).is_ok()
}

/// One key-scan tick: poll the keypad and queue the key pressed, if any.
///
/// Returns the key that was queued.
pub fn scan_keys<M: RawMutex, K: KeyScanner>(scanner: &mut K, tx: &EventSender<'_, M>, now_ms: u64) -> Option<Key> {
    let code = scanner.get_key();
    let event = MenuEvent::from_key_code(code, now_ms)?;
    if !try_send_event(tx, event) {
        #[cfg(feature = "defmt")]
        defmt::warn!("event queue full, dropped key {}", code);
        return None;
    }
    Key::from_code(code)
}

/// Queue an alarm overlay for alarm `index`.
pub fn raise_alarm<M: RawMutex>(tx: &EventSender<'_, M>, index: u8, now_ms: u64) -> bool {
    let queued = try_send_event(tx, MenuEvent::alarm(index, now_ms));
    if !queued {
        #[cfg(feature = "defmt")]
        defmt::warn!("event queue full, dropped alarm {}", index);
    }
    queued
}

/// State the menu task keeps between ticks.
///
/// An event taken off the queue while the display lock is busy is held here
/// and handled on the next tick, ahead of anything still queued.
#[derive(Debug, Default)]
pub struct MenuLoop {
    held: Option<MenuEvent>,
}

impl MenuLoop {
    pub const fn new() -> Self {
        Self { held: None }
    }

    /// Event waiting for the display lock, if any.
    pub fn held(&self) -> Option<MenuEvent> {
        self.held
    }

    /// One menu tick: handle at most one event, then render and flush if a
    /// frame is due.
    ///
    /// The queue is awaited for at most [`EVENT_WAIT_MS`]. Navigation failures
    /// are logged and otherwise ignored. Returns whether a frame was drawn; a
    /// lock timeout surfaces as [`MenuError::LockTimeout`] and leaves both the
    /// event and the frame for the next tick.
    pub async fn cycle<'a, M, P, E, const N: usize>(
        &mut self,
        menu: &SharedMenu<M, MenuSystem<'a, OledCanvas<P>, E, N>>,
        rx: &EventReceiver<'_, M>,
        now_ms: u64,
    ) -> Result<bool, MenuError>
    where
        M: RawMutex,
        P: Panel,
    {
        let event = match self.held.take() {
            Some(event) => Some(event),
            None => with_timeout(Duration::from_millis(EVENT_WAIT_MS), rx.receive())
                .await
                .ok(),
        };

        let mut guard = match menu.lock_within(RENDER_LOCK_TIMEOUT).await {
            Ok(guard) => guard,
            Err(e) => {
                self.held = event;
                return Err(e);
            }
        };
        if let Some(event) = event {
            if let Err(_e) = guard.process_event(event) {
                #[cfg(feature = "defmt")]
                defmt::warn!("menu: {} ignored: {}", event.kind, _e);
            }
        }

        if !guard.refresh_due(now_ms) {
            return Ok(false);
        }
        guard.render(now_ms)?;
        if let Err(_e) = guard.display_mut().flush() {
            #[cfg(feature = "defmt")]
            defmt::warn!("oled flush failed: {}", _e);
        }
        Ok(true)
    }
}
