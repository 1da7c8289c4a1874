//! Board state shared between the menu and the data tasks.
//!
//! Sensor and connectivity tasks publish into a [`SharedBoard`]; the menu
//! reads it through [`Board`], which implements every collaborator trait the
//! page set needs. State sits behind a blocking mutex and is only ever
//! touched inside short closures, never across an `.await`.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use platform::{
    Climate, Connectivity, DateTime, LinkStatus, ParamStore, Reading, RtcClock, RtcError, RuntimeParams, Sensor,
    SensorHub, SensorSnapshot, SyncStatus,
};

use crate::clock::{uptime_ms, UptimeClock};

/// Everything the UI shows about the board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardState {
    /// Latest sensor readings with their enable/error flags.
    pub sensors: SensorSnapshot,
    /// WiFi / server link flags and the last sync result.
    pub link: LinkStatus,
    /// User-editable intervals.
    pub params: RuntimeParams,
    /// Wall clock.
    pub clock: UptimeClock,
}

/// Publish a new value, or flag a read error, keeping the enable flag.
fn publish<T: Copy>(reading: &mut Reading<T>, value: Option<T>) {
    match value {
        Some(v) => {
            reading.value = v;
            reading.error = false;
        }
        None => reading.error = true,
    }
}

/// Board state plus the time-sync request line.
pub struct SharedBoard<M: RawMutex> {
    state: Mutex<M, RefCell<BoardState>>,
    sync_request: Signal<M, ()>,
}

impl<M: RawMutex> Default for SharedBoard<M> {
    fn default() -> Self {
        Self::new(BoardState::default())
    }
}

impl<M: RawMutex> SharedBoard<M> {
    /// Wrap an initial state.
    pub fn new(state: BoardState) -> Self {
        Self {
            state: Mutex::new(RefCell::new(state)),
            sync_request: Signal::new(),
        }
    }

    /// Run `f` with exclusive access to the state.
    pub fn update<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Copy of the whole state.
    pub fn state(&self) -> BoardState {
        self.state.lock(|cell| *cell.borrow())
    }

    /// Whether the user has switched `sensor` on. Acquisition tasks skip
    /// disabled sensors.
    pub fn sensor_enabled(&self, sensor: Sensor) -> bool {
        let sensors = self.state().sensors;
        match sensor {
            Sensor::Climate => sensors.climate.enabled,
            Sensor::Light => sensors.light.enabled,
            Sensor::Pm25 => sensors.pm25.enabled,
        }
    }

    /// New DHT11 sample; `None` marks a failed read.
    pub fn publish_climate(&self, sample: Option<Climate>) {
        self.update(|s| publish(&mut s.sensors.climate, sample));
    }

    /// New light sample in lux; `None` marks a failed read.
    pub fn publish_light(&self, lux: Option<u16>) {
        self.update(|s| publish(&mut s.sensors.light, lux));
    }

    /// New PM2.5 sample in µg/m³; `None` marks a failed read.
    pub fn publish_pm25(&self, ugm3: Option<f32>) {
        self.update(|s| publish(&mut s.sensors.pm25, ugm3));
    }

    /// Link flags from the network task.
    pub fn set_links(&self, wifi_connected: bool, server_connected: bool) {
        self.update(|s| {
            s.link.wifi_connected = wifi_connected;
            s.link.server_connected = server_connected;
        });
    }

    /// Wait for the menu to ask for a time sync.
    pub async fn wait_sync_request(&self) {
        self.sync_request.wait().await;
    }

    /// Whether a sync request is waiting to be picked up.
    pub fn sync_requested(&self) -> bool {
        self.sync_request.signaled()
    }

    /// Result of a sync: the network time, or `None` on failure.
    pub fn finish_sync(&self, now: Option<&DateTime>, uptime_ms: u64) {
        self.update(|s| match now {
            Some(now) => {
                s.clock.set_at(uptime_ms, now);
                s.link.sync = SyncStatus::Success;
            }
            None => s.link.sync = SyncStatus::Failed,
        });
        #[cfg(feature = "defmt")]
        defmt::info!("time sync finished: {}", now.is_some());
    }

    fn request_sync(&self) -> bool {
        let issued = self.update(|s| {
            if !s.link.online() {
                return false;
            }
            s.link.sync = SyncStatus::Pending;
            true
        });
        if issued {
            self.sync_request.signal(());
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("time sync skipped: links down");
        }
        issued
    }
}

/// The menu's view of a [`SharedBoard`].
pub struct Board<'s, M: RawMutex> {
    shared: &'s SharedBoard<M>,
}

impl<'s, M: RawMutex> Board<'s, M> {
    /// Borrow the shared state.
    pub const fn new(shared: &'s SharedBoard<M>) -> Self {
        Self { shared }
    }

    /// The shared state.
    pub fn shared(&self) -> &'s SharedBoard<M> {
        self.shared
    }
}

impl<M: RawMutex> SensorHub for Board<'_, M> {
    fn snapshot(&self) -> SensorSnapshot {
        self.shared.state().sensors
    }

    fn set_enabled(&mut self, sensor: Sensor, enabled: bool) {
        self.shared.update(|s| match sensor {
            Sensor::Climate => s.sensors.climate.enabled = enabled,
            Sensor::Light => s.sensors.light.enabled = enabled,
            Sensor::Pm25 => s.sensors.pm25.enabled = enabled,
        });
    }
}

impl<M: RawMutex> Connectivity for Board<'_, M> {
    fn link_status(&self) -> LinkStatus {
        self.shared.state().link
    }

    fn sync_time(&mut self) -> bool {
        self.shared.request_sync()
    }
}

impl<M: RawMutex> RtcClock for Board<'_, M> {
    fn read_time(&self) -> DateTime {
        self.shared.state().clock.time_at(uptime_ms())
    }

    fn set_date(&mut self, year: u16, month: u8, day: u8) -> Result<(), RtcError> {
        let now = uptime_ms();
        self.shared.update(|s| s.clock.set_date_at(now, year, month, day))
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), RtcError> {
        let now = uptime_ms();
        self.shared.update(|s| s.clock.set_time_at(now, hour, minute, second))
    }
}

impl<M: RawMutex> ParamStore for Board<'_, M> {
    fn params(&self) -> RuntimeParams {
        self.shared.state().params
    }

    fn store_params(&mut self, params: RuntimeParams) {
        let params = params.clamped();
        self.shared.update(|s| s.params = params);
        #[cfg(feature = "defmt")]
        defmt::info!("params stored: {}", params);
    }
}
