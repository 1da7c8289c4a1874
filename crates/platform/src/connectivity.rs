//! Network link status as seen by the UI
//!
//! The WiFi / cloud client runs in its own task. The menu only displays its
//! state and may ask it to fetch the wall-clock time.

/// Outcome of the most recent time synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncStatus {
    /// No sync attempted since boot.
    #[default]
    Never,
    /// Request issued, result pending.
    Pending,
    /// RTC was set from the network.
    Success,
    /// Fetch failed.
    Failed,
}

impl SyncStatus {
    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Never => "Not synced",
            Self::Pending => "Syncing...",
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

/// Snapshot of the network links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Associated with the access point.
    pub wifi_connected: bool,
    /// Connected to the cloud broker.
    pub server_connected: bool,
    /// Last time-sync result.
    pub sync: SyncStatus,
}

impl LinkStatus {
    /// Both links up, so a time sync can be requested.
    #[must_use]
    pub const fn online(&self) -> bool {
        self.wifi_connected && self.server_connected
    }
}

/// Connectivity collaborator.
pub trait Connectivity {
    /// Current link flags.
    fn link_status(&self) -> LinkStatus;

    /// Ask the network task to fetch the time and set the RTC.
    ///
    /// Returns `false` when the request could not be issued (links down).
    fn sync_time(&mut self) -> bool;
}
