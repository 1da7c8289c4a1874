//! Application pages for the sensor panel and the menu tree that hosts them.
//!
//! Each page is a [`menu::PageBehavior`] over an [`Environment`], which
//! bundles every board collaborator a page may talk to. A page keeps its
//! working state in an `Option` that is filled by `on_enter` and emptied by
//! `on_exit`, so a page only holds state while it is on screen.
//!
//! [`compose::build`] wires the pages into the tree:
//!
//! ```text
//! Index (home)
//! └── Main Menu (carousel)
//!     ├── Temp&Humid
//!     ├── Light
//!     ├── PM2.5
//!     ├── WiFi
//!     └── Settings (list)
//!         ├── Set Time
//!         ├── Set Date
//!         └── Parameters
//! Alarm (detached, raised by MenuEvent::alarm)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

#[cfg(feature = "std")]
extern crate std;

pub mod alarm;
pub mod compose;
pub mod icons;
pub mod index;
pub mod light;
pub mod param_setting;
pub mod pm25;
pub mod set_date;
pub mod set_time;
pub mod smoothing;
pub mod tandh;
pub mod wifi_status;

mod widgets;

use platform::{Connectivity, ParamStore, RtcClock, SensorHub};

pub use compose::{build, MenuIds, Pages};

/// Everything a page may read or command on the board.
pub trait Environment: SensorHub + Connectivity + RtcClock + ParamStore {}

impl<T: SensorHub + Connectivity + RtcClock + ParamStore> Environment for T {}
