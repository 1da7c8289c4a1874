//! Collaborator contracts for the sensor panel firmware
//!
//! This crate defines the services the menu engine consumes as traits, plus
//! the plain value types that flow through them, so that the menu core and
//! the page set can be developed and tested without hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: tasks, OLED, keypad, board state)
//!         ↓
//! Feature Layers (menu core, pages)
//!         ↓
//! Platform contracts (this crate)
//!         ↓
//! Hardware Layer (Embassy HAL + ssd1306)
//! ```
//!
//! # Collaborators
//!
//! - [`Display`] - OLED drawing primitives
//! - [`KeyScanner`] - Polled front-panel keys
//! - [`SensorHub`] - Temperature, humidity, light, PM2.5 readings
//! - [`Connectivity`] - WiFi / server status and time sync
//! - [`RtcClock`] - Wall-clock date and time
//! - [`ParamStore`] - User-editable runtime parameters
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Derive `defmt::Format` on all value types
//!
//! # Example
//!
//! ```
//! use platform::{Display, ProgressBar};
//!
//! fn draw_level<D: Display>(display: &mut D, percent: i32) {
//!     display.print_line(0, "Level");
//!     display.draw_progress_bar(&ProgressBar::full_width(20, 8, percent, 0, 100));
//!     display.present();
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod connectivity;
pub mod display;
pub mod input;
pub mod rtc;
pub mod sensors;

pub mod mocks;

pub use config::{ParamStore, RuntimeParams};
pub use connectivity::{Connectivity, LinkStatus, SyncStatus};
pub use display::{centered_x, line_y, Display, ProgressBar};
pub use input::{Key, KeyScanner};
pub use rtc::{
    days_in_month, is_leap_year, validate_date, validate_time, DateTime, RtcClock, RtcError,
    Weekday,
};
pub use sensors::{Climate, LightLevel, Pm25Level, Reading, Sensor, SensorHub, SensorSnapshot};
