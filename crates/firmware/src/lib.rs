//! Sensor Panel Firmware
//!
//! STM32F103 ("Blue Pill") firmware with a 128x64 SSD1306 OLED menu.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Application Layer (main.rs: key-scan task, menu task)
//!         ↓
//! Board adapters (oled, keypad, clock, board)
//!         ↓
//! Menu engine + page set (menu, pages crates)
//!         ↓
//! Platform HAL (Embassy, STM32, ssd1306)
//! ```
//!
//! The key-scan task turns key presses into [`menu::MenuEvent`]s and pushes
//! them into [`tasks::EVENT_CHANNEL`] without blocking. The menu task waits
//! briefly for one event per tick, renders when a frame is due and flushes
//! the OLED.
//!
//! # Features
//!
//! - `hardware` - Build for the STM32F103C8 target (embassy, defmt)
//! - `std` - Enable standard library (for host testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7m-none-eabi --features hardware
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
// Pedantic lints too noisy for firmware application code:
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod board;
pub mod clock;
pub mod keypad;
pub mod oled;
pub mod tasks;

// Re-export key types
pub use board::{Board, BoardState, SharedBoard};
pub use clock::UptimeClock;
pub use keypad::Keypad;
pub use oled::{OledCanvas, Panel, PanelError};
