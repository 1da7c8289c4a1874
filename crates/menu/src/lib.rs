//! Menu engine: node pool, tree navigation, layouts and key dispatch.
//!
//! This crate is `no_std`; it only uses `core`, `heapless` and
//! `embassy-sync`/`embassy-time` for the shared wrapper.
//!
//! ```text
//! key code ─► MenuEvent ─► Debouncer ─► PageBehavior::on_key ─┬─► navigation
//!                                           (Unhandled)       └─► kind default
//!                                                    render ◄── dirty / interval
//! ```
//!
//! Pages implement [`PageBehavior`] and are attached to `Custom` nodes; the
//! carousel and list kinds are rendered by the engine itself.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

#[cfg(feature = "std")]
extern crate std;

pub mod behavior;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod layout;
pub mod navigation;
pub mod node;
pub mod pool;
pub mod shared;
pub mod system;

pub use behavior::{KeyResponse, PageBehavior, PageCx};
pub use error::MenuError;
pub use event::{Debouncer, EventKind, MenuEvent};
pub use layout::{carousel_slots, CarouselSlots, LayoutConfig, Pagination};
pub use node::{Content, Geometry, Icon, MenuNode, NodeFlags, NodeId, NodeKind};
pub use pool::{LiveIds, NodePool};
pub use shared::SharedMenu;
pub use system::MenuSystem;
