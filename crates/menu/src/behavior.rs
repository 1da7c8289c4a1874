//! Per-node behavior hooks.
//!
//! A node without a behavior uses the default handling of its
//! [`NodeKind`](crate::NodeKind). A behavior overrides only the hooks it
//! implements; every hook has a no-op default.

use platform::Display;

use crate::event::MenuEvent;

/// Services handed to a behavior for the duration of one hook call.
pub struct PageCx<'c, E> {
    /// Display to draw on.
    pub display: &'c mut dyn Display,
    /// Board services (sensors, clock, network, parameters).
    pub env: &'c mut E,
    /// Timestamp of the event or frame being handled.
    pub now_ms: u64,
}

/// What the menu should do after a behavior saw a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyResponse {
    /// Not handled; run the node kind's default handler.
    Unhandled,
    /// Handled; redraw.
    Handled,
    /// Handled; go back to the parent.
    Back,
    /// Handled; enter the selected child.
    EnterSelected,
}

/// Lifecycle, input and drawing hooks of a page.
///
/// A page object is attached to exactly one node by exclusive borrow, so two
/// nodes can never share, and concurrently activate, the same page state.
pub trait PageBehavior<E> {
    /// The node became the active node.
    fn on_enter(&mut self, _cx: &mut PageCx<'_, E>) {}

    /// The node stops being the active node.
    fn on_exit(&mut self, _cx: &mut PageCx<'_, E>) {}

    /// The node was chosen from its parent, before it is entered.
    fn on_select(&mut self, _cx: &mut PageCx<'_, E>) {}

    /// A key or refresh event arrived while the node is active.
    fn on_key(&mut self, _event: &MenuEvent, _cx: &mut PageCx<'_, E>) -> KeyResponse {
        KeyResponse::Unhandled
    }

    /// Draw a frame. Only called for [`NodeKind::Custom`](crate::NodeKind::Custom) nodes.
    fn draw(&mut self, _cx: &mut PageCx<'_, E>) {}
}
