//! Event dispatch: debounce, page override, kind-default handlers, alarm.

use platform::Display;

use crate::behavior::KeyResponse;
use crate::error::MenuError;
use crate::event::{EventKind, MenuEvent};
use crate::navigation::Step;
use crate::node::{NodeId, NodeKind};
use crate::system::MenuSystem;

impl<D: Display, E, const N: usize> MenuSystem<'_, D, E, N> {
    /// Handle one queued event.
    ///
    /// Alarms are handled first and unconditionally. Key events inside the
    /// debounce window are consumed without effect. Otherwise the active
    /// node's behavior sees the event; if it leaves it `Unhandled` the node
    /// kind's default handler runs.
    ///
    /// Errors report a transition that did not happen (e.g. `NoParent` at the
    /// root); the menu state is unchanged in that case.
    pub fn process_event(&mut self, event: MenuEvent) -> Result<(), MenuError> {
        self.now_ms = event.at_ms;
        match event.kind {
            EventKind::None => return Ok(()),
            EventKind::Alarm => return self.raise_alarm(&event),
            _ => {}
        }
        if !self.debouncer.accept(&event) {
            #[cfg(feature = "defmt")]
            defmt::trace!("menu: debounced {}", event.kind);
            return Ok(());
        }
        let Some(current) = self.current else {
            return Ok(());
        };
        if !self.active {
            return Ok(());
        }

        let response = self
            .invoke(current, |page, cx| page.on_key(&event, cx))
            .unwrap_or(KeyResponse::Unhandled);
        match response {
            KeyResponse::Handled => {
                self.needs_refresh = true;
                Ok(())
            }
            KeyResponse::Back => self.back_to_parent(),
            KeyResponse::EnterSelected => self.enter_selected(),
            KeyResponse::Unhandled => self.default_key(current, event.kind),
        }
    }

    fn default_key(&mut self, node: NodeId, event: EventKind) -> Result<(), MenuError> {
        let kind = self.pool.get(node)?.kind;
        match (kind, event) {
            (_, EventKind::Refresh) => {
                self.needs_refresh = true;
                Ok(())
            }
            (_, EventKind::Confirm) => self.back_to_parent(),
            (NodeKind::Custom, _) => Ok(()),
            (_, EventKind::Previous) => self.step_selection(node, Step::Previous),
            (_, EventKind::Next) => self.step_selection(node, Step::Next),
            (_, EventKind::Activate) => self.enter_selected(),
            (_, EventKind::None | EventKind::Alarm) => Ok(()),
        }
    }

    /// Show the alarm page on top of whatever is active.
    ///
    /// The page sees the alarm event first (to record the alarm index). If it
    /// is not already showing, it borrows the active node as its parent so
    /// that dismissing it returns there. Before the menu is started there is
    /// nothing to return to, and the alarm is refused with `NoParent`.
    fn raise_alarm(&mut self, event: &MenuEvent) -> Result<(), MenuError> {
        let alarm = self.alarm.ok_or(MenuError::NotFound)?;
        self.pool.get(alarm)?;
        let Some(host) = self.current.or(self.root) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: alarm {} before start", event.param);
            return Err(MenuError::NoParent);
        };
        #[cfg(feature = "defmt")]
        defmt::info!("menu: alarm {} raised", event.param);
        self.invoke(alarm, |page, cx| page.on_key(event, cx));
        if self.current == Some(alarm) {
            self.needs_refresh = true;
            return Ok(());
        }
        self.pool.get_mut(alarm)?.parent = Some(host);
        self.enter(alarm).map_err(|e| {
            if let Ok(page) = self.pool.get_mut(alarm) {
                page.parent = None;
            }
            e
        })
    }
}
