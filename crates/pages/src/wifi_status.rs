//! WiFi and server link status, with manual time sync.

use menu::{EventKind, KeyResponse, MenuEvent, PageBehavior, PageCx};
use platform::LinkStatus;

use crate::widgets::line;
use crate::Environment;

/// What the page has done since it was entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WifiView {
    /// A sync request was issued while on this page.
    pub sync_requested: bool,
}

/// Link flags and the result of the last time sync.
///
/// Entering the page requests a sync once when both links are up. Previous
/// requests another, Next redraws from a blank screen, Confirm goes back.
#[derive(Debug, Default)]
pub struct WifiStatusPage {
    view: Option<WifiView>,
}

impl WifiStatusPage {
    /// A page that is not on screen.
    #[must_use]
    pub const fn new() -> Self {
        Self { view: None }
    }

    /// Page state while on screen.
    #[must_use]
    pub fn view(&self) -> Option<WifiView> {
        self.view
    }

    fn request_sync<E: Environment>(&mut self, env: &mut E) {
        if !env.link_status().online() {
            return;
        }
        let issued = env.sync_time();
        #[cfg(feature = "defmt")]
        defmt::info!("wifi page: time sync requested (issued={})", issued);
        if let Some(view) = self.view.as_mut() {
            view.sync_requested |= issued;
        }
    }
}

fn connected(up: bool) -> &'static str {
    if up {
        "Connected"
    } else {
        "Disconnected"
    }
}

impl<E: Environment> PageBehavior<E> for WifiStatusPage {
    fn on_enter(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = Some(WifiView::default());
        cx.display.clear();
        self.request_sync(cx.env);
    }

    fn on_exit(&mut self, cx: &mut PageCx<'_, E>) {
        self.view = None;
        cx.display.clear();
    }

    fn on_key(&mut self, event: &MenuEvent, cx: &mut PageCx<'_, E>) -> KeyResponse {
        match event.kind {
            EventKind::Previous => {
                self.request_sync(cx.env);
                KeyResponse::Handled
            }
            EventKind::Next => {
                cx.display.clear();
                KeyResponse::Handled
            }
            EventKind::Confirm => KeyResponse::Back,
            EventKind::Activate => KeyResponse::Handled,
            _ => KeyResponse::Unhandled,
        }
    }

    fn draw(&mut self, cx: &mut PageCx<'_, E>) {
        if self.view.is_none() {
            return;
        }
        let LinkStatus {
            wifi_connected,
            server_connected,
            sync,
        } = cx.env.link_status();
        cx.display
            .print_line(0, &line(format_args!("WiFi: {}", connected(wifi_connected))));
        cx.display
            .print_line(1, &line(format_args!("Srv: {}", connected(server_connected))));
        cx.display
            .print_line(2, &line(format_args!("Sync: {}", sync.label())));
        cx.display.print_line(3, "Up:Sync Dn:Refresh");
    }
}
