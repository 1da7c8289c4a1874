//! Board state as seen through the collaborator traits.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use firmware::{Board, SharedBoard};
use platform::{
    Climate, Connectivity, DateTime, ParamStore, RtcClock, RuntimeParams, Sensor, SensorHub, SyncStatus,
};

fn shared() -> SharedBoard<NoopRawMutex> {
    SharedBoard::default()
}

#[test]
fn published_samples_reach_the_snapshot() {
    let shared = shared();
    shared.publish_climate(Some(Climate {
        temperature_tenths: 235,
        humidity_pct: 41,
    }));
    shared.publish_light(Some(320));
    shared.publish_pm25(None);

    let snapshot = Board::new(&shared).snapshot();
    assert_eq!(snapshot.climate.available().map(|c| c.temperature_tenths), Some(235));
    assert_eq!(snapshot.light.available(), Some(320));
    assert!(snapshot.pm25.error);
    assert_eq!(snapshot.pm25.available(), None);

    shared.publish_pm25(Some(12.5));
    assert_eq!(Board::new(&shared).snapshot().pm25.available(), Some(12.5));
}

#[test]
fn disabling_a_sensor_survives_new_samples() {
    let shared = shared();
    let mut board = Board::new(&shared);
    board.set_enabled(Sensor::Light, false);
    assert!(!shared.sensor_enabled(Sensor::Light));
    assert!(shared.sensor_enabled(Sensor::Climate));

    shared.publish_light(Some(900));
    let light = board.snapshot().light;
    assert_eq!((light.value, light.enabled, light.available()), (900, false, None));

    board.set_enabled(Sensor::Light, true);
    assert_eq!(board.snapshot().light.available(), Some(900));
}

#[test]
fn time_sync_needs_both_links() {
    let shared = shared();
    let mut board = Board::new(&shared);

    assert!(!board.sync_time());
    shared.set_links(true, false);
    assert!(!board.sync_time());
    assert!(!shared.sync_requested());
    assert_eq!(board.link_status().sync, SyncStatus::Never);

    shared.set_links(true, true);
    assert!(board.sync_time());
    assert!(shared.sync_requested());
    assert_eq!(board.link_status().sync, SyncStatus::Pending);
}

#[test]
fn finished_sync_sets_clock_and_status() {
    let shared = shared();
    let network_time = DateTime {
        year: 2025,
        month: 3,
        day: 9,
        hour: 7,
        minute: 15,
        second: 0,
    };
    shared.finish_sync(Some(&network_time), 10_000);
    let state = shared.state();
    assert_eq!(state.link.sync, SyncStatus::Success);
    assert_eq!(state.clock.time_at(10_000), network_time);
    assert_eq!(state.clock.time_at(12_000).second, 2);

    shared.finish_sync(None, 20_000);
    assert_eq!(shared.state().link.sync, SyncStatus::Failed);
    assert_eq!(shared.state().clock.time_at(10_000), network_time, "clock kept");
}

#[test]
fn rtc_writes_go_through_validation() {
    let shared = shared();
    let mut board = Board::new(&shared);
    assert!(board.set_date(2023, 2, 29).is_err());
    board.set_date(2024, 2, 29).unwrap();
    let today = board.read_time();
    assert_eq!((today.year, today.month, today.day), (2024, 2, 29));
}

#[test]
fn stored_params_are_clamped() {
    let shared = shared();
    let mut board = Board::new(&shared);
    assert_eq!(board.params(), RuntimeParams::default());
    board.store_params(RuntimeParams {
        publish_interval_s: 99,
        sensor_interval_s: 0,
    });
    assert_eq!(
        board.params(),
        RuntimeParams {
            publish_interval_s: 60,
            sensor_interval_s: 1,
        }
    );
}
