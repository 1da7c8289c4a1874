//! Sensor Panel Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32F103C8 ("Blue Pill").

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::dma::NoDma;
use embassy_stm32::gpio::{AnyPin, Input, Pull};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::peripherals;
use embassy_stm32::time::Hertz;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant, Ticker, Timer};
use menu::{MenuSystem, SharedMenu};
use pages::Pages;
use platform::config::{APP_NAME, APP_VERSION, EVENT_QUEUE_DEPTH, KEY_SCAN_PERIOD_MS, MAX_NODES, MENU_TICK_MS};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use static_cell::StaticCell;

use firmware::tasks::{scan_keys, MenuLoop, EVENT_CHANNEL};
use firmware::{Board, Keypad, OledCanvas, SharedBoard};

// Logger and panic handler
use defmt_rtt as _;
use panic_probe as _;

bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

/// Watchdog timeout. The main loop pets it once a second.
const WATCHDOG_TIMEOUT_US: u32 = 8_000_000;

type OledBus = I2c<'static, peripherals::I2C1, NoDma, NoDma>;
type Oled = Ssd1306<I2CInterface<OledBus>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;
type AppBoard = SharedBoard<CriticalSectionRawMutex>;
type AppMenu = SharedMenu<
    CriticalSectionRawMutex,
    MenuSystem<'static, OledCanvas<Oled>, Board<'static, CriticalSectionRawMutex>, MAX_NODES>,
>;

static BOARD: StaticCell<AppBoard> = StaticCell::new();
static PAGES: StaticCell<Pages> = StaticCell::new();
static MENU: StaticCell<AppMenu> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("{=str} firmware v{=str}", APP_NAME, APP_VERSION);
    defmt::info!("Initializing STM32F103C8 (Cortex-M3)");

    let p = embassy_stm32::init(Default::default());

    let mut watchdog = IndependentWatchdog::new(p.IWDG, WATCHDOG_TIMEOUT_US);
    watchdog.unleash();
    defmt::info!("IWDG watchdog armed: timeout={=u32}us", WATCHDOG_TIMEOUT_US);

    // I2C1: PB6 (SCL), PB7 (SDA), SSD1306 at 0x3C.
    let i2c = I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        NoDma,
        NoDma,
        Hertz::khz(400),
        Default::default(),
    );
    let mut oled = Ssd1306::new(
        I2CDisplayInterface::new(i2c),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode();
    if oled.init().is_err() {
        defmt::error!("OLED init failed; continuing without a display");
    }

    // Keys: PA0 Previous, PA1 Next, PA2 Confirm, PA3 Activate.
    // Active-low with internal pull-ups.
    let keypad = Keypad::new([
        Input::new(p.PA0, Pull::Up).degrade(),
        Input::new(p.PA1, Pull::Up).degrade(),
        Input::new(p.PA2, Pull::Up).degrade(),
        Input::new(p.PA3, Pull::Up).degrade(),
    ]);

    let board = BOARD.init(SharedBoard::default());
    let pages = PAGES.init(Pages::new());
    let mut system = MenuSystem::new(OledCanvas::new(oled), Board::new(board));
    match pages::build(&mut system, pages) {
        Ok(_) => defmt::info!("Menu composed: {=usize} nodes", system.pool().len()),
        Err(e) => {
            defmt::error!("Menu composition failed: {}", e);
            loop {
                Timer::after(Duration::from_secs(1)).await;
                watchdog.pet();
            }
        }
    }
    let menu: &'static AppMenu = MENU.init(SharedMenu::new(system));

    if spawner.spawn(key_scan_task(keypad)).is_err() {
        defmt::error!("failed to spawn key_scan_task");
    }
    if spawner.spawn(menu_task(menu)).is_err() {
        defmt::error!("failed to spawn menu_task");
    }
    defmt::info!("Tasks spawned, event queue depth={=usize}", EVENT_QUEUE_DEPTH);

    // Main loop - heartbeat
    let mut counter = 0u32;
    loop {
        Timer::after(Duration::from_secs(1)).await;
        counter = counter.wrapping_add(1);
        defmt::debug!("Heartbeat tick={=u32}", counter);
        watchdog.pet();
    }
}

/// Polls the keypad every [`KEY_SCAN_PERIOD_MS`] and queues key events.
#[embassy_executor::task]
async fn key_scan_task(mut keypad: Keypad<Input<'static, AnyPin>>) {
    let tx = EVENT_CHANNEL.sender();
    let mut ticker = Ticker::every(Duration::from_millis(KEY_SCAN_PERIOD_MS));
    loop {
        if let Some(key) = scan_keys(&mut keypad, &tx, Instant::now().as_millis()) {
            defmt::debug!("key {}", key);
        }
        ticker.next().await;
    }
}

/// Handles queued events and renders the menu, sleeping [`MENU_TICK_MS`] between ticks.
#[embassy_executor::task]
async fn menu_task(menu: &'static AppMenu) {
    let rx = EVENT_CHANNEL.receiver();
    let mut state = MenuLoop::new();
    loop {
        if let Err(e) = state.cycle(menu, &rx, Instant::now().as_millis()).await {
            defmt::warn!("menu tick skipped: {}", e);
        }
        Timer::after(Duration::from_millis(MENU_TICK_MS)).await;
    }
}
