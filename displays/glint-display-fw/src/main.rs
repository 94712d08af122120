//! Glint Display Firmware
//!
//! Demo firmware for an SH1106 128x64 module on an STM32F042K6.
//! Prints a greeting and a string from flash, then keeps a double-size
//! uptime counter running on the lower half of the panel.

#![no_std]
#![no_main]

use core::fmt::Write;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::time::Hertz;
use embassy_time::{Duration, Ticker, Timer};
use glint_display::{CharMode, I2cInterface, PanelConfig, Screen};
use glint_hal::I2cConfig;
use glint_hal_stm32f0::Stm32I2c;
use {defmt_rtt as _, panic_probe as _};

/// Uptime refresh interval
const TICK_MS: u64 = 1000;

/// Retry delay while the panel does not answer
const RETRY_MS: u64 = 500;

/// Page row of the uptime counter
const UPTIME_ROW: u8 = 4;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Glint Display Firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // Setup I2C for OLED (PB6=SCL, PB7=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = Hertz(I2cConfig::FAST.frequency);
    i2c_config.timeout = Duration::from_millis(100);

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config);

    let panel = PanelConfig::SH1106_128X64;
    let interface = I2cInterface::new(Stm32I2c::new(i2c), panel.i2c_address);
    let mut screen = Screen::new(interface, panel);

    // The module may still be powering up
    while let Err(e) = screen.init(true) {
        error!("Failed to initialize display: {:?}", e);
        Timer::after(Duration::from_millis(RETRY_MS)).await;
    }
    info!("OLED initialized");

    let banner = screen
        .puts("Hello World")
        .and_then(|()| screen.goto_char(0, 2))
        .and_then(|_| screen.puts_static(b"String from flash\0"));
    if let Err(e) = banner {
        error!("Failed to draw banner: {:?}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut seconds: u32 = 0;
    let mut text: heapless::String<16> = heapless::String::new();

    loop {
        text.clear();
        let (h, m, s) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
        if write!(text, "{:02}:{:02}:{:02}", h % 100, m, s).is_err() {
            warn!("Uptime text truncated");
        }

        screen.set_char_mode(CharMode::Double);
        let drawn = screen.goto_char(0, UPTIME_ROW).and_then(|outcome| {
            if outcome.is_rejected() {
                warn!("Uptime row off-panel: {}", outcome);
            }
            screen.puts(&text)
        });
        screen.set_char_mode(CharMode::Normal);

        match drawn {
            Ok(()) => trace!("Uptime {}s", seconds),
            Err(e) => error!("Failed to draw uptime: {:?}", e),
        }

        seconds = seconds.wrapping_add(1);
        ticker.next().await;
    }
}
