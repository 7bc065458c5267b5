//! Vitrine - SH1106 OLED Demo Firmware
//!
//! Cycles a 128x64 SH1106 panel on I2C1 (PB6 = SCL, PB7 = SDA) through
//! the text, lines, arc, image and canvas demos, two seconds each.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::i2c::I2c;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use vitrine_core::config::{parse_config, ShowcaseConfig};
use vitrine_core::scheduler::{CycleReport, RotationController};
use vitrine_core::traits::StartupError;
use vitrine_core::DEMO_COUNT;
use vitrine_display::Engine;
use vitrine_drivers::display::Sh1106;
use vitrine_hal::I2cConfig;
use vitrine_hal_stm32f0::i2c::embassy_config;
use vitrine_hal_stm32f0::BlockingI2c;

/// Embedded configuration (compiled into firmware)
/// Edit showcase.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../showcase.toml");

type Panel = Sh1106<BlockingI2c<'static>>;

// Frame, scene and canvas are too big for the main task's stack
static ENGINE: StaticCell<Engine<Panel>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Vitrine firmware starting...");

    let p = embassy_stm32::init(Default::default());
    let config = load_config();

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, embassy_config(&I2cConfig::FAST));
    let mut panel = Sh1106::with_config(BlockingI2c::new(i2c), &config.display);

    // A failed init leaves the driver not ready; the controller reports it
    if let Err(e) = panel.init() {
        warn!("SH1106 init failed: {:?}", e);
    }

    let engine = ENGINE.init(Engine::new(panel));

    let mut controller = match RotationController::start(engine, Delay, &config.rotation) {
        Ok(controller) => controller,
        Err(StartupError::NotReady) => {
            error!("Display device not ready");
            halt();
        }
        Err(StartupError::Display(e)) => {
            error!("Display start failed: {:?}", e);
            halt();
        }
    };

    info!(
        "SH1106 demo started: {} demos, {} ms each",
        DEMO_COUNT, config.rotation.dwell_ms
    );

    controller.run(|report| match *report {
        CycleReport::Showing {
            position,
            count,
            demo,
        } => info!("Demo {}/{}: {}", position, count, demo.name()),
        CycleReport::Fault { demo, error } => {
            warn!("{} demo display error: {:?}", demo.name(), error)
        }
    })
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> ShowcaseConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates showcase.toml, so this only trips on
            // parser disagreements
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            ShowcaseConfig::default()
        }
    }
}

fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
