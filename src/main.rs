use anyhow::Context;

use esp_idf_svc::hal::delay::{Delay, FreeRtos};
use esp_idf_svc::hal::peripherals::Peripherals;

use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::hal::spi;

use tftlcd_vhost::{Demo, DemoConfig, Pins, SpiInterface, TftLcd};

/// SPI clock for the panel, mode 0
const SPI_BAUDRATE_MHZ: u32 = 10;

/// Yield to FreeRTOS this often so the idle task can feed the watchdog
const YIELD_EVERY_TICKS: u32 = 1000;

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take().context("Could not take peripherals")?;
    let pins = peripherals.pins;

    log::info!(
        "Configuring SPI: SCK={} MOSI={} CS={} at {} MHz",
        Pins::SCK,
        Pins::MOSI,
        Pins::CS,
        SPI_BAUDRATE_MHZ
    );
    let spi = spi::SpiDeviceDriver::new_single(
        peripherals.spi2,
        pins.gpio12,                    // SCK - Pins::SCK
        pins.gpio11,                    // MOSI - Pins::MOSI
        Option::<gpio::AnyIOPin>::None, // Write-only panel
        Some(pins.gpio10),              // CS - Pins::CS
        &spi::SpiDriverConfig::new(),
        &spi::SpiConfig::new().baudrate(SPI_BAUDRATE_MHZ.MHz().into()),
    )
    .context("Could not create SPI device driver")?;

    let dc = gpio::PinDriver::output(pins.gpio9).context("Failed to set dc pin as output")?; // Pins::DC
    let rst = gpio::PinDriver::output(pins.gpio8).context("Failed to set rst pin as output")?; // Pins::RST

    let interface = SpiInterface::new(spi, dc, rst, Delay::default());
    let tft = TftLcd::new(interface).map_err(|e| anyhow::anyhow!("Panel init failed: {:?}", e))?;

    let config = DemoConfig::default();
    let mut demo = Demo::new(tft, config);

    let delay = Delay::default();
    let mut ticks: u32 = 0;
    loop {
        // A failed write leaves the address window and the streamed rows out of step,
        // so there is nothing sensible to retry
        if let Err(e) = demo.tick() {
            log::error!("Transport failed at step {:?}: {:?}", demo.step(), e);
            return Err(anyhow::anyhow!("Transport failed: {:?}", e));
        }

        delay.delay_ms(config.tick_interval_ms);

        ticks = ticks.wrapping_add(1);
        if ticks % YIELD_EVERY_TICKS == 0 {
            FreeRtos::delay_ms(10);
        }
    }
}
