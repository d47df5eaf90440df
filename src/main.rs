//! EcoWork Hub Firmware: Main Entry Point
//!
//! Hexagonal architecture around a polled, fixed-interval control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   Lcd1602        MqttAdapter   Esp32Time      │
//! │  (Sensor+Actuator) (Display)      (Transport)   (Clock)        │
//! │  WifiAdapter       LogEventSink                                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  decide · DisplayRenderer · TelemetryPublisher         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (3 s cycle) · LinkSupervisor (blocking reconnect)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Result, anyhow};
use log::{info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{PinDriver, Pull};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use ecowork::adapters::hardware::HardwareAdapter;
use ecowork::adapters::log_sink::LogEventSink;
use ecowork::adapters::mqtt::MqttAdapter;
use ecowork::adapters::time::Esp32TimeAdapter;
use ecowork::adapters::wifi::WifiAdapter;
use ecowork::app::service::AppService;
use ecowork::config::{ECHO_TIMEOUT_US, SystemConfig};
use ecowork::drivers::indicator::IndicatorBank;
use ecowork::drivers::lcd1602::Lcd1602;
use ecowork::drivers::hw_init;
use ecowork::error::Error;
use ecowork::pins;
use ecowork::sensors::SensorHub;
use ecowork::sensors::dht22::Dht22;
use ecowork::sensors::light::LightSensor;
use ecowork::sensors::ultrasonic::Ultrasonic;

/// Main loop pacing.  Short enough that the 3 s cycle fires on time.
const LOOP_TICK_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  EcoWork Hub v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config ─────────────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let clock = Esp32TimeAdapter::new();

    hw_init::init_peripherals().map_err(|e| anyhow!("HAL init failed: {e}"))?;

    let mut dht_pin = PinDriver::input_output_od(peripherals.pins.gpio4)?;
    dht_pin.set_pull(Pull::Up)?;
    let trig = PinDriver::output(peripherals.pins.gpio5)?;
    let echo = PinDriver::input(peripherals.pins.gpio18)?;

    let indicators = IndicatorBank::new(
        PinDriver::output(peripherals.pins.gpio19)?,
        PinDriver::output(peripherals.pins.gpio23)?,
        PinDriver::output(peripherals.pins.gpio13)?,
    )
    .map_err(Error::from)?;

    let sensor_hub = SensorHub::new(
        Dht22::new(dht_pin, Ets, clock).map_err(Error::from)?,
        LightSensor::new(pins::LIGHT_ADC_GPIO),
        Ultrasonic::new(trig, echo, Ets, clock, ECHO_TIMEOUT_US),
    );
    let mut hw = HardwareAdapter::new(sensor_hub, indicators);

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ)),
    )?;
    let mut lcd = Lcd1602::new(i2c, FreeRtos, pins::LCD_I2C_ADDR);
    if let Err(e) = lcd.init() {
        // Keep running headless; the renderer retries every cycle.
        warn!("LCD init failed ({}), continuing without display", Error::from(e));
    }

    let mut sink = LogEventSink::new();

    // ── 4. Service + splash ───────────────────────────────────
    let mut app = AppService::new(&config, FreeRtos);
    app.start(&mut lcd, &mut sink);

    // ── 5. Network bring-up (blocks until associated) ─────────
    let mut wifi = WifiAdapter::new(BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?);
    start_network(&mut wifi, &config)?;

    let mut mqtt = MqttAdapter::new(&config, wifi);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        app.tick(&mut hw, &mut lcd, &mut mqtt, &clock, &mut sink);
        FreeRtos::delay_ms(LOOP_TICK_MS);
    }
}

/// Load the station credentials and block until the AP has associated.
fn start_network(wifi: &mut WifiAdapter, config: &SystemConfig) -> ecowork::error::Result<()> {
    wifi.configure(config)?;
    wifi.connect_blocking(&mut FreeRtos)?;
    Ok(())
}
