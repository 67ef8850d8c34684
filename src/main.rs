//! RelayBridge Firmware: Main Entry Point
//!
//! Single-threaded polling loop bridging RS-485 commands to the relay and
//! input expanders.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  HardwareAdapter    Rs485Link    LogEventSink   Esp32Time  │
//! │  (Expander+Analog)  (Serial)     (EventSink)    (Clock)    │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ──────────────        │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │            Controller (pure logic)               │      │
//! │  │  CommandInterpreter · StableEdgeMonitor          │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::Gpio0;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{self, UartDriver};
use esp_idf_hal::units::Hertz;
use log::info;

use relaybridge::adapters::adc::Adc1Adapter;
use relaybridge::adapters::hardware::{ExpanderAddresses, HardwareAdapter};
use relaybridge::adapters::log_sink::LogEventSink;
use relaybridge::adapters::time::Esp32TimeAdapter;
use relaybridge::adapters::uart::Rs485Link;
use relaybridge::app::controller::Controller;
use relaybridge::config::ControllerConfig;
use relaybridge::drivers::hw_init;
use relaybridge::error::Error;
use relaybridge::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RelayBridge v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Build-time configuration ───────────────────────────
    let config = ControllerConfig::DEFAULT;
    config.validate()?;
    if let Ok(json) = serde_json::to_string(&config) {
        info!("Config: {}", json);
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let io = peripherals.pins;

    // RS-485 on UART2, 8N1: TX = pins::RS485_TX_GPIO, RX = pins::RS485_RX_GPIO.
    let uart_config = uart::config::Config::default().baudrate(Hertz(config.rs485_baud));
    let uart = UartDriver::new(
        peripherals.uart2,
        io.gpio33,
        io.gpio32,
        Option::<Gpio0>::None,
        Option::<Gpio0>::None,
        &uart_config,
    )?;
    let mut link = Rs485Link::new(uart);
    info!(
        "RS-485 link up on TX GPIO{} / RX GPIO{} at {} baud",
        pins::RS485_TX_GPIO,
        pins::RS485_RX_GPIO,
        config.rs485_baud
    );

    // Expander bus: SDA = pins::I2C_SDA_GPIO, SCL = pins::I2C_SCL_GPIO.
    let i2c_config = I2cConfig::new().baudrate(Hertz(config.i2c_baud));
    let i2c = I2cDriver::new(peripherals.i2c0, io.gpio4, io.gpio5, &i2c_config)?;
    info!(
        "I2C0 up on SDA GPIO{} / SCL GPIO{} at {} Hz",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        config.i2c_baud
    );

    hw_init::init_adc(config.adc_channel, config.adc_resolution_bits)?;
    info!("CHA1 sampled on GPIO{}", pins::CHA1_ADC_GPIO);

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(
        i2c,
        ExpanderAddresses::default(),
        Adc1Adapter::new(config.adc_channel),
    );
    hw.init().map_err(Error::from)?;

    let clock = Esp32TimeAdapter::new();
    let mut delay = FreeRtos;
    let mut log_sink = LogEventSink::new();

    // ── 5. Controller ─────────────────────────────────────────
    let mut controller = Controller::new(config);
    controller.start(&mut log_sink);

    // ── 6. Polling loop ───────────────────────────────────────
    loop {
        controller.poll(&mut hw, &mut link, &clock, &mut delay, &mut log_sink);

        // Let the idle task run so the task watchdog stays fed.
        FreeRtos::delay_ms(1);
    }
}
