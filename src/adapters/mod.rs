//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                  | Connects to               |
//! |-------------|-----------------------------|---------------------------|
//! | `adc`       | AnalogPort                  | ESP32 ADC1 one-shot       |
//! | `hardware`  | ExpanderPort + AnalogPort   | I2C bus, 4× PCF8574, ADC  |
//! | `log_sink`  | EventSink                   | Serial console log        |
//! | `pcf8574`   | (driver used by `hardware`) | One PCF8574 chip          |
//! | `time`      | ClockPort                   | ESP32 system timer        |
//! | `uart`      | SerialPort                  | UART2 → MAX485 (RS-485)   |

pub mod adc;
pub mod hardware;
pub mod log_sink;
pub mod pcf8574;
pub mod time;
pub mod uart;
