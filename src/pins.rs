//! GPIO / peripheral pin assignments for the relay controller board.
//!
//! Single source of truth: bring-up code references this module rather than
//! hard-coding pin numbers or bus addresses.

// ---------------------------------------------------------------------------
// RS-485 command link (MAX485 transceiver on UART2)
// ---------------------------------------------------------------------------

/// UART RX from the RS-485 transceiver.
pub const RS485_RX_GPIO: i32 = 32;
/// UART TX to the RS-485 transceiver.
pub const RS485_TX_GPIO: i32 = 33;

// ---------------------------------------------------------------------------
// I²C bus shared by all four PCF8574 expanders
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 4;
pub const I2C_SCL_GPIO: i32 = 5;

/// Relay outputs OUT1–OUT8.
pub const RELAY_A_I2C_ADDR: u8 = 0x24;
/// Relay outputs OUT9–OUT11 (P3–P7 unused).
pub const RELAY_B_I2C_ADDR: u8 = 0x25;
/// Digital inputs IN1–IN8.
pub const INPUT_A_I2C_ADDR: u8 = 0x22;
/// Digital inputs IN9–IN16 (IN16 is the hardcheck button).
pub const INPUT_B_I2C_ADDR: u8 = 0x23;

// ---------------------------------------------------------------------------
// Analog input CHA1
// ---------------------------------------------------------------------------

/// ADC1 channel 0 on the classic ESP32.
pub const CHA1_ADC_GPIO: i32 = 36;
/// ADC1 channel index for [`CHA1_ADC_GPIO`].
pub const CHA1_ADC_CHANNEL: u8 = 0;
