//! Unified error types for the RelayBridge firmware.
//!
//! Each port has its own small `Copy` error enum so adapters can report
//! exactly what went wrong, and every one of them converts into the
//! top-level [`Error`].  The domain core never propagates these out of
//! the polling loop: a failed hardware access becomes a trace event and
//! the controller carries on with the next command.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A port-expander access failed.
    Expander(ExpanderError),
    /// The analog front end could not produce a reading.
    Analog(AnalogError),
    /// The RS-485 link rejected a write.
    Serial(SerialError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expander(e) => write!(f, "expander: {e}"),
            Self::Analog(e) => write!(f, "analog: {e}"),
            Self::Serial(e) => write!(f, "serial: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Expander errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpanderError {
    /// The I2C transaction failed (NACK, arbitration loss, bus fault...).
    Bus(ErrorKind),
    /// Pin offset outside the 8-pin bank.
    InvalidPin(u8),
}

impl fmt::Display for ExpanderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "I2C bus error ({kind:?})"),
            Self::InvalidPin(pin) => write!(f, "invalid pin P{pin}"),
        }
    }
}

impl From<ExpanderError> for Error {
    fn from(e: ExpanderError) -> Self {
        Self::Expander(e)
    }
}

// ---------------------------------------------------------------------------
// Analog errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogError {
    /// The ADC driver returned a non-OK status code.
    ReadFailed(i32),
    /// No ADC channel is wired for the requested id.
    UnknownChannel(u8),
}

impl fmt::Display for AnalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(rc) => write!(f, "ADC read failed (rc={rc})"),
            Self::UnknownChannel(ch) => write!(f, "unknown ADC channel {ch}"),
        }
    }
}

impl From<AnalogError> for Error {
    fn from(e: AnalogError) -> Self {
        Self::Analog(e)
    }
}

// ---------------------------------------------------------------------------
// Serial errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// The UART driver failed to queue the bytes.
    WriteFailed,
    /// Only part of the buffer was accepted.
    ShortWrite { written: usize, expected: usize },
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "UART write failed"),
            Self::ShortWrite { written, expected } => {
                write!(f, "UART short write ({written}/{expected} bytes)")
            }
        }
    }
}

impl From<SerialError> for Error {
    fn from(e: SerialError) -> Self {
        Self::Serial(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
