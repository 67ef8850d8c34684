//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (expanders, ADC, UART, clock, event sinks) implement
//! these traits.  The [`Controller`](super::controller::Controller)
//! consumes them via generics, so the domain core never touches hardware
//! directly and runs unchanged against host mocks.

use embedded_hal::digital::PinState;

use crate::error::{AnalogError, ExpanderError, SerialError};

use super::channels::{PinAddress, PinMode};
use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Expander port (relay outputs + digital inputs)
// ───────────────────────────────────────────────────────────────

/// Pin-level access to the four I2C port expanders.
pub trait ExpanderPort {
    /// Sample the current level of one pin.
    fn read(&mut self, pin: PinAddress) -> Result<PinState, ExpanderError>;

    /// Drive one pin.
    fn write(&mut self, pin: PinAddress, level: PinState) -> Result<(), ExpanderError>;

    /// Configure one pin's direction.
    fn set_mode(&mut self, pin: PinAddress, mode: PinMode) -> Result<(), ExpanderError>;
}

// ───────────────────────────────────────────────────────────────
// Analog port
// ───────────────────────────────────────────────────────────────

/// The analog-to-digital front end.
pub trait AnalogPort {
    /// One raw reading at the configured resolution.
    fn sample(&mut self, channel: u8) -> Result<u16, AnalogError>;
}

// ───────────────────────────────────────────────────────────────
// Serial port (RS-485 command/response link)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented duplex channel.
pub trait SerialPort {
    /// Bytes ready to read without blocking.
    fn available(&mut self) -> usize;

    /// Take one byte, if any is buffered.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue `data` for transmission.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), SerialError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond time source.  Wraps after ~49 days; callers
/// compare instants with `wrapping_sub`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → diagnostic log)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`AppEvent`]s through this port.  Adapters decide
/// where they go (serial console, test recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
