//! Outbound trace events.
//!
//! The interpreter and the monitor emit these through the
//! [`EventSink`](super::ports::EventSink) port.  They make up the
//! human-readable diagnostic channel; no peer parses them.

use embedded_hal::digital::PinState;
use heapless::String;

use crate::config::LINE_CAPACITY;
use crate::error::Error;

use super::channels::{ChannelKind, Expander};

/// Printable copy of a received line.
pub type LineText = String<LINE_CAPACITY>;

/// Hardware operation that failed, for [`AppEvent::HardwareFault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareOp {
    RelayWrite,
    InputRead,
    MonitorRead,
    AnalogSample,
    SerialWrite,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller is ready for commands.
    Started,

    /// A complete, non-empty line arrived (trimmed).
    CommandReceived(LineText),

    /// `##hardcheck` arrived on the command channel.
    HardCheckReceived,

    /// A relay was driven.
    RelaySwitched {
        channel: u8,
        on: bool,
        expander: Expander,
        pin: u8,
    },

    /// A digital input was read and answered.
    InputQueried { channel: u8, active: bool },

    /// The analog front end was sampled and answered.
    AnalogSampled { raw: u16 },

    /// The line matched no clause.
    UnknownCommand,

    /// The line matched a clause but its channel number is out of range.
    ChannelOutOfRange { kind: ChannelKind, channel: i32 },

    /// A line exceeded the buffer and was discarded.
    LineOverflow { dropped: usize },

    /// A port call failed; the controller carried on.
    HardwareFault { op: HardwareOp, error: Error },

    /// First monitor tick: baseline level of IN16.
    MonitorInitialized { level: PinState },

    /// The monitor injected `##hardcheck` onto the command channel.
    HardCheckSent,
}

/// Render raw line bytes for the log; anything outside printable ASCII
/// becomes `?`.
pub fn line_text(bytes: &[u8]) -> LineText {
    let mut text = LineText::new();
    for &b in bytes {
        let c = if (0x20..=0x7E).contains(&b) { b as char } else { '?' };
        if text.push(c).is_err() {
            break;
        }
    }
    text
}
