//! Command interpreter: drains the RS-485 link and executes each line.
//!
//! Each complete line is parsed into a [`Command`] and dispatched
//! synchronously before the next byte is read, so a relay write is visible
//! to a later `$in` in the same drain.  Nothing here fails outward:
//! malformed lines, out-of-range channels and hardware faults all end as a
//! trace event and no response.

use core::fmt::Write as _;

use embedded_hal::digital::PinState;
use heapless::String;

use super::channels::{ACTIVE_LEVEL, ChannelKind, INACTIVE_LEVEL, InputChannel, RelayChannel};
use super::command::Command;
use super::events::{AppEvent, HardwareOp, line_text};
use super::line_buffer::{Feed, LineBuffer};
use super::ports::{AnalogPort, EventSink, ExpanderPort, SerialPort};

const RESPONSE_ON: &[u8] = b"on\r";
const RESPONSE_OFF: &[u8] = b"off\r";

/// Owns the partial-line state between polls.
pub struct CommandInterpreter {
    line: LineBuffer,
    adc_channel: u8,
}

impl CommandInterpreter {
    pub const fn new(adc_channel: u8) -> Self {
        Self {
            line: LineBuffer::new(),
            adc_channel,
        }
    }

    /// Consume every byte the link currently has buffered.
    pub fn drain(
        &mut self,
        hw: &mut (impl ExpanderPort + AnalogPort),
        link: &mut impl SerialPort,
        sink: &mut impl EventSink,
    ) {
        while link.available() > 0 {
            let Some(byte) = link.read_byte() else {
                break;
            };
            match self.line.feed(byte) {
                Feed::Pending => {}
                Feed::Line(line) => self.execute(&line, hw, link, sink),
                Feed::Overflow { dropped } => {
                    sink.emit(&AppEvent::LineOverflow { dropped });
                }
            }
        }
    }

    /// Parse and run one line (terminator already stripped).
    pub fn execute(
        &self,
        line: &[u8],
        hw: &mut (impl ExpanderPort + AnalogPort),
        link: &mut impl SerialPort,
        sink: &mut impl EventSink,
    ) {
        sink.emit(&AppEvent::CommandReceived(line_text(line.trim_ascii())));
        self.dispatch(Command::parse(line), hw, link, sink);
    }

    /// Perform the side effect for one command.
    pub fn dispatch(
        &self,
        cmd: Command,
        hw: &mut (impl ExpanderPort + AnalogPort),
        link: &mut impl SerialPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            Command::HardCheck => sink.emit(&AppEvent::HardCheckReceived),

            Command::RelaySet { channel, on } => match relay_channel(channel) {
                Some(relay) => set_relay(relay, on, hw, sink),
                None => sink.emit(&AppEvent::ChannelOutOfRange {
                    kind: ChannelKind::Relay,
                    channel,
                }),
            },

            Command::InputQuery { channel } => match input_channel(channel) {
                Some(input) => query_input(input, hw, link, sink),
                None => sink.emit(&AppEvent::ChannelOutOfRange {
                    kind: ChannelKind::Input,
                    channel,
                }),
            },

            Command::AnalogQuery => self.sample_analog(hw, link, sink),

            Command::Unknown => sink.emit(&AppEvent::UnknownCommand),
        }
    }

    fn sample_analog(
        &self,
        hw: &mut impl AnalogPort,
        link: &mut impl SerialPort,
        sink: &mut impl EventSink,
    ) {
        let raw = match hw.sample(self.adc_channel) {
            Ok(raw) => raw,
            Err(e) => {
                sink.emit(&AppEvent::HardwareFault {
                    op: HardwareOp::AnalogSample,
                    error: e.into(),
                });
                return;
            }
        };

        let response = format_reading(raw);
        respond(link, response.as_bytes(), sink);
        sink.emit(&AppEvent::AnalogSampled { raw });
    }
}

fn relay_channel(n: i32) -> Option<RelayChannel> {
    u8::try_from(n).ok().and_then(RelayChannel::new)
}

fn input_channel(n: i32) -> Option<InputChannel> {
    u8::try_from(n).ok().and_then(InputChannel::new)
}

fn set_relay(
    relay: RelayChannel,
    on: bool,
    hw: &mut impl ExpanderPort,
    sink: &mut impl EventSink,
) {
    let addr = relay.address();
    let level = if on { ACTIVE_LEVEL } else { INACTIVE_LEVEL };

    match hw.write(addr, level) {
        Ok(()) => sink.emit(&AppEvent::RelaySwitched {
            channel: relay.number(),
            on,
            expander: addr.expander,
            pin: addr.pin,
        }),
        Err(e) => sink.emit(&AppEvent::HardwareFault {
            op: HardwareOp::RelayWrite,
            error: e.into(),
        }),
    }
}

fn query_input(
    input: InputChannel,
    hw: &mut impl ExpanderPort,
    link: &mut impl SerialPort,
    sink: &mut impl EventSink,
) {
    let level: PinState = match hw.read(input.address()) {
        Ok(level) => level,
        Err(e) => {
            sink.emit(&AppEvent::HardwareFault {
                op: HardwareOp::InputRead,
                error: e.into(),
            });
            return;
        }
    };

    let active = level == ACTIVE_LEVEL;
    respond(link, if active { RESPONSE_ON } else { RESPONSE_OFF }, sink);
    sink.emit(&AppEvent::InputQueried {
        channel: input.number(),
        active,
    });
}

/// Zero-padded to at least four digits, CR-terminated.
pub fn format_reading(raw: u16) -> String<8> {
    let mut out = String::new();
    // u16 is at most 5 digits + CR, always fits.
    let _ = write!(out, "{raw:04}\r");
    out
}

fn respond(link: &mut impl SerialPort, bytes: &[u8], sink: &mut impl EventSink) {
    if let Err(e) = link.write_bytes(bytes) {
        sink.emit(&AppEvent::HardwareFault {
            op: HardwareOp::SerialWrite,
            error: e.into(),
        });
    }
}
