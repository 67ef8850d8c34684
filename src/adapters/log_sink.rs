//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing trace events to the ESP-IDF logger,
//! which goes to the 115200-baud console UART in production.  This is the
//! diagnostic channel; the RS-485 link never sees these lines.

use embedded_hal::digital::PinState;
use log::{info, warn};

use crate::app::channels::ChannelKind;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | system started, waiting for RS-485 commands");
            }
            AppEvent::CommandReceived(line) => {
                info!("RX    | command: {}", line);
            }
            AppEvent::HardCheckReceived => {
                info!("CHECK | ##hardcheck received, running tests");
            }
            AppEvent::RelaySwitched {
                channel,
                on,
                expander,
                pin,
            } => {
                info!(
                    "RELAY | relay {} {} ({} P{})",
                    channel,
                    if *on { "ON" } else { "OFF" },
                    expander.label(),
                    pin,
                );
            }
            AppEvent::InputQueried { channel, active } => {
                info!(
                    "INPUT | IN{} {}",
                    channel,
                    if *active { "ACTIVE (LOW)" } else { "INACTIVE (HIGH)" },
                );
            }
            AppEvent::AnalogSampled { raw } => {
                info!("ADC   | CHA1 reading {:04}", raw);
            }
            AppEvent::UnknownCommand => {
                info!("RX    | unknown command or invalid format");
            }
            AppEvent::ChannelOutOfRange { kind, channel } => {
                let kind = match kind {
                    ChannelKind::Relay => "relay",
                    ChannelKind::Input => "input",
                };
                warn!("RX    | {} channel {} out of range, ignored", kind, channel);
            }
            AppEvent::LineOverflow { dropped } => {
                warn!("RX    | line too long ({} bytes dropped), discarded", dropped);
            }
            AppEvent::HardwareFault { op, error } => {
                warn!("FAULT | {:?} failed: {}", op, error);
            }
            AppEvent::MonitorInitialized { level } => {
                info!(
                    "IN16  | initialised, start level {}",
                    if *level == PinState::High { "HIGH" } else { "LOW" },
                );
            }
            AppEvent::HardCheckSent => {
                info!("IN16  | ##hardcheck sent (IN16 stable past hold window)");
            }
        }
    }
}
