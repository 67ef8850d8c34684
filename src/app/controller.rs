//! Controller: the hexagonal core.
//!
//! [`Controller`] owns all mutable runtime state: the interpreter's partial
//! line and the monitor's debounce timers.  The main loop calls
//! [`Controller::poll`] once per iteration with every port borrowed for the
//! duration of the call.
//!
//! ```text
//!  SerialPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                 │        Controller         │
//! ExpanderPort ◀─▶│ Interpreter · EdgeMonitor │ ◀── ClockPort
//!  AnalogPort ──▶ └───────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::ControllerConfig;

use super::events::AppEvent;
use super::interpreter::CommandInterpreter;
use super::monitor::StableEdgeMonitor;
use super::ports::{AnalogPort, ClockPort, EventSink, ExpanderPort, SerialPort};

pub struct Controller {
    config: ControllerConfig,
    interpreter: CommandInterpreter,
    monitor: StableEdgeMonitor,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            interpreter: CommandInterpreter::new(config.adc_channel),
            monitor: StableEdgeMonitor::new(
                config.debounce_ms,
                config.hold_ms,
                config.fire_pause_ms,
            ),
            config,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
    }

    /// One loop iteration: drain the command link, then tick the monitor.
    pub fn poll(
        &mut self,
        hw: &mut (impl ExpanderPort + AnalogPort),
        link: &mut impl SerialPort,
        clock: &impl ClockPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        self.interpreter.drain(hw, link, sink);
        self.monitor.poll(hw, link, clock, delay, sink);
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn monitor(&self) -> &StableEdgeMonitor {
        &self.monitor
    }
}
