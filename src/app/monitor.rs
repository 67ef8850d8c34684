//! Stable-edge monitor for the IN16 hardcheck button.
//!
//! Polled once per loop tick.  When IN16 has rested at one level for longer
//! than the hold window, after a change that itself outlived the debounce
//! window, the monitor writes `##hardcheck` onto the RS-485 link as if a peer
//! had sent it.  It fires once per stable period, whichever level that
//! period rests at: a held press fires, and so does a debounced release.
//!
//! ```text
//!  Uninitialized ──▶ Tracking{unstable} ──(hold elapsed)──▶ Fired
//!                          ▲                                         │
//!                          └──────(change outside debounce)──────────┘
//! ```
//!
//! A change seen within the debounce window of the previous accepted change
//! is recorded as the last observed level but leaves both timers alone.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::channels::MONITOR_INPUT;
use super::command::HARDCHECK;
use super::events::{AppEvent, HardwareOp};
use super::ports::{ClockPort, EventSink, ExpanderPort, SerialPort};

/// Outcome of one [`StableEdgeMonitor::observe`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorStep {
    /// First sample taken as the baseline.
    Initialized(PinState),
    /// Nothing to do this tick.
    Idle,
    /// The hold window elapsed: emit the diagnostic command now.
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tracking {
    last_level: PinState,
    last_change_ms: u32,
    stable_since_ms: u32,
    fired: bool,
}

/// Debounce/hold state for the monitored input.
pub struct StableEdgeMonitor {
    debounce_ms: u32,
    hold_ms: u32,
    fire_pause_ms: u32,
    state: Option<Tracking>,
}

impl StableEdgeMonitor {
    pub const fn new(debounce_ms: u32, hold_ms: u32, fire_pause_ms: u32) -> Self {
        Self {
            debounce_ms,
            hold_ms,
            fire_pause_ms,
            state: None,
        }
    }

    /// Pure state-machine step: feed one sample and the time it was taken.
    pub fn observe(&mut self, level: PinState, now_ms: u32) -> MonitorStep {
        let Some(t) = self.state.as_mut() else {
            self.state = Some(Tracking {
                last_level: level,
                last_change_ms: now_ms,
                stable_since_ms: now_ms,
                fired: false,
            });
            return MonitorStep::Initialized(level);
        };

        if level != t.last_level {
            if now_ms.wrapping_sub(t.last_change_ms) > self.debounce_ms {
                t.last_change_ms = now_ms;
                t.stable_since_ms = now_ms;
                t.fired = false;
            }
            t.last_level = level;
            return MonitorStep::Idle;
        }

        if !t.fired && now_ms.wrapping_sub(t.stable_since_ms) > self.hold_ms {
            t.fired = true;
            return MonitorStep::Fire;
        }

        MonitorStep::Idle
    }

    /// Sample IN16, advance the state machine, and inject the diagnostic
    /// command when it fires.
    ///
    /// Firing blocks the caller for `fire_pause_ms` between the bare CR and
    /// the command line.
    pub fn poll(
        &mut self,
        hw: &mut impl ExpanderPort,
        link: &mut impl SerialPort,
        clock: &impl ClockPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        let level = match hw.read(MONITOR_INPUT) {
            Ok(level) => level,
            Err(e) => {
                sink.emit(&AppEvent::HardwareFault {
                    op: HardwareOp::MonitorRead,
                    error: e.into(),
                });
                return;
            }
        };

        match self.observe(level, clock.now_ms()) {
            MonitorStep::Initialized(level) => {
                sink.emit(&AppEvent::MonitorInitialized { level });
            }
            MonitorStep::Idle => {}
            MonitorStep::Fire => self.fire(link, delay, sink),
        }
    }

    fn fire(&self, link: &mut impl SerialPort, delay: &mut impl DelayNs, sink: &mut impl EventSink) {
        let sent = link.write_bytes(b"\r").and_then(|()| {
            delay.delay_ms(self.fire_pause_ms);
            link.write_bytes(HARDCHECK)?;
            link.write_bytes(b"\r")
        });

        match sent {
            Ok(()) => sink.emit(&AppEvent::HardCheckSent),
            Err(e) => sink.emit(&AppEvent::HardwareFault {
                op: HardwareOp::SerialWrite,
                error: e.into(),
            }),
        }
    }

    /// Whether the current stable period has already fired.
    pub fn has_fired(&self) -> bool {
        self.state.is_some_and(|t| t.fired)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }
}
