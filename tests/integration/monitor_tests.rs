//! Integration tests for the IN16 monitor driving the RS-485 link.

use embedded_hal::digital::PinState;
use relaybridge::app::channels::MONITOR_INPUT;
use relaybridge::app::events::{AppEvent, HardwareOp};
use relaybridge::app::monitor::StableEdgeMonitor;

use super::mock_hw::{MockBoard, MockClock, MockDelay, MockLink, RecordingSink};

const FIRE_FRAME: &[u8] = b"\r##hardcheck\r";

struct Rig {
    monitor: StableEdgeMonitor,
    hw: MockBoard,
    link: MockLink,
    clock: MockClock,
    delay: MockDelay,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self {
            monitor: StableEdgeMonitor::new(100, 1000, 50),
            hw: MockBoard::new(),
            link: MockLink::new(),
            clock: MockClock::new(0),
            delay: MockDelay::default(),
            sink: RecordingSink::new(),
        }
    }

    fn tick(&mut self) {
        self.monitor.poll(
            &mut self.hw,
            &mut self.link,
            &self.clock,
            &mut self.delay,
            &mut self.sink,
        );
    }

    /// Tick every 10 ms for `ms` with IN16 at `level`.
    fn hold(&mut self, level: PinState, ms: u32) {
        self.hw.set_level(MONITOR_INPUT, level);
        for _ in 0..ms / 10 {
            self.clock.advance(10);
            self.tick();
        }
    }

    fn fires(&self) -> usize {
        self.sink.count(|e| *e == AppEvent::HardCheckSent)
    }
}

#[test]
fn first_tick_reports_baseline() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(
        rig.sink.events,
        vec![AppEvent::MonitorInitialized {
            level: PinState::High
        }]
    );
    assert!(rig.link.tx.is_empty());
}

#[test]
fn held_button_writes_hardcheck_once() {
    let mut rig = Rig::new();
    rig.tick();
    rig.hold(PinState::High, 500);
    rig.hold(PinState::Low, 5000);

    assert_eq!(rig.fires(), 1);
    assert_eq!(rig.link.tx, FIRE_FRAME);
    assert_eq!(rig.delay.total_ns, 50_000_000);
}

#[test]
fn release_and_second_press_fire_again() {
    let mut rig = Rig::new();
    rig.tick();
    rig.hold(PinState::High, 500);
    rig.hold(PinState::Low, 2000);
    // Released for less than the hold window: no fire for the release.
    rig.hold(PinState::High, 500);
    rig.hold(PinState::Low, 2000);

    assert_eq!(rig.fires(), 2);
    assert_eq!(rig.link.tx, [FIRE_FRAME, FIRE_FRAME].concat());
}

#[test]
fn held_release_fires_like_a_held_press() {
    let mut rig = Rig::new();
    rig.tick();
    rig.hold(PinState::High, 500);
    rig.hold(PinState::Low, 1500);
    assert_eq!(rig.fires(), 1);

    rig.hold(PinState::High, 1500);
    assert_eq!(rig.fires(), 2);
    assert_eq!(rig.link.tx, [FIRE_FRAME, FIRE_FRAME].concat());
}

#[test]
fn line_idle_since_boot_fires_once() {
    let mut rig = Rig::new();
    rig.tick();
    rig.hold(PinState::High, 5000);
    assert_eq!(rig.fires(), 1);
    assert_eq!(rig.link.tx, FIRE_FRAME);
}

#[test]
fn short_press_does_not_fire() {
    let mut rig = Rig::new();
    rig.tick();
    rig.hold(PinState::High, 500);
    rig.hold(PinState::Low, 800);
    rig.hold(PinState::High, 500);
    assert_eq!(rig.fires(), 0);
    assert!(rig.link.tx.is_empty());
}

#[test]
fn chatter_inside_debounce_keeps_stability_timer() {
    let mut rig = Rig::new();
    rig.tick();
    rig.hold(PinState::High, 500);

    // Accepted press at t=510, then contact bounce within the 100 ms window.
    rig.hold(PinState::Low, 10);
    rig.hold(PinState::High, 20);
    rig.hold(PinState::Low, 20);

    // 510 + 1000 < t: fires after ~960 more ms of low, not 1000 from the last bounce.
    rig.hold(PinState::Low, 960);
    assert_eq!(rig.fires(), 0);
    rig.hold(PinState::Low, 20);
    assert_eq!(rig.fires(), 1);
}

#[test]
fn read_failure_skips_tick_without_state_change() {
    let mut rig = Rig::new();
    rig.hw.fail_reads = true;
    rig.tick();
    assert!(!rig.monitor.is_initialized());
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::HardwareFault {
                op: HardwareOp::MonitorRead,
                ..
            }
        )),
        1
    );

    rig.hw.fail_reads = false;
    rig.tick();
    assert!(rig.monitor.is_initialized());
}

#[test]
fn link_failure_is_traced_and_not_retried() {
    let mut rig = Rig::new();
    rig.link.fail_writes = true;
    rig.tick();
    rig.hold(PinState::High, 500);
    rig.hold(PinState::Low, 3000);

    assert_eq!(rig.fires(), 0);
    assert!(rig.monitor.has_fired());
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::HardwareFault {
                op: HardwareOp::SerialWrite,
                ..
            }
        )),
        1
    );
}
