//! Integration tests for the full polling loop: drain, then monitor.

use embedded_hal::digital::PinState;
use relaybridge::app::channels::{MONITOR_INPUT, RelayChannel};
use relaybridge::app::controller::Controller;
use relaybridge::app::events::AppEvent;
use relaybridge::config::ControllerConfig;

use super::mock_hw::{MockBoard, MockClock, MockDelay, MockLink, RecordingSink};

struct Rig {
    ctl: Controller,
    hw: MockBoard,
    link: MockLink,
    clock: MockClock,
    delay: MockDelay,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        let mut ctl = Controller::new(ControllerConfig::default());
        let mut sink = RecordingSink::new();
        ctl.start(&mut sink);
        Self {
            ctl,
            hw: MockBoard::new(),
            link: MockLink::new(),
            clock: MockClock::new(0),
            delay: MockDelay::default(),
            sink,
        }
    }

    fn poll(&mut self) {
        self.ctl.poll(
            &mut self.hw,
            &mut self.link,
            &self.clock,
            &mut self.delay,
            &mut self.sink,
        );
    }

    fn run(&mut self, ms: u32) {
        for _ in 0..ms / 10 {
            self.clock.advance(10);
            self.poll();
        }
    }
}

#[test]
fn start_emits_banner() {
    let rig = Rig::new();
    assert_eq!(rig.sink.events, vec![AppEvent::Started]);
}

#[test]
fn one_poll_drains_every_buffered_line_then_ticks_monitor() {
    let mut rig = Rig::new();
    rig.link.send(b"$out01on\r$out11on\r$in01\r$ad\r");
    rig.hw.adc_value = 42;
    rig.poll();

    assert!(rig.link.rx.is_empty());
    assert_eq!(rig.link.tx_text(), "off\r0042\r");
    assert_eq!(
        rig.hw.level(RelayChannel::new(1).unwrap().address()),
        PinState::Low
    );
    assert_eq!(
        rig.hw.level(RelayChannel::new(11).unwrap().address()),
        PinState::Low
    );

    // Monitor ran after the commands.
    assert!(matches!(
        rig.sink.events.last(),
        Some(AppEvent::MonitorInitialized { .. })
    ));
    assert!(rig.ctl.monitor().is_initialized());
}

#[test]
fn button_hold_injects_hardcheck_between_responses() {
    let mut rig = Rig::new();
    rig.poll();
    rig.run(500);

    rig.hw.set_level(MONITOR_INPUT, PinState::Low);
    rig.run(1200);
    assert_eq!(rig.link.tx_text(), "\r##hardcheck\r");

    // Commands keep working while the button stays held, no re-fire.
    rig.link.send(b"$ad\r");
    rig.run(3000);
    assert_eq!(rig.link.tx_text(), "\r##hardcheck\r0000\r");
    assert_eq!(rig.sink.count(|e| *e == AppEvent::HardCheckSent), 1);
}

#[test]
fn hardware_fault_does_not_stop_the_loop() {
    let mut rig = Rig::new();
    rig.hw.fail_writes = true;
    rig.link.send(b"$out05on\r$ad\r");
    rig.hw.adc_value = 1;
    rig.poll();

    assert_eq!(rig.link.tx_text(), "0001\r");
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::HardwareFault { .. })),
        1
    );
}

#[test]
fn controller_uses_configured_windows() {
    let config = ControllerConfig {
        debounce_ms: 10,
        hold_ms: 50,
        fire_pause_ms: 5,
        ..ControllerConfig::DEFAULT
    };
    let mut ctl = Controller::new(config);
    assert_eq!(ctl.config().hold_ms, 50);

    let mut hw = MockBoard::new();
    let mut link = MockLink::new();
    let clock = MockClock::new(0);
    let mut delay = MockDelay::default();
    let mut sink = RecordingSink::new();

    hw.set_level(MONITOR_INPUT, PinState::Low);
    for _ in 0..10 {
        ctl.poll(&mut hw, &mut link, &clock, &mut delay, &mut sink);
        clock.advance(10);
    }
    assert_eq!(link.tx, b"\r##hardcheck\r");
    assert_eq!(delay.total_ns, 5_000_000);
}
