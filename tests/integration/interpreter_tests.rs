//! Integration tests for RS-485 line → command → expander/ADC pipeline.

use embedded_hal::digital::PinState;
use relaybridge::app::channels::{ChannelKind, Expander, InputChannel, PinAddress, RelayChannel};
use relaybridge::app::events::{AppEvent, HardwareOp};
use relaybridge::app::interpreter::CommandInterpreter;

use super::mock_hw::{MockBoard, MockLink, RecordingSink};

struct Rig {
    interp: CommandInterpreter,
    hw: MockBoard,
    link: MockLink,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self {
            interp: CommandInterpreter::new(0),
            hw: MockBoard::new(),
            link: MockLink::new(),
            sink: RecordingSink::new(),
        }
    }

    fn send(&mut self, bytes: &[u8]) {
        self.link.send(bytes);
        self.interp.drain(&mut self.hw, &mut self.link, &mut self.sink);
    }
}

// ── Relays ───────────────────────────────────────────────────

#[test]
fn every_relay_switches_exactly_one_pin() {
    for relay in RelayChannel::all() {
        let n = relay.number();
        let addr = relay.address();

        let mut rig = Rig::new();
        rig.send(format!("$out{n:02}on\r").as_bytes());
        assert_eq!(rig.hw.writes, vec![(addr, PinState::Low)], "relay {n} on");
        let low = rig.hw.relay_levels().iter().filter(|l| **l == PinState::Low).count();
        assert_eq!(low, 1, "only relay {n} energised");

        rig.send(format!("$out{n:02}off\r").as_bytes());
        assert_eq!(rig.hw.writes.last(), Some(&(addr, PinState::High)));
        assert!(rig.hw.relay_levels().iter().all(|l| *l == PinState::High));
        assert!(rig.link.tx.is_empty(), "relay commands never respond");
    }
}

#[test]
fn relay_trace_names_chip_and_pin() {
    let mut rig = Rig::new();
    rig.send(b"$out10on\n");
    assert!(rig.sink.events.contains(&AppEvent::RelaySwitched {
        channel: 10,
        on: true,
        expander: Expander::RelayB,
        pin: 1,
    }));
}

#[test]
fn out_of_range_relays_change_nothing() {
    let mut rig = Rig::new();
    rig.send(b"$out00on\r$out12on\r$out99off\r$outxxon\r");
    assert!(rig.hw.writes.is_empty());
    assert!(rig.link.tx.is_empty());
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::ChannelOutOfRange {
                kind: ChannelKind::Relay,
                ..
            }
        )),
        4
    );
}

#[test]
fn short_relay_command_is_unknown() {
    let mut rig = Rig::new();
    rig.send(b"$out1on\r");
    assert!(rig.hw.writes.is_empty());
    assert_eq!(rig.sink.count(|e| *e == AppEvent::UnknownCommand), 1);
}

// ── Inputs ───────────────────────────────────────────────────

#[test]
fn input_query_reports_active_low() {
    for input in InputChannel::all() {
        let n = input.number();
        let mut rig = Rig::new();

        rig.send(format!("$in{n:02}\r").as_bytes());
        assert_eq!(rig.link.take_tx(), b"off\r");

        rig.hw.set_level(input.address(), PinState::Low);
        rig.send(format!("$in{n:02}\r").as_bytes());
        assert_eq!(rig.link.take_tx(), b"on\r");

        // Idempotent without hardware change.
        rig.send(format!("$in{n:02}\r$in{n:02}\r").as_bytes());
        assert_eq!(rig.link.take_tx(), b"on\ron\r");
    }
}

#[test]
fn input_out_of_range_is_silent() {
    let mut rig = Rig::new();
    rig.send(b"$in00\r$in09\r$in16\r");
    assert!(rig.link.tx.is_empty());
    assert!(rig.hw.reads.is_empty());
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::ChannelOutOfRange {
                kind: ChannelKind::Input,
                ..
            }
        )),
        3
    );
}

#[test]
fn input_read_failure_sends_nothing() {
    let mut rig = Rig::new();
    rig.hw.fail_reads = true;
    rig.send(b"$in01\r");
    assert!(rig.link.tx.is_empty());
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::HardwareFault {
                op: HardwareOp::InputRead,
                ..
            }
        )),
        1
    );
}

// ── Analog ───────────────────────────────────────────────────

#[test]
fn analog_reading_is_four_digits() {
    let mut rig = Rig::new();
    rig.hw.adc_value = 7;
    rig.send(b"$ad\r");
    assert_eq!(rig.link.take_tx(), b"0007\r");

    rig.hw.adc_value = 4095;
    rig.send(b"$ad\n");
    assert_eq!(rig.link.take_tx(), b"4095\r");
    assert!(rig.sink.events.contains(&AppEvent::AnalogSampled { raw: 4095 }));
}

#[test]
fn analog_failure_sends_nothing() {
    let mut rig = Rig::new();
    rig.hw.fail_adc = true;
    rig.send(b"$ad\r");
    assert!(rig.link.tx.is_empty());
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::HardwareFault { .. })),
        1
    );
}

// ── Hardcheck / unknown / framing ───────────────────────────

#[test]
fn hardcheck_logs_only() {
    let mut rig = Rig::new();
    rig.send(b"##hardcheck\r");
    assert!(rig.link.tx.is_empty());
    assert!(rig.hw.writes.is_empty());
    assert!(rig.hw.reads.is_empty());
    assert!(rig.sink.events.contains(&AppEvent::HardCheckReceived));
}

#[test]
fn unknown_line_is_logged_not_answered() {
    let mut rig = Rig::new();
    rig.send(b"$foo\r");
    assert!(rig.link.tx.is_empty());
    assert!(rig.hw.writes.is_empty());
    assert_eq!(rig.sink.count(|e| *e == AppEvent::UnknownCommand), 1);
}

#[test]
fn unterminated_line_never_dispatches() {
    let mut rig = Rig::new();
    rig.send(b"$out01on");
    assert!(rig.hw.writes.is_empty());
    assert!(rig.sink.events.is_empty());

    // Terminator in a later drain completes it.
    rig.send(b"\r");
    assert_eq!(
        rig.hw.writes,
        vec![(PinAddress::new(Expander::RelayA, 0), PinState::Low)]
    );
}

#[test]
fn empty_lines_produce_no_trace() {
    let mut rig = Rig::new();
    rig.send(b"\r\n\n\r");
    assert!(rig.sink.events.is_empty());
}

#[test]
fn whitespace_is_trimmed() {
    let mut rig = Rig::new();
    rig.send(b"  $out02on \t\r");
    assert_eq!(
        rig.hw.writes,
        vec![(PinAddress::new(Expander::RelayA, 1), PinState::Low)]
    );
}

#[test]
fn padding_wider_than_the_buffer_is_still_answered() {
    let mut rig = Rig::new();
    rig.hw.adc_value = 7;
    let mut line = vec![b' '; 70];
    line.extend_from_slice(b"$ad");
    line.extend_from_slice(&[b' '; 70]);
    line.push(b'\r');
    rig.send(&line);

    assert_eq!(rig.link.tx, b"0007\r");
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::LineOverflow { .. })),
        0
    );
}

#[test]
fn blank_line_is_traced_as_unknown() {
    let mut rig = Rig::new();
    rig.send(b"   \r");
    assert!(rig.link.tx.is_empty());
    assert_eq!(rig.sink.count(|e| *e == AppEvent::UnknownCommand), 1);
}

#[test]
fn write_then_read_in_one_drain_sees_write() {
    let mut rig = Rig::new();
    let relay = RelayChannel::new(3).unwrap().address();
    rig.send(b"$out03on\r$out03off\r");
    assert_eq!(rig.hw.level(relay), PinState::High);
    assert_eq!(rig.hw.writes.len(), 2);
}

#[test]
fn oversized_line_is_discarded() {
    let mut rig = Rig::new();
    let mut junk = vec![b'$'; 200];
    junk.push(b'\r');
    rig.send(&junk);
    rig.send(b"$ad\r");
    assert_eq!(rig.link.tx, b"0000\r");
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::LineOverflow { .. })),
        1
    );
}
