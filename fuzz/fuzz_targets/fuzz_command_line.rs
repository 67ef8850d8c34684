//! Fuzz target: `LineBuffer::feed` + `Command::parse`
//!
//! Drives arbitrary byte sequences through the line accumulator and the
//! command tokenizer and asserts that neither panics, that completed lines
//! never carry a terminator or leading whitespace, and that they never
//! exceed the buffer.
//!
//! cargo fuzz run fuzz_command_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use relaybridge::app::command::Command;
use relaybridge::app::line_buffer::{Feed, LineBuffer};
use relaybridge::config::LINE_CAPACITY;

fuzz_target!(|data: &[u8]| {
    let mut lines = LineBuffer::new();

    for &byte in data {
        if let Feed::Line(line) = lines.feed(byte) {
            assert!(
                !line.first().is_some_and(u8::is_ascii_whitespace),
                "leading whitespace was buffered"
            );
            assert!(line.len() <= LINE_CAPACITY, "line exceeds LINE_CAPACITY");
            assert!(
                !line.contains(&b'\r') && !line.contains(&b'\n'),
                "terminator leaked into line"
            );
            let _ = Command::parse(&line);
        }
    }

    // The raw buffer as a single line must parse too.
    let _ = Command::parse(data);
});
