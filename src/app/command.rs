//! RS-485 command grammar.
//!
//! One trimmed line maps to exactly one [`Command`].  Clauses are tried in
//! priority order and the first match wins:
//!
//! | Line                    | Command                       |
//! |-------------------------|-------------------------------|
//! | `##hardcheck`           | [`Command::HardCheck`]        |
//! | `$outNN…` (len ≥ 8)     | [`Command::RelaySet`]         |
//! | `$inNN…` (len ≥ 5)      | [`Command::InputQuery`]       |
//! | `$ad`                   | [`Command::AnalogQuery`]      |
//! | anything else           | [`Command::Unknown`]          |
//!
//! Channel numbers are carried raw; range checking happens at dispatch so
//! an out-of-range number is a visible branch rather than a parse miss.

pub const HARDCHECK: &[u8] = b"##hardcheck";

const RELAY_PREFIX: &[u8] = b"$out";
const RELAY_MIN_LEN: usize = 8;
const INPUT_PREFIX: &[u8] = b"$in";
const INPUT_MIN_LEN: usize = 5;
const ANALOG: &[u8] = b"$ad";

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// External self-test hook; logged only.
    HardCheck,
    /// Energise (`on == true`) or release a relay.
    RelaySet { channel: i32, on: bool },
    /// Report whether a digital input is asserted.
    InputQuery { channel: i32 },
    /// Sample the analog front end.
    AnalogQuery,
    /// No clause matched.
    Unknown,
}

impl Command {
    /// Tokenize one line.  Leading and trailing whitespace is ignored.
    pub fn parse(line: &[u8]) -> Self {
        let cmd = line.trim_ascii();

        if cmd == HARDCHECK {
            return Self::HardCheck;
        }

        if cmd.starts_with(RELAY_PREFIX) && cmd.len() >= RELAY_MIN_LEN {
            return Self::RelaySet {
                channel: parse_leading_int(&cmd[4..6]),
                on: cmd.ends_with(b"on"),
            };
        }

        if cmd.starts_with(INPUT_PREFIX) && cmd.len() >= INPUT_MIN_LEN {
            return Self::InputQuery {
                channel: parse_leading_int(&cmd[3..5]),
            };
        }

        if cmd == ANALOG {
            return Self::AnalogQuery;
        }

        Self::Unknown
    }
}

/// Integer conversion used for the two-digit channel field.
///
/// Skips leading whitespace, accepts an optional sign, then consumes decimal
/// digits until the first non-digit.  No digits yields 0, which every
/// channel range rejects.
fn parse_leading_int(field: &[u8]) -> i32 {
    let mut rest = field.trim_ascii_start();
    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let value = rest
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i32, |acc, b| acc * 10 + i32::from(b - b'0'));

    if negative { -value } else { value }
}
