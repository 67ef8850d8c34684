//! Logical channel numbering and its mapping onto expander pins.
//!
//! | Logical        | Expander  | Pins   |
//! |----------------|-----------|--------|
//! | Relay 1–8      | `RelayA`  | P0–P7  |
//! | Relay 9–11     | `RelayB`  | P0–P2  |
//! | Input 1–8      | `InputA`  | P0–P7  |
//! | Input 16       | `InputB`  | P7     |
//!
//! Every line on the board is active-low: a relay is energised by driving
//! its pin LOW, and an input is asserted when it reads LOW.

use embedded_hal::digital::PinState;

/// Level that means "energised" for relays and "asserted" for inputs.
pub const ACTIVE_LEVEL: PinState = PinState::Low;
/// Resting level of a de-energised relay or an open input.
pub const INACTIVE_LEVEL: PinState = PinState::High;

/// Pins per PCF8574 bank.
pub const PINS_PER_BANK: u8 = 8;

/// The four port-expander chips on the shared I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expander {
    RelayA,
    RelayB,
    InputA,
    InputB,
}

impl Expander {
    pub const ALL: [Self; 4] = [Self::RelayA, Self::RelayB, Self::InputA, Self::InputB];

    /// Short tag used in trace lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RelayA => "PCF1",
            Self::RelayB => "PCF2",
            Self::InputA => "PCF_IN1",
            Self::InputB => "PCF_IN2",
        }
    }
}

/// Data-direction of one expander pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// One physical pin: which chip, and the zero-based offset on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAddress {
    pub expander: Expander,
    pub pin: u8,
}

impl PinAddress {
    pub const fn new(expander: Expander, pin: u8) -> Self {
        Self { expander, pin }
    }
}

/// IN16: bank B of the input expanders, P7.  Polled every loop tick.
pub const MONITOR_INPUT: PinAddress = PinAddress::new(Expander::InputB, 7);

/// Which kind of channel number a command referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Relay,
    Input,
}

// ───────────────────────────────────────────────────────────────
// Relay channels
// ───────────────────────────────────────────────────────────────

/// A validated relay number in `1..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayChannel(u8);

impl RelayChannel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 11;

    /// Returns `None` when `number` is outside `1..=11`.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= Self::MIN && number <= Self::MAX {
            Some(Self(number))
        } else {
            None
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Relays 1–8 live on bank A, 9–11 on bank B.
    pub const fn address(self) -> PinAddress {
        let idx = self.0 - 1;
        if idx < PINS_PER_BANK {
            PinAddress::new(Expander::RelayA, idx)
        } else {
            PinAddress::new(Expander::RelayB, idx - PINS_PER_BANK)
        }
    }

    /// Every relay channel, in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

// ───────────────────────────────────────────────────────────────
// Input channels
// ───────────────────────────────────────────────────────────────

/// A validated digital input number in `1..=8` (bank A only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputChannel(u8);

impl InputChannel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub const fn new(number: u8) -> Option<Self> {
        if number >= Self::MIN && number <= Self::MAX {
            Some(Self(number))
        } else {
            None
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn address(self) -> PinAddress {
        PinAddress::new(Expander::InputA, self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}
