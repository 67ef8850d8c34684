//! PCF8574 8-bit quasi-bidirectional I/O expander.
//!
//! The chip has no direction register: every pin is an open-drain output
//! with a weak pull-up.  Writing a 1 releases the pin so it can be read as
//! an input; writing a 0 pulls it low.  A read returns the actual level on
//! all eight pins.
//!
//! The driver keeps a shadow of the last byte written, so single-pin writes
//! never disturb the other seven.  It borrows the bus per call so several
//! chips can share one [`I2c`] instance.

use embedded_hal::digital::PinState;
use embedded_hal::i2c::{Error as _, I2c};

use crate::app::channels::{PINS_PER_BANK, PinMode};
use crate::error::ExpanderError;

/// Power-on state of the port latch: all pins released (HIGH).
const POWER_ON_LATCH: u8 = 0xFF;

pub struct Pcf8574 {
    address: u8,
    latch: u8,
}

impl Pcf8574 {
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            latch: POWER_ON_LATCH,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Last byte pushed to the port latch.
    pub fn latch(&self) -> u8 {
        self.latch
    }

    /// Drive one pin and push the whole latch byte.
    pub fn write_pin<B: I2c>(
        &mut self,
        bus: &mut B,
        pin: u8,
        level: PinState,
    ) -> Result<(), ExpanderError> {
        let mask = pin_mask(pin)?;
        let next = match level {
            PinState::High => self.latch | mask,
            PinState::Low => self.latch & !mask,
        };
        self.push(bus, next)
    }

    /// Read the level of one pin.
    pub fn read_pin<B: I2c>(&mut self, bus: &mut B, pin: u8) -> Result<PinState, ExpanderError> {
        let mask = pin_mask(pin)?;
        let port = self.read_port(bus)?;
        Ok(PinState::from(port & mask != 0))
    }

    /// Read all eight pins at once.
    pub fn read_port<B: I2c>(&mut self, bus: &mut B) -> Result<u8, ExpanderError> {
        let mut buf = [0u8; 1];
        bus.read(self.address, &mut buf)
            .map_err(|e| ExpanderError::Bus(e.kind()))?;
        Ok(buf[0])
    }

    /// Prepare a pin for `mode`.  There is no direction register: an output
    /// needs no bus traffic, while an input must be released HIGH to be
    /// readable, so switching to input pushes a 1 for that bit.
    pub fn set_mode<B: I2c>(
        &mut self,
        bus: &mut B,
        pin: u8,
        mode: PinMode,
    ) -> Result<(), ExpanderError> {
        let mask = pin_mask(pin)?;
        match mode {
            PinMode::Output => Ok(()),
            PinMode::Input => self.push(bus, self.latch | mask),
        }
    }

    fn push<B: I2c>(&mut self, bus: &mut B, byte: u8) -> Result<(), ExpanderError> {
        bus.write(self.address, &[byte])
            .map_err(|e| ExpanderError::Bus(e.kind()))?;
        self.latch = byte;
        Ok(())
    }
}

fn pin_mask(pin: u8) -> Result<u8, ExpanderError> {
    if pin < PINS_PER_BANK {
        Ok(1 << pin)
    } else {
        Err(ExpanderError::InvalidPin(pin))
    }
}
